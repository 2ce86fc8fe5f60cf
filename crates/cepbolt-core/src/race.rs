//! First-success race across redundant address providers.
//!
//! Every source gets its own task at the same instant. The first [`Address`]
//! to reach the coordinator wins; when several providers succeed at
//! effectively the same moment, whichever the runtime observes first wins.
//! That choice is not stable across runs and callers must not rely on it.
//!
//! The race resolves to exactly one [`RaceOutcome`]. Tasks still in flight at
//! that point are aborted, both after a win and after the deadline.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::Instant;

use crate::data_source::{AddressSource, SourceError};
use crate::{Address, Cep, ProviderId};

pub const DEFAULT_RACE_DEADLINE: Duration = Duration::from_millis(1_000);

/// One provider's failed attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub error: SourceError,
}

/// Winning lookup plus the failures observed before it arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceWin {
    pub address: Address,
    pub latency_ms: u64,
    pub failures: Vec<ProviderFailure>,
}

/// Terminal result of one race.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RaceOutcome {
    Success(RaceWin),
    /// Every provider reported an error; one entry per provider, in arrival order.
    Failure(Vec<ProviderFailure>),
    /// The deadline passed before any provider succeeded.
    Timeout { deadline: Duration },
}

impl RaceOutcome {
    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::Success(win) => Some(&win.address),
            Self::Failure(_) | Self::Timeout { .. } => None,
        }
    }

    /// True when the race failed and every provider said the CEP does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Failure(failures) => {
                !failures.is_empty() && failures.iter().all(|failure| failure.error.is_not_found())
            }
            Self::Success(_) | Self::Timeout { .. } => false,
        }
    }
}

/// Race coordinator over a fixed set of address sources.
///
/// Cheap to clone; holds configuration only. Must be driven from inside a
/// tokio runtime because each lookup runs on its own task.
#[derive(Clone)]
pub struct AddressRace {
    sources: Vec<Arc<dyn AddressSource>>,
    deadline: Duration,
}

impl AddressRace {
    pub fn new(sources: Vec<Arc<dyn AddressSource>>, deadline: Duration) -> Self {
        Self { sources, deadline }
    }

    pub fn providers(&self) -> Vec<ProviderId> {
        self.sources.iter().map(|source| source.id()).collect()
    }

    pub const fn deadline(&self) -> Duration {
        self.deadline
    }

    pub async fn race(&self, cep: &Cep) -> RaceOutcome {
        race(cep, &self.sources, self.deadline).await
    }
}

/// Queries every source concurrently and resolves to the first success, the
/// full list of failures, or a timeout once `deadline` has elapsed.
///
/// An empty source set resolves immediately to `Failure(vec![])`.
pub async fn race(
    cep: &Cep,
    sources: &[Arc<dyn AddressSource>],
    deadline: Duration,
) -> RaceOutcome {
    let started = Instant::now();
    let cutoff = tokio::time::sleep_until(started + deadline);
    tokio::pin!(cutoff);

    let mut pending = sources.iter().map(|source| source.id()).collect::<Vec<_>>();
    let mut failures = Vec::with_capacity(sources.len());

    // Dropping the set on any return path aborts the tasks that lost.
    let mut in_flight = JoinSet::new();
    for source in sources {
        let source = Arc::clone(source);
        let cep = cep.clone();
        in_flight.spawn(async move {
            let provider = source.id();
            (provider, source.lookup(&cep).await)
        });
    }

    loop {
        tokio::select! {
            biased;

            joined = in_flight.join_next() => match joined {
                Some(Ok((_, Ok(address)))) => {
                    return RaceOutcome::Success(RaceWin {
                        address,
                        latency_ms: elapsed_ms(started),
                        failures,
                    });
                }
                Some(Ok((provider, Err(error)))) => {
                    if let Some(index) = pending.iter().position(|id| *id == provider) {
                        pending.remove(index);
                    }
                    failures.push(ProviderFailure { provider, error });
                }
                // A panicked task cannot name its provider; whoever is still
                // pending once the set drains is charged below.
                Some(Err(_)) => {}
                None => break,
            },
            () = &mut cutoff => return RaceOutcome::Timeout { deadline },
        }
    }

    failures.extend(pending.into_iter().map(|provider| ProviderFailure {
        provider,
        error: SourceError::internal(format!("{provider} lookup task panicked")),
    }));

    RaceOutcome::Failure(failures)
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis().min(u128::from(u64::MAX)) as u64
}
