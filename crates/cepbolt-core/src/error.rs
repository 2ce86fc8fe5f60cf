use thiserror::Error;

use crate::data_source::SourceError;

/// Validation and configuration errors exposed by `cepbolt-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("cep must be exactly {expected} ASCII digits, got '{value}'")]
    InvalidCep { value: String, expected: usize },

    #[error("invalid provider '{value}', expected one of viacep, brasilapi, weatherapi")]
    InvalidProvider { value: String },
    #[error("provider '{value}' does not serve addresses")]
    NotAnAddressProvider { value: String },
    #[error("at least one address provider must be enabled")]
    NoAddressProviders,

    #[error("race deadline must be greater than zero")]
    ZeroDeadline,
    #[error("setting '{name}' must be an integer number of milliseconds: '{value}'")]
    InvalidMillis { name: &'static str, value: String },
}

/// Failure of a sequential CEP → city → temperature lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("cep not found: {0}")]
    NotFound(SourceError),

    #[error("upstream failure: {0}")]
    Upstream(SourceError),
}

impl LookupError {
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "lookup.validation",
            Self::NotFound(_) => "lookup.not_found",
            Self::Upstream(_) => "lookup.upstream",
        }
    }
}
