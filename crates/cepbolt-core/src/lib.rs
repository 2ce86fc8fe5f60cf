//! # Cepbolt Core
//!
//! Core contracts and domain types for resolving Brazilian postal codes (CEPs)
//! into addresses and current weather.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Canonical domain models** for CEPs, addresses and temperatures
//! - **Provider identifiers** for the ViaCEP, BrasilAPI and WeatherAPI adapters
//! - **Data source traits** implemented by every provider adapter
//! - **A first-success race** across redundant address providers
//! - **A sequential pipeline** from CEP to city to temperature
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (ViaCEP, BrasilAPI, WeatherAPI) |
//! | [`config`] | Provider set builder with environment overrides |
//! | [`data_source`] | Source traits and the shared error type |
//! | [`domain`] | Domain models (Cep, Address, Temperature) |
//! | [`error`] | Validation and lookup errors |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Provider payload normalization |
//! | [`pipeline`] | Sequential CEP → weather lookup |
//! | [`race`] | Concurrent first-success address race |
//! | [`source`] | Provider identifiers |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cepbolt_core::{Cep, ProviderSetBuilder, RaceOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let providers = ProviderSetBuilder::new().with_env()?.build()?;
//!
//!     let cep = Cep::parse("01001000")?;
//!     if let RaceOutcome::Success(win) = providers.race().race(&cep).await {
//!         println!("{} via {} in {}ms", win.address.city, win.address.source, win.latency_ms);
//!     }
//!
//!     let report = providers.pipeline().resolve("01001000").await?;
//!     println!("{:.1}°C", report.temperature.celsius);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  CLI / Web      │
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │  AddressRace    │     │ LookupPipeline   │
//! └────────┬────────┘     └────────┬─────────┘
//!          │                       │
//!          ▼                       ▼
//! ┌─────────────────┐     ┌──────────────────┐
//! │ Address/Weather │────▶│ HTTP Client      │
//! │ Source traits   │     │ (reqwest)        │
//! └─────────────────┘     └──────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ Domain Models   │
//! └─────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! ```rust
//! use cepbolt_core::{LookupError, SourceErrorKind};
//!
//! fn describe(error: &LookupError) -> &'static str {
//!     match error {
//!         LookupError::Validation(_) => "invalid zipcode",
//!         LookupError::NotFound(_) => "can not find zipcode",
//!         LookupError::Upstream(source) if source.kind() == SourceErrorKind::Transport => {
//!             "provider unreachable"
//!         }
//!         LookupError::Upstream(_) => "provider failed",
//!     }
//! }
//! ```
//!
//! ## Security
//!
//! - The WeatherAPI key is injected at construction and never logged or echoed
//! - Transport errors are stripped of request URLs

pub mod adapters;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod pipeline;
pub mod race;
pub mod source;

// Adapter implementations
pub use adapters::{BrasilApiAdapter, ViaCepAdapter, WeatherApiAdapter};

// Configuration
pub use config::{ProviderSet, ProviderSetBuilder};

// Data source traits and types
pub use data_source::{AddressSource, SourceError, SourceErrorKind, SourceFuture, WeatherSource};

// Domain models
pub use domain::{Address, Cep, Temperature, WeatherReport, CEP_LEN};

// Error types
pub use error::{LookupError, ValidationError};

// HTTP client types
pub use http_client::{HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient};

// Normalization
pub use normalize::{normalize_address, RawAddress};

// Lookup flows
pub use pipeline::LookupPipeline;
pub use race::{race, AddressRace, ProviderFailure, RaceOutcome, RaceWin, DEFAULT_RACE_DEADLINE};

// Source identifiers
pub use source::ProviderId;
