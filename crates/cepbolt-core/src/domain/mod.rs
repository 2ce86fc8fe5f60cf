//! # Domain Models
//!
//! Canonical domain types for cepbolt lookups.
//!
//! ## Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Cep`] | Validated eight-digit postal code |
//! | [`Address`] | Canonical address record produced by exactly one provider |
//! | [`Temperature`] | Reading in Celsius, Fahrenheit and Kelvin |
//! | [`WeatherReport`] | Address plus the temperature of its city |
//!
//! ## Validation
//!
//! A [`Cep`] can only be built through [`Cep::parse`], so any function taking
//! a `&Cep` receives an identifier that already passed the format check:
//!
//! ```rust
//! use cepbolt_core::{Cep, ValidationError};
//!
//! assert!(Cep::parse("01001000").is_ok());
//! assert!(matches!(Cep::parse("123"), Err(ValidationError::InvalidCep { .. })));
//! ```

mod cep;
mod models;

pub use cep::{Cep, CEP_LEN};
pub use models::{Address, Temperature, WeatherReport};
