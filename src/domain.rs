//! Domain models for the people directory.
//!
//! This module contains the person record, the field validation rules, and
//! configuration.

/// The person record and its age type.
pub mod person;
pub use person::{Age, Person};

mod config;
pub use config::{Config, DEFAULT_CONFIG_FILE};

/// Field validation and normalization rules.
pub mod validate;
pub use validate::ValidationError;
