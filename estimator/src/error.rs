//! Error types for the estimator
//!
//! Invalid input is rejected before any calculation runs; an unknown country
//! is never an error (it resolves to the World baseline).

use thiserror::Error;

/// Input rejected by the estimation function or the form layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    #[error("age must be between 0 and 120 years, got {0}")]
    AgeOutOfRange(f64),

    #[error("age is required")]
    MissingAge,

    #[error("gender is required")]
    MissingGender,

    #[error("unknown gender '{0}' (expected 'male' or 'female')")]
    InvalidGender(String),

    #[error("unknown mode '{0}' (expected 'simple' or 'advanced')")]
    InvalidMode(String),

    #[error("invalid birthdate '{0}' (expected YYYY-MM-DD)")]
    InvalidBirthdate(String),

    #[error("birthdate {0} must be within the last 120 years and not in the future")]
    BirthdateOutOfRange(chrono::NaiveDate),

    #[error("unknown lifestyle factor '{0}'")]
    UnknownFactor(String),

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("{value} is not an option for lifestyle factor '{factor}'")]
    InvalidFactorValue { factor: &'static str, value: i32 },
}

/// Failure to decode a shared result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShareError {
    #[error("shared link is missing '{0}'")]
    MissingField(&'static str),

    #[error("shared link has an invalid '{field}': {value}")]
    InvalidField { field: &'static str, value: String },

    #[error(transparent)]
    Input(#[from] EstimateError),
}

/// Failure reported by a location provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("location lookup is unavailable")]
    Unavailable,

    #[error("location lookup timed out")]
    TimedOut,

    #[error("location lookup failed: {0}")]
    Failed(String),
}

/// Failure to load an engine config file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}
