//! Lifespan Estimator
//!
//! Life expectancy estimation from a per-country baseline and an additive
//! lifestyle score, with derived statistics, a drift-free countdown clock
//! and shareable result links.

pub mod achievements;
pub mod age;
pub mod baseline;
pub mod config;
pub mod countdown;
pub mod error;
pub mod estimate;
pub mod form;
pub mod location;
pub mod model;
pub mod scenarios;
pub mod share;
pub mod stats;

pub use model::*;
pub use config::EngineConfig;
pub use countdown::{Clock, ClockPhase, CountdownClock, CountdownState, FixedClock, SystemClock};
pub use error::{ConfigError, EstimateError, LocationError, ShareError};
pub use estimate::{estimate, estimate_at, EstimationResult};
pub use form::FormState;
pub use share::{ShareParams, Verification};
pub use stats::{format_large_number, DerivedStats};
