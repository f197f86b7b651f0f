//! Location provider boundary
//!
//! Lookups (IP, reverse geocoding) live outside the engine. The engine only
//! takes the resulting country key; the caller substitutes a fallback
//! (World unless configured otherwise) on any failure.

use crate::baseline::WORLD;
use crate::error::LocationError;

pub trait LocationProvider {
    /// Country name as the lookup service reports it (e.g. "Denmark")
    fn locate(&self) -> Result<String, LocationError>;
}

/// Provider with a predetermined answer
#[derive(Debug, Clone)]
pub struct StaticLocation(pub Result<String, LocationError>);

impl StaticLocation {
    pub fn country(name: &str) -> Self {
        Self(Ok(name.to_string()))
    }

    pub fn unavailable() -> Self {
        Self(Err(LocationError::Unavailable))
    }
}

impl LocationProvider for StaticLocation {
    fn locate(&self) -> Result<String, LocationError> {
        self.0.clone()
    }
}

/// Country key to estimate with; `fallback` when the provider fails
pub fn resolve_country_or(provider: &dyn LocationProvider, fallback: &str) -> String {
    match provider.locate() {
        Ok(country) if !country.trim().is_empty() => country.trim().to_string(),
        Ok(_) => fallback.to_string(),
        Err(e) => {
            tracing::warn!("Location lookup failed ({}), using {}", e, fallback);
            fallback.to_string()
        }
    }
}

pub fn resolve_country(provider: &dyn LocationProvider) -> String {
    resolve_country_or(provider, WORLD)
}
