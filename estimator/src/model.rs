//! Core data types shared by the estimator modules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::EstimateError;

/// Oldest age the estimator accepts, in years
pub const MAX_AGE: f64 = 120.0;

// ============================================================================
// Person
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "" => Err(EstimateError::MissingGender),
            other => Err(EstimateError::InvalidGender(other.to_string())),
        }
    }
}

/// Simple mode ignores lifestyle factors; advanced mode sums them in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Simple,
    Advanced,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Simple => "simple",
            Mode::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Mode::Simple),
            "advanced" => Ok(Mode::Advanced),
            other => Err(EstimateError::InvalidMode(other.to_string())),
        }
    }
}

// ============================================================================
// Lifestyle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifestyleFactor {
    Smoking,
    Exercise,
    Diet,
    Alcohol,
    Sleep,
    Stress,
}

impl LifestyleFactor {
    /// Canonical order; shared links encode factor values positionally in this order
    pub const ALL: [LifestyleFactor; 6] = [
        LifestyleFactor::Smoking,
        LifestyleFactor::Exercise,
        LifestyleFactor::Diet,
        LifestyleFactor::Alcohol,
        LifestyleFactor::Sleep,
        LifestyleFactor::Stress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LifestyleFactor::Smoking => "smoking",
            LifestyleFactor::Exercise => "exercise",
            LifestyleFactor::Diet => "diet",
            LifestyleFactor::Alcohol => "alcohol",
            LifestyleFactor::Sleep => "sleep",
            LifestyleFactor::Stress => "stress",
        }
    }

    /// Year adjustments a user can pick for this factor
    pub fn options(&self) -> &'static [i32] {
        match self {
            LifestyleFactor::Smoking => &[0, -5, -10],
            LifestyleFactor::Exercise => &[0, 2, 4, 6],
            LifestyleFactor::Diet => &[-2, 0, 3, 5],
            LifestyleFactor::Alcohol => &[0, -1, -3, -6],
            LifestyleFactor::Sleep => &[-2, -1, 0, 2],
            LifestyleFactor::Stress => &[2, 0, -2, -4],
        }
    }
}

impl fmt::Display for LifestyleFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifestyleFactor {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        LifestyleFactor::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or(EstimateError::UnknownFactor(key))
    }
}

/// Year adjustment for every lifestyle factor. Every key always has a value;
/// a fresh set is neutral (all zero).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LifestyleFactors {
    smoking: i32,
    exercise: i32,
    diet: i32,
    alcohol: i32,
    sleep: i32,
    stress: i32,
}

impl LifestyleFactors {
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn get(&self, factor: LifestyleFactor) -> i32 {
        match factor {
            LifestyleFactor::Smoking => self.smoking,
            LifestyleFactor::Exercise => self.exercise,
            LifestyleFactor::Diet => self.diet,
            LifestyleFactor::Alcohol => self.alcohol,
            LifestyleFactor::Sleep => self.sleep,
            LifestyleFactor::Stress => self.stress,
        }
    }

    /// Replace one factor's value with one of its allowed options
    pub fn set(&mut self, factor: LifestyleFactor, value: i32) -> Result<(), EstimateError> {
        if !factor.options().contains(&value) {
            return Err(EstimateError::InvalidFactorValue {
                factor: factor.as_str(),
                value,
            });
        }
        let slot = match factor {
            LifestyleFactor::Smoking => &mut self.smoking,
            LifestyleFactor::Exercise => &mut self.exercise,
            LifestyleFactor::Diet => &mut self.diet,
            LifestyleFactor::Alcohol => &mut self.alcohol,
            LifestyleFactor::Sleep => &mut self.sleep,
            LifestyleFactor::Stress => &mut self.stress,
        };
        *slot = value;
        Ok(())
    }

    /// Builder-style `set`
    pub fn with(mut self, factor: LifestyleFactor, value: i32) -> Result<Self, EstimateError> {
        self.set(factor, value)?;
        Ok(self)
    }

    /// Signed sum of all factors (the lifestyle impact)
    pub fn total(&self) -> i32 {
        self.values().iter().sum()
    }

    /// Values in canonical factor order
    pub fn values(&self) -> [i32; 6] {
        LifestyleFactor::ALL.map(|f| self.get(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (LifestyleFactor, i32)> + '_ {
        LifestyleFactor::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

// ============================================================================
// Estimation input
// ============================================================================

/// Validated input to [`crate::estimate::estimate`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationInput {
    pub age: f64,
    pub gender: Gender,
    /// `None` or an unknown key resolves to the World baseline
    pub country_key: Option<String>,
    pub mode: Mode,
    pub lifestyle_factors: LifestyleFactors,
}

impl EstimationInput {
    pub fn simple(age: f64, gender: Gender, country_key: Option<&str>) -> Self {
        Self {
            age,
            gender,
            country_key: country_key.map(str::to_string),
            mode: Mode::Simple,
            lifestyle_factors: LifestyleFactors::neutral(),
        }
    }

    pub fn advanced(
        age: f64,
        gender: Gender,
        country_key: Option<&str>,
        lifestyle_factors: LifestyleFactors,
    ) -> Self {
        Self {
            age,
            gender,
            country_key: country_key.map(str::to_string),
            mode: Mode::Advanced,
            lifestyle_factors,
        }
    }

    /// Lifestyle impact in years; always zero in simple mode
    pub fn lifestyle_impact(&self) -> i32 {
        match self.mode {
            Mode::Simple => 0,
            Mode::Advanced => self.lifestyle_factors.total(),
        }
    }
}
