//! Form state owned by the presentation layer
//!
//! Holds raw, possibly incomplete user choices. `to_input` validates them
//! into an [`EstimationInput`] right before a calculation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::age;
use crate::error::EstimateError;
use crate::model::{EstimationInput, Gender, LifestyleFactor, LifestyleFactors, Mode};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormState {
    pub age: Option<f64>,
    /// `YYYY-MM-DD`; preferred over `age` in advanced mode
    pub birthdate: Option<String>,
    pub gender: Option<Gender>,
    pub country: Option<String>,
    mode: Mode,
    lifestyle: LifestyleFactors,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switching to simple mode resets every factor to neutral
    pub fn set_mode(&mut self, mode: Mode) {
        if mode == Mode::Simple {
            self.lifestyle = LifestyleFactors::neutral();
        }
        self.mode = mode;
    }

    pub fn lifestyle(&self) -> &LifestyleFactors {
        &self.lifestyle
    }

    pub fn set_factor(&mut self, factor: LifestyleFactor, value: i32) -> Result<(), EstimateError> {
        self.lifestyle.set(factor, value)
    }

    fn resolve_age(&self, today: NaiveDate) -> Result<f64, EstimateError> {
        match (&self.birthdate, self.age, self.mode) {
            (Some(birthdate), _, Mode::Advanced) => {
                age::precise_age(age::parse_birthdate(birthdate)?, today)
            }
            (_, Some(age), _) => Ok(age),
            (Some(birthdate), None, Mode::Simple) => {
                age::whole_years(age::parse_birthdate(birthdate)?, today).map(f64::from)
            }
            (None, None, _) => Err(EstimateError::MissingAge),
        }
    }

    /// Validate the form into an estimation input
    pub fn to_input(
        &self,
        today: NaiveDate,
        default_country: &str,
    ) -> Result<EstimationInput, EstimateError> {
        let gender = self.gender.ok_or(EstimateError::MissingGender)?;
        let age = self.resolve_age(today)?;
        let country = self
            .country
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| default_country.to_string());

        Ok(EstimationInput {
            age,
            gender,
            country_key: Some(country),
            mode: self.mode,
            lifestyle_factors: self.lifestyle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_missing_fields() {
        let mut form = FormState::new();
        assert_eq!(form.to_input(today(), "World"), Err(EstimateError::MissingGender));

        form.gender = Some(Gender::Male);
        assert_eq!(form.to_input(today(), "World"), Err(EstimateError::MissingAge));

        form.age = Some(30.0);
        let input = form.to_input(today(), "World").unwrap();
        assert_eq!(input.country_key.as_deref(), Some("World"));
        assert_eq!(input.mode, Mode::Simple);
    }

    #[test]
    fn test_advanced_mode_prefers_birthdate() {
        let mut form = FormState::new();
        form.gender = Some(Gender::Female);
        form.age = Some(99.0);
        form.birthdate = Some("1996-04-17".to_string());
        form.country = Some("Denmark".to_string());
        form.set_mode(Mode::Advanced);

        let input = form.to_input(today(), "World").unwrap();
        assert!((input.age - 30.5).abs() < 1e-9);
        assert_eq!(input.country_key.as_deref(), Some("Denmark"));

        form.birthdate = Some("17/04/1996".to_string());
        assert!(matches!(
            form.to_input(today(), "World"),
            Err(EstimateError::InvalidBirthdate(_))
        ));
    }

    #[test]
    fn test_simple_mode_uses_whole_years_from_birthdate() {
        let mut form = FormState::new();
        form.gender = Some(Gender::Male);
        form.birthdate = Some("1996-10-18".to_string());
        let input = form.to_input(today(), "World").unwrap();
        assert_eq!(input.age, 29.0);
    }

    #[test]
    fn test_switching_to_simple_resets_factors() {
        let mut form = FormState::new();
        form.set_mode(Mode::Advanced);
        form.set_factor(LifestyleFactor::Exercise, 4).unwrap();
        assert_eq!(form.lifestyle().total(), 4);

        form.set_mode(Mode::Simple);
        assert_eq!(*form.lifestyle(), LifestyleFactors::neutral());
    }
}
