pub mod config;
pub mod countdown;
pub mod estimate;
pub mod lifestyle;
pub mod share;

use anyhow::{bail, Context, Result};
use clap::Args;
use estimator::location::{resolve_country_or, StaticLocation};
use estimator::{Gender, LifestyleFactor, LocationError, Mode};
use serde::Serialize;

use crate::state::AppState;

/// Form fields shared by every calculating command
#[derive(Args, Clone, Debug, Default)]
pub struct FormArgs {
    /// Age in years (0-120)
    #[arg(long)]
    pub age: Option<f64>,

    /// Birthdate as YYYY-MM-DD; used for a precise age in advanced mode
    #[arg(long)]
    pub birthdate: Option<String>,

    /// male or female
    #[arg(short, long)]
    pub gender: Option<String>,

    /// Country name (e.g. "Denmark"); falls back to the configured default
    #[arg(short, long)]
    pub country: Option<String>,

    /// Include lifestyle factors
    #[arg(long)]
    pub advanced: bool,

    /// Lifestyle factor as NAME=VALUE, repeatable (e.g. --factor exercise=4)
    #[arg(long = "factor", value_name = "NAME=VALUE")]
    pub factors: Vec<String>,
}

fn parse_factor(raw: &str) -> Result<(LifestyleFactor, i32)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("expected NAME=VALUE, got '{}'", raw);
    };
    let factor: LifestyleFactor = name.parse()?;
    let value: i32 = value
        .trim()
        .parse()
        .with_context(|| format!("'{}' is not a number", value))?;
    Ok((factor, value))
}

impl FormArgs {
    /// Copy the arguments into the app's form state
    pub fn apply(&self, state: &mut AppState) -> Result<()> {
        let form = &mut state.form;
        form.age = self.age;
        form.birthdate = self.birthdate.clone();
        form.gender = self
            .gender
            .as_deref()
            .map(str::parse::<Gender>)
            .transpose()?;

        // The command line stands in for the location lookup
        let provider = StaticLocation(self.country.clone().ok_or(LocationError::Unavailable));
        form.country = Some(resolve_country_or(&provider, &state.config.default_country));

        form.set_mode(if self.advanced { Mode::Advanced } else { Mode::Simple });
        for raw in &self.factors {
            if !self.advanced {
                tracing::warn!("Ignoring --factor {} outside advanced mode", raw);
                continue;
            }
            let (factor, value) = parse_factor(raw)?;
            form.set_factor(factor, value)?;
        }
        Ok(())
    }
}

/// Print `value` as pretty JSON, or the text rendering
pub fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use estimator::{EngineConfig, FixedClock};
    use std::sync::Arc;

    fn state() -> AppState {
        let now = chrono::NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        AppState::new(EngineConfig::default(), Arc::new(FixedClock(now)))
    }

    #[test]
    fn test_parse_factor() {
        assert_eq!(parse_factor("exercise=4").unwrap(), (LifestyleFactor::Exercise, 4));
        assert!(parse_factor("exercise").is_err());
        assert!(parse_factor("exercise=lots").is_err());
        assert!(parse_factor("bmi=2").is_err());
    }

    #[test]
    fn test_apply_fills_form() {
        let mut state = state();
        let args = FormArgs {
            age: Some(30.0),
            gender: Some("female".into()),
            advanced: true,
            factors: vec!["diet=5".into(), "alcohol=-1".into()],
            ..Default::default()
        };
        args.apply(&mut state).unwrap();

        assert_eq!(state.form.gender, Some(Gender::Female));
        assert_eq!(state.form.country.as_deref(), Some("World"));
        assert_eq!(state.form.mode(), Mode::Advanced);
        assert_eq!(state.form.lifestyle().total(), 4);
    }

    #[test]
    fn test_factors_ignored_in_simple_mode() {
        let mut state = state();
        let args = FormArgs {
            age: Some(30.0),
            gender: Some("male".into()),
            country: Some("Japan".into()),
            factors: vec!["diet=5".into()],
            ..Default::default()
        };
        args.apply(&mut state).unwrap();
        assert_eq!(state.form.lifestyle().total(), 0);
        assert_eq!(state.form.country.as_deref(), Some("Japan"));
    }
}
