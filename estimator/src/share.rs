//! Shareable encoding of a calculation
//!
//! A shared link carries the inputs plus the transmitted result as a flat
//! query string. Loading a link rebuilds the form and recomputes; the
//! transmitted numbers are only used to detect drift.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::baseline::WORLD;
use crate::error::ShareError;
use crate::estimate::{estimate, EstimationResult};
use crate::form::FormState;
use crate::model::{Gender, LifestyleFactor, LifestyleFactors, Mode, MAX_AGE};

/// Largest gap between transmitted and recomputed years still accepted
pub const DRIFT_TOLERANCE_YEARS: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareParams {
    /// Exact age used by the calculation, fractional when it came from a
    /// birthdate
    pub age: f64,
    pub gender: Gender,
    pub country: String,
    pub mode: Mode,
    /// Factor values in canonical order; advanced mode only
    pub lifestyle: Option<Vec<i32>>,
    pub years_left: Option<f64>,
    pub life_expectancy: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Verification {
    Consistent,
    Drifted { transmitted: f64, recomputed: f64 },
    /// The link carried no `yearsLeft`
    Unverifiable,
}

fn one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn parse_field<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T, ShareError> {
    value.trim().parse().map_err(|_| ShareError::InvalidField {
        field,
        value: value.to_string(),
    })
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

impl ShareParams {
    pub fn from_result(result: &EstimationResult, factors: &LifestyleFactors) -> Self {
        Self {
            age: result.age,
            gender: result.gender,
            country: result.country_key.clone(),
            mode: result.mode,
            lifestyle: (result.mode == Mode::Advanced).then(|| factors.values().to_vec()),
            years_left: Some(one_decimal(result.remaining_years)),
            life_expectancy: Some(one_decimal(result.adjusted_life_expectancy)),
        }
    }

    pub fn to_query(&self) -> String {
        let mut pairs: Vec<(&str, String)> = vec![
            ("age", self.age.to_string()),
            ("gender", self.gender.to_string()),
            ("country", self.country.clone()),
            ("mode", self.mode.to_string()),
        ];
        if let Some(values) = &self.lifestyle {
            let joined = values
                .iter()
                .map(|v| v.to_string())
                .collect::<Vec<_>>()
                .join(",");
            pairs.push(("lifestyle", joined));
        }
        if let Some(years_left) = self.years_left {
            pairs.push(("yearsLeft", years_left.to_string()));
        }
        if let Some(life_expectancy) = self.life_expectancy {
            pairs.push(("lifeExpectancy", life_expectancy.to_string()));
        }

        pairs
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    pub fn share_url(&self, base: &str) -> String {
        format!("{}?{}", base.trim_end_matches('?'), self.to_query())
    }

    /// Parse a query string (with or without a leading `?`). Unknown keys are ignored.
    pub fn from_query(query: &str) -> Result<Self, ShareError> {
        let mut age = None;
        let mut gender = None;
        let mut country = None;
        let mut mode = Mode::Simple;
        let mut lifestyle = None;
        let mut years_left = None;
        let mut life_expectancy = None;

        let query = query.trim().trim_start_matches('?');
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(raw);
            match decode(key).as_str() {
                "age" => {
                    let parsed: f64 = parse_field("age", &value)?;
                    if !parsed.is_finite() || !(0.0..=MAX_AGE).contains(&parsed) {
                        return Err(ShareError::InvalidField { field: "age", value });
                    }
                    age = Some(parsed);
                }
                "gender" => gender = Some(value.parse::<Gender>()?),
                "country" => country = Some(value),
                "mode" => mode = value.parse::<Mode>()?,
                "lifestyle" => {
                    let values = value
                        .split(',')
                        .map(|v| parse_field::<i32>("lifestyle", v))
                        .collect::<Result<Vec<_>, _>>()?;
                    lifestyle = Some(values);
                }
                "yearsLeft" => years_left = Some(parse_field("yearsLeft", &value)?),
                "lifeExpectancy" => life_expectancy = Some(parse_field("lifeExpectancy", &value)?),
                _ => {}
            }
        }

        Ok(Self {
            age: age.ok_or(ShareError::MissingField("age"))?,
            gender: gender.ok_or(ShareError::MissingField("gender"))?,
            country: country
                .filter(|c: &String| !c.trim().is_empty())
                .unwrap_or_else(|| WORLD.to_string()),
            mode,
            lifestyle,
            years_left,
            life_expectancy,
        })
    }

    /// Rebuild the form the link was created from
    pub fn to_form(&self) -> Result<FormState, ShareError> {
        let mut form = FormState::new();
        form.age = Some(self.age);
        form.gender = Some(self.gender);
        form.country = Some(self.country.clone());
        form.set_mode(self.mode);

        if self.mode == Mode::Advanced {
            if let Some(values) = &self.lifestyle {
                // Positional; extra values are ignored
                for (factor, &value) in LifestyleFactor::ALL.iter().zip(values) {
                    form.set_factor(*factor, value)?;
                }
            }
        }
        Ok(form)
    }

    /// Recompute the shared calculation at `now`
    pub fn recompute(&self, now: NaiveDateTime) -> Result<EstimationResult, ShareError> {
        let input = self.to_form()?.to_input(now.date(), WORLD)?;
        Ok(estimate(&input, now)?)
    }

    /// Compare the transmitted years left with a recomputed result
    pub fn verify(&self, recomputed: &EstimationResult) -> Verification {
        let Some(transmitted) = self.years_left else {
            return Verification::Unverifiable;
        };
        let recomputed_years = one_decimal(recomputed.remaining_years);
        if (transmitted - recomputed_years).abs() > DRIFT_TOLERANCE_YEARS + 1e-9 {
            tracing::warn!(
                "Shared result drifted: link says {} years, recomputed {}",
                transmitted,
                recomputed_years
            );
            return Verification::Drifted {
                transmitted,
                recomputed: recomputed_years,
            };
        }
        Verification::Consistent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimateError;
    use crate::model::EstimationInput;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn advanced_factors() -> LifestyleFactors {
        LifestyleFactors::neutral()
            .with(LifestyleFactor::Smoking, -5)
            .and_then(|f| f.with(LifestyleFactor::Exercise, 4))
            .and_then(|f| f.with(LifestyleFactor::Stress, -2))
            .unwrap()
    }

    #[test]
    fn test_simple_query() {
        let input = EstimationInput::simple(30.0, Gender::Male, Some("Denmark"));
        let result = estimate(&input, now()).unwrap();
        let params = ShareParams::from_result(&result, &input.lifestyle_factors);

        assert_eq!(
            params.to_query(),
            "age=30&gender=male&country=Denmark&mode=simple&yearsLeft=48.9&lifeExpectancy=78.9"
        );
    }

    #[test]
    fn test_round_trip_rebuilds_input() {
        let factors = advanced_factors();
        let input =
            EstimationInput::advanced(42.0, Gender::Female, Some("United Kingdom"), factors);
        let result = estimate(&input, now()).unwrap();

        let url = ShareParams::from_result(&result, &factors).share_url("https://example.invalid/");
        assert!(url.contains("country=United%20Kingdom"));
        assert!(url.contains("lifestyle=-5%2C4%2C0%2C0%2C0%2C-2"));

        let query = url.split_once('?').unwrap().1;
        let loaded = ShareParams::from_query(query).unwrap();
        let rebuilt = loaded.to_form().unwrap().to_input(now().date(), WORLD).unwrap();
        assert_eq!(rebuilt, input);

        let recomputed = loaded.recompute(now()).unwrap();
        assert_eq!(recomputed, result);
        assert_eq!(loaded.verify(&recomputed), Verification::Consistent);
    }

    #[test]
    fn test_round_trip_keeps_fractional_age() {
        let mut form = FormState::new();
        form.birthdate = Some("1996-04-03".into());
        form.gender = Some(Gender::Male);
        form.country = Some("Denmark".into());
        form.set_mode(Mode::Advanced);
        form.set_factor(LifestyleFactor::Exercise, 2).unwrap();

        let input = form.to_input(now().date(), WORLD).unwrap();
        assert!(input.age.fract() > 0.0);
        let result = estimate(&input, now()).unwrap();

        let url = ShareParams::from_result(&result, form.lifestyle())
            .share_url("https://example.invalid/");
        let loaded = ShareParams::from_query(url.split_once('?').unwrap().1).unwrap();
        assert_eq!(loaded.age, input.age);

        let rebuilt = loaded.to_form().unwrap().to_input(now().date(), WORLD).unwrap();
        assert_eq!(rebuilt, input);
        let recomputed = loaded.recompute(now()).unwrap();
        assert_eq!(recomputed, result);
        assert_eq!(loaded.verify(&recomputed), Verification::Consistent);
    }

    #[test]
    fn test_age_range_is_checked_before_use() {
        assert!(matches!(
            ShareParams::from_query("age=120.4&gender=male"),
            Err(ShareError::InvalidField { field: "age", .. })
        ));
        assert!(matches!(
            ShareParams::from_query("age=-0.5&gender=male"),
            Err(ShareError::InvalidField { field: "age", .. })
        ));
        let params = ShareParams::from_query("age=120&gender=male").unwrap();
        assert_eq!(params.age, 120.0);
        let params = ShareParams::from_query("age=30.25&gender=male").unwrap();
        assert_eq!(params.age, 30.25);
    }

    #[test]
    fn test_browser_style_query() {
        let params = ShareParams::from_query(
            concat!(
                "?age=30&gender=female&country=United+States",
                "&mode=advanced&lifestyle=0,2,3&utm_source=x",
            ),
        )
        .unwrap();
        assert_eq!(params.country, "United States");
        assert_eq!(params.lifestyle, Some(vec![0, 2, 3]));
        assert_eq!(params.years_left, None);

        let form = params.to_form().unwrap();
        assert_eq!(form.lifestyle().get(LifestyleFactor::Diet), 3);
        assert_eq!(form.lifestyle().get(LifestyleFactor::Stress), 0);
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert_eq!(
            ShareParams::from_query("gender=male"),
            Err(ShareError::MissingField("age"))
        );
        assert_eq!(
            ShareParams::from_query("age=30"),
            Err(ShareError::MissingField("gender"))
        );
        assert!(matches!(
            ShareParams::from_query("age=thirty&gender=male"),
            Err(ShareError::InvalidField { field: "age", .. })
        ));
        assert!(matches!(
            ShareParams::from_query("age=30&gender=robot"),
            Err(ShareError::Input(EstimateError::InvalidGender(_)))
        ));

        let params =
            ShareParams::from_query("age=30&gender=male&mode=advanced&lifestyle=7").unwrap();
        assert!(matches!(
            params.to_form(),
            Err(ShareError::Input(EstimateError::InvalidFactorValue { .. }))
        ));
    }

    #[test]
    fn test_drift_detection() {
        let params =
            ShareParams::from_query("age=30&gender=male&country=Denmark&yearsLeft=50").unwrap();
        let recomputed = params.recompute(now()).unwrap();
        assert_eq!(
            params.verify(&recomputed),
            Verification::Drifted {
                transmitted: 50.0,
                recomputed: 48.9
            }
        );

        let unverified = ShareParams::from_query("age=30&gender=male").unwrap();
        assert_eq!(unverified.verify(&recomputed), Verification::Unverifiable);
        assert_eq!(unverified.country, WORLD);
    }
}
