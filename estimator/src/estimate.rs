//! Estimation Function
//!
//! Combines the baseline, the age and the lifestyle impact into a result
//! snapshot. Pure given `now`: identical inputs give identical results.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::Serialize;

use crate::baseline;
use crate::countdown::{Clock, CountdownState};
use crate::error::EstimateError;
use crate::model::{EstimationInput, Gender, Mode, MAX_AGE};
use crate::stats::DerivedStats;

/// Immutable result of one calculation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimationResult {
    pub age: f64,
    pub gender: Gender,
    pub mode: Mode,
    /// Resolved baseline key (an unknown country shows up here as "World")
    pub country_key: String,
    pub base_life_expectancy: f64,
    pub lifestyle_impact: i32,
    pub adjusted_life_expectancy: f64,
    pub remaining_years: f64,
    pub remaining_days: i64,
    pub end_date: NaiveDate,
    pub life_percentage: u8,
    pub data_source_name: String,
    pub derived_stats: DerivedStats,
}

impl EstimationResult {
    /// Local midnight at the start of `end_date`
    pub fn end_local(&self) -> NaiveDateTime {
        self.end_date.and_time(NaiveTime::MIN)
    }

    /// Absolute countdown target: `end_local` resolved in the clock's zone
    pub fn end_instant(&self, clock: &dyn Clock) -> DateTime<Utc> {
        clock.instant_of(self.end_local())
    }

    /// Age has reached or passed the adjusted expectancy
    pub fn is_past_expectancy(&self) -> bool {
        self.remaining_years <= 0.0
    }

    pub fn countdown_at(&self, clock: &dyn Clock) -> CountdownState {
        CountdownState::between(self.end_instant(clock), clock.instant())
    }
}

fn validate_age(age: f64) -> Result<(), EstimateError> {
    if !age.is_finite() || !(0.0..=MAX_AGE).contains(&age) {
        return Err(EstimateError::AgeOutOfRange(age));
    }
    Ok(())
}

/// Same calendar date `years` years later. Feb 29 in a non-leap target year
/// rolls over to Mar 1.
pub fn shift_years(date: NaiveDate, years: i32) -> NaiveDate {
    let year = date.year() + years;
    date.with_year(year)
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(NaiveDate::MAX)
}

/// End date: today with the year shifted by the whole part of `remaining_years`
pub fn end_date_for(today: NaiveDate, remaining_years: f64) -> NaiveDate {
    shift_years(today, remaining_years.trunc() as i32)
}

/// Baseline plus lifestyle impact, never below zero
pub fn adjust_expectancy(base: f64, lifestyle_impact: i32) -> f64 {
    (base + lifestyle_impact as f64).max(0.0)
}

/// Years left before reaching `adjusted`, never below zero
pub fn years_remaining(adjusted: f64, age: f64) -> f64 {
    (adjusted - age).max(0.0)
}

fn life_percentage(age: f64, adjusted: f64) -> u8 {
    if adjusted <= 0.0 {
        return 100;
    }
    (age / adjusted * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Run one calculation at a fixed `now`
pub fn estimate(
    input: &EstimationInput,
    now: NaiveDateTime,
) -> Result<EstimationResult, EstimateError> {
    validate_age(input.age)?;

    let entry = baseline::resolve(input.country_key.as_deref());
    let base_life_expectancy = entry.for_gender(input.gender);
    let lifestyle_impact = input.lifestyle_impact();

    let adjusted_life_expectancy = adjust_expectancy(base_life_expectancy, lifestyle_impact);
    let remaining_years = years_remaining(adjusted_life_expectancy, input.age);

    let end_date = end_date_for(now.date(), remaining_years);
    let remaining_days = (end_date.and_time(NaiveTime::MIN) - now).num_days().max(0);

    tracing::debug!(
        "Estimated {} years remaining for age {} ({}, {})",
        remaining_years,
        input.age,
        input.gender,
        entry.country_key
    );

    Ok(EstimationResult {
        age: input.age,
        gender: input.gender,
        mode: input.mode,
        country_key: entry.country_key.to_string(),
        base_life_expectancy,
        lifestyle_impact,
        adjusted_life_expectancy,
        remaining_years,
        remaining_days,
        end_date,
        life_percentage: life_percentage(input.age, adjusted_life_expectancy),
        data_source_name: entry.display_name.to_string(),
        derived_stats: DerivedStats::for_age(input.age),
    })
}

/// Run one calculation against a clock
pub fn estimate_at(
    input: &EstimationInput,
    clock: &dyn Clock,
) -> Result<EstimationResult, EstimateError> {
    estimate(input, clock.now())
}
