//! Age from a birthdate

use chrono::{Datelike, Months, NaiveDate};

use crate::error::EstimateError;
use crate::model::MAX_AGE;

/// Parse a `YYYY-MM-DD` birthdate
pub fn parse_birthdate(s: &str) -> Result<NaiveDate, EstimateError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EstimateError::InvalidBirthdate(s.to_string()))
}

/// A birthdate must not be in the future nor more than 120 years back
pub fn validate_birthdate(birth: NaiveDate, today: NaiveDate) -> Result<(), EstimateError> {
    let earliest = today
        .checked_sub_months(Months::new(MAX_AGE as u32 * 12))
        .unwrap_or(NaiveDate::MIN);
    if birth > today || birth < earliest {
        return Err(EstimateError::BirthdateOutOfRange(birth));
    }
    Ok(())
}

/// (years, months, days) between `birth` and `today`, borrowing like
/// calendar subtraction
fn calendar_diff(birth: NaiveDate, today: NaiveDate) -> (i32, i32, i32) {
    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i32 - birth.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_previous_month(today) as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }
    (years, months, days)
}

fn days_in_previous_month(date: NaiveDate) -> u32 {
    // Day 0 of this month is the last day of the previous one
    date.with_day(1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Fractional age: years + months/12 + days/365
pub fn precise_age(birth: NaiveDate, today: NaiveDate) -> Result<f64, EstimateError> {
    validate_birthdate(birth, today)?;
    let (years, months, days) = calendar_diff(birth, today);
    Ok(years as f64 + months as f64 / 12.0 + days as f64 / 365.0)
}

/// Completed years only
pub fn whole_years(birth: NaiveDate, today: NaiveDate) -> Result<u32, EstimateError> {
    validate_birthdate(birth, today)?;
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    Ok(years.max(0) as u32)
}
