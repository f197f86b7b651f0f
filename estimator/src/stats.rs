//! Derived "fun fact" statistics
//!
//! Every statistic is a fixed per-day rate applied over the days lived,
//! floored to an integer.

use serde::Serialize;

/// Mean calendar year length used for every day count
pub const DAYS_PER_YEAR: f64 = 365.25;

const MINUTES_PER_DAY: f64 = 24.0 * 60.0;

/// Resting heart rate, beats per minute (100,800 beats/day)
pub const HEARTBEATS_PER_MINUTE: f64 = 70.0;
pub const WORDS_PER_DAY: f64 = 16_000.0;
pub const SLEEP_HOURS_PER_DAY: f64 = 8.0;
pub const BLINKS_PER_MINUTE: f64 = 17.0;
/// Blinking only counts while awake
pub const WAKING_HOURS_PER_DAY: f64 = 16.0;
pub const BREATHS_PER_MINUTE: f64 = 14.0;
pub const STEPS_PER_DAY: f64 = 7_000.0;
pub const MEALS_PER_DAY: f64 = 3.0;
pub const COFFEE_CUPS_PER_DAY: f64 = 3.4;
/// Coffee drinking starts at this age
pub const COFFEE_START_AGE: f64 = 15.0;
pub const LAUGHS_PER_DAY: f64 = 17.0;
pub const WATER_LITERS_PER_DAY: f64 = 2.0;
/// Distance the Earth travels around the sun in one year
pub const ORBIT_KM_PER_YEAR: f64 = 940_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DerivedStats {
    pub days_lived: u64,
    pub sunrises: u64,
    pub heartbeats: u64,
    pub words_spoken: u64,
    pub sleep_hours: u64,
    pub blinks: u64,
    pub breaths: u64,
    pub steps: u64,
    pub meals: u64,
    pub coffee_cups: u64,
    pub laughs: u64,
    pub water_liters: u64,
    pub space_km: u64,
}

fn floor_count(value: f64) -> u64 {
    // Saturating float->int cast; negative input becomes 0
    value.floor() as u64
}

impl DerivedStats {
    pub fn for_age(age: f64) -> Self {
        let age = age.max(0.0);
        let days = age * DAYS_PER_YEAR;
        let per_day = |rate: f64| floor_count(days * rate);

        Self {
            days_lived: per_day(1.0),
            sunrises: per_day(1.0),
            heartbeats: per_day(MINUTES_PER_DAY * HEARTBEATS_PER_MINUTE),
            words_spoken: per_day(WORDS_PER_DAY),
            sleep_hours: per_day(SLEEP_HOURS_PER_DAY),
            blinks: per_day(WAKING_HOURS_PER_DAY * 60.0 * BLINKS_PER_MINUTE),
            breaths: per_day(MINUTES_PER_DAY * BREATHS_PER_MINUTE),
            steps: per_day(STEPS_PER_DAY),
            meals: per_day(MEALS_PER_DAY),
            coffee_cups: floor_count(
                (age - COFFEE_START_AGE).max(0.0) * DAYS_PER_YEAR * COFFEE_CUPS_PER_DAY,
            ),
            laughs: per_day(LAUGHS_PER_DAY),
            water_liters: per_day(WATER_LITERS_PER_DAY),
            space_km: floor_count(age * ORBIT_KM_PER_YEAR),
        }
    }

    /// (label, value) pairs in display order
    pub fn entries(&self) -> [(&'static str, u64); 13] {
        [
            ("days lived", self.days_lived),
            ("sunrises", self.sunrises),
            ("heartbeats", self.heartbeats),
            ("words spoken", self.words_spoken),
            ("hours slept", self.sleep_hours),
            ("blinks", self.blinks),
            ("breaths", self.breaths),
            ("steps", self.steps),
            ("meals", self.meals),
            ("cups of coffee", self.coffee_cups),
            ("laughs", self.laughs),
            ("liters of water", self.water_liters),
            ("km through space", self.space_km),
        ]
    }
}

/// Compact rendering for large counts
pub fn format_large_number(n: u64) -> String {
    let value = n as f64;
    if value >= 1e9 {
        format!("{:.1} billion-equivalent", value / 1e9)
    } else if value >= 1e6 {
        format!("{:.1} million-equivalent", value / 1e6)
    } else if value >= 1e4 {
        format!("{} thousand-equivalent", (value / 1e3).round() as u64)
    } else {
        n.to_string()
    }
}
