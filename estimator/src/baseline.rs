//! Baseline Table
//!
//! Per-country, per-gender life expectancy at birth. Lookups never fail: a
//! missing or unknown country resolves to the World entry.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::model::Gender;

/// Key of the fallback entry
pub const WORLD: &str = "World";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineEntry {
    pub country_key: &'static str,
    pub male: f64,
    pub female: f64,
    pub display_name: &'static str,
}

impl BaselineEntry {
    pub fn for_gender(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// (country key, male, female, display name)
const BASELINE_DATA: &[(&str, f64, f64, &str)] = &[
    ("Denmark", 78.9, 82.7, "Danmark"),
    ("Sweden", 80.8, 84.3, "Sverige"),
    ("Norway", 80.5, 84.2, "Norge"),
    ("Germany", 78.6, 83.4, "Tyskland"),
    ("United Kingdom", 79.4, 83.1, "Storbritannien"),
    ("United States", 76.3, 81.4, "USA"),
    ("France", 79.7, 85.6, "Frankrig"),
    ("Netherlands", 80.2, 83.9, "Holland"),
    ("Finland", 78.7, 84.5, "Finland"),
    ("Iceland", 81.3, 84.1, "Island"),
    ("Switzerland", 81.9, 85.6, "Schweiz"),
    ("Japan", 81.6, 87.7, "Japan"),
    (WORLD, 72.6, 77.1, "Verdensgennemsnit"),
];

static ENTRIES: Lazy<Vec<BaselineEntry>> = Lazy::new(|| {
    BASELINE_DATA
        .iter()
        .map(|&(country_key, male, female, display_name)| BaselineEntry {
            country_key,
            male,
            female,
            display_name,
        })
        .collect()
});

static BY_KEY: Lazy<HashMap<&'static str, usize>> = Lazy::new(|| {
    ENTRIES
        .iter()
        .enumerate()
        .map(|(i, entry)| (entry.country_key, i))
        .collect()
});

fn world_entry() -> &'static BaselineEntry {
    // BASELINE_DATA always carries WORLD (checked by test_world_entry_exists)
    &ENTRIES[BY_KEY[WORLD]]
}

/// Resolve a country key to its table entry, falling back to World
pub fn resolve(country_key: Option<&str>) -> &'static BaselineEntry {
    match country_key.and_then(|key| BY_KEY.get(key.trim())) {
        Some(&i) => &ENTRIES[i],
        None => {
            if let Some(key) = country_key {
                tracing::debug!("No baseline for '{}', using {}", key, WORLD);
            }
            world_entry()
        }
    }
}

/// Baseline life expectancy in years
pub fn lookup(country_key: Option<&str>, gender: Gender) -> f64 {
    resolve(country_key).for_gender(gender)
}

pub fn display_name(country_key: Option<&str>) -> &'static str {
    resolve(country_key).display_name
}

pub fn is_known(country_key: &str) -> bool {
    BY_KEY.contains_key(country_key.trim())
}

/// All entries in table order (World last)
pub fn countries() -> &'static [BaselineEntry] {
    &ENTRIES
}
