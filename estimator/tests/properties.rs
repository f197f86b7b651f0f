//! Property-based tests for the estimation engine
//!
//! Uses proptest for randomized inputs with shrinking:
//! - remaining years and adjusted expectancy never go negative
//! - unknown countries behave exactly like World
//! - the calculation is pure for a fixed clock
//! - countdown totals strictly decrease as time moves forward

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
use estimator::baseline::{self, WORLD};
use estimator::estimate::{adjust_expectancy, years_remaining};
use estimator::{
    estimate, CountdownState, EstimationInput, Gender, LifestyleFactor, LifestyleFactors, Mode,
};
use proptest::prelude::*;

fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 17)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

fn gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female)]
}

fn country() -> impl Strategy<Value = Option<String>> {
    let known: Vec<Option<String>> = baseline::countries()
        .iter()
        .map(|e| Some(e.country_key.to_string()))
        .collect();
    prop_oneof![
        proptest::sample::select(known),
        Just(None),
        "[A-Z][a-z]{2,12}".prop_map(Some),
    ]
}

fn factors() -> impl Strategy<Value = LifestyleFactors> {
    let choices: Vec<_> = LifestyleFactor::ALL
        .iter()
        .map(|f| proptest::sample::select(f.options().to_vec()))
        .collect();
    choices.prop_map(|values| {
        let mut factors = LifestyleFactors::neutral();
        for (factor, value) in LifestyleFactor::ALL.iter().zip(values) {
            factors.set(*factor, value).unwrap();
        }
        factors
    })
}

fn input() -> impl Strategy<Value = EstimationInput> {
    (
        0.0f64..=120.0,
        gender(),
        country(),
        prop_oneof![Just(Mode::Simple), Just(Mode::Advanced)],
        factors(),
    )
        .prop_map(|(age, gender, country_key, mode, lifestyle_factors)| EstimationInput {
            age,
            gender,
            country_key,
            mode,
            lifestyle_factors,
        })
}

proptest! {
    #[test]
    fn remaining_years_never_negative(age in 0.0f64..=120.0, base in 0.0f64..130.0) {
        let remaining = years_remaining(base, age);
        prop_assert!(remaining >= 0.0);
        prop_assert_eq!(remaining, (base - age).max(0.0));
    }

    #[test]
    fn adjusted_expectancy_never_negative(base in 0.0f64..130.0, impact in -1000i32..1000) {
        let adjusted = adjust_expectancy(base, impact);
        prop_assert!(adjusted >= 0.0);
        prop_assert_eq!(adjusted, (base + impact as f64).max(0.0));
    }

    #[test]
    fn unknown_country_is_world(name in "[A-Za-z ]{1,20}", g in gender()) {
        prop_assume!(!baseline::is_known(&name));
        prop_assert_eq!(baseline::lookup(Some(&name), g), baseline::lookup(Some(WORLD), g));
    }

    #[test]
    fn estimate_is_pure_and_bounded(input in input()) {
        let first = estimate(&input, fixed_now()).unwrap();
        let second = estimate(&input, fixed_now()).unwrap();
        prop_assert_eq!(&first, &second);

        prop_assert!(first.remaining_years >= 0.0);
        prop_assert!(first.adjusted_life_expectancy >= 0.0);
        prop_assert!(first.remaining_days >= 0);
        prop_assert!(first.life_percentage <= 100);
        if input.mode == Mode::Simple {
            prop_assert_eq!(first.lifestyle_impact, 0);
        } else {
            prop_assert_eq!(first.lifestyle_impact, input.lifestyle_factors.total());
        }
    }

    #[test]
    fn countdown_strictly_decreases(offset in 2i64..5_000_000_000, steps in 1usize..20) {
        let start = Utc.from_utc_datetime(&fixed_now());
        let end = start + chrono::Duration::seconds(offset);

        let mut previous = CountdownState::between(end, start);
        for step in 1..=steps as i64 {
            let state = CountdownState::between(end, start + chrono::Duration::seconds(step));
            if state.expired {
                prop_assert_eq!(state.total_seconds, 0);
                break;
            }
            prop_assert!(state.total_seconds < previous.total_seconds);
            prop_assert!(state.hours < 24 && state.minutes < 60 && state.seconds < 60);
            previous = state;
        }
    }
}
