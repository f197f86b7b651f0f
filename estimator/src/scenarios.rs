//! "What if" scenarios: years gained by improving one factor

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::EstimateError;
use crate::model::{LifestyleFactor, LifestyleFactors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    QuitSmoking,
    MoreExercise,
    HealthyDiet,
    LessStress,
}

impl Scenario {
    pub const ALL: [Scenario; 4] = [
        Scenario::QuitSmoking,
        Scenario::MoreExercise,
        Scenario::HealthyDiet,
        Scenario::LessStress,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::QuitSmoking => "quit-smoking",
            Scenario::MoreExercise => "more-exercise",
            Scenario::HealthyDiet => "healthy-diet",
            Scenario::LessStress => "less-stress",
        }
    }

    /// Factor the scenario improves and the value it aims for
    fn target(&self) -> (LifestyleFactor, i32) {
        match self {
            Scenario::QuitSmoking => (LifestyleFactor::Smoking, 0),
            Scenario::MoreExercise => (LifestyleFactor::Exercise, 6),
            Scenario::HealthyDiet => (LifestyleFactor::Diet, 5),
            Scenario::LessStress => (LifestyleFactor::Stress, 3),
        }
    }

    /// Years gained by reaching the target; zero when already there
    pub fn gain(&self, factors: &LifestyleFactors) -> i32 {
        let (factor, target) = self.target();
        (target - factors.get(factor)).max(0)
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Scenario::QuitSmoking => "If you quit smoking",
            Scenario::MoreExercise => "If you exercise 7+ hours a week",
            Scenario::HealthyDiet => "If you switch to a very healthy diet",
            Scenario::LessStress => "If you cut your stress significantly",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = EstimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Scenario::ALL
            .into_iter()
            .find(|sc| sc.as_str() == key)
            .ok_or(EstimateError::UnknownScenario(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gains_from_neutral() {
        let neutral = LifestyleFactors::neutral();
        assert_eq!(Scenario::QuitSmoking.gain(&neutral), 0);
        assert_eq!(Scenario::MoreExercise.gain(&neutral), 6);
        assert_eq!(Scenario::HealthyDiet.gain(&neutral), 5);
        assert_eq!(Scenario::LessStress.gain(&neutral), 3);
    }

    #[test]
    fn test_gains_from_chosen_factors() {
        let factors = LifestyleFactors::neutral()
            .with(LifestyleFactor::Smoking, -10)
            .and_then(|f| f.with(LifestyleFactor::Exercise, 6))
            .and_then(|f| f.with(LifestyleFactor::Diet, -2))
            .and_then(|f| f.with(LifestyleFactor::Stress, -4))
            .unwrap();
        assert_eq!(Scenario::QuitSmoking.gain(&factors), 10);
        assert_eq!(Scenario::MoreExercise.gain(&factors), 0);
        assert_eq!(Scenario::HealthyDiet.gain(&factors), 7);
        assert_eq!(Scenario::LessStress.gain(&factors), 7);
    }

    #[test]
    fn test_parse() {
        assert_eq!("quit-smoking".parse::<Scenario>().unwrap(), Scenario::QuitSmoking);
        assert!(matches!(
            "run-marathon".parse::<Scenario>(),
            Err(EstimateError::UnknownScenario(_))
        ));
    }
}
