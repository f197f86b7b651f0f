//! Lifestyle achievements
//!
//! Each achievement is a predicate over an immutable factor snapshot.

use serde::Serialize;

use crate::model::{LifestyleFactor, LifestyleFactors};

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip)]
    condition: fn(&LifestyleFactors) -> bool,
}

impl Achievement {
    pub fn is_unlocked(&self, factors: &LifestyleFactors) -> bool {
        (self.condition)(factors)
    }
}

pub const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "non-smoker",
        icon: "🙅",
        title: "Non-smoker",
        description: "You don't smoke, and that adds years",
        condition: |f| f.get(LifestyleFactor::Smoking) >= 0,
    },
    Achievement {
        id: "active-lifestyle",
        icon: "🏃",
        title: "Active lifestyle",
        description: "You exercise regularly",
        condition: |f| f.get(LifestyleFactor::Exercise) >= 2,
    },
    Achievement {
        id: "healthy-eater",
        icon: "🍎",
        title: "Healthy eater",
        description: "You eat healthy, nourishing food",
        condition: |f| f.get(LifestyleFactor::Diet) >= 3,
    },
    Achievement {
        id: "wellness-warrior",
        icon: "🧘",
        title: "Wellness warrior",
        description: "Low stress and good sleep",
        condition: |f| f.get(LifestyleFactor::Stress) >= 0 && f.get(LifestyleFactor::Sleep) >= 0,
    },
    Achievement {
        id: "lifestyle-optimizer",
        icon: "🎆",
        title: "Lifestyle optimizer",
        description: "Every part of your lifestyle is tuned",
        condition: |f| f.total() >= 10,
    },
];

/// Achievements unlocked by `factors`, in table order
pub fn unlocked(factors: &LifestyleFactors) -> Vec<&'static Achievement> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| a.is_unlocked(factors))
        .collect()
}

pub fn unlocked_ids(factors: &LifestyleFactors) -> Vec<&'static str> {
    unlocked(factors).into_iter().map(|a| a.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_factors() {
        let ids = unlocked_ids(&LifestyleFactors::neutral());
        assert_eq!(ids, vec!["non-smoker", "wellness-warrior"]);
    }

    #[test]
    fn test_optimized_lifestyle_unlocks_everything() {
        let factors = LifestyleFactors::neutral()
            .with(LifestyleFactor::Exercise, 6)
            .and_then(|f| f.with(LifestyleFactor::Diet, 5))
            .and_then(|f| f.with(LifestyleFactor::Sleep, 2))
            .unwrap();
        assert_eq!(unlocked(&factors).len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn test_smoker_loses_badge() {
        let factors = LifestyleFactors::neutral()
            .with(LifestyleFactor::Smoking, -5)
            .and_then(|f| f.with(LifestyleFactor::Stress, -2))
            .unwrap();
        assert!(unlocked_ids(&factors).is_empty());
    }
}
