use anyhow::Result;
use estimator::achievements::ACHIEVEMENTS;
use estimator::scenarios::Scenario;
use estimator::LifestyleFactors;

use crate::state::{AchievementData, AppState, ScenarioData};

pub fn achievements(factors: &LifestyleFactors) -> Vec<AchievementData> {
    ACHIEVEMENTS
        .iter()
        .map(|a| AchievementData {
            id: a.id.to_string(),
            icon: a.icon.to_string(),
            title: a.title.to_string(),
            description: a.description.to_string(),
            unlocked: a.is_unlocked(factors),
        })
        .collect()
}

pub fn scenarios(factors: &LifestyleFactors, only: Option<Scenario>) -> Vec<ScenarioData> {
    let selected: Vec<Scenario> = match only {
        Some(scenario) => vec![scenario],
        None => Scenario::ALL.to_vec(),
    };
    selected
        .into_iter()
        .map(|s| ScenarioData {
            scenario: s.as_str().to_string(),
            description: s.describe().to_string(),
            years_gained: s.gain(factors),
        })
        .collect()
}

pub fn run_achievements(state: &mut AppState, json: bool) -> Result<()> {
    let list = achievements(state.form.lifestyle());
    super::emit(json, &list, || {
        list.iter()
            .map(|a| {
                let mark = if a.unlocked { "x" } else { " " };
                format!("[{}] {} {}: {}", mark, a.icon, a.title, a.description)
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

pub fn run_scenario(state: &mut AppState, name: Option<&str>, json: bool) -> Result<()> {
    let only = name.map(str::parse::<Scenario>).transpose()?;
    let list = scenarios(state.form.lifestyle(), only);
    super::emit(json, &list, || {
        list.iter()
            .map(|s| match s.years_gained {
                0 => format!("{}: nothing to gain, you are already there", s.description),
                n => format!("{}: +{} years", s.description, n),
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}
