use chrono::{NaiveDate, NaiveDateTime};
use estimator::countdown::{Clock, CountdownClock, CountdownState};
use estimator::{EngineConfig, EstimationResult, FormState};
use serde::Serialize;
use std::sync::Arc;

/// Everything the front end owns between commands
pub struct AppState {
    pub config: EngineConfig,
    pub clock: Arc<dyn Clock>,
    pub form: FormState,
    /// At most one live countdown
    pub countdown: CountdownClock,
}

impl AppState {
    pub fn new(config: EngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            form: FormState::new(),
            countdown: CountdownClock::new(),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

// -- Serializable types printed by commands --

#[derive(Serialize, Clone)]
pub struct FactData {
    pub label: String,
    pub value: u64,
    pub display: String,
}

#[derive(Serialize, Clone)]
pub struct EstimateOutput {
    pub result: EstimationResult,
    pub countdown: CountdownState,
    pub facts: Vec<FactData>,
    pub achievements: Vec<String>,
    pub share_url: String,
}

#[derive(Serialize, Clone)]
pub struct TickEvent {
    pub years: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub expired: bool,
}

impl From<CountdownState> for TickEvent {
    fn from(state: CountdownState) -> Self {
        Self {
            years: state.years,
            days: state.days,
            hours: state.hours,
            minutes: state.minutes,
            seconds: state.seconds,
            expired: state.expired,
        }
    }
}

#[derive(Serialize, Clone)]
pub struct CountryData {
    pub key: String,
    pub display_name: String,
    pub male: f64,
    pub female: f64,
}

#[derive(Serialize, Clone)]
pub struct AchievementData {
    pub id: String,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub unlocked: bool,
}

#[derive(Serialize, Clone)]
pub struct ScenarioData {
    pub scenario: String,
    pub description: String,
    pub years_gained: i32,
}

#[derive(Serialize, Clone)]
pub struct LoadOutput {
    pub form: FormState,
    pub result: EstimationResult,
    pub verification: estimator::Verification,
}
