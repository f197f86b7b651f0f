use anyhow::{Context, Result};
use estimator::achievements;
use estimator::{estimate, format_large_number, EstimationResult, Mode, ShareParams};

use crate::state::{AppState, EstimateOutput, FactData};

/// Validate the form and run one calculation
pub fn calculate(state: &AppState) -> Result<EstimationResult> {
    let input = state
        .form
        .to_input(state.today(), &state.config.default_country)
        .context("cannot calculate")?;
    let result = estimate(&input, state.now()).context("cannot calculate")?;
    Ok(result)
}

pub fn build_output(state: &AppState, result: EstimationResult) -> EstimateOutput {
    let facts = result
        .derived_stats
        .entries()
        .iter()
        .map(|(label, value)| FactData {
            label: label.to_string(),
            value: *value,
            display: format_large_number(*value),
        })
        .collect();

    let achievements = match result.mode {
        Mode::Advanced => achievements::unlocked_ids(state.form.lifestyle())
            .into_iter()
            .map(String::from)
            .collect(),
        Mode::Simple => Vec::new(),
    };

    let share_url = ShareParams::from_result(&result, state.form.lifestyle())
        .share_url(&state.config.share_base_url);

    EstimateOutput {
        countdown: result.countdown_at(state.clock.as_ref()),
        result,
        facts,
        achievements,
        share_url,
    }
}

fn signed(value: i32) -> String {
    if value > 0 {
        format!("+{}", value)
    } else {
        value.to_string()
    }
}

pub fn render_text(output: &EstimateOutput) -> String {
    let r = &output.result;
    let c = &output.countdown;
    let mut lines = vec![
        format!(
            "Life expectancy: {:.1} years ({}, baseline {:.1})",
            r.adjusted_life_expectancy, r.data_source_name, r.base_life_expectancy
        ),
    ];
    if r.mode == Mode::Advanced {
        lines.push(format!("Lifestyle impact: {} years", signed(r.lifestyle_impact)));
    }

    if r.is_past_expectancy() {
        lines.push("You have outlived the average for your group. Every day is a bonus.".into());
    } else {
        lines.push(format!(
            "Remaining: {:.1} years ({} days), until {}",
            r.remaining_years, r.remaining_days, r.end_date
        ));
        lines.push(format!(
            "Countdown: {}y {}d {}h {}m {}s",
            c.years, c.days, c.hours, c.minutes, c.seconds
        ));
    }
    lines.push(format!("Life progress: {}%", r.life_percentage));

    lines.push("So far:".into());
    for fact in &output.facts {
        lines.push(format!("  {:>24} {}", fact.display, fact.label));
    }
    if !output.achievements.is_empty() {
        lines.push(format!("Achievements: {}", output.achievements.join(", ")));
    }
    lines.push(format!("Share: {}", output.share_url));
    lines.join("\n")
}

pub fn run(state: &mut AppState, json: bool) -> Result<()> {
    let result = calculate(state)?;
    let output = build_output(state, result);
    super::emit(json, &output, || render_text(&output))
}
