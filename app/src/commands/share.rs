use anyhow::{Context, Result};
use estimator::{ShareParams, Verification};

use crate::state::{AppState, LoadOutput};

use super::estimate::calculate;

pub fn run_share(state: &mut AppState, json: bool) -> Result<()> {
    let result = calculate(state)?;
    let params = ShareParams::from_result(&result, state.form.lifestyle());
    let url = params.share_url(&state.config.share_base_url);
    super::emit(json, &params, || url.clone())
}

/// Load a shared link (full URL or bare query) and recompute it
pub fn load(state: &mut AppState, link: &str) -> Result<LoadOutput> {
    let query = link.split_once('?').map(|(_, q)| q).unwrap_or(link);
    let params = ShareParams::from_query(query).context("cannot load shared link")?;

    let form = params.to_form()?;
    let result = params.recompute(state.now())?;
    let verification = params.verify(&result);

    state.form = form.clone();
    Ok(LoadOutput {
        form,
        result,
        verification,
    })
}

pub fn run_load(state: &mut AppState, link: &str, json: bool) -> Result<()> {
    let output = load(state, link)?;
    super::emit(json, &output, || {
        let r = &output.result;
        let mut text = format!(
            "Shared result: a {:.0}-year-old {} has {:.1} years left ({})",
            r.age, r.gender, r.remaining_years, r.data_source_name
        );
        if let Verification::Drifted { transmitted, .. } = output.verification {
            text.push_str(&format!(
                "\nThe link said {:.1} years; showing the recomputed value",
                transmitted
            ));
        }
        text
    })
}
