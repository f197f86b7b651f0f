use anyhow::Result;
use estimator::baseline;

use crate::state::{AppState, CountryData};

pub fn run_config(state: &mut AppState, json: bool) -> Result<()> {
    let config = &state.config;
    super::emit(json, config, || {
        format!(
            "tick_interval_ms = {}\ndefault_country = {}\nshare_base_url = {}\nverbose = {}",
            config.tick_interval_ms, config.default_country, config.share_base_url, config.verbose
        )
    })
}

pub fn countries() -> Vec<CountryData> {
    baseline::countries()
        .iter()
        .map(|entry| CountryData {
            key: entry.country_key.to_string(),
            display_name: entry.display_name.to_string(),
            male: entry.male,
            female: entry.female,
        })
        .collect()
}

pub fn run_countries(json: bool) -> Result<()> {
    let list = countries();
    super::emit(json, &list, || {
        list.iter()
            .map(|c| {
                format!(
                    "{:<16} {:<16} male {:>5.1}  female {:>5.1}",
                    c.key, c.display_name, c.male, c.female
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countries_include_world() {
        let list = countries();
        assert_eq!(list.len(), 13);
        assert!(list.iter().any(|c| c.key == "World"));
    }
}
