// Author: Dustin Pilgrim
// License: MIT

use eyre::{Result, WrapErr};
use rune_cfg::RuneConfig;
use std::path::Path;

use crate::{
    config::model::DwellFileConfig,
    core::config::DwellConfig,
    sdebug,
};

const DURATION_KEYS: [&str; 2] = ["dwell.duration_ms", "dwell.duration-ms"];

pub fn parse_dwell_config(config: &RuneConfig) -> Result<DwellFileConfig> {
    // Absent means default; present but malformed is an error.
    let dwell = match DURATION_KEYS.iter().find(|k| config.get_value(**k).is_ok()) {
        None => DwellConfig::default(),
        Some(key) => {
            let ms = config
                .get::<i64>(*key)
                .wrap_err_with(|| format!("{} must be an integer number of milliseconds", key))?;
            DwellConfig::from_signed_millis(ms)
                .wrap_err_with(|| format!("invalid {} = {}", key, ms))?
        }
    };

    let verbose = config
        .get::<bool>("dwell.verbose")
        .unwrap_or(false);

    sdebug!("Config", "parsed duration_ms={} verbose={}", dwell.duration_ms(), verbose);

    Ok(DwellFileConfig {
        dwell,
        verbose,
        source: None,
    })
}

pub fn load_from_file(path: &Path) -> Result<DwellFileConfig> {
    let path = path.to_path_buf();
    let config = RuneConfig::from_file(&path)
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    let mut parsed = parse_dwell_config(&config)
        .wrap_err_with(|| format!("bad config in {}", path.display()))?;
    parsed.source = Some(path);
    Ok(parsed)
}
