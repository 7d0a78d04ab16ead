// Author: Dustin Pilgrim
// License: MIT

pub mod model;
pub mod parser;

use std::path::{Path, PathBuf};

use eyre::Result;

use crate::sdebug;

pub use self::model::DwellFileConfig;

/// Candidate config locations, most specific first.
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut out = Vec::new();

    if let Some(mut path) = dirs::config_dir() {
        path.push("dwell/dwell.rune");
        out.push(path);
    }
    out.push(PathBuf::from("/etc/dwell/dwell.rune"));

    out
}

/// Loads configuration.
///
/// An explicit path must exist and parse. Without one, the first existing
/// default location is used, and built-in defaults when none exists.
pub fn load(explicit: Option<&Path>) -> Result<DwellFileConfig> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(eyre::eyre!("config file not found: {}", path.display()));
        }
        return parser::load_from_file(path);
    }

    for path in default_config_paths() {
        if path.exists() {
            sdebug!("Config", "loading {}", path.display());
            return parser::load_from_file(&path);
        }
    }

    sdebug!("Config", "no config file found, using built-in defaults");
    Ok(DwellFileConfig::default())
}

/// Applies command-line overrides on top of a loaded config.
pub fn apply_overrides(
    mut cfg: DwellFileConfig,
    duration_ms: Option<i64>,
    verbose: bool,
) -> Result<DwellFileConfig> {
    if let Some(ms) = duration_ms {
        cfg.dwell = crate::core::config::DwellConfig::from_signed_millis(ms)
            .map_err(|e| eyre::eyre!("--duration-ms {}: {}", ms, e))?;
    }
    cfg.verbose |= verbose;
    Ok(cfg)
}
