// Author: Dustin Pilgrim
// License: MIT

use std::path::PathBuf;

use crate::core::config::DwellConfig;

/// Effective configuration after file loading and CLI overrides.
#[derive(Debug, Clone)]
pub struct DwellFileConfig {
    pub dwell: DwellConfig,
    pub verbose: bool,
    /// Where the values came from; `None` means built-in defaults.
    pub source: Option<PathBuf>,
}

impl Default for DwellFileConfig {
    fn default() -> Self {
        Self {
            dwell: DwellConfig::default(),
            verbose: false,
            source: None,
        }
    }
}
