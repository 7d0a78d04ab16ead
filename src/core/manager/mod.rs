// Author: Dustin Pilgrim
// License: MIT

mod engine;
mod snapshot;

use crate::core::config::DwellConfig;

/// Pure dwell engine: turns events into actions for one session.
///
/// The manager owns configuration only. Session state is passed in per call so
/// the same rules can drive a live controller or a scripted simulation.
#[derive(Debug, Clone)]
pub struct Manager {
    cfg: DwellConfig,
}

impl Manager {
    pub fn new(cfg: DwellConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &DwellConfig {
        &self.cfg
    }
}
