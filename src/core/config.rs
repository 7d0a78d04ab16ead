// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use crate::core::error::ConfigError;

pub const DEFAULT_DWELL_MS: u64 = 1000;

/// Construction configuration for one dwell session.
///
/// The only way to build one is through a validated constructor, so a
/// `DwellConfig` in hand always carries a positive duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellConfig {
    duration: Duration,
}

impl DwellConfig {
    pub fn new(duration: Duration) -> Result<Self, ConfigError> {
        if duration < Duration::from_millis(1) {
            return Err(ConfigError::NonPositiveDuration);
        }
        Ok(Self { duration })
    }

    pub fn from_millis(ms: u64) -> Result<Self, ConfigError> {
        Self::new(Duration::from_millis(ms))
    }

    /// Accepts signed input from loosely typed sources (config files, CLI).
    pub fn from_signed_millis(ms: i64) -> Result<Self, ConfigError> {
        if ms <= 0 {
            return Err(ConfigError::NonPositiveDuration);
        }
        Self::from_millis(ms as u64)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration.as_millis() as u64
    }
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(DEFAULT_DWELL_MS),
        }
    }
}
