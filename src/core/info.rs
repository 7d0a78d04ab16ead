// Author: Dustin Pilgrim
// License: MIT

use serde::Serialize;

use crate::core::state::{Counters, Phase};

/// Point-in-time view of one dwell session.
///
/// - The serialized fields are the stable JSON contract (`dwell run` → `info`).
/// - `pretty_text` is CLI-facing output.
#[derive(Debug, Clone, Serialize)]
pub struct InfoSnapshot {
    pub phase: Phase,
    pub dwell_ms: u64,
    pub started: bool,
    pub visible: bool,
    pub paused: bool,
    pub pending_timer: Option<u64>,
    pub counters: Counters,

    #[serde(skip_serializing)]
    pub pretty_text: String,
}
