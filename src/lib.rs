// Author: Dustin Pilgrim
// License: MIT

//! Dwell-time tracking for a single view.
//!
//! The engine in [`core`] is a pure state machine over visibility, scroll and
//! timer events. [`controller::DwellController`] runs it against an injected
//! [`signal::SignalSource`], a [`timer::TimerService`] and a
//! [`lifetime::Lifetime`] that releases everything when the view goes away.

pub mod app;
pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod dwell_log;
pub mod lifetime;
pub mod log;
pub mod services;
pub mod signal;
pub mod timer;

pub use crate::controller::DwellController;
pub use crate::core::config::DwellConfig;
pub use crate::core::error::Error;
