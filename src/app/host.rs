// Author: Dustin Pilgrim
// License: MIT

use std::rc::Rc;
use std::str::FromStr;

use crate::{
    controller::{CompletionCallback, DwellController},
    core::{config::DwellConfig, events::Visibility, info::InfoSnapshot},
    lifetime::Lifetime,
    signal::{RawSignal, SignalAdapter, SignalHub},
    timer::TimerService,
};

/// One line of host input, from stdin or a timeline script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Init,
    Show,
    Hide,
    Scroll,
    Info,
    Destroy,
    Quit,
}

impl FromStr for HostCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "init" | "initialize" | "start" => Ok(HostCommand::Init),
            "show" | "visible" => Ok(HostCommand::Show),
            "hide" | "hidden" => Ok(HostCommand::Hide),
            "scroll" => Ok(HostCommand::Scroll),
            "info" | "status" => Ok(HostCommand::Info),
            "destroy" | "teardown" => Ok(HostCommand::Destroy),
            "quit" | "exit" => Ok(HostCommand::Quit),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// What the host loop should do after applying a command.
#[derive(Debug, Clone)]
pub enum Outcome {
    Continue,
    Snapshot(InfoSnapshot),
    Quit,
}

/// A stand-in view: owns the signal hub, the view lifetime and one controller.
///
/// Show/hide/scroll go through the hub as raw environment signals, exactly as
/// a real environment binding would deliver them.
pub struct ViewHost {
    hub: Rc<SignalHub>,
    lifetime: Lifetime,
    controller: DwellController,
}

impl ViewHost {
    pub fn new(
        config: DwellConfig,
        timers: Rc<dyn TimerService>,
        on_complete: CompletionCallback,
    ) -> Self {
        let hub = Rc::new(SignalHub::new());
        let lifetime = Lifetime::new();
        let adapter = SignalAdapter::new(hub.clone(), lifetime.clone());

        let controller =
            DwellController::attach(config, Some(on_complete), &adapter, timers, &lifetime);

        Self {
            hub,
            lifetime,
            controller,
        }
    }

    pub fn apply(&self, cmd: HostCommand) -> Outcome {
        match cmd {
            HostCommand::Init => self.controller.initialize(),
            HostCommand::Show => self.hub.emit(RawSignal::VisibilityChange(Visibility::Visible)),
            HostCommand::Hide => self.hub.emit(RawSignal::VisibilityChange(Visibility::Hidden)),
            HostCommand::Scroll => self.hub.emit(RawSignal::Scroll),
            HostCommand::Info => return Outcome::Snapshot(self.controller.snapshot()),
            HostCommand::Destroy => self.destroy(),
            HostCommand::Quit => return Outcome::Quit,
        }
        Outcome::Continue
    }

    pub fn destroy(&self) {
        self.lifetime.dispose();
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime.is_alive()
    }

    pub fn controller(&self) -> &DwellController {
        &self.controller
    }

    pub fn subscriber_count(&self) -> usize {
        self.hub.subscriber_count()
    }
}

impl Drop for ViewHost {
    fn drop(&mut self) {
        self.lifetime.dispose();
    }
}
