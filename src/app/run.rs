// Author: Dustin Pilgrim
// License: MIT

use std::rc::Rc;

use chrono::Local;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::{
    app::host::{HostCommand, Outcome, ViewHost},
    config::DwellFileConfig,
    core::utils::format_duration,
    services::stdin::{run_stdin, HostMsg},
    sinfo, swarn,
    timer::LocalTimers,
};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

/// Interactive host: one view driven by stdin commands and real timers.
///
/// Must run inside a `tokio::task::LocalSet`.
pub async fn run(cfg: DwellFileConfig) -> Result<(), AnyError> {
    let (tx, mut rx) = mpsc::channel::<HostMsg>(64);
    tokio::spawn(run_stdin(tx));

    let timers = Rc::new(LocalTimers::new());
    let started = Instant::now();

    let host = ViewHost::new(
        cfg.dwell,
        timers.clone(),
        Box::new(move || {
            println!(
                "[{}] dwell complete (+{})",
                Local::now().format("%H:%M:%S%.3f"),
                format_duration(started.elapsed())
            );
        }),
    );

    sinfo!("Dwell", "view ready (dwell {}ms)", cfg.dwell.duration_ms());
    println!("commands: init | show | hide | scroll | info | destroy | quit");

    loop {
        tokio::select! {
            maybe = rx.recv() => {
                let Some(msg) = maybe else {
                    sinfo!("Dwell", "stopping (input channel closed)");
                    break;
                };

                let line = match msg {
                    HostMsg::Line(line) => line,
                    HostMsg::Eof => {
                        sinfo!("Dwell", "stopping (end of input)");
                        break;
                    }
                };

                let cmd: HostCommand = match line.parse() {
                    Ok(cmd) => cmd,
                    Err(e) => {
                        swarn!("Dwell", "{}", e);
                        eprintln!("dwell: {e}");
                        continue;
                    }
                };

                match host.apply(cmd) {
                    Outcome::Continue => {}
                    Outcome::Snapshot(snap) => {
                        println!("{}", snap.pretty_text);
                        println!("{}", serde_json::to_string(&snap)?);
                    }
                    Outcome::Quit => {
                        sinfo!("Dwell", "stopping (quit requested)");
                        break;
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                sinfo!("Dwell", "received Ctrl+C, shutting down");
                break;
            }
        }
    }

    host.destroy();
    timers.abort_all();
    Ok(())
}
