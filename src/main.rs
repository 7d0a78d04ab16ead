// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use clap::Parser;
use dwell::{app, cli};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), AnyError> {
    let args = cli::Args::parse();

    // Single-threaded on purpose: the dwell controller and its timers live on
    // one LocalSet.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();

    let res = local.block_on(&rt, app::command::run(args));

    // The stdin reader may still be parked in a blocking read.
    drop(local);
    rt.shutdown_timeout(Duration::from_millis(200));

    res
}
