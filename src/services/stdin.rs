// Author: Dustin Pilgrim
// License: MIT

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::Sender;

use crate::{sdebug, swarn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMsg {
    Line(String),
    Eof,
}

/// Forwards stdin line by line until EOF or until the receiver goes away.
pub async fn run_stdin(tx: Sender<HostMsg>) {
    sdebug!("Stdin", "stdin reader started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim().to_string();
                if line.is_empty() {
                    continue;
                }
                // If the host loop is gone, stop.
                if tx.send(HostMsg::Line(line)).await.is_err() {
                    sdebug!("Stdin", "stdin reader stopping (receiver dropped)");
                    return;
                }
            }
            Ok(None) => break,
            Err(e) => {
                swarn!("Stdin", "stdin read failed: {}", e);
                break;
            }
        }
    }

    let _ = tx.send(HostMsg::Eof).await;
}
