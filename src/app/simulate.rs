// Author: Dustin Pilgrim
// License: MIT

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use serde::Serialize;

use crate::{
    app::host::{HostCommand, Outcome, ViewHost},
    core::{
        config::DwellConfig,
        error::{Error, ScriptError},
        info::InfoSnapshot,
    },
    sdebug,
    timer::ManualTimers,
};

/// One timeline entry: apply `command` at `at_ms` on the virtual clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptStep {
    pub at_ms: u64,
    pub command: HostCommand,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProbeResult {
    pub at_ms: u64,
    pub snapshot: InfoSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub dwell_ms: u64,
    pub until_ms: u64,
    /// Virtual times at which the completion callback ran.
    pub completions: Vec<u64>,
    /// Snapshots taken by `info` lines.
    pub probes: Vec<ProbeResult>,
    #[serde(rename = "final")]
    pub final_state: InfoSnapshot,
}

/// Parses a timeline script.
///
/// One step per line, `<ms> <command>`; blank lines and `#` comments are
/// skipped. Times must not go backwards. `quit` is not allowed; the script
/// ends where its lines end.
pub fn parse_script(src: &str) -> Result<Vec<ScriptStep>, Error> {
    let mut steps = Vec::new();
    let mut last = 0u64;

    for (idx, raw) in src.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let err = |reason: String| Error::Script(ScriptError { line: line_no, reason });

        let mut parts = line.split_whitespace();
        let (Some(at), Some(cmd), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(err(format!("expected `<ms> <command>`, got `{line}`")));
        };

        let at_ms: u64 = at
            .trim_end_matches("ms")
            .parse()
            .map_err(|_| err(format!("invalid time `{at}`")))?;

        if at_ms < last {
            return Err(err(format!("time {at_ms}ms goes backwards (previous step at {last}ms)")));
        }
        last = at_ms;

        let command: HostCommand = cmd.parse().map_err(err)?;
        if command == HostCommand::Quit {
            return Err(err("`quit` is not allowed in scripts".to_string()));
        }

        steps.push(ScriptStep { at_ms, command });
    }

    Ok(steps)
}

/// Runs `steps` against a virtual clock.
///
/// The clock keeps running after the last step until `until_ms`, or by
/// default one full dwell duration past the last step.
pub fn run_script(config: DwellConfig, steps: &[ScriptStep], until_ms: Option<u64>) -> SimulationReport {
    let timers = Rc::new(ManualTimers::new());
    let completions = Rc::new(RefCell::new(Vec::new()));

    let host = {
        let completions = completions.clone();
        let clock = timers.clone();
        ViewHost::new(
            config,
            timers.clone(),
            Box::new(move || completions.borrow_mut().push(clock.now_ms())),
        )
    };

    let mut probes = Vec::new();
    let last_step = steps.last().map(|s| s.at_ms).unwrap_or(0);

    for step in steps {
        timers.advance_to(Duration::from_millis(step.at_ms));
        sdebug!("Simulate", "t={}ms {:?}", step.at_ms, step.command);

        if let Outcome::Snapshot(snapshot) = host.apply(step.command) {
            probes.push(ProbeResult {
                at_ms: step.at_ms,
                snapshot,
            });
        }
    }

    let until_ms = until_ms
        .unwrap_or(last_step.saturating_add(config.duration_ms()))
        .max(last_step);
    timers.advance_to(Duration::from_millis(until_ms));

    let final_state = host.controller().snapshot();
    let completions = completions.borrow().clone();

    SimulationReport {
        dwell_ms: config.duration_ms(),
        until_ms,
        completions,
        probes,
        final_state,
    }
}

pub fn render_text(report: &SimulationReport) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "dwell {}ms, simulated until {}ms\n",
        report.dwell_ms, report.until_ms
    ));

    for probe in &report.probes {
        out.push_str(&format!(
            "info at {}ms: {:?}, pending timer {}\n",
            probe.at_ms,
            probe.snapshot.phase,
            probe
                .snapshot
                .pending_timer
                .map(|t| format!("#{t}"))
                .unwrap_or_else(|| "none".to_string()),
        ));
    }

    for at in &report.completions {
        out.push_str(&format!("completed at {}ms\n", at));
    }

    out.push_str(&format!(
        "{} completion(s), final phase {:?}",
        report.completions.len(),
        report.final_state.phase
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Phase;

    fn run(src: &str) -> SimulationReport {
        let steps = parse_script(src).unwrap();
        run_script(DwellConfig::default(), &steps, None)
    }

    #[test]
    fn parses_comments_and_units() {
        let steps = parse_script("# header\n0 init\n\n500ms scroll # nudge\n").unwrap();
        assert_eq!(
            steps,
            vec![
                ScriptStep { at_ms: 0, command: HostCommand::Init },
                ScriptStep { at_ms: 500, command: HostCommand::Scroll },
            ]
        );
    }

    fn bad_line(src: &str) -> usize {
        match parse_script(src).unwrap_err() {
            Error::Script(e) => e.line,
            other => panic!("expected a script error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_time_going_backwards() {
        assert_eq!(bad_line("100 init\n50 scroll\n"), 2);
    }

    #[test]
    fn rejects_unknown_command_and_quit() {
        assert_eq!(bad_line("0 init\n10 wiggle"), 2);
        assert_eq!(bad_line("0 quit"), 1);
        assert_eq!(bad_line("zero init"), 1);
        assert_eq!(bad_line("0 init extra"), 1);
    }

    #[test]
    fn last_step_at_the_end_of_time_does_not_overflow() {
        let report = run("18446744073709551615 init");
        assert_eq!(report.until_ms, u64::MAX);
        assert!(report.completions.is_empty());
        assert!(report.final_state.started);
    }

    #[test]
    fn scenario_a() {
        let report = run("0 init");
        assert_eq!(report.completions, vec![1000]);
        assert_eq!(report.final_state.phase, Phase::Completed);
    }

    #[test]
    fn scenario_b() {
        let report = run("0 init\n500 scroll");
        assert_eq!(report.completions, vec![1500]);
    }

    #[test]
    fn scenario_c() {
        let report = run("0 init\n400 hide\n900 show");
        assert_eq!(report.completions, vec![1900]);
    }

    #[test]
    fn scenario_d() {
        let steps = parse_script("0 init\n200 hide\n300 destroy").unwrap();
        let report = run_script(DwellConfig::default(), &steps, Some(10_000));
        assert!(report.completions.is_empty());
        assert_eq!(report.final_state.phase, Phase::TornDown);
        assert_eq!(report.final_state.pending_timer, None);
    }

    #[test]
    fn info_lines_record_probes() {
        let report = run("0 init\n400 info\n400 hide\n450 info");
        assert_eq!(report.probes.len(), 2);
        assert_eq!(report.probes[0].snapshot.phase, Phase::ActiveVisible);
        assert_eq!(report.probes[1].snapshot.phase, Phase::ActiveHidden);
    }

    #[test]
    fn explicit_until_stops_early() {
        let steps = parse_script("0 init").unwrap();
        let report = run_script(DwellConfig::default(), &steps, Some(999));
        assert!(report.completions.is_empty());
        assert_eq!(report.until_ms, 999);
    }

    #[test]
    fn text_report_mentions_completions() {
        let text = render_text(&run("0 init\n500 scroll"));
        assert!(text.contains("completed at 1500ms"));
        assert!(text.contains("1 completion(s)"));
    }

    #[test]
    fn report_serializes_to_json() {
        let json = serde_json::to_value(run("0 init")).unwrap();
        assert_eq!(json["completions"], serde_json::json!([1000]));
        assert_eq!(json["final"]["phase"], "completed");
        assert!(json["final"].get("pretty_text").is_none());
    }
}
