// Author: Dustin Pilgrim
// License: MIT

use std::io::Read;
use std::path::Path;

use crate::{
    app::simulate::{parse_script, render_text, run_script},
    cli::{Args, Command},
    config::{self, DwellFileConfig},
    dwell_log::{self, LogPolicy},
    log, sdebug, serror, sinfo,
};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

pub async fn run(args: Args) -> Result<(), AnyError> {
    let cfg = load_config(&args).map_err(|e| format!("{e:#}"))?;

    init_logging(&args, &cfg);

    match args.command {
        Command::Run => crate::app::run::run(cfg).await,

        Command::Simulate { script, until, json } => {
            let src = read_script(&script)?;
            let steps = parse_script(&src).map_err(|e| format!("{}: {}", script.display(), e))?;
            sdebug!("Simulate", "{} step(s) loaded from {}", steps.len(), script.display());

            let report = run_script(cfg.dwell, &steps, until);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", render_text(&report));
            }
            Ok(())
        }

        Command::CheckConfig => {
            match &cfg.source {
                Some(path) => println!("Config: {}", path.display()),
                None => println!("Config: built-in defaults"),
            }
            println!("DurationMs: {}", cfg.dwell.duration_ms());
            println!("Verbose: {}", cfg.verbose);
            Ok(())
        }
    }
}

fn load_config(args: &Args) -> eyre::Result<DwellFileConfig> {
    let cfg = config::load(args.config.as_deref())?;
    config::apply_overrides(cfg, args.duration_ms, args.verbose)
}

fn init_logging(args: &Args, cfg: &DwellFileConfig) {
    log::set_verbose(cfg.verbose);

    if args.no_log_file {
        return;
    }

    let path = log::default_log_path();
    match dwell_log::prepare_log_file(&path, LogPolicy::default()) {
        Ok(needs_blank) => {
            if needs_blank {
                let _ = dwell_log::write_raw_line(&path, "");
            }
            let _ = dwell_log::write_raw_line(&path, &dwell_log::run_header(args.command.name()));
            log::set_file_output(Some(path.clone()));
            sinfo!("Dwell", "file logging enabled: {}", path.display());
        }
        Err(e) => {
            serror!("Dwell", "failed to enable file logging: {}", e);
        }
    }
}

fn read_script(path: &Path) -> Result<String, AnyError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e).into())
}
