//! Interactive planner entry point.
//!
//! # Responsibility
//! - Resolve configuration and start file logging.
//! - Run one interactive session over stdin/stdout.

mod app;
mod config;
mod prompt;

use clap::Parser;
use config::{Args, CliConfig};
use log::error;
use planner_core::{JsonFilePlannerRepository, PlannerStore};
use prompt::Prompter;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = CliConfig::resolve(Args::parse());

    // Logging is optional for an interactive session; report and continue.
    if let Err(err) = planner_core::init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: logging disabled: {err}");
    }

    let store = PlannerStore::new(JsonFilePlannerRepository::new(&config.data_file));
    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());

    match app::run(store, &mut prompter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session_end module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
