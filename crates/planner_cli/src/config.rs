//! Command-line and environment configuration.
//!
//! # Responsibility
//! - Parse CLI flags (with env var fallbacks).
//! - Resolve default data/log locations from platform directories.
//!
//! # Invariants
//! - The resolved log directory is absolute whenever the working directory
//!   can be determined.

use clap::Parser;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const DATA_FILE_NAME: &str = "planner_data.json";
const LOG_DIR_NAME: &str = "logs";

/// Personal planner for events grouped into divisions.
#[derive(Debug, Parser)]
#[command(name = "planner", version, about)]
pub struct Args {
    /// Planner document location.
    #[arg(long, env = "PLANNER_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Directory for rotated log files.
    #[arg(long, env = "PLANNER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error
    #[arg(long, env = "PLANNER_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub data_file: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl CliConfig {
    pub fn resolve(args: Args) -> Self {
        let dirs = ProjectDirs::from("", "", "student-planner");
        Self::resolve_with(args, dirs.as_ref(), current_dir().as_deref())
    }

    fn resolve_with(args: Args, dirs: Option<&ProjectDirs>, cwd: Option<&Path>) -> Self {
        let fallback = |name: &str| match cwd {
            Some(cwd) => cwd.join(name),
            None => PathBuf::from(name),
        };

        let data_file = args.data_file.unwrap_or_else(|| match dirs {
            Some(dirs) => dirs.data_dir().join(DATA_FILE_NAME),
            None => fallback(DATA_FILE_NAME),
        });
        let log_dir = args.log_dir.unwrap_or_else(|| match dirs {
            Some(dirs) => dirs.data_local_dir().join(LOG_DIR_NAME),
            None => fallback(LOG_DIR_NAME),
        });
        let log_level = args
            .log_level
            .unwrap_or_else(|| planner_core::default_log_level().to_string());

        Self {
            data_file,
            log_dir,
            log_level,
        }
    }
}

fn current_dir() -> Option<PathBuf> {
    std::env::current_dir().ok()
}
