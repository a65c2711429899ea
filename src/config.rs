use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tui_dispatch_debug::DebugCliArgs;

use crate::query::DEFAULT_API_BASE;

pub const APP_DIR: &str = "rickdex";
pub const DEFAULT_DEBOUNCE_MS: u64 = 400;
const LOG_FILE_NAME: &str = "rickdex.log";

/// Rick and Morty character catalog
#[derive(Parser, Debug)]
#[command(name = "rickdex")]
#[command(about = "Browse, filter and favorite Rick and Morty characters")]
pub struct Args {
    /// Base URL of the character API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Directory holding persisted favorites (defaults to the platform data dir)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Log file path (defaults to `rickdex.log` inside the data dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Quiet period after the last keystroke before the search is applied
    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_MS)]
    pub debounce_ms: u64,

    #[command(flatten)]
    pub debug: DebugCliArgs,
}

/// Settings resolved from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub api_base: String,
    pub data_dir: PathBuf,
    pub log_file: PathBuf,
    pub debounce: Duration,
}

impl AppConfig {
    pub fn from_args(args: &Args) -> Self {
        let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);
        let log_file = args
            .log_file
            .clone()
            .unwrap_or_else(|| data_dir.join(LOG_FILE_NAME));
        Self {
            api_base: args.api_base.trim_end_matches('/').to_string(),
            data_dir,
            log_file,
            debounce: Duration::from_millis(args.debounce_ms),
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    dirs_next::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
