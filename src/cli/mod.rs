//! Command-line interface for sentinel.

mod commands;

pub use commands::{cmd_check, cmd_demo, cmd_log};

use clap::{Parser, Subcommand};

/// sentinel - structured logging and error capture.
#[derive(Parser)]
#[command(name = "sentinel", version, about = "Structured logging and error capture")]
pub struct Cli {
    /// Text log path (overrides SENTINEL_LOG_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Write one record through the configured pipeline.
    Log {
        /// Module tag (use "" for the default module)
        module: String,
        /// Level name, e.g. info or CRITICAL
        level: String,
        /// Log message
        #[arg(required = true)]
        message: Vec<String>,
        /// Context as a JSON value
        #[arg(short, long, value_name = "JSON")]
        context: Option<String>,
    },
    /// Bootstrap the log destinations and print where records go.
    Check,
    /// Log a few records, report a runtime warning, then panic.
    Demo,
}
