//! `sentinel` binary: write records from scripts, verify the destinations, or run the demo.
//!
//! Usage:
//!   sentinel log <module> <level> <message...> [--context <json>]
//!   sentinel check
//!   sentinel demo

use clap::Parser;
use sentinel::cli::{Cli, Command, cmd_check, cmd_demo, cmd_log};
use sentinel::{Config, Sentinel};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Config is assembled once here and passed down; nothing below reads the environment.
    let mut config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = &cli.log_file {
        config.text.path = path.to_string_lossy().into_owned();
    }

    // A logger that cannot write refuses to start.
    let sentinel = match Sentinel::from_config(&config) {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Error initializing logger: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = match cli.command {
        Command::Log {
            module,
            level,
            message,
            context,
        } => cmd_log(&sentinel, &module, &level, &message, context.as_deref()),
        Command::Check => cmd_check(&sentinel),
        Command::Demo => cmd_demo(Arc::clone(&sentinel), &config),
    };

    sentinel.close();
    code
}
