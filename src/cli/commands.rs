//! Subcommand implementations. Each returns the process exit code.

use crate::bridge::{BridgeOptions, ErrorBridge, ErrorCode};
use crate::config::Config;
use crate::internal;
use crate::sentinel::Sentinel;
use serde_json::{Value, json};
use std::process::ExitCode;
use std::sync::Arc;

/// Writes one record; the exit code mirrors the facade's boolean.
#[must_use]
pub fn cmd_log(
    sentinel: &Sentinel,
    module: &str,
    level: &str,
    message: &[String],
    context: Option<&str>,
) -> ExitCode {
    let context = match context.map(serde_json::from_str::<Value>) {
        None => None,
        Some(Ok(value)) => Some(value),
        // Not JSON: keep it as a scalar string context.
        Some(Err(_)) => context.map(|raw| Value::String(raw.to_string())),
    };

    let module = Some(module).filter(|m| !m.trim().is_empty());
    if sentinel.log(module, level, &message.join(" "), context) {
        ExitCode::SUCCESS
    } else {
        internal::error("CLI", "Record was not written");
        ExitCode::FAILURE
    }
}

/// Reports the resolved destinations of an already bootstrapped sentinel.
#[must_use]
pub fn cmd_check(sentinel: &Sentinel) -> ExitCode {
    if let Some(path) = sentinel.text_path() {
        println!("text log:  {}", path.display());
    }
    if let Some(path) = sentinel.json_path() {
        println!("json log:  {}", path.display());
    }
    println!("level:     {}", sentinel.min_level());
    println!("module:    {}", sentinel.default_module());
    println!("sinks:     {}", sentinel.sink_count());
    ExitCode::SUCCESS
}

/// Scripted walk through every hook. Ends the process from the panic hook.
#[must_use]
pub fn cmd_demo(sentinel: Arc<Sentinel>, config: &Config) -> ExitCode {
    let bridge = ErrorBridge::new(Arc::clone(&sentinel), BridgeOptions::from(&config.bridge))
        .install();

    sentinel.log(
        Some("calls"),
        "info",
        "Call module started",
        Some(Value::String("Just a string context".to_string())),
    );
    sentinel.log(
        Some("auth"),
        "info",
        "Auth module started",
        Some(json!({ "user": "john_doe", "action": "login" })),
    );

    bridge.handle_error(
        ErrorCode::Warning.raw(),
        "demo: a function was called with too few arguments",
        file!(),
        line!(),
    );

    panic!("Authentication error occurred");
}
