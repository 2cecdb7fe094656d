//! Configuration struct definitions.

use crate::fmt::{DEFAULT_LINE_FORMAT, DEFAULT_TIMESTAMP_FORMAT};
use serde::Deserialize;

/// Default log directory: the platform state dir, or `storage/logs` when none exists.
fn default_log_dir() -> String {
    directories::ProjectDirs::from("", "", "sentinel").map_or_else(
        || "storage/logs".to_string(),
        |dirs| {
            dirs.state_dir()
                .unwrap_or_else(|| dirs.data_dir())
                .join("logs")
                .to_string_lossy()
                .into_owned()
        },
    )
}

/// Settings that apply to every sink.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Module used when a call passes none. Empty means records carry a bare `LEVEL` prefix.
    pub default_module: String,
    /// Minimum severity that reaches the sinks.
    pub level: String,
    /// Verbose diagnostics on stderr and a startup record.
    pub debug: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_module: "app".to_string(),
            level: "debug".to_string(),
            debug: false,
        }
    }
}

/// Plain-text sink configuration. This is the primary sink.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub path: String,
    pub line_format: String,
    pub timestamp_format: String,
    /// Octal permission bits for a newly created log file.
    pub file_mode: String,
    /// Octal permission bits for newly created log directories.
    pub dir_mode: String,
    /// Mirror every record to stderr as well.
    pub stderr: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            path: format!("{}/app.log", default_log_dir()),
            line_format: DEFAULT_LINE_FORMAT.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            file_mode: "0664".to_string(),
            dir_mode: "0775".to_string(),
            stderr: false,
        }
    }
}

/// JSON-array sink configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct JsonConfig {
    pub enabled: bool,
    pub path: String,
    /// Hold an exclusive OS lock around each element write.
    pub locking: bool,
}

impl Default for JsonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: format!("{}/app.json", default_log_dir()),
            locking: true,
        }
    }
}

/// Error bridge behavior.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Runtime-error hook result, and whether the previous panic hook still runs.
    pub pass_through: bool,
    /// Terminate the process with status 1 after an uncaught panic has been logged.
    pub exit_on_panic: bool,
    /// Text shown to end users next to the error id.
    pub user_message: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            pass_through: true,
            exit_on_panic: true,
            user_message: "An unexpected error occurred. Please try again later.".to_string(),
        }
    }
}
