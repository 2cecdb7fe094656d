//! Environment variable names recognized by [`super::Config::apply_env`].

/// Path of a TOML file loaded before the environment overlay.
pub const CONFIG_ENV: &str = "SENTINEL_CONFIG";

/// Plain-text log path.
pub const LOG_FILE_ENV: &str = "SENTINEL_LOG_FILE";

/// JSON log path.
pub const JSON_LOG_FILE_ENV: &str = "SENTINEL_JSON_LOG_FILE";

/// `true`/`false`: whether the JSON sink is registered.
pub const JSON_ENABLED_ENV: &str = "SENTINEL_JSON_ENABLED";

pub const DEFAULT_MODULE_ENV: &str = "SENTINEL_DEFAULT_MODULE";

/// Minimum level name.
pub const LOG_LEVEL_ENV: &str = "SENTINEL_LOG_LEVEL";

pub const LINE_FORMAT_ENV: &str = "SENTINEL_LINE_FORMAT";

pub const TIMESTAMP_FORMAT_ENV: &str = "SENTINEL_TIMESTAMP_FORMAT";

/// Octal, e.g. `0664`.
pub const FILE_MODE_ENV: &str = "SENTINEL_FILE_MODE";

/// `true`/`false`: OS-level locking on the JSON sink.
pub const JSON_LOCKING_ENV: &str = "SENTINEL_JSON_LOCKING";

pub const DEBUG_ENV: &str = "SENTINEL_DEBUG";

/// Accepts the usual spellings of a boolean flag.
#[must_use]
pub fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
