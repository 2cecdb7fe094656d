//! Configuration loading: an optional TOML file overlaid by `SENTINEL_*` environment
//! variables, assembled once at the process boundary and handed to
//! [`crate::Sentinel::from_config`].

pub mod env;
mod structs;

pub use structs::{BridgeConfig, GeneralConfig, JsonConfig, TextConfig};

use crate::internal;
use crate::level::Level;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// `#[serde(default)]` on every section: an empty config file still yields a working logger.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub text: TextConfig,
    pub json: JsonConfig,
    pub bridge: BridgeConfig,
}

impl Config {
    /// Process-boundary entry point: the file named by `SENTINEL_CONFIG` (if any),
    /// then every other `SENTINEL_*` variable on top.
    ///
    /// # Errors
    /// Fails when the config file cannot be read or parsed, or an environment value is invalid.
    pub fn from_env() -> Result<Self, crate::Error> {
        let mut config = match std::env::var(env::CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => {
                let expanded = shellexpand::tilde(path.trim());
                Self::load_from(Path::new(expanded.as_ref()))?
            }
            _ => Self::default(),
        };
        // vars() panics on non-UTF-8 entries; those can never be ours anyway.
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        config.apply_env(vars)?;
        Ok(config)
    }

    /// Loads configuration from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        internal::debug("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Overlays recognized `SENTINEL_*` variables from `vars`. Unrelated variables are ignored.
    ///
    /// # Errors
    /// `InvalidLevel`, `InvalidFileMode`, or `Configuration` for a malformed value.
    pub fn apply_env<I, K, V>(&mut self, vars: I) -> Result<(), crate::Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let value: String = value.into();
            match key.as_ref() {
                env::LOG_FILE_ENV => self.text.path = value,
                env::JSON_LOG_FILE_ENV => self.json.path = value,
                env::JSON_ENABLED_ENV => self.json.enabled = flag(env::JSON_ENABLED_ENV, &value)?,
                env::DEFAULT_MODULE_ENV => self.general.default_module = value,
                env::LOG_LEVEL_ENV => {
                    value
                        .parse::<Level>()
                        .map_err(|_| crate::Error::InvalidLevel(value.clone()))?;
                    self.general.level = value;
                }
                env::LINE_FORMAT_ENV => self.text.line_format = value,
                env::TIMESTAMP_FORMAT_ENV => self.text.timestamp_format = value,
                env::FILE_MODE_ENV => {
                    parse_mode(&value)?;
                    self.text.file_mode = value;
                }
                env::JSON_LOCKING_ENV => self.json.locking = flag(env::JSON_LOCKING_ENV, &value)?,
                env::DEBUG_ENV => self.general.debug = flag(env::DEBUG_ENV, &value)?,
                _ => {}
            }
        }
        Ok(())
    }

    /// Config stores the level as a string for TOML ergonomics; unknown names fall back to `Debug`
    /// so nothing is filtered by mistake.
    #[must_use]
    pub fn parse_level(&self) -> Level {
        self.general.level.parse().unwrap_or(Level::Debug)
    }

    /// # Errors
    /// `InvalidFileMode` when `text.file_mode` is not octal.
    pub fn file_mode(&self) -> Result<u32, crate::Error> {
        parse_mode(&self.text.file_mode)
    }

    /// # Errors
    /// `InvalidFileMode` when `text.dir_mode` is not octal.
    pub fn dir_mode(&self) -> Result<u32, crate::Error> {
        parse_mode(&self.text.dir_mode)
    }

    /// Text log path with `~` expanded.
    #[must_use]
    pub fn text_path(&self) -> PathBuf {
        expand(&self.text.path)
    }

    /// JSON log path with `~` expanded.
    #[must_use]
    pub fn json_path(&self) -> PathBuf {
        expand(&self.json.path)
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path.trim()).as_ref())
}

fn flag(key: &str, value: &str) -> Result<bool, crate::Error> {
    env::parse_flag(value)
        .ok_or_else(|| crate::Error::configuration(key, format!("not a boolean: {value}")))
}

/// Accepts `664`, `0664`, and `0o664`.
///
/// # Errors
/// `InvalidFileMode` for anything that is not an octal number up to `0o7777`.
pub fn parse_mode(mode: &str) -> Result<u32, crate::Error> {
    let trimmed = mode.trim();
    let digits = trimmed.strip_prefix("0o").unwrap_or(trimmed);
    match u32::from_str_radix(digits, 8) {
        Ok(bits) if !digits.is_empty() && bits <= 0o7777 => Ok(bits),
        _ => Err(crate::Error::InvalidFileMode(mode.to_string())),
    }
}
