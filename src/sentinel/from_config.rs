//! Sentinel construction from a [`Config`].

use super::{Sentinel, SentinelBuilder};
use crate::config::Config;
use crate::internal;
use crate::output::LineSerializer;
use std::path::Path;

impl Sentinel {
    /// Resolves the text log path from, in order: `path`, `SENTINEL_LOG_FILE`, the default
    /// location. Every other setting comes from [`Config::from_env`].
    ///
    /// # Errors
    /// Invalid configuration values, or `Error::Configuration` when the destination
    /// cannot be made writable.
    pub fn open(path: Option<&Path>) -> Result<Self, crate::Error> {
        let mut config = Config::from_env()?;
        if let Some(path) = path {
            config.text.path = path.to_string_lossy().into_owned();
        }
        Self::from_config(&config)
    }

    /// Builds the text sink (primary), then the JSON sink and the stderr mirror when enabled.
    ///
    /// # Errors
    /// `InvalidFileMode` for malformed modes, `Configuration` for unwritable destinations.
    pub fn from_config(config: &Config) -> Result<Self, crate::Error> {
        internal::set_debug(config.general.debug);
        internal::debug("SENTINEL", "Building sentinel from config");
        let file_mode = config.file_mode()?;
        let dir_mode = config.dir_mode()?;

        let mut builder = SentinelBuilder::new()
            .default_module(&config.general.default_module)
            .level(config.parse_level())
            .debug(config.general.debug)
            .text(config.text_path())
            .line_format(&config.text.line_format)
            .timestamp_format(&config.text.timestamp_format)
            .file_mode(file_mode)
            .dir_mode(dir_mode)
            .done();

        if config.json.enabled {
            builder = builder
                .json(config.json_path())
                .locking(config.json.locking)
                .file_mode(file_mode)
                .done();
        }

        if config.text.stderr {
            builder = builder.stderr(
                LineSerializer::new()
                    .template(&config.text.line_format)
                    .timestamp_format(&config.text.timestamp_format),
            );
        }

        builder.build()
    }
}
