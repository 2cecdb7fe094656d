//! The unit flowing through the pipeline.

use crate::level::Level;
use chrono::{DateTime, Local};
use serde_json::Value;

/// Immutable once built: sinks receive `&LogRecord` and only serialize it.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    timestamp: DateTime<Local>,
    module: String,
    level: Level,
    level_name: String,
    message: String,
    context: Option<Value>,
}

impl LogRecord {
    /// Normalizes the inputs: the module is trimmed and lowercased, the level name is
    /// trimmed and uppercased. A level name outside the vocabulary is kept verbatim
    /// (uppercased) but routed at [`Level::Info`]; an empty one becomes `INFO`.
    #[must_use]
    pub fn new(
        module: &str,
        level: &str,
        message: impl Into<String>,
        context: Option<Value>,
    ) -> Self {
        let raw = level.trim().to_uppercase();
        // Aliases such as "warn" resolve to their canonical name.
        let (level, level_name) = match raw.parse::<Level>() {
            Ok(known) => (known, known.as_str().to_string()),
            Err(_) if raw.is_empty() => (Level::Info, Level::Info.as_str().to_string()),
            Err(_) => (Level::Info, raw),
        };

        Self {
            timestamp: Local::now(),
            module: module.trim().to_lowercase(),
            level,
            level_name,
            message: message.into(),
            context,
        }
    }

    #[must_use]
    pub const fn timestamp(&self) -> &DateTime<Local> {
        &self.timestamp
    }

    /// Empty when neither the caller nor the configuration supplied a module.
    #[must_use]
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Severity used for filtering and the JSON numeric level.
    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    /// Uppercase label written to the sinks; differs from `level()` only for unknown names.
    #[must_use]
    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `None` (no context given) is distinct from an empty mapping.
    #[must_use]
    pub const fn context(&self) -> Option<&Value> {
        self.context.as_ref()
    }

    /// `module.LEVEL`, or the bare `LEVEL` for records without a module.
    #[must_use]
    pub fn prefix(&self) -> String {
        if self.module.is_empty() {
            self.level_name.clone()
        } else {
            format!("{}.{}", self.module, self.level_name)
        }
    }
}
