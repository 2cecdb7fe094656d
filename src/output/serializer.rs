//! Rendering strategies the sinks hold by composition.

use super::{LogRecord, Serializer, SinkError};
use crate::fmt::{
    DEFAULT_TIMESTAMP_FORMAT, FormatTemplate, FormatValues, escape_line_breaks, render_context,
};
use chrono::SecondsFormat;
use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use std::fmt::Write as _;
use ulid::Ulid;

/// One line per record: `timestamp [module.]LEVEL message context`, newline-terminated.
/// Line breaks inside any column, a string context included, are written as `\n` and `\r`.
#[derive(Debug, Clone)]
pub struct LineSerializer {
    template: FormatTemplate,
    timestamp_format: String,
}

impl Default for LineSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSerializer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            template: FormatTemplate::default(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    #[must_use]
    pub fn template(mut self, template: &str) -> Self {
        self.template = FormatTemplate::parse(template);
        self
    }

    /// strftime-style, rendered by chrono.
    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }
}

impl Serializer for LineSerializer {
    fn serialize(&self, record: &LogRecord) -> Result<String, SinkError> {
        // An invalid strftime pattern must not take the record down with it.
        let mut timestamp = String::new();
        if write!(timestamp, "{}", record.timestamp().format(&self.timestamp_format)).is_err() {
            timestamp = record.timestamp().to_rfc3339_opts(SecondsFormat::Micros, false);
        }

        let values = FormatValues::new()
            .timestamp(timestamp)
            .prefix(escape_line_breaks(&record.prefix()).into_owned())
            .module(escape_line_breaks(record.module()))
            .level(escape_line_breaks(record.level_name()))
            .msg(escape_line_breaks(record.message()))
            .context(escape_line_breaks(&render_context(record.context())).into_owned());

        let mut line = self.template.render(&values);
        line.push('\n');
        Ok(line)
    }
}

/// Shape of one element of the JSON array log.
#[derive(Debug, Serialize)]
struct JsonEntry<'a> {
    datetime: String,
    channel: &'a str,
    level: u16,
    level_name: &'a str,
    message: &'a str,
    /// Absent context is written as an empty object so every element has the same shape.
    context: Value,
    extra: Extra,
}

#[derive(Debug, Serialize)]
struct Extra {
    /// Time-sortable and unique even with several processes appending to one file.
    id: String,
}

/// Indented JSON (four spaces) with `/` and non-ASCII characters left unescaped.
#[derive(Debug, Clone, Default)]
pub struct PrettyJsonSerializer;

impl PrettyJsonSerializer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Serializer for PrettyJsonSerializer {
    fn serialize(&self, record: &LogRecord) -> Result<String, SinkError> {
        let entry = JsonEntry {
            datetime: record.timestamp().to_rfc3339_opts(SecondsFormat::Micros, false),
            channel: record.module(),
            level: record.level().code(),
            level_name: record.level_name(),
            message: record.message(),
            context: record
                .context()
                .cloned()
                .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
            extra: Extra {
                id: Ulid::new().to_string(),
            },
        };

        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        entry
            .serialize(&mut ser)
            .map_err(|e| SinkError::Serialize(e.to_string()))?;
        String::from_utf8(buf).map_err(|e| SinkError::Serialize(e.to_string()))
    }
}
