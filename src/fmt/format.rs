//! Text sinks render each record through a line template such as
//! `{timestamp} {prefix} {msg} {context}`, so deployments can reorder or drop columns
//! without touching code.

use serde_json::Value;
use std::borrow::Cow;

/// Known substitution tokens. Unknown `{names}` pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    Timestamp,
    /// `module.LEVEL`, or the bare `LEVEL` when the record has no module.
    Prefix,
    Module,
    Level,
    Msg,
    Context,
}

impl Placeholder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Prefix => "prefix",
            Self::Module => "module",
            Self::Level => "level",
            Self::Msg => "msg",
            Self::Context => "context",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Timestamp,
        Self::Prefix,
        Self::Module,
        Self::Level,
        Self::Msg,
        Self::Context,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatSegment {
    /// Whitespace, separators, and unknown `{names}` pass through untouched.
    Literal(String),
    Placeholder(Placeholder),
}

/// Parsed once at sink construction, rendered for every record.
#[derive(Debug, Clone)]
pub struct FormatTemplate {
    segments: Vec<FormatSegment>,
}

impl FormatTemplate {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            current.push_str(&rest[..open]);
            let name = &rest[open + 1..close];

            match Self::match_placeholder(name) {
                Some(ph) => {
                    if !current.is_empty() {
                        segments.push(FormatSegment::Literal(std::mem::take(&mut current)));
                    }
                    segments.push(FormatSegment::Placeholder(ph));
                }
                None => current.push_str(&rest[open..=close]),
            }
            rest = &rest[close + 1..];
        }

        current.push_str(rest);
        if !current.is_empty() {
            segments.push(FormatSegment::Literal(current));
        }

        Self { segments }
    }

    fn match_placeholder(name: &str) -> Option<Placeholder> {
        Placeholder::ALL
            .iter()
            .copied()
            .find(|ph| ph.as_str() == name)
    }

    #[must_use]
    pub fn segments(&self) -> &[FormatSegment] {
        &self.segments
    }

    /// Separators left dangling by empty trailing placeholders are dropped, so a record
    /// without context does not end in a space. Whitespace inside a value is kept.
    #[must_use]
    pub fn render(&self, values: &FormatValues) -> String {
        let mut result = String::new();
        let mut content_end = 0;

        for segment in &self.segments {
            match segment {
                FormatSegment::Literal(s) => {
                    let start = result.len();
                    result.push_str(s);
                    let kept = s.trim_end().len();
                    if kept > 0 {
                        content_end = start + kept;
                    }
                }
                FormatSegment::Placeholder(ph) => {
                    let value = match ph {
                        Placeholder::Timestamp => &values.timestamp,
                        Placeholder::Prefix => &values.prefix,
                        Placeholder::Module => &values.module,
                        Placeholder::Level => &values.level,
                        Placeholder::Msg => &values.msg,
                        Placeholder::Context => &values.context,
                    };
                    result.push_str(value);
                    if !value.is_empty() {
                        content_end = result.len();
                    }
                }
            }
        }

        result.truncate(content_end);
        result
    }
}

impl Default for FormatTemplate {
    fn default() -> Self {
        Self::parse(DEFAULT_LINE_FORMAT)
    }
}

/// Line layout used when the configuration does not override it.
pub const DEFAULT_LINE_FORMAT: &str = "{timestamp} {prefix} {msg} {context}";

/// ISO-8601 with microseconds and UTC offset.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f%:z";

/// Typed value bag ensures every placeholder has a corresponding field.
#[derive(Debug, Clone, Default)]
pub struct FormatValues {
    pub timestamp: String,
    pub prefix: String,
    pub module: String,
    pub level: String,
    pub msg: String,
    pub context: String,
}

impl FormatValues {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = timestamp.into();
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn msg(mut self, msg: impl Into<String>) -> Self {
        self.msg = msg.into();
        self
    }

    #[must_use]
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }
}

/// Scalars are written in their literal form, mappings and sequences as single-line JSON.
#[must_use]
pub fn render_context(context: Option<&Value>) -> String {
    match context {
        None => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_json::to_string(other)
            .unwrap_or_else(|e| format!(r#"{{"json_error":"{e}"}}"#)),
    }
}

/// Escapes CR and LF as `\r` and `\n` so one record stays on one line.
#[must_use]
pub fn escape_line_breaks(value: &str) -> Cow<'_, str> {
    if !value.contains(['\n', '\r']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}
