//! Line templates and context rendering for the plain-text sinks.

pub mod format;

pub use format::{
    DEFAULT_LINE_FORMAT, DEFAULT_TIMESTAMP_FORMAT, FormatSegment, FormatTemplate, FormatValues,
    Placeholder, escape_line_breaks, render_context,
};
