//! Fans one record out to every registered sink.

use crate::internal;
use crate::output::{LogRecord, Sink, SinkError};

/// Per-record result of a fan-out.
#[derive(Debug, Default)]
pub struct RouteReport {
    /// Sinks that accepted the record.
    pub accepted: usize,
    /// Sink name and error for every sink that rejected it, in registration order.
    pub failures: Vec<(String, SinkError)>,
    /// Whether the first registered sink accepted the record.
    pub primary_ok: bool,
}

impl RouteReport {
    /// The record counts as logged when the primary sink took it.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.primary_ok
    }
}

/// Owns the sinks in registration order. The first sink is the primary one: its result
/// decides overall success, while failures of later sinks are reported on the diagnostic
/// channel only. Failed writes are never retried.
#[derive(Default)]
pub struct LogRouter {
    sinks: Vec<Box<dyn Sink>>,
}

impl LogRouter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sink: impl Sink + 'static) {
        self.sinks.push(Box::new(sink));
    }

    pub fn push_boxed(&mut self, sink: Box<dyn Sink>) {
        self.sinks.push(sink);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Sink names in registration order.
    pub fn sink_names(&self) -> impl Iterator<Item = &str> {
        self.sinks.iter().map(|s| s.name())
    }

    /// Writes `record` to every sink, isolating each sink's failure from the others.
    #[must_use]
    pub fn dispatch(&self, record: &LogRecord) -> RouteReport {
        let mut report = RouteReport::default();

        for (index, sink) in self.sinks.iter().enumerate() {
            match sink.write(record) {
                Ok(()) => {
                    report.accepted += 1;
                    if index == 0 {
                        report.primary_ok = true;
                    }
                }
                Err(e) => {
                    let scope = if index == 0 { "primary" } else { "secondary" };
                    let msg = format!("{scope} sink {} rejected record: {e}", sink.name());
                    if index == 0 {
                        internal::error("ROUTER", &msg);
                    } else {
                        internal::warn("ROUTER", &msg);
                    }
                    report.failures.push((sink.name().to_string(), e));
                }
            }
        }

        report
    }

    /// `true` iff the primary sink accepted the record.
    #[must_use]
    pub fn write(&self, record: &LogRecord) -> bool {
        self.dispatch(record).success()
    }

    /// Closes every sink, finalizing envelopes. Errors are reported, not returned,
    /// so one sink cannot keep the others open.
    pub fn close(&self) {
        for sink in &self.sinks {
            if let Err(e) = sink.close() {
                internal::warn("ROUTER", &format!("closing {} failed: {e}", sink.name()));
            }
        }
    }
}

impl Drop for LogRouter {
    fn drop(&mut self) {
        self.close();
    }
}
