//! Shared trace buffer
//!
//! [`Tracer`] is a cheap, clonable reference to one bounded store. Writes take
//! the store's write lock for the whole eviction + dedup + insert sequence;
//! reads take the read lock and return owned copies.

use super::{
    buffer::{TraceBuffer, WriteOutcome},
    config::TracerConfig,
    log_entry::LogEntry,
    log_level::LogLevel,
    logger::TraceLogger,
    metrics::TracerMetrics,
    snapshot::{self, GroupLines, Snapshot, SnapshotOptions},
};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;

/// Source of "now" for entry timestamps
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

struct Shared {
    buffer: RwLock<TraceBuffer>,
    metrics: TracerMetrics,
    clock: Clock,
}

#[derive(Clone)]
pub struct Tracer {
    shared: Arc<Shared>,
}

impl Tracer {
    /// Tracer with default capacities (40 groups, 60 spans, 60 messages)
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Tracer with the given capacities; zeros fall back to the defaults
    #[must_use]
    pub fn with_sizes(max_groups: usize, max_spans_per_group: usize, max_messages_per_span: usize) -> Self {
        Self::builder()
            .max_groups(max_groups)
            .max_spans_per_group(max_spans_per_group)
            .max_messages_per_span(max_messages_per_span)
            .build()
    }

    /// Inert tracer: minimal capacities and disabled.
    ///
    /// Hand this to code that must compile against a tracer when tracing is
    /// not wanted.
    #[must_use]
    pub fn noop() -> Self {
        Self::builder()
            .max_groups(1)
            .max_spans_per_group(1)
            .max_messages_per_span(1)
            .enabled(false)
            .build()
    }

    pub fn builder() -> TracerBuilder {
        TracerBuilder::new()
    }

    /// Handle bound to `group` and `span`
    pub fn trace(&self, group: impl Into<String>, span: impl Into<String>) -> TraceLogger {
        TraceLogger::new(self.clone(), group.into(), span.into())
    }

    /// Handle bound to `group` with an empty span name
    pub fn group(&self, group: impl Into<String>) -> TraceLogger {
        TraceLogger::new(self.clone(), group.into(), String::new())
    }

    /// Store one message. Never fails: capacity pressure evicts, oversized
    /// messages are truncated and empty ones are dropped.
    pub fn write(
        &self,
        level: LogLevel,
        group: &str,
        span: &str,
        message: impl Into<String>,
    ) -> WriteOutcome {
        if !self.is_enabled() {
            self.shared.metrics.record_dropped_disabled();
            return WriteOutcome::Disabled;
        }

        let message = message.into();
        let mut buffer = self.shared.buffer.write();
        let now = (self.shared.clock)();
        buffer.write(level, group, span, message, now, &self.shared.metrics)
    }

    /// Known group names, unordered
    pub fn list_groups(&self) -> Vec<String> {
        self.shared.buffer.read().list_groups()
    }

    /// Known span names of `group`, unordered; empty for an unknown group
    pub fn list_spans(&self, group: &str) -> Vec<String> {
        self.shared.buffer.read().list_spans(group)
    }

    /// Entries of `group`, one vector per span.
    ///
    /// Spans are ordered most recently written first and entries within a
    /// span by last occurrence, most recent first.
    pub fn logs(&self, group: &str) -> Vec<Vec<LogEntry>> {
        self.shared.buffer.read().logs(group)
    }

    /// Render the buffer as nested maps and recency-ordered JSON
    pub fn snapshot(&self, options: &SnapshotOptions) -> Snapshot {
        let buffer = self.shared.buffer.read();
        let now = (self.shared.clock)();
        match snapshot::render(&buffer, options, &now) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("[TRACER ERROR] Snapshot rendering failed: {}", e);
                Snapshot::default()
            }
        }
    }

    /// Tuple form of [`snapshot`](Self::snapshot)
    pub fn to_map(
        &self,
        timezone: &str,
        exact_time: bool,
        group_filter: &str,
        span_filter: &str,
    ) -> (GroupLines, Vec<u8>) {
        let options = SnapshotOptions::new()
            .with_timezone(timezone)
            .with_exact_time(exact_time)
            .with_group_filter(group_filter)
            .with_span_filter(span_filter);
        self.snapshot(&options).into_parts()
    }

    pub fn enable(&self) {
        self.shared.buffer.write().set_enabled(true);
    }

    /// Turn every subsequent write into a no-op; retained data stays readable
    pub fn disable(&self) {
        self.shared.buffer.write().set_enabled(false);
    }

    pub fn is_enabled(&self) -> bool {
        self.shared.buffer.read().is_enabled()
    }

    /// Effective capacities
    pub fn config(&self) -> TracerConfig {
        *self.shared.buffer.read().config()
    }

    pub fn metrics(&self) -> &TracerMetrics {
        &self.shared.metrics
    }
}

impl Default for Tracer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tracer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buffer = self.shared.buffer.read();
        f.debug_struct("Tracer")
            .field("config", buffer.config())
            .field("enabled", &buffer.is_enabled())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Tracer`]
///
/// # Examples
///
/// ```
/// use trace_buffer::Tracer;
///
/// let tracer = Tracer::builder()
///     .max_groups(10)
///     .max_spans_per_group(5)
///     .max_messages_per_span(100)
///     .build();
///
/// assert_eq!(tracer.config().max_groups, 10);
/// ```
pub struct TracerBuilder {
    config: TracerConfig,
    enabled: bool,
    clock: Option<Clock>,
}

impl TracerBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: TracerConfig::default(),
            enabled: true,
            clock: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: TracerConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn max_groups(mut self, max_groups: usize) -> Self {
        self.config.max_groups = max_groups;
        self
    }

    #[must_use]
    pub fn max_spans_per_group(mut self, max_spans: usize) -> Self {
        self.config.max_spans_per_group = max_spans;
        self
    }

    #[must_use]
    pub fn max_messages_per_span(mut self, max_messages: usize) -> Self {
        self.config.max_messages_per_span = max_messages;
        self
    }

    /// Start enabled (default) or disabled
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replace the wall clock, mainly for deterministic tests
    #[must_use]
    pub fn clock(mut self, clock: Clock) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Zero capacities are replaced by their defaults here.
    #[must_use]
    pub fn build(self) -> Tracer {
        let clock: Clock = match self.clock {
            Some(clock) => clock,
            None => Arc::new(Utc::now),
        };
        Tracer {
            shared: Arc::new(Shared {
                buffer: RwLock::new(TraceBuffer::new(self.config.normalized(), self.enabled)),
                metrics: TracerMetrics::new(),
                clock,
            }),
        }
    }
}

impl Default for TracerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DEFAULT_GROUP_COUNT, DEFAULT_MESSAGE_COUNT, DEFAULT_SPAN_COUNT};

    #[test]
    fn test_builder_default() {
        let tracer = TracerBuilder::default().build();
        assert_eq!(tracer.config(), TracerConfig::default());
        assert!(tracer.is_enabled());
    }

    #[test]
    fn test_with_sizes_normalizes_zero() {
        let tracer = Tracer::with_sizes(0, 3, 0);
        let config = tracer.config();
        assert_eq!(config.max_groups, DEFAULT_GROUP_COUNT);
        assert_eq!(config.max_spans_per_group, 3);
        assert_eq!(config.max_messages_per_span, DEFAULT_MESSAGE_COUNT);
        assert_ne!(config.max_spans_per_group, DEFAULT_SPAN_COUNT);
    }

    #[test]
    fn test_noop_tracer() {
        let tracer = Tracer::noop();
        assert!(!tracer.is_enabled());
        let config = tracer.config();
        assert_eq!(config.max_groups, 1);
        assert_eq!(config.max_spans_per_group, 1);
        assert_eq!(config.max_messages_per_span, 1);

        assert_eq!(tracer.write(LogLevel::Info, "g", "s", "m"), WriteOutcome::Disabled);
        assert!(tracer.list_groups().is_empty());
        assert_eq!(tracer.metrics().dropped_disabled(), 1);
    }

    #[test]
    fn test_clones_share_store() {
        let tracer = Tracer::new();
        let other = tracer.clone();
        other.write(LogLevel::Warn, "g", "s", "shared");
        assert_eq!(tracer.list_groups(), vec!["g"]);

        other.disable();
        assert!(!tracer.is_enabled());
    }

    #[test]
    fn test_custom_clock() {
        let fixed = chrono::DateTime::parse_from_rfc3339("2025-01-08T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let tracer = Tracer::builder().clock(Arc::new(move || fixed)).build();
        tracer.write(LogLevel::Info, "g", "s", "m");
        assert_eq!(tracer.logs("g")[0][0].time(), fixed);
    }

    #[test]
    fn test_debug_output() {
        let rendered = format!("{:?}", Tracer::noop());
        assert!(rendered.contains("enabled: false"));
    }
}
