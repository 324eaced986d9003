//! Bounded three-level store: group -> span -> deduplicated entries
//!
//! `TraceBuffer` holds no lock of its own; [`Tracer`](super::Tracer) wraps it
//! in a `RwLock` so every write runs as one critical section.
//!
//! Eviction works differently per level:
//! - groups and spans are evicted by least recent write,
//! - entries are evicted in insertion order (FIFO), independent of how
//!   recently a duplicate refreshed them.

use super::config::TracerConfig;
use super::log_entry::{truncate_message, LogEntry};
use super::log_level::LogLevel;
use super::metrics::TracerMetrics;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};

/// Result of a single write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// Tracer disabled, nothing changed
    Disabled,
    /// Formatted message was empty; group and span were still touched
    Empty,
    /// Merged into an existing entry
    Deduplicated,
    /// New entry appended
    Inserted,
}

#[derive(Debug, Clone)]
pub(crate) struct SpanBucket {
    pub(crate) entries: VecDeque<LogEntry>,
    pub(crate) last_written: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct GroupBucket {
    pub(crate) spans: HashMap<String, SpanBucket>,
    pub(crate) last_written: DateTime<Utc>,
}

impl GroupBucket {
    /// Spans ordered most recently written first
    pub(crate) fn spans_by_recency(&self) -> Vec<(&String, &SpanBucket)> {
        let mut spans: Vec<_> = self.spans.iter().collect();
        spans.sort_by(|a, b| b.1.last_written.cmp(&a.1.last_written));
        spans
    }
}

impl SpanBucket {
    /// Entries ordered by last occurrence, most recent first
    pub(crate) fn entries_by_recency(&self) -> Vec<LogEntry> {
        let mut entries: Vec<LogEntry> = self.entries.iter().cloned().collect();
        entries.sort_by(|a, b| b.last_seen.cmp(&a.last_seen));
        entries
    }
}

#[derive(Debug)]
pub(crate) struct TraceBuffer {
    config: TracerConfig,
    enabled: bool,
    groups: HashMap<String, GroupBucket>,
    last_issued: Option<DateTime<Utc>>,
}

impl TraceBuffer {
    /// Capacities are taken as given; normalization happens in the builder.
    pub(crate) fn new(config: TracerConfig, enabled: bool) -> Self {
        Self {
            config,
            enabled,
            groups: HashMap::new(),
            last_issued: None,
        }
    }

    pub(crate) fn config(&self) -> &TracerConfig {
        &self.config
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Timestamps handed out by one buffer are strictly increasing.
    fn issue_timestamp(&mut self, clock_now: DateTime<Utc>) -> DateTime<Utc> {
        let now = match self.last_issued {
            Some(last) if clock_now <= last => last + Duration::nanoseconds(1),
            _ => clock_now,
        };
        self.last_issued = Some(now);
        now
    }

    pub(crate) fn write(
        &mut self,
        level: LogLevel,
        group: &str,
        span: &str,
        mut message: String,
        clock_now: DateTime<Utc>,
        metrics: &TracerMetrics,
    ) -> WriteOutcome {
        if !self.enabled {
            metrics.record_dropped_disabled();
            return WriteOutcome::Disabled;
        }

        let now = self.issue_timestamp(clock_now);

        if !self.groups.contains_key(group) {
            let max_groups = self.config.max_groups;
            if max_groups > 0 && self.groups.len() >= max_groups {
                if let Some(oldest) = oldest_key(self.groups.iter().map(|(k, g)| (k, g.last_written))) {
                    self.groups.remove(&oldest);
                    metrics.record_group_evicted();
                }
            }
        }
        let bucket = self
            .groups
            .entry(group.to_string())
            .or_insert_with(|| GroupBucket {
                spans: HashMap::new(),
                last_written: now,
            });
        bucket.last_written = now;

        if !bucket.spans.contains_key(span) {
            let max_spans = self.config.max_spans_per_group;
            if max_spans > 0 && bucket.spans.len() >= max_spans {
                if let Some(oldest) = oldest_key(bucket.spans.iter().map(|(k, s)| (k, s.last_written))) {
                    bucket.spans.remove(&oldest);
                    metrics.record_span_evicted();
                }
            }
        }
        let max_messages = self.config.max_messages_per_span;
        let span_bucket = bucket
            .spans
            .entry(span.to_string())
            .or_insert_with(|| SpanBucket {
                entries: VecDeque::with_capacity(max_messages),
                last_written: now,
            });
        span_bucket.last_written = now;

        if message.is_empty() {
            metrics.record_dropped_empty();
            return WriteOutcome::Empty;
        }
        if truncate_message(&mut message) {
            metrics.record_truncated();
        }

        if let Some(existing) = span_bucket
            .entries
            .iter_mut()
            .find(|entry| entry.matches(level, &message))
        {
            existing.record_occurrence(now);
            metrics.record_deduplicated();
            return WriteOutcome::Deduplicated;
        }

        let entry = LogEntry::new(level, group, span, message, now);
        if max_messages == 0 {
            // Message storage disabled for this span; bookkeeping above still applies.
            span_bucket.entries.clear();
        } else {
            if span_bucket.entries.len() >= max_messages {
                span_bucket.entries.pop_front();
                metrics.record_entry_evicted();
            }
            span_bucket.entries.push_back(entry);
        }
        metrics.record_written();
        WriteOutcome::Inserted
    }

    pub(crate) fn list_groups(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    pub(crate) fn list_spans(&self, group: &str) -> Vec<String> {
        self.groups
            .get(group)
            .map(|bucket| bucket.spans.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Entries per span; spans and entries both most recent first
    pub(crate) fn logs(&self, group: &str) -> Vec<Vec<LogEntry>> {
        let Some(bucket) = self.groups.get(group) else {
            return Vec::new();
        };
        bucket
            .spans_by_recency()
            .into_iter()
            .map(|(_, span)| span.entries_by_recency())
            .collect()
    }

    /// Groups ordered most recently written first, restricted to names
    /// starting with `prefix` (all groups when `prefix` is empty)
    pub(crate) fn groups_by_recency(&self, prefix: &str) -> Vec<(&String, &GroupBucket)> {
        let mut groups: Vec<_> = self
            .groups
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .collect();
        groups.sort_by(|a, b| b.1.last_written.cmp(&a.1.last_written));
        groups
    }

    #[cfg(test)]
    pub(crate) fn group(&self, group: &str) -> Option<&GroupBucket> {
        self.groups.get(group)
    }
}

/// Key with the oldest timestamp; the first one encountered wins a tie.
fn oldest_key<'a>(items: impl Iterator<Item = (&'a String, DateTime<Utc>)>) -> Option<String> {
    let mut oldest: Option<(&String, DateTime<Utc>)> = None;
    for (key, ts) in items {
        match oldest {
            Some((_, oldest_ts)) if ts >= oldest_ts => {}
            _ => oldest = Some((key, ts)),
        }
    }
    oldest.map(|(key, _)| key.clone())
}
