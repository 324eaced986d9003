//! Human-formatted snapshots of the buffer
//!
//! A snapshot renders every retained entry to a line such as
//! `"12s ago - [WARN] disk almost full [x3]"` and returns the result twice:
//! as nested maps and as compact JSON bytes. The JSON keys are written in
//! recency order (most recently written group first, and likewise for the
//! spans inside each group), which a map serializer would not preserve, so the
//! object is emitted key by key.

use super::buffer::TraceBuffer;
use super::error::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// span name -> formatted lines
pub type SpanLines = HashMap<String, Vec<String>>;
/// group name -> spans
pub type GroupLines = HashMap<String, SpanLines>;

/// Rendering and filtering options for [`Tracer::snapshot`](super::Tracer::snapshot)
///
/// # Examples
///
/// ```
/// use trace_buffer::SnapshotOptions;
///
/// let options = SnapshotOptions::new()
///     .with_timezone("Europe/Berlin")
///     .with_exact_time(true)
///     .with_group_filter("request-");
/// assert_eq!(options.group_filter, "request-");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotOptions {
    /// IANA timezone name; empty or unknown renders in UTC
    pub timezone: String,
    /// Exact timestamps instead of relative ages
    pub exact_time: bool,
    /// Only groups whose name starts with this prefix (empty = all)
    pub group_filter: String,
    /// Only spans whose name starts with this prefix (empty = all)
    pub span_filter: String,
}

impl SnapshotOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    #[must_use]
    pub fn with_exact_time(mut self, exact_time: bool) -> Self {
        self.exact_time = exact_time;
        self
    }

    #[must_use]
    pub fn with_group_filter(mut self, prefix: impl Into<String>) -> Self {
        self.group_filter = prefix.into();
        self
    }

    #[must_use]
    pub fn with_span_filter(mut self, prefix: impl Into<String>) -> Self {
        self.span_filter = prefix.into();
        self
    }
}

/// Point-in-time rendering of the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub groups: GroupLines,
    /// Same data as `groups`, as a JSON object with recency-ordered keys
    pub json: Vec<u8>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            groups: HashMap::new(),
            json: b"{}".to_vec(),
        }
    }
}

impl Snapshot {
    /// JSON form as text. Always valid UTF-8 since it is built from `String`s.
    pub fn as_json_str(&self) -> &str {
        std::str::from_utf8(&self.json).unwrap_or("{}")
    }

    pub fn into_parts(self) -> (GroupLines, Vec<u8>) {
        (self.groups, self.json)
    }
}

/// Render `buffer` with a single `now` reading for all relative times
pub(crate) fn render(
    buffer: &TraceBuffer,
    options: &SnapshotOptions,
    now: &DateTime<Utc>,
) -> Result<Snapshot> {
    let mut groups = GroupLines::new();
    let mut json: Vec<u8> = Vec::new();

    json.push(b'{');
    for (i, (group_name, bucket)) in buffer
        .groups_by_recency(&options.group_filter)
        .into_iter()
        .enumerate()
    {
        if i > 0 {
            json.push(b',');
        }
        serde_json::to_writer(&mut json, group_name)?;
        json.extend_from_slice(b":{");

        let mut spans = SpanLines::new();
        let ordered = bucket
            .spans_by_recency()
            .into_iter()
            .filter(|(name, _)| name.starts_with(&options.span_filter));
        for (j, (span_name, span)) in ordered.enumerate() {
            if j > 0 {
                json.push(b',');
            }
            serde_json::to_writer(&mut json, span_name)?;
            json.push(b':');

            let lines: Vec<String> = span
                .entries_by_recency()
                .iter()
                .map(|entry| entry.formatted_message_at(&options.timezone, options.exact_time, now))
                .collect();
            serde_json::to_writer(&mut json, &lines)?;
            spans.insert(span_name.clone(), lines);
        }

        json.push(b'}');
        groups.insert(group_name.clone(), spans);
    }
    json.push(b'}');

    Ok(Snapshot { groups, json })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::TracerConfig;
    use crate::core::log_level::LogLevel;
    use crate::core::metrics::TracerMetrics;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 0)
            .single()
            .expect("valid datetime")
            + Duration::seconds(secs)
    }

    fn sample() -> TraceBuffer {
        let metrics = TracerMetrics::new();
        let mut buf = TraceBuffer::new(TracerConfig::default(), true);
        buf.write(LogLevel::Info, "g1", "s1", "one".into(), at(0), &metrics);
        buf.write(LogLevel::Warn, "g2", "a", "two".into(), at(1), &metrics);
        buf.write(LogLevel::Error, "g1", "s2", "three".into(), at(2), &metrics);
        buf.write(LogLevel::Error, "g1", "s2", "three".into(), at(3), &metrics);
        buf
    }

    #[test]
    fn test_json_key_order_is_recency() {
        let snapshot = render(&sample(), &SnapshotOptions::new(), &at(10)).unwrap();
        assert_eq!(
            snapshot.as_json_str(),
            r#"{"g1":{"s2":["7s ago - [ERROR] three [x2]"],"s1":["10s ago - [INFO] one"]},"g2":{"a":["9s ago - [WARN] two"]}}"#
        );
    }

    #[test]
    fn test_map_matches_json() {
        let snapshot = render(&sample(), &SnapshotOptions::new(), &at(10)).unwrap();
        let parsed: GroupLines = serde_json::from_slice(&snapshot.json).unwrap();
        assert_eq!(parsed, snapshot.groups);
    }

    #[test]
    fn test_exact_time() {
        let options = SnapshotOptions::new().with_exact_time(true).with_group_filter("g2");
        let snapshot = render(&sample(), &options, &at(10)).unwrap();
        assert_eq!(
            snapshot.as_json_str(),
            r#"{"g2":{"a":["08 Jan 25 10:30 UTC - [WARN] two"]}}"#
        );
    }

    #[test]
    fn test_span_filter_keeps_group_shell() {
        let options = SnapshotOptions::new().with_span_filter("a");
        let snapshot = render(&sample(), &options, &at(10)).unwrap();
        assert_eq!(snapshot.as_json_str(), r#"{"g1":{},"g2":{"a":["9s ago - [WARN] two"]}}"#);
        assert!(snapshot.groups["g1"].is_empty());
    }

    #[test]
    fn test_keys_are_json_escaped() {
        let metrics = TracerMetrics::new();
        let mut buf = TraceBuffer::new(TracerConfig::default(), true);
        buf.write(LogLevel::Info, "g\"1", "s\n", "say \"hi\"".into(), at(0), &metrics);

        let snapshot = render(&buf, &SnapshotOptions::new(), &at(0)).unwrap();
        assert_eq!(
            snapshot.as_json_str(),
            r#"{"g\"1":{"s\n":["0s ago - [INFO] say \"hi\""]}}"#
        );
    }

    #[test]
    fn test_empty_buffer() {
        let buf = TraceBuffer::new(TracerConfig::default(), true);
        let snapshot = render(&buf, &SnapshotOptions::new(), &at(0)).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }
}
