//! Buffered log entry

use super::log_level::LogLevel;
use super::timestamp::{resolve_timezone, TimeDisplay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum stored message length in bytes
pub const MAX_MESSAGE_LEN: usize = 1000;

/// One deduplicated `(message, level)` record within a span.
///
/// `group` and `span` are copies of the writing handle's binding and are kept
/// for convenience; the owning bucket keys are authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub(crate) group: String,
    pub(crate) span: String,
    pub(crate) message: String,
    pub(crate) level: LogLevel,
    pub(crate) last_seen: DateTime<Utc>,
    pub(crate) count: u32,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        group: impl Into<String>,
        span: impl Into<String>,
        message: impl Into<String>,
        time: DateTime<Utc>,
    ) -> Self {
        Self {
            group: group.into(),
            span: span.into(),
            message: message.into(),
            level,
            last_seen: time,
            count: 1,
        }
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn span(&self) -> &str {
        &self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Time of the most recent occurrence
    pub fn time(&self) -> DateTime<Utc> {
        self.last_seen
    }

    /// Number of times this `(message, level)` was written
    pub fn count(&self) -> u32 {
        self.count
    }

    pub(crate) fn matches(&self, level: LogLevel, message: &str) -> bool {
        self.level == level && self.message == message
    }

    pub(crate) fn record_occurrence(&mut self, time: DateTime<Utc>) {
        self.count = self.count.saturating_add(1);
        self.last_seen = time;
    }

    /// Relative age of the entry, rendered in `timezone`
    pub fn time_ago(&self, timezone: &str) -> String {
        self.time_ago_at(timezone, &Utc::now())
    }

    pub fn time_ago_at(&self, timezone: &str, now: &DateTime<Utc>) -> String {
        TimeDisplay::Relative.render(&self.last_seen, resolve_timezone(timezone), now)
    }

    /// `<time> - [<LEVEL>] <message>`, plus ` [xN]` when seen more than once
    pub fn formatted_message(&self, timezone: &str, exact_time: bool) -> String {
        self.formatted_message_at(timezone, exact_time, &Utc::now())
    }

    pub fn formatted_message_at(
        &self,
        timezone: &str,
        exact_time: bool,
        now: &DateTime<Utc>,
    ) -> String {
        let time_part =
            TimeDisplay::from_exact(exact_time).render(&self.last_seen, resolve_timezone(timezone), now);
        let line = format!("{} - [{}] {}", time_part, self.level, self.message);
        if self.count > 1 {
            format!("{} [x{}]", line, self.count)
        } else {
            line
        }
    }
}

/// Cut `message` to at most [`MAX_MESSAGE_LEN`] bytes on a char boundary.
///
/// Returns `true` when the message was shortened.
pub(crate) fn truncate_message(message: &mut String) -> bool {
    if message.len() <= MAX_MESSAGE_LEN {
        return false;
    }
    let mut cut = MAX_MESSAGE_LEN;
    while !message.is_char_boundary(cut) {
        cut -= 1;
    }
    message.truncate(cut);
    true
}
