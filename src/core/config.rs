//! Capacity configuration
//!
//! A tracer is bounded at three levels: number of groups, spans per group and
//! distinct messages per span. Capacities are fixed when the tracer is built.

use super::error::{Result, TracerError};
use serde::{Deserialize, Serialize};

/// Default number of retained groups
pub const DEFAULT_GROUP_COUNT: usize = 40;
/// Default number of spans per group
pub const DEFAULT_SPAN_COUNT: usize = 60;
/// Default number of distinct messages per span
pub const DEFAULT_MESSAGE_COUNT: usize = 60;

/// Capacity limits of a [`Tracer`](super::Tracer)
///
/// # Examples
///
/// ```
/// use trace_buffer::TracerConfig;
///
/// let config = TracerConfig::new()
///     .with_max_groups(10)
///     .with_max_messages_per_span(0)
///     .normalized();
///
/// assert_eq!(config.max_groups, 10);
/// assert_eq!(config.max_messages_per_span, 60);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TracerConfig {
    /// Caps total retained groups
    pub max_groups: usize,
    /// Caps spans per group
    pub max_spans_per_group: usize,
    /// Caps distinct deduplicated messages per span
    pub max_messages_per_span: usize,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_groups: DEFAULT_GROUP_COUNT,
            max_spans_per_group: DEFAULT_SPAN_COUNT,
            max_messages_per_span: DEFAULT_MESSAGE_COUNT,
        }
    }
}

impl TracerConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_groups(mut self, max_groups: usize) -> Self {
        self.max_groups = max_groups;
        self
    }

    #[must_use]
    pub fn with_max_spans_per_group(mut self, max_spans: usize) -> Self {
        self.max_spans_per_group = max_spans;
        self
    }

    #[must_use]
    pub fn with_max_messages_per_span(mut self, max_messages: usize) -> Self {
        self.max_messages_per_span = max_messages;
        self
    }

    /// Replace every zero capacity with its default
    #[must_use]
    pub fn normalized(self) -> Self {
        fn or_default(value: usize, default: usize) -> usize {
            if value < 1 {
                default
            } else {
                value
            }
        }

        Self {
            max_groups: or_default(self.max_groups, DEFAULT_GROUP_COUNT),
            max_spans_per_group: or_default(self.max_spans_per_group, DEFAULT_SPAN_COUNT),
            max_messages_per_span: or_default(self.max_messages_per_span, DEFAULT_MESSAGE_COUNT),
        }
    }

    /// Reject zero capacities instead of silently defaulting them
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("max_groups", self.max_groups),
            ("max_spans_per_group", self.max_spans_per_group),
            ("max_messages_per_span", self.max_messages_per_span),
        ];
        for (name, value) in fields {
            if value == 0 {
                return Err(TracerError::config(name, "must be at least 1"));
            }
        }
        Ok(())
    }

    /// Load from JSON; omitted fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
