//! # Trace Buffer
//!
//! A bounded, in-process, hierarchical buffer for recent diagnostic messages.
//!
//! Messages are grouped by *group* (a request id, a subsystem) and *span* (an
//! operation inside the group). The buffer keeps memory capped at all three
//! levels and never rejects a write.
//!
//! ## Features
//!
//! - **Bounded**: least recently written groups and spans are evicted, and
//!   messages within a span are evicted oldest-inserted first
//! - **Deduplicated**: repeated `(message, level)` pairs bump a counter
//!   instead of taking another slot
//! - **Ordered views**: listings and snapshots are most recent first, and the
//!   JSON snapshot keeps that order byte for byte
//! - **Thread safe**: one `RwLock` guards the store; handles are cheap clones
//!
//! ```
//! use trace_buffer::prelude::*;
//!
//! let tracer = Tracer::new();
//! let logger = tracer.trace("checkout", "payment");
//! logger.info("charge started");
//! logger.info("charge started");
//!
//! let snapshot = tracer.snapshot(&SnapshotOptions::new());
//! assert!(snapshot.as_json_str().contains("[x2]"));
//! ```

pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        Clock, GroupLines, LogEntry, LogLevel, Result, Snapshot, SnapshotOptions, TimeDisplay,
        TraceLogger, Tracer, TracerBuilder, TracerConfig, TracerError, TracerMetrics, WriteOutcome,
    };
}

pub use self::core::{
    format_template, resolve_timezone, Clock, GroupLines, LogEntry, LogLevel, Result, Snapshot,
    SnapshotOptions, SpanLines, TimeDisplay, TraceLogger, Tracer, TracerBuilder, TracerConfig,
    TracerError, TracerMetrics, WriteOutcome, DEFAULT_GROUP_COUNT, DEFAULT_MESSAGE_COUNT,
    DEFAULT_SPAN_COUNT, MAX_MESSAGE_LEN,
};
