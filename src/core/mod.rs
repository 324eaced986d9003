//! Core trace buffer types

mod buffer;
pub mod config;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod snapshot;
pub mod template;
pub mod timestamp;
pub mod tracer;

pub use buffer::WriteOutcome;
pub use config::{TracerConfig, DEFAULT_GROUP_COUNT, DEFAULT_MESSAGE_COUNT, DEFAULT_SPAN_COUNT};
pub use error::{Result, TracerError};
pub use log_entry::{LogEntry, MAX_MESSAGE_LEN};
pub use log_level::LogLevel;
pub use logger::TraceLogger;
pub use metrics::TracerMetrics;
pub use snapshot::{GroupLines, Snapshot, SnapshotOptions, SpanLines};
pub use template::format_template;
pub use timestamp::{resolve_timezone, TimeDisplay};
pub use tracer::{Clock, Tracer, TracerBuilder};
