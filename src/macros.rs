//! Logging macros for ergonomic message formatting.
//!
//! The macros format with `format!`, so a template whose placeholders do not
//! match its arguments is rejected at compile time. For templates only known
//! at runtime use [`TraceLogger::info_args`](crate::TraceLogger::info_args)
//! and friends.
//!
//! # Examples
//!
//! ```
//! use trace_buffer::prelude::*;
//! use trace_buffer::info;
//!
//! let tracer = Tracer::new();
//! let logger = tracer.trace("server", "startup");
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message with automatic formatting at the given level.
///
/// # Examples
///
/// ```
/// # use trace_buffer::prelude::*;
/// # let logger = Tracer::new().trace("g", "s");
/// use trace_buffer::log;
/// log!(logger, LogLevel::Info, "Simple message");
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log an info-level message.
///
/// ```
/// # use trace_buffer::prelude::*;
/// # let logger = Tracer::new().trace("g", "s");
/// use trace_buffer::info;
/// info!(logger, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}
