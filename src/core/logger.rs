//! Write handle bound to a group and span

use super::{buffer::WriteOutcome, log_level::LogLevel, template::format_template, tracer::Tracer};
use std::fmt;

/// A `(tracer, group, span)` binding.
///
/// Handles hold no state of their own, so they can be cloned, rebound and
/// shared between threads freely; all synchronization lives in the tracer.
///
/// # Examples
///
/// ```
/// use trace_buffer::Tracer;
///
/// let tracer = Tracer::new();
/// let logger = tracer.trace("request-42", "auth");
/// logger.info("token accepted");
/// logger.with_span("db").warn(format!("slow query: {}ms", 812));
///
/// assert_eq!(tracer.list_spans("request-42").len(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct TraceLogger {
    tracer: Tracer,
    group: String,
    span: String,
}

impl TraceLogger {
    pub(crate) fn new(tracer: Tracer, group: String, span: String) -> Self {
        Self { tracer, group, span }
    }

    /// Same group, different span
    #[must_use]
    pub fn with_span(&self, span: impl Into<String>) -> Self {
        Self::new(self.tracer.clone(), self.group.clone(), span.into())
    }

    /// Rebind both group and span
    #[must_use]
    pub fn with(&self, group: impl Into<String>, span: impl Into<String>) -> Self {
        Self::new(self.tracer.clone(), group.into(), span.into())
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn span(&self) -> &str {
        &self.span
    }

    pub fn tracer(&self) -> &Tracer {
        &self.tracer
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) -> WriteOutcome {
        self.tracer.write(level, &self.group, &self.span, message)
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Log a runtime template, see [`format_template`] for substitution rules
    pub fn log_args(&self, level: LogLevel, template: &str, args: &[&dyn fmt::Display]) -> WriteOutcome {
        self.log(level, format_template(template, args))
    }

    pub fn info_args(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log_args(LogLevel::Info, template, args);
    }

    pub fn warn_args(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log_args(LogLevel::Warn, template, args);
    }

    pub fn error_args(&self, template: &str, args: &[&dyn fmt::Display]) {
        self.log_args(LogLevel::Error, template, args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_handle_has_empty_span() {
        let tracer = Tracer::new();
        let logger = tracer.group("g");
        assert_eq!(logger.group(), "g");
        assert_eq!(logger.span(), "");

        logger.info("hello");
        assert_eq!(tracer.list_spans("g"), vec![""]);
    }

    #[test]
    fn test_rebinding_leaves_original_untouched() {
        let tracer = Tracer::new();
        let logger = tracer.trace("g", "s");

        let child = logger.with_span("t");
        assert_eq!((child.group(), child.span()), ("g", "t"));

        let moved = logger.with("h", "u");
        assert_eq!((moved.group(), moved.span()), ("h", "u"));

        assert_eq!((logger.group(), logger.span()), ("g", "s"));
    }

    #[test]
    fn test_severity_methods() {
        let tracer = Tracer::new();
        let logger = tracer.trace("g", "s");
        logger.info("same");
        logger.warn("same");
        logger.error("same");

        let mut levels: Vec<LogLevel> = tracer.logs("g")[0].iter().map(|e| e.level()).collect();
        levels.sort();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Warn, LogLevel::Error]);
    }

    #[test]
    fn test_entry_carries_binding() {
        let tracer = Tracer::new();
        tracer.trace("g", "s").info("x");
        let entry = &tracer.logs("g")[0][0];
        assert_eq!(entry.group(), "g");
        assert_eq!(entry.span(), "s");
    }

    #[test]
    fn test_template_args() {
        let tracer = Tracer::new();
        let logger = tracer.trace("g", "s");
        logger.warn_args("retry {} of {}", &[&2, &5]);
        assert_eq!(tracer.logs("g")[0][0].message(), "retry 2 of 5");
    }

    #[test]
    fn test_empty_message_is_dropped() {
        let tracer = Tracer::new();
        let outcome = tracer.trace("g", "s").log(LogLevel::Info, "");
        assert_eq!(outcome, WriteOutcome::Empty);
        assert!(tracer.logs("g")[0].is_empty());
    }
}
