//! Error types for the trace buffer
//!
//! Writes and reads on a [`Tracer`](super::Tracer) never fail. These errors are
//! only produced by the strict helpers (timezone parsing, level parsing and
//! configuration loading).

pub type Result<T> = std::result::Result<T, TracerError>;

#[derive(Debug, thiserror::Error)]
pub enum TracerError {
    /// Timezone name that is not a known IANA zone
    #[error("Unknown timezone: '{0}'")]
    InvalidTimezone(String),

    /// Severity name that is not INFO, WARN or ERROR
    #[error("Invalid log level: '{0}'")]
    InvalidLevel(String),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl TracerError {
    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        TracerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn timezone(name: impl Into<String>) -> Self {
        TracerError::InvalidTimezone(name.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TracerError::Other(msg.into())
    }
}
