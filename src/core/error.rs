//! Error types for the logger system
//!
//! Emitting never fails; these errors surface only from flush paths and
//! from sink backends.

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A sink failed to flush buffered entries
    #[error("Flush failed for sink '{sink}': {message}")]
    FlushError { sink: String, message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create a flush error for the named sink
    pub fn flush(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FlushError {
            sink: sink.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::flush("cloud", "backend unavailable");
        assert!(matches!(err, LoggerError::FlushError { .. }));

        let err = LoggerError::config("SinkConfig", "unknown timestamp format");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::flush("cloud", "backend unavailable");
        assert_eq!(
            err.to_string(),
            "Flush failed for sink 'cloud': backend unavailable"
        );

        let err = LoggerError::config("SinkConfig", "bad value");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for SinkConfig: bad value"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: LoggerError = io_err.into();
        assert!(err.to_string().contains("pipe closed"));
    }
}
