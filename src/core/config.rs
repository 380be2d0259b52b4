//! Sink configuration

use super::error::Result;
use super::severity::Severity;
use super::timestamp::TimestampFormat;
use serde::{Deserialize, Serialize};

/// Settings shared by the text-rendering sinks
///
/// Deserializes from any serde format; missing keys take their defaults.
///
/// # Example
///
/// ```
/// use yall::{Severity, SinkConfig, TimestampFormat};
///
/// let config: SinkConfig = serde_json::from_str(r#"{"min_severity": "WARN"}"#).unwrap();
/// assert_eq!(config.min_severity, Severity::Warning);
/// assert!(config.colors);
///
/// let config = SinkConfig::new()
///     .with_min_severity(Severity::Info)
///     .with_timestamp_format(TimestampFormat::Iso8601);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Entries are filtered with [`should_log`](super::severity::should_log) against this
    pub min_severity: Severity,
    /// Colorize output by severity, where the sink supports it
    pub colors: bool,
    pub timestamp_format: TimestampFormat,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            min_severity: Severity::Debug,
            colors: true,
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl SinkConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }

    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.timestamp_format.validate()
    }
}
