//! Timestamp formatting for text sinks

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options for rendered entries
///
/// # Examples
///
/// ```
/// use yall::TimestampFormat;
/// use chrono::Utc;
///
/// let format = TimestampFormat::Iso8601;
/// assert!(format.format(&Utc::now()).ends_with('Z'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Local time with milliseconds: `2025/01/08 10:30:45.123`
    #[default]
    Console,

    /// ISO 8601 in UTC with milliseconds: `2025-01-08T10:30:45.123Z`
    Iso8601,

    /// RFC 3339 in UTC: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format, applied in local time
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Console => datetime
                .with_timezone(&Local)
                .format("%Y/%m/%d %H:%M:%S%.3f")
                .to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => {
                datetime.to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
            }
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                let local = datetime.with_timezone(&Local);
                // invalid specifiers make Display fail instead of rendering
                if write!(out, "{}", local.format(format_str)).is_err() {
                    return TimestampFormat::Console.format(datetime);
                }
                out
            }
        }
    }

    /// Reject custom formats containing invalid strftime specifiers
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(format_str) = self {
            if StrftimeItems::new(format_str).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime format '{}'", format_str),
                ));
            }
        }
        Ok(())
    }
}
