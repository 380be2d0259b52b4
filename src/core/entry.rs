//! Log entry structure

use super::field::FieldValue;
use super::http_request::HttpRequest;
use super::severity::Severity;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Payload key carrying the primary human-readable message
pub const MESSAGE_KEY: &str = "msg";

/// Shared handle to an attached application error
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// An error attached to an entry, with the stack captured where it was attached
#[derive(Clone, Default)]
pub struct ErrorInfo {
    pub error: Option<SharedError>,
    pub stacktrace: String,
}

impl ErrorInfo {
    /// Error text, if an error value is present
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

impl fmt::Debug for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorInfo")
            .field("error", &self.message())
            .field("stacktrace_len", &self.stacktrace.len())
            .finish()
    }
}

/// A single log event: structured data plus metadata.
///
/// Entries are snapshots. They own copies of everything they carry, so
/// later changes to the `Logger` that produced them are never visible.
#[derive(Debug, Clone)]
pub struct Entry {
    /// When the entry was created
    pub logged_at: DateTime<Utc>,
    pub severity: Severity,
    /// Structured data; `"msg"` holds the headline message
    pub payload: HashMap<String, FieldValue>,
    /// Low-cardinality key/value metadata
    pub labels: HashMap<String, String>,
    pub http_request: Option<HttpRequest>,
    pub error: Option<ErrorInfo>,
    /// Principal the request was made on behalf of
    pub user: Option<String>,
}

impl Entry {
    /// Create an empty entry stamped with the current time
    pub fn new(severity: Severity) -> Self {
        Self {
            logged_at: Utc::now(),
            severity,
            payload: HashMap::new(),
            labels: HashMap::new(),
            http_request: None,
            error: None,
            user: None,
        }
    }

    #[must_use]
    pub fn with_logged_at(mut self, logged_at: DateTime<Utc>) -> Self {
        self.logged_at = logged_at;
        self
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// The headline message, if one was set
    pub fn message(&self) -> Option<&FieldValue> {
        self.payload.get(MESSAGE_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_is_stamped() {
        let before = Utc::now();
        let entry = Entry::new(Severity::Info);
        assert!(entry.logged_at >= before);
        assert!(entry.payload.is_empty());
        assert!(entry.http_request.is_none());
        assert!(entry.error.is_none());
    }

    #[test]
    fn test_explicit_timestamp() {
        let at = DateTime::<Utc>::UNIX_EPOCH;
        let entry = Entry::new(Severity::Debug).with_logged_at(at);
        assert_eq!(entry.logged_at, at);
    }

    #[test]
    fn test_message_lookup() {
        let entry = Entry::new(Severity::Info).with_field("b", 1);
        assert_eq!(entry.message(), None);
        let entry = entry.with_field(MESSAGE_KEY, "hi");
        assert_eq!(entry.message(), Some(&FieldValue::from("hi")));
    }

    #[test]
    fn test_error_info_message() {
        let err: SharedError = Arc::new(std::io::Error::other("disk gone"));
        let info = ErrorInfo {
            error: Some(err),
            stacktrace: String::new(),
        };
        assert_eq!(info.message().as_deref(), Some("disk gone"));
        assert_eq!(ErrorInfo::default().message(), None);
    }
}
