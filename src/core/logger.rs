//! Immutable logger builder
//!
//! A `Logger` accumulates contextual state (fields, labels, request data,
//! errors) and turns it into [`Entry`] values on demand. Every `with_*`
//! method returns a new `Logger`; the receiver is never modified, so loggers
//! can be derived from a shared ancestor on any thread without locking.

use super::{
    entry::{Entry, ErrorInfo, SharedError, MESSAGE_KEY},
    error::Result,
    field::FieldValue,
    http_request::{resolve_remote_ip, HttpRequest, RequestInfo},
    severity::Severity,
    sink::Sink,
};
use chrono::{DateTime, Utc};
use std::backtrace::Backtrace;
use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Logger {
    sink: Option<Arc<dyn Sink>>,
    payload: HashMap<String, FieldValue>,
    labels: HashMap<String, String>,
    request: HttpRequest,
    request_start: Option<DateTime<Utc>>,
    error: Option<SharedError>,
    stacktrace: String,
    user: Option<String>,
    local_ip: String,
    proxy_hops: usize,
}

impl Logger {
    /// Create a root logger bound to `sink`
    ///
    /// # Example
    ///
    /// ```
    /// use yall::prelude::*;
    ///
    /// let log = Logger::new(TestSink::new(Severity::Debug));
    /// log.with_field("user_id", 42).info("signed in");
    /// ```
    #[must_use]
    pub fn new<S: Sink + 'static>(sink: S) -> Self {
        Self::from_shared(Arc::new(sink))
    }

    /// Create a root logger bound to a sink that is shared elsewhere
    #[must_use]
    pub fn from_shared(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink: Some(sink),
            ..Self::default()
        }
    }

    /// A logger bound to no sink. Every emit is a no-op.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn sink(&self) -> Option<&Arc<dyn Sink>> {
        self.sink.as_ref()
    }

    pub fn payload(&self) -> &HashMap<String, FieldValue> {
        &self.payload
    }

    pub fn labels(&self) -> &HashMap<String, String> {
        &self.labels
    }

    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    pub fn proxy_hops(&self) -> usize {
        self.proxy_hops
    }

    pub fn local_ip(&self) -> &str {
        &self.local_ip
    }

    /// Number of trusted proxies in front of this service.
    ///
    /// Affects IP resolution in subsequent [`with_request`](Self::with_request) calls.
    #[must_use]
    pub fn with_proxy_hops(&self, hops: usize) -> Self {
        let mut log = self.clone();
        log.proxy_hops = hops;
        log
    }

    /// Address of this server, recorded on requests attached afterwards
    #[must_use]
    pub fn with_local_ip(&self, ip: impl Into<String>) -> Self {
        let mut log = self.clone();
        log.local_ip = ip.into();
        log
    }

    #[must_use]
    pub fn with_field<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        let mut log = self.clone();
        log.payload.insert(key.into(), value.into());
        log
    }

    #[must_use]
    pub fn with_label(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut log = self.clone();
        log.labels.insert(key.into(), value.into());
        log
    }

    /// Attach a request and resolve the client IP.
    ///
    /// The remote IP comes from [`resolve_remote_ip`] using the current proxy
    /// hop count; the local IP from [`with_local_ip`](Self::with_local_ip).
    #[must_use]
    pub fn with_request(&self, request: &RequestInfo) -> Self {
        let mut log = self.clone();
        log.request.local_ip = log.local_ip.clone();
        log.request.remote_ip =
            resolve_remote_ip(&request.remote_addr, &request.headers, log.proxy_hops);
        if let Some(size) = request.content_length() {
            log.request.request_size = size;
        }
        log.request.request = Some(request.clone());
        log
    }

    #[must_use]
    pub fn with_request_size(&self, bytes: u64) -> Self {
        let mut log = self.clone();
        log.request.request_size = bytes;
        log
    }

    #[must_use]
    pub fn with_cache(&self, hit: bool, validated_with_origin_server: bool) -> Self {
        let mut log = self.clone();
        log.request.cache_hit = hit;
        log.request.cache_validated_with_origin_server = validated_with_origin_server;
        log
    }

    /// Mark the start of request processing
    #[must_use]
    pub fn start_request(&self) -> Self {
        let mut log = self.clone();
        log.request_start = Some(Utc::now());
        log
    }

    /// Record the response and the latency since [`start_request`](Self::start_request).
    ///
    /// Without a prior `start_request` the latency is measured from the Unix
    /// epoch, which is meaningless but harmless.
    #[must_use]
    pub fn end_request(&self, status: u16, response_size: u64) -> Self {
        let start = self.request_start.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let mut log = self.clone();
        log.request.latency = Utc::now()
            .signed_duration_since(start)
            .to_std()
            .unwrap_or_default();
        log.request.status = status;
        log.request.response_size = response_size;
        log
    }

    #[must_use]
    pub fn with_user(&self, id: impl Into<String>) -> Self {
        let mut log = self.clone();
        log.user = Some(id.into());
        log
    }

    /// Attach an error. The stack trace is captured here, not at emission.
    #[must_use]
    pub fn with_error<E>(&self, err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        self.with_shared_error(Arc::new(err))
    }

    #[must_use]
    pub fn with_shared_error(&self, err: SharedError) -> Self {
        let mut log = self.clone();
        log.error = Some(err);
        log.stacktrace = Backtrace::force_capture().to_string();
        log
    }

    /// Snapshot the accumulated state as an entry stamped with the current time
    pub fn entry(&self, severity: Severity) -> Entry {
        let mut entry = Entry::new(severity);
        entry.payload = self.payload.clone();
        entry.labels = self.labels.clone();
        entry.user = self.user.clone();
        if self.request.request.is_some() || !self.request.latency.is_zero() {
            entry.http_request = Some(self.request.clone());
        }
        if self.error.is_some() || !self.stacktrace.is_empty() {
            entry.error = Some(ErrorInfo {
                error: self.error.clone(),
                stacktrace: self.stacktrace.clone(),
            });
        }
        entry
    }

    /// Emit `message` at `severity`. A no-op when no sink is bound.
    #[track_caller]
    pub fn log(&self, severity: Severity, message: impl Into<String>) {
        let Some(sink) = &self.sink else {
            return;
        };
        if let Some(helper) = sink.test_helper() {
            helper.helper(Location::caller());
        }
        let entry = self.with_field(MESSAGE_KEY, message.into()).entry(severity);
        sink.add_entry(&entry);
    }

    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(Severity::Debug, message);
    }

    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(Severity::Info, message);
    }

    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(Severity::Warning, message);
    }

    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(Severity::Error, message);
    }

    /// Flush the bound sink. Succeeds trivially when no sink is bound.
    pub fn flush(&self) -> Result<()> {
        match &self.sink {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("sink", &self.sink.as_ref().map(|s| s.name().to_string()))
            .field("payload", &self.payload)
            .field("labels", &self.labels)
            .field("user", &self.user)
            .field("local_ip", &self.local_ip)
            .field("proxy_hops", &self.proxy_hops)
            .finish_non_exhaustive()
    }
}
