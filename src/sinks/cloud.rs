//! Cloud logging sink
//!
//! Maps entries onto the record shape cloud logging backends ingest and
//! hands them to a [`CloudClient`]. The client owns encoding and transport;
//! [`JsonLinesClient`] writes the records as JSON lines to any writer.

use crate::core::{should_log, Entry, HttpRequest, Result, Severity, Sink};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

/// One record as delivered to a cloud logging backend
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudEntry {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub payload: serde_json::Map<String, serde_json::Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
    /// Unique per record, lets the backend discard duplicate deliveries
    pub insert_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_request: Option<CloudHttpRequest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

/// HTTP request metadata in the backend's vocabulary
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudHttpRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,
    pub request_size: u64,
    pub status: u16,
    pub response_size: u64,
    /// Seconds with a trailing `s`, e.g. `"0.250s"`
    pub latency: String,
    pub remote_ip: String,
    pub server_ip: String,
    pub cache_hit: bool,
    pub cache_validated_with_origin_server: bool,
}

impl From<&HttpRequest> for CloudHttpRequest {
    fn from(http: &HttpRequest) -> Self {
        let request = http.request.as_ref();
        Self {
            request_method: request.map(|r| r.method.to_string()),
            request_url: request.map(|r| r.uri.to_string()),
            protocol: request.map(|r| format!("{:?}", r.version)),
            user_agent: request.and_then(|r| r.user_agent()).map(String::from),
            referer: request.and_then(|r| r.referer()).map(String::from),
            request_size: http.request_size,
            status: http.status,
            response_size: http.response_size,
            latency: format!("{:.3}s", http.latency.as_secs_f64()),
            remote_ip: http.remote_ip.clone(),
            server_ip: http.local_ip.clone(),
            cache_hit: http.cache_hit,
            cache_validated_with_origin_server: http.cache_validated_with_origin_server,
        }
    }
}

impl CloudEntry {
    pub fn from_entry(entry: &Entry, insert_id: String) -> Self {
        let error = entry.error.as_ref();
        Self {
            timestamp: entry.logged_at,
            severity: entry.severity.clone(),
            payload: entry
                .payload
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json_value()))
                .collect(),
            labels: entry
                .labels
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            insert_id,
            http_request: entry.http_request.as_ref().map(CloudHttpRequest::from),
            user: entry.user.clone(),
            error: error.and_then(|e| e.message()),
            stacktrace: error
                .filter(|e| !e.stacktrace.is_empty())
                .map(|e| e.stacktrace.clone()),
        }
    }
}

/// Backend client that accepts mapped records
pub trait CloudClient: Send + Sync {
    fn log(&self, entry: CloudEntry);
    fn flush(&self) -> Result<()>;
}

/// Sink that forwards entries to a cloud logging client
///
/// # Example
///
/// ```
/// use yall::prelude::*;
/// use yall::sinks::{CloudSink, JsonLinesClient};
///
/// let sink = CloudSink::new(JsonLinesClient::new(std::io::sink()));
/// let log = Logger::new(sink).with_label("service", "billing");
/// log.info("invoice sent");
/// log.flush().unwrap();
/// ```
pub struct CloudSink {
    client: Option<Box<dyn CloudClient>>,
    min_severity: Severity,
}

impl CloudSink {
    pub fn new<C: CloudClient + 'static>(client: C) -> Self {
        Self {
            client: Some(Box::new(client)),
            min_severity: Severity::Debug,
        }
    }

    /// A sink with no client. Drops everything without I/O.
    pub fn disabled() -> Self {
        Self {
            client: None,
            min_severity: Severity::Debug,
        }
    }

    #[must_use]
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = severity;
        self
    }
}

/// Random v4 UUID, or `None` when the OS randomness source is unavailable
fn insert_id() -> Option<String> {
    let mut bytes = [0u8; 16];
    OsRng.try_fill_bytes(&mut bytes).ok()?;
    Some(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
}

impl Sink for CloudSink {
    fn add_entry(&self, entry: &Entry) {
        let Some(client) = &self.client else {
            return;
        };
        if !should_log(&self.min_severity, &entry.severity) {
            return;
        }
        let Some(id) = insert_id() else {
            eprintln!("[LOGGER WARNING] No randomness for insert id, entry dropped");
            return;
        };
        client.log(CloudEntry::from_entry(entry, id));
    }

    fn flush(&self) -> Result<()> {
        match &self.client {
            Some(client) => client.flush(),
            None => Ok(()),
        }
    }

    fn name(&self) -> &str {
        "cloud"
    }
}

/// Client writing each record as a single-line JSON object (JSONL)
pub struct JsonLinesClient<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLinesClient<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl JsonLinesClient<BufWriter<File>> {
    /// Append records to the file at `path`, creating it if needed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

fn write_line<W: Write>(writer: &mut W, entry: &CloudEntry) -> Result<()> {
    serde_json::to_writer(&mut *writer, entry)?;
    writer.write_all(b"\n")?;
    Ok(())
}

impl<W: Write + Send> CloudClient for JsonLinesClient<W> {
    fn log(&self, entry: CloudEntry) {
        let mut writer = self.writer.lock();
        if let Err(e) = write_line(&mut *writer, &entry) {
            eprintln!("[LOGGER ERROR] Cloud client write failed: {}", e);
        }
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Logger, LoggerError, RequestInfo};
    use http::{HeaderValue, Method, Uri};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<CloudEntry>>>);

    impl CloudClient for Recorder {
        fn log(&self, entry: CloudEntry) {
            self.0.lock().push(entry);
        }

        fn flush(&self) -> Result<()> {
            Ok(())
        }
    }

    struct Failing;

    impl CloudClient for Failing {
        fn log(&self, _entry: CloudEntry) {}

        fn flush(&self) -> Result<()> {
            Err(LoggerError::flush("cloud", "backend unavailable"))
        }
    }

    #[test]
    fn test_entries_are_mapped() {
        let recorder = Recorder::default();
        let request = RequestInfo::new(Method::GET, Uri::from_static("/items?id=4"), "10.0.0.9:5555")
            .with_header(http::header::USER_AGENT, HeaderValue::from_static("probe/1"));
        let log = Logger::new(CloudSink::new(recorder.clone()))
            .with_label("service", "api")
            .with_user("u-1")
            .with_local_ip("10.0.0.1")
            .with_request(&request)
            .with_field("n", 3);

        log.warn("slow");

        let entries = recorder.0.lock();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.severity, Severity::Warning);
        assert_eq!(entry.payload["msg"], "slow");
        assert_eq!(entry.payload["n"], 3);
        assert_eq!(entry.labels["service"], "api");
        assert_eq!(entry.user.as_deref(), Some("u-1"));
        assert_eq!(entry.insert_id.len(), 36);

        let http = entry.http_request.as_ref().expect("request mapped");
        assert_eq!(http.request_method.as_deref(), Some("GET"));
        assert_eq!(http.request_url.as_deref(), Some("/items?id=4"));
        assert_eq!(http.user_agent.as_deref(), Some("probe/1"));
        assert_eq!(http.remote_ip, "10.0.0.9");
        assert_eq!(http.server_ip, "10.0.0.1");
    }

    #[test]
    fn test_insert_ids_are_unique() {
        let recorder = Recorder::default();
        let log = Logger::new(CloudSink::new(recorder.clone()));
        for _ in 0..20 {
            log.info("tick");
        }
        let entries = recorder.0.lock();
        let mut ids: Vec<&str> = entries.iter().map(|e| e.insert_id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_min_severity() {
        let recorder = Recorder::default();
        let log =
            Logger::new(CloudSink::new(recorder.clone()).with_min_severity(Severity::Error));
        log.warn("skip");
        log.error("keep");
        assert_eq!(recorder.0.lock().len(), 1);
    }

    #[test]
    fn test_flush_error_surfaces() {
        let log = Logger::new(CloudSink::new(Failing));
        log.error("still accepted");
        let err = log.flush().unwrap_err();
        assert!(err.to_string().contains("backend unavailable"));
    }

    #[test]
    fn test_disabled_sink() {
        let sink = CloudSink::disabled();
        sink.add_entry(&Entry::new(Severity::Error));
        assert!(sink.flush().is_ok());
    }

    #[test]
    fn test_json_lines_output() {
        let client = JsonLinesClient::new(Vec::new());
        let mut entry = Entry::new(Severity::Info).with_field("msg", "hello");
        entry.user = Some("u-2".to_string());
        client.log(CloudEntry::from_entry(&entry, "id-1".to_string()));
        client.log(CloudEntry::from_entry(&entry, "id-2".to_string()));

        let written = String::from_utf8(client.writer.lock().clone()).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        let parsed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["insertId"], "id-2");
        assert_eq!(parsed["severity"], "INFO");
        assert_eq!(parsed["payload"]["msg"], "hello");
        assert_eq!(parsed["user"], "u-2");
        assert!(parsed.get("httpRequest").is_none());
        assert!(parsed.get("labels").is_none());
    }
}
