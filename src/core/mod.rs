//! Core logger types and traits

pub mod config;
pub mod context;
pub mod entry;
pub mod error;
pub mod field;
pub mod http_request;
pub mod logger;
pub mod severity;
pub mod sink;
pub mod timestamp;

pub use config::SinkConfig;
#[cfg(feature = "tokio")]
pub use context::scope;
pub use context::{
    from_context, from_extensions, in_context, in_extensions, with_logger, ContextGuard,
};
pub use entry::{Entry, ErrorInfo, SharedError, MESSAGE_KEY};
pub use error::{LoggerError, Result};
pub use field::FieldValue;
pub use http_request::{resolve_remote_ip, HttpRequest, RequestInfo};
pub use logger::Logger;
pub use severity::{should_log, Severity};
pub use sink::{Sink, TestHelper};
pub use timestamp::TimestampFormat;
