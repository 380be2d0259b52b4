//! # yall
//!
//! A structured logging facade. Callers derive immutable [`Logger`] values
//! that accumulate fields, labels, HTTP request metadata and errors, then
//! emit entries through a pluggable [`Sink`].
//!
//! ## Features
//!
//! - **Immutable builders**: every `with_*` call returns a new logger, so
//!   derivation needs no locking
//! - **Pluggable sinks**: console, cloud logging client, and test harness
//! - **Proxy-aware client IPs**: trusted hop count per deployment
//! - **Context carriers**: thread, request-extension and task scoped
//!
//! ```
//! use yall::prelude::*;
//!
//! let root = Logger::new(ConsoleSink::stdout(Severity::Info));
//! let log = root.with_field("job", "reindex").with_user("admin");
//! log.start_request().end_request(200, 512).info("done");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    #[cfg(feature = "console")]
    pub use crate::sinks::ConsoleSink;
    pub use crate::sinks::{CloudSink, TestSink};
    pub use crate::core::{
        Entry, FieldValue, Logger, LoggerError, RequestInfo, Result, Severity, Sink, SinkConfig,
        TimestampFormat,
    };
}

#[cfg(feature = "console")]
pub use sinks::ConsoleSink;
pub use sinks::{CloudSink, TestSink};
#[cfg(feature = "tokio")]
pub use core::scope;
pub use core::{
    from_context, from_extensions, in_context, in_extensions, resolve_remote_ip, should_log,
    with_logger, ContextGuard, Entry, ErrorInfo, FieldValue, HttpRequest, Logger, LoggerError,
    RequestInfo, Result, Severity, SharedError, Sink, SinkConfig, TestHelper, TimestampFormat,
    MESSAGE_KEY,
};
