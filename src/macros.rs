//! Logging macros for ergonomic message formatting.
//!
//! These macros format their arguments like `format!` and emit through the
//! given logger. The call site of the macro is what a test sink reports.
//!
//! # Examples
//!
//! ```
//! use yall::prelude::*;
//! use yall::info;
//!
//! let log = Logger::new(TestSink::new(Severity::Debug));
//!
//! info!(log, "Server started");
//!
//! let port = 8080;
//! info!(log.with_field("port", port), "Server listening on port {}", port);
//! ```

/// Log a message at the given severity with automatic formatting.
///
/// # Examples
///
/// ```
/// # use yall::prelude::*;
/// # let log = Logger::disabled();
/// use yall::log;
/// log!(log, Severity::Info, "Simple message");
/// log!(log, Severity::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $severity:expr, $($arg:tt)+) => {
        $logger.log($severity, format!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use yall::prelude::*;
/// # let log = Logger::disabled();
/// use yall::debug;
/// debug!(log, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Info, $($arg)+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use yall::prelude::*;
/// # let log = Logger::disabled();
/// use yall::warn;
/// warn!(log, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Severity::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Logger, Severity};
    use crate::sinks::TestSink;
    use std::sync::Arc;

    fn capture() -> (Arc<TestSink>, Logger) {
        let sink = Arc::new(TestSink::new(Severity::Debug).quiet());
        let log = Logger::from_shared(sink.clone());
        (sink, log)
    }

    #[test]
    fn test_log_macro() {
        let (sink, log) = capture();
        log!(log, Severity::Default, "Formatted: {}", 42);
        assert!(sink.contains("[DEFAULT] Formatted: 42"));
    }

    #[test]
    fn test_level_macros() {
        let (sink, log) = capture();
        debug!(log, "Count: {}", 5);
        info!(log, "Items: {}", 100);
        warn!(log, "Retry {} of {}", 1, 3);
        error!(log, "Code: {}", 500);

        let records = sink.records();
        assert_eq!(records.len(), 4);
        assert!(records[0].ends_with("[DEBUG] Count: 5"));
        assert!(records[1].ends_with("[INFO] Items: 100"));
        assert!(records[2].ends_with("[WARNING] Retry 1 of 3"));
        assert!(records[3].ends_with("[ERROR] Code: 500"));
    }

    #[test]
    fn test_macro_call_site_reported() {
        let (sink, log) = capture();
        let line = line!() + 1;
        info!(log, "here");
        assert!(sink.records()[0].starts_with(&format!("{}:{}: ", file!(), line)));
    }

    #[test]
    fn test_disabled_logger() {
        let log = Logger::disabled();
        error!(log, "Critical failure: {}", "system");
    }
}
