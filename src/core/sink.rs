//! Sink trait for log output destinations

use super::{entry::Entry, error::Result};
use std::panic::Location;

/// A consumer of log entries.
///
/// Each sink owns its own minimum severity and applies
/// [`should_log`](super::severity::should_log) before rendering. `add_entry`
/// must not panic on any entry and never reports failure to the caller;
/// a sink that cannot handle an entry drops it.
pub trait Sink: Send + Sync {
    fn add_entry(&self, entry: &Entry);
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;

    /// Optional capability for sinks backed by a test harness.
    fn test_helper(&self) -> Option<&dyn TestHelper> {
        None
    }
}

/// Capability of sinks that attribute entries to the test code that logged them.
///
/// Before an entry is handed to [`Sink::add_entry`], the logger reports the
/// location of the emitting call so the sink can point at the caller rather
/// than at logging internals.
pub trait TestHelper: Send + Sync {
    fn helper(&self, caller: &'static Location<'static>);
}
