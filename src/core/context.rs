//! Context carriers for threading a `Logger` through a call chain
//!
//! This module provides:
//! - `in_context` / `from_context`: a thread-scoped slot with an RAII guard
//! - `with_logger`: the same slot, scoped to a closure
//! - `in_extensions` / `from_extensions`: a request-scoped slot in `http::Extensions`
//! - `scope` (feature `tokio`): a task-local slot for async code
//!
//! Lookups never fail. When nothing is stored, a disabled logger is returned
//! and every emit on it is a no-op.

use super::logger::Logger;
use std::cell::RefCell;
use std::marker::PhantomData;

thread_local! {
    static CURRENT: RefCell<Option<Logger>> = const { RefCell::new(None) };
}

#[cfg(feature = "tokio")]
tokio::task_local! {
    static TASK_LOGGER: Logger;
}

/// Private key type for `http::Extensions`; nothing outside this module can
/// name it, so nothing else can overwrite or read the slot.
#[derive(Clone)]
struct Slot(Logger);

/// RAII guard returned by [`in_context`]
///
/// Restores the previously stored logger, if any, when dropped. Guards are
/// tied to the thread that created them.
#[must_use = "the logger is removed from the context when the guard is dropped"]
pub struct ContextGuard {
    previous: Option<Logger>,
    _not_send: PhantomData<*const ()>,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Store `logger` as the current thread's logger until the guard drops
///
/// # Example
///
/// ```
/// use yall::prelude::*;
///
/// let log = Logger::new(TestSink::new(Severity::Debug)).with_field("request_id", "abc");
/// {
///     let _guard = yall::in_context(log);
///     yall::from_context().info("handled");
/// }
/// assert!(!yall::from_context().is_enabled());
/// ```
pub fn in_context(logger: Logger) -> ContextGuard {
    let previous = CURRENT.with(|slot| slot.borrow_mut().replace(logger));
    ContextGuard {
        previous,
        _not_send: PhantomData,
    }
}

/// The logger for the current thread or task, or a disabled logger
///
/// A logger stored with [`in_context`] wins over the enclosing task scope
/// until its guard drops.
pub fn from_context() -> Logger {
    CURRENT
        .with(|slot| slot.borrow().clone())
        .or_else(task_logger)
        .unwrap_or_default()
}

#[cfg(feature = "tokio")]
fn task_logger() -> Option<Logger> {
    TASK_LOGGER.try_with(Logger::clone).ok()
}

#[cfg(not(feature = "tokio"))]
fn task_logger() -> Option<Logger> {
    None
}

/// Run `f` with `logger` stored as the current thread's logger
pub fn with_logger<R>(logger: Logger, f: impl FnOnce() -> R) -> R {
    let _guard = in_context(logger);
    f()
}

/// Store `logger` in a request's extensions, replacing any earlier one
pub fn in_extensions(extensions: &mut http::Extensions, logger: Logger) {
    extensions.insert(Slot(logger));
}

/// The logger stored in a request's extensions, or a disabled logger
pub fn from_extensions(extensions: &http::Extensions) -> Logger {
    extensions
        .get::<Slot>()
        .map(|slot| slot.0.clone())
        .unwrap_or_default()
}

/// Run `future` with `logger` as the task's logger
///
/// Inside the future, [`from_context`] returns `logger` even when the task
/// moves between worker threads.
#[cfg(feature = "tokio")]
pub async fn scope<F: std::future::Future>(logger: Logger, future: F) -> F::Output {
    TASK_LOGGER.scope(logger, future).await
}
