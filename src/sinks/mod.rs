//! Sink implementations

pub mod cloud;
#[cfg(feature = "console")]
pub mod console;
pub mod testing;
mod text;

pub use cloud::{CloudClient, CloudEntry, CloudHttpRequest, CloudSink, JsonLinesClient};
#[cfg(feature = "console")]
pub use console::ConsoleSink;
pub use testing::TestSink;

pub use crate::core::{Sink, TestHelper};
