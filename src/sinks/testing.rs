//! Sink for use inside tests
//!
//! Output goes through `println!`, which the test harness captures per test
//! and only shows for failing tests. Rendered lines are also kept so the
//! test can assert on what was logged.

use super::text::TextRenderer;
use crate::core::{should_log, Entry, Result, Severity, Sink, SinkConfig, TestHelper};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::panic::Location;
use std::thread::{self, ThreadId};

pub struct TestSink {
    min_severity: Severity,
    renderer: TextRenderer,
    echo: bool,
    callers: Mutex<HashMap<ThreadId, &'static Location<'static>>>,
    records: Mutex<Vec<String>>,
}

impl TestSink {
    pub fn new(min_severity: Severity) -> Self {
        Self {
            min_severity,
            renderer: TextRenderer::default(),
            echo: true,
            callers: Mutex::new(HashMap::new()),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn from_config(config: &SinkConfig) -> Result<Self> {
        config.validate()?;
        let mut sink = Self::new(config.min_severity.clone());
        sink.renderer.timestamp_format = config.timestamp_format.clone();
        Ok(sink)
    }

    /// Keep records without printing them
    #[must_use]
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }

    /// Every line rendered so far, in order
    pub fn records(&self) -> Vec<String> {
        self.records.lock().clone()
    }

    /// Whether any rendered line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.records.lock().iter().any(|line| line.contains(needle))
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl TestHelper for TestSink {
    fn helper(&self, caller: &'static Location<'static>) {
        self.callers.lock().insert(thread::current().id(), caller);
    }
}

impl Sink for TestSink {
    fn add_entry(&self, entry: &Entry) {
        let caller = self.callers.lock().remove(&thread::current().id());
        if !should_log(&self.min_severity, &entry.severity) {
            return;
        }

        let mut lines = self.renderer.render(entry);
        if let (Some(caller), Some(first)) = (caller, lines.first_mut()) {
            *first = format!("{}:{}: {}", caller.file(), caller.line(), first);
        }

        let mut records = self.records.lock();
        for line in lines {
            if self.echo {
                println!("{}", line);
            }
            records.push(line);
        }
    }

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "testing"
    }

    fn test_helper(&self) -> Option<&dyn TestHelper> {
        Some(self)
    }
}
