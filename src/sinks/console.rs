//! Console sink implementation

use super::text::TextRenderer;
use crate::core::{should_log, Entry, Result, Severity, Sink, SinkConfig, TimestampFormat};
use parking_lot::Mutex;
use std::io::Write;

/// Renders entries as human-readable text on an output stream.
///
/// One entry becomes a headline (timestamp, bracketed severity, message),
/// then optional indented `err=` and `key=value` lines, then an optional
/// stack trace. Fields are sorted so output is stable across runs. The
/// stream is locked for the whole block, so entries emitted concurrently
/// through one sink never interleave.
///
/// # Example
///
/// ```
/// use yall::prelude::*;
///
/// let log = Logger::new(ConsoleSink::stderr(Severity::Info));
/// log.with_field("port", 8080).info("listening");
/// log.debug("filtered out");
/// ```
pub struct ConsoleSink {
    out: Option<Mutex<Box<dyn Write + Send>>>,
    min_severity: Severity,
    renderer: TextRenderer,
}

impl ConsoleSink {
    /// Write to `out`, uncolored, rendering entries that pass `min_severity`
    pub fn new<W: Write + Send + 'static>(out: W, min_severity: Severity) -> Self {
        Self {
            out: Some(Mutex::new(Box::new(out))),
            min_severity,
            renderer: TextRenderer::default(),
        }
    }

    /// Colorized output on stdout
    pub fn stdout(min_severity: Severity) -> Self {
        Self::new(std::io::stdout(), min_severity).with_colors(true)
    }

    /// Colorized output on stderr
    pub fn stderr(min_severity: Severity) -> Self {
        Self::new(std::io::stderr(), min_severity).with_colors(true)
    }

    /// A sink with no destination. Performs no I/O at all.
    pub fn disabled() -> Self {
        Self {
            out: None,
            min_severity: Severity::Debug,
            renderer: TextRenderer::default(),
        }
    }

    /// Build from a validated [`SinkConfig`]
    pub fn from_config<W: Write + Send + 'static>(out: W, config: &SinkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(out, config.min_severity.clone())
            .with_colors(config.colors)
            .with_timestamp_format(config.timestamp_format.clone()))
    }

    /// Enable or disable severity colors
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.renderer.colors = colors;
        self
    }

    /// Set the timestamp format for this sink
    ///
    /// # Examples
    ///
    /// ```
    /// use yall::{ConsoleSink, Severity, TimestampFormat};
    ///
    /// let sink = ConsoleSink::stdout(Severity::Debug)
    ///     .with_timestamp_format(TimestampFormat::Iso8601);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.renderer.timestamp_format = format;
        self
    }

    pub fn min_severity(&self) -> &Severity {
        &self.min_severity
    }
}

impl Sink for ConsoleSink {
    fn add_entry(&self, entry: &Entry) {
        let Some(out) = &self.out else {
            return;
        };
        if !should_log(&self.min_severity, &entry.severity) {
            return;
        }

        let block = self.renderer.render_block(entry);

        let mut out = out.lock();
        // a failed write drops this entry only
        let _ = out.write_all(block.as_bytes());
    }

    fn flush(&self) -> Result<()> {
        if let Some(out) = &self.out {
            out.lock().flush()?;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
