//! Human-readable rendering shared by the console and test sinks

use crate::core::{Entry, Severity, TimestampFormat};

/// Renders entries as the multi-line text block:
///
/// ```text
/// 2025/01/08 10:30:45.123 [INFO] message
///         err=<error text>
///         a=2     b=1
///
/// Stacktrace:
/// <trace>
/// ```
#[derive(Debug, Clone, Default)]
pub(crate) struct TextRenderer {
    pub(crate) timestamp_format: TimestampFormat,
    pub(crate) colors: bool,
}

impl TextRenderer {
    /// Render `entry` as lines, without trailing newlines.
    ///
    /// The stack trace, when present, is a single element that starts with
    /// an empty line.
    pub(crate) fn render(&self, entry: &Entry) -> Vec<String> {
        let severity = &entry.severity;
        let message = entry
            .message()
            .map(|v| format!(" {}", v))
            .unwrap_or_default();

        // every key gets the same color prefix, so sorting still orders by key
        let mut fields: Vec<String> = entry
            .payload
            .iter()
            .filter(|(k, _)| k.as_str() != crate::core::entry::MESSAGE_KEY)
            .map(|(k, v)| format!("{}={}", self.paint(severity, k), v))
            .collect();
        fields.sort();

        let mut lines = Vec::with_capacity(4);
        lines.push(format!(
            "{} {}{}",
            self.timestamp_format.format(&entry.logged_at),
            self.paint(severity, &format!("[{}]", severity)),
            message
        ));
        if let Some(err) = entry.error.as_ref().and_then(|e| e.message()) {
            lines.push(format!("\t\t{}={}", self.paint(severity, "err"), err));
        }
        if !fields.is_empty() {
            lines.push(format!("\t\t{}", fields.join("\t")));
        }
        if let Some(error) = &entry.error {
            if !error.stacktrace.is_empty() {
                lines.push(format!("\nStacktrace:\n{}", error.stacktrace));
            }
        }
        lines
    }

    /// Render `entry` as one newline-terminated block
    #[cfg(feature = "console")]
    pub(crate) fn render_block(&self, entry: &Entry) -> String {
        let mut block = self.render(entry).join("\n");
        block.push('\n');
        block
    }

    #[cfg(feature = "console")]
    fn paint(&self, severity: &Severity, text: &str) -> String {
        use colored::Colorize;
        match severity.color_code() {
            Some(color) if self.colors => text.color(color).to_string(),
            _ => text.to_string(),
        }
    }

    #[cfg(not(feature = "console"))]
    fn paint(&self, _severity: &Severity, text: &str) -> String {
        text.to_string()
    }
}
