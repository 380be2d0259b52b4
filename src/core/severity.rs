//! Severity definitions and the filtering rule every sink applies

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log entry.
///
/// Levels rank `Default < Debug < Info < Warning < Error`. Tags that are not
/// one of the known levels are preserved as [`Severity::Other`] and rank
/// alongside `Default`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Severity {
    /// Level used by entries that don't specify a severity.
    #[default]
    Default,
    /// Useful for debugging, probably too noisy for standard operation.
    Debug,
    /// Routine information that will help non-debugging operators.
    Info,
    /// A problem may have occurred. Often predicts a future error.
    Warning,
    /// A user-facing error occurred.
    Error,
    /// An unrecognized severity tag.
    Other(String),
}

impl Severity {
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Default => "DEFAULT",
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Other(tag) => tag,
        }
    }

    /// Rank used for ordering. Unrecognized tags rank with `Default`.
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Default | Severity::Other(_) => 0,
            Severity::Debug => 1,
            Severity::Info => 2,
            Severity::Warning => 3,
            Severity::Error => 4,
        }
    }

    fn is_other(&self) -> bool {
        matches!(self, Severity::Other(_))
    }

    /// Reports whether a sink configured at `self` renders an entry at `severity`.
    ///
    /// See [`should_log`].
    pub fn permits(&self, severity: &Severity) -> bool {
        should_log(self, severity)
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> Option<colored::Color> {
        use colored::Color::*;
        match self {
            Severity::Debug => Some(Blue),
            Severity::Info => Some(Green),
            Severity::Warning => Some(Yellow),
            Severity::Error => Some(Red),
            Severity::Default | Severity::Other(_) => None,
        }
    }
}

/// Decide whether an entry at `severity` passes a sink configured at `minimum`.
///
/// The rule is tiered rather than a plain rank comparison:
///
/// | minimum   | logged severities                 |
/// |-----------|-----------------------------------|
/// | `Error`   | `Error`                           |
/// | `Warning` | `Error`, `Warning`                |
/// | `Info`    | `Error`, `Warning`, `Info`        |
/// | otherwise | everything, unrecognized included |
///
/// # Example
///
/// ```
/// use yall::{should_log, Severity};
///
/// assert!(should_log(&Severity::Debug, &Severity::Default));
/// assert!(!should_log(&Severity::Info, &Severity::Default));
/// assert!(!should_log(&Severity::Error, &Severity::Warning));
/// ```
pub fn should_log(minimum: &Severity, severity: &Severity) -> bool {
    match minimum {
        Severity::Error => matches!(severity, Severity::Error),
        Severity::Warning => matches!(severity, Severity::Error | Severity::Warning),
        Severity::Info => matches!(
            severity,
            Severity::Error | Severity::Warning | Severity::Info
        ),
        // debug-level sinks also catch default and unknown severities
        _ => true,
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank()
            .cmp(&other.rank())
            .then_with(|| self.as_str().cmp(other.as_str()))
            .then_with(|| self.is_other().cmp(&other.is_other()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_uppercase().as_str() {
            "" | "DEFAULT" => Severity::Default,
            "DEBUG" => Severity::Debug,
            "INFO" => Severity::Info,
            "WARN" | "WARNING" => Severity::Warning,
            "ERROR" => Severity::Error,
            _ => Severity::Other(s.to_string()),
        })
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(severity) => severity,
            Err(never) => match never {},
        }
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        Severity::from(s.to_string())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> Vec<Severity> {
        vec![
            Severity::Default,
            Severity::Debug,
            Severity::Info,
            Severity::Warning,
            Severity::Error,
            Severity::Other("NOTICE".to_string()),
        ]
    }

    #[test]
    fn test_error_minimum_only_logs_errors() {
        for sev in all() {
            assert_eq!(should_log(&Severity::Error, &sev), sev == Severity::Error);
        }
    }

    #[test]
    fn test_warning_minimum() {
        for sev in all() {
            let expected = matches!(sev, Severity::Error | Severity::Warning);
            assert_eq!(should_log(&Severity::Warning, &sev), expected, "{}", sev);
        }
    }

    #[test]
    fn test_info_minimum_drops_default_and_unknown() {
        assert!(should_log(&Severity::Info, &Severity::Info));
        assert!(!should_log(&Severity::Info, &Severity::Debug));
        assert!(!should_log(&Severity::Info, &Severity::Default));
        assert!(!should_log(
            &Severity::Info,
            &Severity::Other("NOTICE".to_string())
        ));
    }

    #[test]
    fn test_permissive_minimums_log_everything() {
        let permissive = [
            Severity::Debug,
            Severity::Default,
            Severity::Other("TRACE".to_string()),
        ];
        for min in permissive {
            for sev in all() {
                assert!(min.permits(&sev), "{} should permit {}", min, sev);
            }
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("WARNING".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("Error".parse::<Severity>().unwrap(), Severity::Error);
        assert_eq!("".parse::<Severity>().unwrap(), Severity::Default);
        assert_eq!(
            "notice".parse::<Severity>().unwrap(),
            Severity::Other("notice".to_string())
        );
    }

    #[test]
    fn test_ordering_by_rank() {
        assert!(Severity::Default < Severity::Debug);
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        // lexically "DEBUG" < "ERROR" < "INFO", rank must win
        assert!(Severity::Info < Severity::Error);
    }

    #[test]
    fn test_serde_as_tag() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
        let parsed: Severity = serde_json::from_str("\"INFO\"").unwrap();
        assert_eq!(parsed, Severity::Info);
    }
}
