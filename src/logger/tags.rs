/// Log tag definitions
///
/// The tag set is closed: every line written by the logger carries exactly one
/// of these. `Text` is the odd one out, it is written verbatim with no label,
/// timestamp or sender.
use colored::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogTag {
    Debug,
    Error,
    Info,
    Success,
    Text,
}

impl LogTag {
    pub const ALL: [LogTag; 5] = [
        LogTag::Debug,
        LogTag::Error,
        LogTag::Info,
        LogTag::Success,
        LogTag::Text,
    ];

    /// Name used in option objects (`suppress: ["text"]`) and on the CLI
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Debug => "debug",
            LogTag::Error => "error",
            LogTag::Info => "info",
            LogTag::Success => "success",
            LogTag::Text => "text",
        }
    }

    /// Bracketed label placed after the timestamp. Empty for `Text`.
    pub fn label(&self) -> &'static str {
        match self {
            LogTag::Debug => "[DEBUG]",
            LogTag::Error => "[ERROR]",
            LogTag::Info => "[INFO]",
            LogTag::Success => "[SUCCESS]",
            LogTag::Text => "",
        }
    }

    /// Console color for echoed lines
    pub fn color(&self) -> Color {
        match self {
            LogTag::Debug => Color::Magenta,
            LogTag::Error => Color::Red,
            LogTag::Info => Color::Blue,
            LogTag::Success => Color::Green,
            LogTag::Text => Color::White,
        }
    }

    /// Whether console echoes go to stderr instead of stdout
    pub fn is_error_stream(&self) -> bool {
        matches!(self, LogTag::Error)
    }

    /// Whether the line gets timestamp, label and sender decoration
    pub fn is_decorated(&self) -> bool {
        !matches!(self, LogTag::Text)
    }

    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Some(LogTag::Debug),
            "error" => Some(LogTag::Error),
            "info" => Some(LogTag::Info),
            "success" => Some(LogTag::Success),
            "text" => Some(LogTag::Text),
            _ => None,
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<log::Level> for LogTag {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => LogTag::Error,
            log::Level::Info => LogTag::Info,
            log::Level::Debug | log::Level::Trace => LogTag::Debug,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(LogTag::Debug.label(), "[DEBUG]");
        assert_eq!(LogTag::Error.label(), "[ERROR]");
        assert_eq!(LogTag::Info.label(), "[INFO]");
        assert_eq!(LogTag::Success.label(), "[SUCCESS]");
        assert_eq!(LogTag::Text.label(), "");
    }

    #[test]
    fn test_parse_roundtrips_names() {
        for tag in LogTag::ALL {
            assert_eq!(LogTag::from_str(tag.as_str()), Some(tag));
        }
        assert_eq!(LogTag::from_str("  INFO "), Some(LogTag::Info));
        assert_eq!(LogTag::from_str("warning"), None);
    }

    #[test]
    fn test_only_error_uses_stderr() {
        let on_stderr: Vec<_> = LogTag::ALL
            .iter()
            .filter(|t| t.is_error_stream())
            .collect();
        assert_eq!(on_stderr, vec![&LogTag::Error]);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogTag::from(log::Level::Warn), LogTag::Error);
        assert_eq!(LogTag::from(log::Level::Trace), LogTag::Debug);
        assert_eq!(LogTag::from(log::Level::Info), LogTag::Info);
    }
}
