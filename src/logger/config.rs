/// Logger options and the frozen configuration of an initialized logger
///
/// Options can be built in code or read from a loose option object (JSON
/// value or TOML document). Loose parsing is forgiving:
/// - only the exact keys `tee` and `suppress` are recognized
/// - a key with the wrong type is ignored and the default kept
/// - unknown tag names inside `suppress` are ignored
use super::tags::LogTag;
use crate::errors::{LoggerError, Result};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggerOptions {
    /// Echo every file-bound line to the console as well
    pub tee: bool,
    /// Tags whose messages are dropped from every sink
    pub suppress: HashSet<LogTag>,
}

impl LoggerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tee(mut self, tee: bool) -> Self {
        self.tee = tee;
        self
    }

    pub fn suppress(mut self, tag: LogTag) -> Self {
        self.suppress.insert(tag);
        self
    }

    pub fn suppress_all<I: IntoIterator<Item = LogTag>>(mut self, tags: I) -> Self {
        self.suppress.extend(tags);
        self
    }

    pub fn is_suppressed(&self, tag: LogTag) -> bool {
        self.suppress.contains(&tag)
    }

    /// Read options from a loose option object. Anything that is not an
    /// object yields the defaults.
    pub fn from_value(value: &Value) -> Self {
        let mut options = Self::default();

        let Some(map) = value.as_object() else {
            return options;
        };

        if let Some(tee) = map.get("tee").and_then(Value::as_bool) {
            options.tee = tee;
        }

        if let Some(list) = map.get("suppress").and_then(Value::as_array) {
            options.suppress = list
                .iter()
                .filter_map(Value::as_str)
                .filter_map(LogTag::from_str)
                .collect();
        }

        options
    }

    /// Parse a JSON document, e.g. `{"tee": true, "suppress": ["text"]}`
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| LoggerError::InvalidOptions(format!("JSON: {}", e)))?;
        Ok(Self::from_value(&value))
    }

    /// Parse a TOML document, e.g. `tee = true` / `suppress = ["text"]`
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(text)
            .map_err(|e| LoggerError::InvalidOptions(format!("TOML: {}", e)))?;
        let value = serde_json::to_value(table)
            .map_err(|e| LoggerError::InvalidOptions(e.to_string()))?;
        Ok(Self::from_value(&value))
    }

    /// Load options from a `.toml` or `.json` file, picked by extension
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::InvalidOptions(format!("Failed to read '{}': {}", path.display(), e))
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&contents),
            _ => Self::from_toml_str(&contents),
        }
    }
}

/// State installed by the first successful `init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggerConfig {
    pub log_path: PathBuf,
    pub options: LoggerOptions,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let options = LoggerOptions::default();
        assert!(!options.tee);
        assert!(options.suppress.is_empty());
    }

    #[test]
    fn test_from_value_recognized_keys() {
        let options = LoggerOptions::from_value(&json!({ "tee": true, "suppress": ["text", "debug"] }));
        assert!(options.tee);
        assert!(options.is_suppressed(LogTag::Text));
        assert!(options.is_suppressed(LogTag::Debug));
        assert!(!options.is_suppressed(LogTag::Info));
    }

    #[test]
    fn test_from_value_ignores_malformed_and_unknown() {
        let options = LoggerOptions::from_value(&json!({
            "tee": "yes",
            "Tee": true,
            "suppress": ["text", 5, "verbose"],
            "colour": false
        }));
        assert!(!options.tee);
        assert_eq!(options.suppress, HashSet::from([LogTag::Text]));

        let options = LoggerOptions::from_value(&json!({ "suppress": "text" }));
        assert!(options.suppress.is_empty());

        assert_eq!(LoggerOptions::from_value(&json!([1, 2])), LoggerOptions::default());
    }

    #[test]
    fn test_from_toml() {
        let options = LoggerOptions::from_toml_str("tee = true\nsuppress = [\"success\"]\n").unwrap();
        assert!(options.tee);
        assert!(options.is_suppressed(LogTag::Success));
    }

    #[test]
    fn test_invalid_documents_are_errors() {
        assert!(matches!(
            LoggerOptions::from_json_str("{tee"),
            Err(LoggerError::InvalidOptions(_))
        ));
        assert!(matches!(
            LoggerOptions::from_toml_str("tee = "),
            Err(LoggerError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("opts.json");
        std::fs::write(&json_path, r#"{"tee": true}"#).unwrap();
        assert!(LoggerOptions::load(&json_path).unwrap().tee);

        let toml_path = dir.path().join("opts.toml");
        std::fs::write(&toml_path, "suppress = [\"text\"]").unwrap();
        assert!(LoggerOptions::load(&toml_path).unwrap().is_suppressed(LogTag::Text));
    }

    #[test]
    fn test_builder() {
        let options = LoggerOptions::new()
            .tee(true)
            .suppress(LogTag::Text)
            .suppress_all([LogTag::Debug]);
        assert!(options.tee);
        assert_eq!(options.suppress.len(), 2);
    }
}
