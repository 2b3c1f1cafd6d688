use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

const DEFAULT_DICTIONARY_PATH: &str = "Dictionary.txt";
const DEFAULT_LOG_PATH: &str = "log.txt";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dictionary file loaded at startup, one `word meaning` pair per line.
    pub dictionary_path: PathBuf,
    /// File the tracing subscriber writes to.
    pub log_path: PathBuf,
    /// Start with an empty dictionary instead of loading `dictionary_path`.
    pub skip_dictionary: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dictionary_path: DEFAULT_DICTIONARY_PATH.into(),
            log_path: DEFAULT_LOG_PATH.into(),
            skip_dictionary: false,
        }
    }
}

impl Config {
    /// Reads a JSON config file. Missing fields fall back to their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.dictionary_path, PathBuf::from("Dictionary.txt"));
        assert_eq!(config.log_path, PathBuf::from("log.txt"));
        assert!(!config.skip_dictionary);
    }

    #[test]
    fn test_partial_json() {
        let config = Config::from_json(r#"{ "dictionary_path": "words.txt" }"#).unwrap();

        assert_eq!(config.dictionary_path, PathBuf::from("words.txt"));
        assert_eq!(config.log_path, PathBuf::from("log.txt"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Config::from_json("{ dictionary_path = 1 }").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("no/such/config.json")).unwrap_err();

        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
