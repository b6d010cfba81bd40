//! Stepform configuration.
//!
//! Loaded from a TOML file. Every key is optional; missing keys take the
//! classic console limits (49-char names, five subjects, eight tries).

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Limits shared by the console programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Maximum characters kept from a product or student name.
    pub name_max_len: usize,

    /// Maximum characters kept from a product description.
    pub description_max_len: usize,

    /// Number of graded subjects per student.
    pub subject_count: usize,

    /// Records a collection may hold before commits fail.
    /// Unbounded when absent.
    pub max_records: Option<usize>,

    /// Guesses allowed per minigame.
    pub tries: u32,

    /// Digits in the secret code.
    pub digits: usize,

    /// Largest value a single code digit can take.
    pub digit_range: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_max_len: 49,
            description_max_len: 99,
            subject_count: 5,
            max_records: None,
            tries: 8,
            digits: 3,
            digit_range: 9,
        }
    }
}

impl Config {
    /// Load config from an explicit path.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else fall back to defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// The default config file path: `<config dir>/stepform/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("stepform").join("config.toml"))
    }

    /// Reject limits the programs cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digits == 0 || self.digits > 9 {
            return Err(ConfigError::Invalid(format!(
                "digits must be between 1 and 9, got {}",
                self.digits
            )));
        }
        if self.digit_range > 9 {
            return Err(ConfigError::Invalid(format!(
                "digit-range must be at most 9, got {}",
                self.digit_range
            )));
        }
        if self.tries == 0 {
            return Err(ConfigError::Invalid("tries must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_match_console_limits() {
        let config = Config::default();
        assert_eq!(config.name_max_len, 49);
        assert_eq!(config.description_max_len, 99);
        assert_eq!(config.subject_count, 5);
        assert_eq!(config.max_records, None);
        assert_eq!(config.tries, 8);
        assert_eq!(config.digits, 3);
        assert_eq!(config.digit_range, 9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config("subject-count = 3\nmax-records = 10\n");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.subject_count, 3);
        assert_eq!(config.max_records, Some(10));
        assert_eq!(config.name_max_len, 49);
    }

    #[test]
    fn explicit_path_wins_in_resolve() {
        let file = write_config("tries = 4\n");
        let config = Config::resolve(Some(file.path())).unwrap();
        assert_eq!(config.tries, 4);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let file = write_config("tries = \"many\"\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn out_of_range_digits_are_rejected() {
        let file = write_config("digits = 12\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let zero_tries = Config {
            tries: 0,
            ..Config::default()
        };
        assert!(zero_tries.validate().is_err());
    }
}
