//! Client configuration.
//!
//! Values come from a TOML file; `STORYBOARD_API_URL` and
//! `STORYBOARD_TIMEOUT_MS` override the file when set.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "STORYBOARD_CONFIG";
/// Environment variable overriding [`ClientConfig::api_base_url`].
pub const API_URL_ENV: &str = "STORYBOARD_API_URL";
/// Environment variable overriding [`ClientConfig::request_timeout_ms`].
pub const TIMEOUT_ENV: &str = "STORYBOARD_TIMEOUT_MS";

const DEFAULT_TIMEOUT_MS: u64 = 15_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Settings shared by every backend adapter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Base URL of the backend API, for example `https://api.example.com/api`.
    pub api_base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub request_timeout_ms: u64,
    /// Workspace opened by default.
    #[serde(default)]
    pub workspace_id: Option<u64>,
    /// `tracing` filter directive, for example `storyboard=debug`.
    #[serde(default)]
    pub log_filter: Option<String>,
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No configuration file was named.
    #[error("missing configuration file path (pass it explicitly or set {CONFIG_PATH_ENV})")]
    MissingConfigPath,

    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for [`ClientConfig`].
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is present but unusable.
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Why the value was refused.
        reason: String,
    },
}

impl ClientConfig {
    /// Creates a configuration for `api_base_url` with default settings.
    #[must_use]
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            workspace_id: None,
            log_filter: None,
        }
    }

    /// Loads, overrides and validates configuration.
    ///
    /// `path` wins over the `STORYBOARD_CONFIG` environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no file is named, the file cannot be
    /// read or parsed, or a value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from))
            .ok_or(ConfigError::MissingConfigPath)?;
        let mut config = Self::from_path(&resolved)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration file without overrides or validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] or [`ConfigError::Parse`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed input.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies environment overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the timeout override is
    /// not a number.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup(API_URL_ENV) {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            self.request_timeout_ms =
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue {
                        field: "request_timeout_ms",
                        reason: format!("'{raw}' is not a number of milliseconds"),
                    })?;
        }
        Ok(())
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty or non-HTTP base
    /// URL, or a zero timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must not be empty".to_owned(),
            });
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "api_base_url",
                reason: "must start with http:// or https://".to_owned(),
            });
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                reason: "must be > 0".to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim().trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::{API_URL_ENV, ClientConfig, ConfigError, TIMEOUT_ENV};
    use rstest::rstest;
    use std::io::Write;

    #[test]
    fn from_toml_applies_default_timeout() {
        let config = ClientConfig::from_toml(r#"api_base_url = "https://api.example.com""#)
            .expect("minimal config parses");
        assert_eq!(config.request_timeout_ms, 15_000);
        assert_eq!(config.workspace_id, None);
    }

    #[test]
    fn from_toml_rejects_unknown_fields() {
        let result = ClientConfig::from_toml(
            r#"
            api_base_url = "https://api.example.com"
            theme = "dark"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn from_path_reads_every_field() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
            api_base_url = "https://api.example.com/api/"
            request_timeout_ms = 2500
            workspace_id = 7
            log_filter = "storyboard=debug"
            "#
        )
        .expect("write config");

        let config = ClientConfig::from_path(file.path()).expect("config parses");

        assert_eq!(config.base_url(), "https://api.example.com/api");
        assert_eq!(config.request_timeout_ms, 2500);
        assert_eq!(config.workspace_id, Some(7));
        assert_eq!(config.log_filter.as_deref(), Some("storyboard=debug"));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = ClientConfig::new("https://file.example.com");
        config
            .apply_overrides(|name| match name {
                API_URL_ENV => Some("https://env.example.com".to_owned()),
                TIMEOUT_ENV => Some(" 900 ".to_owned()),
                _ => None,
            })
            .expect("overrides apply");

        assert_eq!(config.api_base_url, "https://env.example.com");
        assert_eq!(config.request_timeout_ms, 900);
    }

    #[test]
    fn non_numeric_timeout_override_is_rejected() {
        let mut config = ClientConfig::new("https://file.example.com");
        let result = config.apply_overrides(|name| (name == TIMEOUT_ENV).then(|| "soon".to_owned()));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                ..
            })
        ));
    }

    #[rstest]
    #[case("", "api_base_url")]
    #[case("ftp://files.example.com", "api_base_url")]
    fn validate_rejects_bad_urls(#[case] url: &str, #[case] expected_field: &str) {
        let result = ClientConfig::new(url).validate();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { field, .. }) if field == expected_field
        ));
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let mut config = ClientConfig::new("https://api.example.com");
        config.request_timeout_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                ..
            })
        ));
    }

    #[test]
    fn load_prefers_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, r#"api_base_url = "http://localhost:8000/api""#).expect("write config");

        let config = ClientConfig::load(Some(file.path())).expect("config loads");

        assert!(config.api_base_url.starts_with("http"));
    }
}
