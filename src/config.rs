//! Process configuration read from environment variables.
//!
//! | Variable               | Meaning                                   | Default  |
//! |------------------------|-------------------------------------------|----------|
//! | `KANBAN_DATABASE_URL`  | `PostgreSQL` connection URL               | unset    |
//! | `KANBAN_DB_POOL_SIZE`  | Maximum pooled connections                | `10`     |
//! | `KANBAN_LOG_FORMAT`    | `json` or `pretty`                        | `pretty` |

use crate::observability::LogFormat;
use thiserror::Error;

const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value of the wrong shape.
    #[error("{name} is invalid: {reason}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A variable required by the current operation is unset.
    #[error("{0} must be set")]
    Missing(&'static str),
}

/// Runtime configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum number of pooled database connections.
    pub pool_size: u32,
    /// Log output format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("pool_size", &self.pool_size)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            pool_size: DEFAULT_POOL_SIZE,
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a variable cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name).and_then(|value| {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            })
        };

        let mut config = Self {
            database_url: read("KANBAN_DATABASE_URL"),
            ..Self::default()
        };

        if let Some(value) = read("KANBAN_DB_POOL_SIZE") {
            config.pool_size = parse_pool_size(&value)?;
        }
        if let Some(value) = read("KANBAN_LOG_FORMAT") {
            config.log_format = parse_log_format(&value)?;
        }
        Ok(config)
    }

    /// Returns the database URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when it is unset.
    pub fn require_database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("KANBAN_DATABASE_URL"))
    }
}

fn parse_pool_size(value: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "KANBAN_DB_POOL_SIZE",
        reason,
    };
    let size = value
        .parse::<u32>()
        .map_err(|err| invalid(err.to_string()))?;
    if size == 0 {
        return Err(invalid("must be at least 1".to_owned()));
    }
    Ok(size)
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "json" => Ok(LogFormat::Json),
        "pretty" => Ok(LogFormat::Pretty),
        other => Err(ConfigError::Invalid {
            name: "KANBAN_LOG_FORMAT",
            reason: format!("expected json or pretty, got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigError};
    use crate::observability::LogFormat;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup(&[])).expect("empty environment is valid");

        assert_eq!(config, Config::default());
        assert_eq!(config.pool_size, 10);
        assert!(config.database_url.is_none());
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("KANBAN_DATABASE_URL", " postgres://localhost/kanban "),
            ("KANBAN_DB_POOL_SIZE", "4"),
            ("KANBAN_LOG_FORMAT", "JSON"),
        ]))
        .expect("valid environment");

        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/kanban")
        );
        assert_eq!(config.pool_size, 4);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_zero_pool_size() {
        let result = Config::from_lookup(lookup(&[("KANBAN_DB_POOL_SIZE", "0")]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "KANBAN_DB_POOL_SIZE",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unknown_log_format() {
        let result = Config::from_lookup(lookup(&[("KANBAN_LOG_FORMAT", "xml")]));

        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "KANBAN_LOG_FORMAT",
                ..
            })
        ));
    }

    #[test]
    fn missing_database_url_is_reported() {
        let config = Config::default();

        assert_eq!(
            config.require_database_url(),
            Err(ConfigError::Missing("KANBAN_DATABASE_URL"))
        );
    }

    #[test]
    fn debug_output_redacts_database_url() {
        let config = Config {
            database_url: Some("postgres://user:secret@db/kanban".to_owned()),
            ..Config::default()
        };

        assert!(!format!("{config:?}").contains("secret"));
    }
}
