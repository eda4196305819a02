//! Domain errors for settings loading.

use std::num::ParseIntError;

use thiserror::Error;

/// Errors raised while coercing environment variables into settings.
///
/// Every variant is fatal: a deployment with malformed configuration must
/// not start.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("{name} must be an integer, got {value:?}: {source}")]
    InvalidInteger {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("{name} is not valid JSON: {source}")]
    InvalidJson {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{name} contains an invalid pattern {pattern:?}: {source}")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("{name} entry {entry:?} must have the form name::email")]
    InvalidAdmin { name: String, entry: String },
}

impl SettingsError {
    /// Name of the environment variable that failed to load.
    pub fn variable(&self) -> &str {
        match self {
            Self::InvalidInteger { name, .. }
            | Self::InvalidJson { name, .. }
            | Self::InvalidPattern { name, .. }
            | Self::InvalidAdmin { name, .. } => name,
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Why a CORS origin pattern was refused.
///
/// Patterns are compiled again by Python's `re` module when NetBox imports
/// its configuration, so syntax only the `regex` crate accepts is refused
/// alongside plain syntax errors.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("{construct} is not understood by Python's re module")]
    Unsupported { construct: &'static str },

    #[error(transparent)]
    Syntax(#[from] regex::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_integer_message_names_variable() {
        let source = "abc".parse::<i64>().unwrap_err();
        let err = SettingsError::InvalidInteger {
            name: "REDIS_TASKS_PORT".to_string(),
            value: "abc".to_string(),
            source,
        };

        let message = err.to_string();
        assert!(message.contains("REDIS_TASKS_PORT"));
        assert!(message.contains("\"abc\""));
        assert_eq!(err.variable(), "REDIS_TASKS_PORT");
    }

    #[test]
    fn test_unsupported_pattern_message() {
        let err = SettingsError::InvalidPattern {
            name: "CORS_ORIGIN_REGEX_WHITELIST".to_string(),
            pattern: "(?<host>x)".to_string(),
            source: PatternError::Unsupported {
                construct: "(?<name>...)",
            },
        };
        assert_eq!(
            err.to_string(),
            "CORS_ORIGIN_REGEX_WHITELIST contains an invalid pattern \"(?<host>x)\": \
             (?<name>...) is not understood by Python's re module"
        );
    }

    #[test]
    fn test_invalid_admin_message() {
        let err = SettingsError::InvalidAdmin {
            name: "ADMINS".to_string(),
            entry: "nobody".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "ADMINS entry \"nobody\" must have the form name::email"
        );
    }
}
