//! Typed lookups over an [`EnvSource`].
//!
//! Each getter either returns the caller's default (variable absent) or the
//! coerced value. Integer, JSON, pattern and admin coercions fail instead of
//! falling back, so a malformed deployment never starts.

use std::num::ParseIntError;

use serde_json::Value;
use tracing::debug;

use crate::domain::errors::{SettingsError, SettingsResult};
use crate::domain::models::{Admin, OriginPattern};
use crate::domain::ports::EnvSource;

/// Lower-cased values that read as `true`. Anything else present is `false`.
pub const TRUTHY_TOKENS: [&str; 3] = ["true", "1", "t"];

/// Separator between a name and an email inside one `ADMINS` entry.
pub const ADMIN_SEPARATOR: &str = "::";

/// Coercing reader over an environment source.
#[derive(Debug, Clone)]
pub struct EnvReader<S> {
    source: S,
}

impl<S: EnvSource> EnvReader<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    fn lookup(&self, name: &str) -> Option<String> {
        let value = self.source.var(name);
        if value.is_some() {
            debug!(variable = name, "setting overridden from environment");
        }
        value
    }

    /// Raw value, or `default` when absent.
    pub fn get_string(&self, name: &str, default: impl Into<String>) -> String {
        self.lookup(name).unwrap_or_else(|| default.into())
    }

    /// Raw value, or `None` when absent.
    pub fn get_opt_string(&self, name: &str) -> Option<String> {
        self.lookup(name)
    }

    /// Value of the first defined variable in `names`, or `default`.
    pub fn get_first_string(&self, names: &[&str], default: impl Into<String>) -> String {
        names
            .iter()
            .find_map(|name| self.lookup(name))
            .unwrap_or_else(|| default.into())
    }

    /// Integer value, or `default` when absent.
    ///
    /// Surrounding whitespace is ignored, a leading sign is allowed and
    /// single underscores may group digits (`1_000`). Anything else that is
    /// not a base-10 integer, including the empty string, is an error, as is
    /// a value outside the signed 64-bit range.
    pub fn get_int(&self, name: &str, default: i64) -> SettingsResult<i64> {
        let Some(value) = self.lookup(name) else {
            return Ok(default);
        };
        parse_int(&value).map_err(|source| SettingsError::InvalidInteger {
            name: name.to_string(),
            value,
            source,
        })
    }

    /// Boolean value, or `default` when absent.
    ///
    /// A present value is `true` only if its lower-cased form is one of
    /// [`TRUTHY_TOKENS`]. Any other present value is `false`, never the
    /// default.
    pub fn get_bool(&self, name: &str, default: bool) -> bool {
        self.lookup(name).map_or(default, |value| is_truthy(&value))
    }

    /// Value split on `delimiter`, or `default` when absent.
    ///
    /// Empty segments are kept, so an empty value yields one empty element.
    pub fn get_list(&self, name: &str, default: Vec<String>, delimiter: &str) -> Vec<String> {
        self.lookup(name)
            .map_or(default, |value| split(&value, delimiter))
    }

    /// Parsed JSON value, or `default` when absent.
    pub fn get_json(&self, name: &str, default: Value) -> SettingsResult<Value> {
        Ok(self.get_opt_json(name)?.unwrap_or(default))
    }

    /// Parsed JSON value, or `None` when absent.
    pub fn get_opt_json(&self, name: &str) -> SettingsResult<Option<Value>> {
        self.lookup(name)
            .map(|value| {
                serde_json::from_str(&value).map_err(|source| SettingsError::InvalidJson {
                    name: name.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Value split on `delimiter` with every element compiled as a pattern.
    /// Empty when absent.
    pub fn get_regex_list(&self, name: &str, delimiter: &str) -> SettingsResult<Vec<OriginPattern>> {
        let Some(value) = self.lookup(name) else {
            return Ok(Vec::new());
        };
        value
            .split(delimiter)
            .map(|pattern| {
                OriginPattern::new(pattern).map_err(|source| SettingsError::InvalidPattern {
                    name: name.to_string(),
                    pattern: pattern.to_string(),
                    source,
                })
            })
            .collect()
    }

    /// Comma-separated `name::email` entries. Empty when absent.
    pub fn get_admins(&self, name: &str) -> SettingsResult<Vec<Admin>> {
        let Some(value) = self.lookup(name) else {
            return Ok(Vec::new());
        };
        value
            .split(',')
            .map(|entry| {
                let mut parts = entry.split(ADMIN_SEPARATOR);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(admin), Some(email), None) => Ok(Admin::new(admin, email)),
                    _ => Err(SettingsError::InvalidAdmin {
                        name: name.to_string(),
                        entry: entry.to_string(),
                    }),
                }
            })
            .collect()
    }
}

/// Whether a present boolean variable reads as `true`.
pub fn is_truthy(value: &str) -> bool {
    let lowered = value.to_lowercase();
    TRUTHY_TOKENS.contains(&lowered.as_str())
}

fn parse_int(value: &str) -> Result<i64, ParseIntError> {
    let trimmed = value.trim();
    let digits = trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed);
    let grouped = digits.contains('_')
        && digits
            .split('_')
            .all(|group| !group.is_empty() && group.bytes().all(|b| b.is_ascii_digit()));
    if grouped {
        trimmed.replace('_', "").parse()
    } else {
        // A misplaced underscore is left in so the parse reports it.
        trimmed.parse()
    }
}

fn split(value: &str, delimiter: &str) -> Vec<String> {
    value.split(delimiter).map(str::to_string).collect()
}
