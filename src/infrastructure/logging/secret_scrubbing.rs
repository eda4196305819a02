use regex::Regex;
use serde_json::Value;
use std::fmt;
use std::sync::LazyLock;

/// Replacement for any redacted value.
pub const REDACTED: &str = "[REDACTED]";

/// Setting keys whose values are always secret, regardless of nesting.
const SECRET_KEY_FRAGMENTS: [&str; 4] = ["PASSWORD", "SECRET", "TOKEN", "API_KEY"];

static URL_CREDENTIALS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*://)(?P<user>[^:/@\s]*):[^@/\s]+@")
        .expect("static pattern")
});

static ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(?P<key>["']?[a-z_]*(?:password|secret|token|api_key)["']?\s*[:=]\s*)["']?[^"'\s,}]+["']?"#)
        .expect("static pattern")
});

/// Strips credentials from rendered settings and from free-form messages.
#[derive(Clone, Copy, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub const fn new() -> Self {
        Self
    }

    /// Whether a setting key names a secret (`SECRET_KEY`, `DATABASE.PASSWORD`,
    /// `AWS_SECRET_ACCESS_KEY` inside `STORAGE_CONFIG`, ...).
    pub fn is_secret_key(key: &str) -> bool {
        let upper = key.to_uppercase();
        SECRET_KEY_FRAGMENTS
            .iter()
            .any(|fragment| upper.contains(fragment))
    }

    /// Replace every non-empty secret in `value`, recursing into objects and
    /// arrays. Empty strings are left alone so "unset" stays visible.
    pub fn redact_value(&self, value: &mut Value) {
        match value {
            Value::Object(map) => {
                for (key, item) in map.iter_mut() {
                    if Self::is_secret_key(key) && !is_blank(item) {
                        *item = Value::String(REDACTED.to_string());
                    } else {
                        self.redact_value(item);
                    }
                }
            }
            Value::Array(items) => items.iter_mut().for_each(|item| self.redact_value(item)),
            Value::String(s) => *s = self.scrub_message(s),
            _ => {}
        }
    }

    /// Scrub credentials embedded in URLs and `key=value` pairs.
    pub fn scrub_message(&self, message: &str) -> String {
        let scrubbed = URL_CREDENTIALS.replace_all(message, format!("${{scheme}}${{user}}:{REDACTED}@"));
        ASSIGNMENT
            .replace_all(&scrubbed, format!("${{key}}{REDACTED}"))
            .into_owned()
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
