//! The NetBox settings namespace.
//!
//! Field names serialize to the exact keys NetBox reads from its
//! `configuration.py`, so both renderers can walk the serialized form.

use std::fmt;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::errors::PatternError;

/// Complete settings namespace handed to NetBox at startup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NetBoxSettings {
    pub allowed_hosts: Vec<String>,
    pub database: DatabaseSettings,
    pub redis: RedisSettings,
    pub secret_key: String,

    pub admins: Vec<Admin>,
    pub banner_top: String,
    pub banner_bottom: String,
    pub banner_login: String,
    pub base_path: String,
    pub cache_timeout: i64,
    pub changelog_retention: i64,
    pub cors_origin_allow_all: bool,
    pub cors_origin_whitelist: Vec<String>,
    pub cors_origin_regex_whitelist: Vec<OriginPattern>,
    pub debug: bool,
    pub email: EmailSettings,
    pub enforce_global_unique: bool,
    pub exempt_view_permissions: Vec<String>,
    pub logging: Value,
    pub login_required: bool,
    pub login_timeout: i64,
    pub maintenance_mode: bool,
    pub max_page_size: i64,
    pub media_root: String,
    /// Only defined when `STORAGE_CONFIG` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_config: Option<Value>,
    pub metrics_enabled: bool,
    pub napalm_username: String,
    pub napalm_password: String,
    pub napalm_timeout: i64,
    pub napalm_args: Value,
    pub paginate_count: i64,
    pub plugins: Vec<String>,
    pub plugins_config: Value,
    pub prefer_ipv4: bool,
    pub remote_auth_enabled: bool,
    pub remote_auth_backend: String,
    pub remote_auth_header: String,
    pub remote_auth_auto_create_user: bool,
    pub remote_auth_default_groups: Vec<String>,
    pub remote_auth_default_permissions: Vec<String>,
    pub release_check_timeout: i64,
    pub release_check_url: Option<String>,
    pub reports_root: String,
    pub scripts_root: String,
    pub plugins_enabled: bool,
    pub session_file_path: Option<String>,
    pub time_zone: String,

    pub date_format: String,
    pub short_date_format: String,
    pub time_format: String,
    pub short_time_format: String,
    pub datetime_format: String,
    pub short_datetime_format: String,
}

impl Default for NetBoxSettings {
    fn default() -> Self {
        Self {
            allowed_hosts: vec!["*".to_string()],
            database: DatabaseSettings::default(),
            redis: RedisSettings::default(),
            secret_key: String::new(),
            admins: Vec::new(),
            banner_top: String::new(),
            banner_bottom: String::new(),
            banner_login: String::new(),
            base_path: String::new(),
            cache_timeout: 900,
            changelog_retention: 90,
            cors_origin_allow_all: false,
            cors_origin_whitelist: Vec::new(),
            cors_origin_regex_whitelist: Vec::new(),
            debug: false,
            email: EmailSettings::default(),
            enforce_global_unique: false,
            exempt_view_permissions: Vec::new(),
            logging: empty_object(),
            login_required: false,
            login_timeout: 1_209_600,
            maintenance_mode: false,
            max_page_size: 1000,
            media_root: "/data/netbox/media".to_string(),
            storage_config: None,
            metrics_enabled: false,
            napalm_username: String::new(),
            napalm_password: String::new(),
            napalm_timeout: 30,
            napalm_args: empty_object(),
            paginate_count: 50,
            plugins: Vec::new(),
            plugins_config: empty_object(),
            prefer_ipv4: false,
            remote_auth_enabled: false,
            remote_auth_backend: "utilities.auth_backends.RemoteUserBackend".to_string(),
            remote_auth_header: "HTTP_REMOTE_USER".to_string(),
            remote_auth_auto_create_user: true,
            remote_auth_default_groups: Vec::new(),
            remote_auth_default_permissions: Vec::new(),
            release_check_timeout: 24 * 3600,
            release_check_url: None,
            reports_root: "/data/netbox/reports".to_string(),
            scripts_root: "/data/netbox/scripts".to_string(),
            plugins_enabled: false,
            session_file_path: None,
            time_zone: "UTC".to_string(),
            date_format: "N j, Y".to_string(),
            short_date_format: "Y-m-d".to_string(),
            time_format: "g:i a".to_string(),
            short_time_format: "H:i:s".to_string(),
            datetime_format: "N j, Y g:i a".to_string(),
            short_datetime_format: "Y-m-d H:i".to_string(),
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// PostgreSQL connection parameters (`DATABASE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DatabaseSettings {
    pub name: String,
    pub user: String,
    pub password: String,
    pub host: String,
    /// Kept as text; NetBox passes it through to the driver untouched.
    pub port: String,
    pub conn_max_age: i64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            name: "postgres".to_string(),
            user: "postgres".to_string(),
            password: "netbox".to_string(),
            host: "postgres".to_string(),
            port: "5432".to_string(),
            conn_max_age: 300,
        }
    }
}

/// The two Redis connections NetBox needs (`REDIS`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RedisSettings {
    pub tasks: RedisConnection,
    pub caching: RedisConnection,
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            tasks: RedisConnection::with_database(0),
            caching: RedisConnection::with_database(1),
        }
    }
}

/// A single Redis connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct RedisConnection {
    pub host: String,
    pub port: i64,
    pub password: String,
    pub database: i64,
    pub default_timeout: i64,
    pub ssl: bool,
}

impl RedisConnection {
    /// Default connection to `redis:6379` using the given database index.
    pub fn with_database(database: i64) -> Self {
        Self {
            host: "redis".to_string(),
            port: 6379,
            password: String::new(),
            database,
            default_timeout: 300,
            ssl: false,
        }
    }
}

/// Outgoing mail settings (`EMAIL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct EmailSettings {
    pub server: String,
    pub port: i64,
    pub username: String,
    pub password: String,
    pub timeout: i64,
    pub from_email: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            server: "localhost".to_string(),
            port: 25,
            username: String::new(),
            password: String::new(),
            timeout: 10,
            from_email: String::new(),
        }
    }
}

/// An administrator notified of application errors.
///
/// Serializes as the `[name, email]` pair Django expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub name: String,
    pub email: String,
}

impl Admin {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Serialize for Admin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.name, &self.email).serialize(serializer)
    }
}

/// A compiled CORS origin pattern.
///
/// The source is written in Python `re` syntax since NetBox compiles it
/// again at import. Equality and serialization use that source.
#[derive(Debug, Clone)]
pub struct OriginPattern {
    source: String,
    regex: Regex,
}

impl OriginPattern {
    /// Validate and compile a Python-syntax pattern.
    ///
    /// `\Z` is read as end of input. Named groups spelled `(?<name>...)`,
    /// POSIX classes, `\z`, `\p{..}` and the `U`/`R` flags are refused
    /// because Python cannot compile them. Python-only syntax the `regex`
    /// crate lacks (look-around, backreferences) is refused as a syntax
    /// error.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let translated = to_rust_syntax(pattern)?;
        let regex = Regex::new(&translated)?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, origin: &str) -> bool {
        self.regex.is_match(origin)
    }
}

const fn unsupported(construct: &'static str) -> PatternError {
    PatternError::Unsupported { construct }
}

/// Rewrite a Python pattern into the equivalent `regex` crate pattern,
/// refusing constructs whose meaning differs between the two.
fn to_rust_syntax(pattern: &str) -> Result<String, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len());
    let mut in_class = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                let Some(&next) = chars.get(i + 1) else {
                    // Dangling escape; let the compiler report it.
                    out.push(c);
                    break;
                };
                match next {
                    'Z' if !in_class => out.push_str(r"\z"),
                    'z' => return Err(unsupported(r"\z")),
                    'p' | 'P' => return Err(unsupported(r"\p{...}")),
                    _ => {
                        out.push(c);
                        out.push(next);
                    }
                }
                i += 2;
                continue;
            }
            '[' if in_class => {
                if chars.get(i + 1) == Some(&':') {
                    return Err(unsupported("[:class:]"));
                }
                // Literal in Python, a nested class in `regex`.
                out.push_str(r"\[");
            }
            '[' => {
                in_class = true;
                out.push(c);
                if chars.get(i + 1) == Some(&'^') {
                    out.push('^');
                    i += 1;
                }
                if chars.get(i + 1) == Some(&']') {
                    out.push_str(r"\]");
                    i += 1;
                }
            }
            ']' if in_class => {
                in_class = false;
                out.push(c);
            }
            '(' if !in_class && chars.get(i + 1) == Some(&'?') => {
                check_group_extension(&chars[i + 2..])?;
                out.push(c);
            }
            _ => out.push(c),
        }
        i += 1;
    }
    Ok(out)
}

/// Inspect what follows `(?` at the start of a group.
fn check_group_extension(rest: &[char]) -> Result<(), PatternError> {
    if rest.first() == Some(&'<') && !matches!(rest.get(1), Some('=' | '!')) {
        return Err(unsupported("(?<name>...)"));
    }
    let flags: Vec<char> = rest
        .iter()
        .copied()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '-')
        .collect();
    let closes = matches!(rest.get(flags.len()), Some(':' | ')'));
    if closes && flags.iter().any(|f| matches!(f, 'U' | 'R')) {
        return Err(unsupported("(?U) and (?R) flags"));
    }
    Ok(())
}

impl fmt::Display for OriginPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for OriginPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Serialize for OriginPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
