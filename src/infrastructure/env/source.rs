use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::ports::EnvSource;

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        env::var_os(name).map(|value| value.to_string_lossy().into_owned())
    }
}

/// An in-memory set of variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: BTreeMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Parse `KEY=VALUE` lines.
    ///
    /// Blank lines and lines starting with `#` are skipped, an optional
    /// leading `export ` is accepted, and a value wrapped in matching single
    /// or double quotes is unwrapped. Each line is trimmed at both ends
    /// first; after that, everything past the first `=` is the value, so
    /// whitespace right after the `=` is kept.
    pub fn parse(contents: &str) -> Result<Self> {
        let mut env = Self::new();
        for (index, raw) in contents.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let line = line.strip_prefix("export ").unwrap_or(line);
            let (name, value) = line
                .split_once('=')
                .with_context(|| format!("line {}: expected KEY=VALUE", index + 1))?;
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("line {}: empty variable name", index + 1);
            }
            env.insert(name, unquote(value));
        }
        Ok(env)
    }

    /// Read and parse an env file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read env file {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse env file {}", path.display()))
    }
}

fn unquote(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}

impl EnvSource for MapEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapEnv {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Overlay of several sources; the first layer defining a variable wins.
#[derive(Default)]
pub struct LayeredEnv {
    layers: Vec<Box<dyn EnvSource>>,
}

impl LayeredEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with lower precedence than every existing one.
    #[must_use]
    pub fn then(mut self, layer: impl EnvSource + 'static) -> Self {
        self.layers.push(Box::new(layer));
        self
    }
}

impl EnvSource for LayeredEnv {
    fn var(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.var(name))
    }
}

impl std::fmt::Debug for LayeredEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredEnv")
            .field("layers", &self.layers.len())
            .finish()
    }
}
