//! Renders settings as a Python `configuration.py` module.

use std::fmt::Write as _;

use serde_json::Value;

use crate::domain::models::{NetBoxSettings, OriginPattern};

const HEADER: &str = "# NetBox configuration generated by netbox-env from the process environment.\n\
# Changes made here are overwritten on the next container start.\n";

const INDENT: &str = "    ";

/// Render `settings` as Python source with one assignment per setting.
pub fn render_module(settings: &NetBoxSettings) -> serde_json::Result<String> {
    let Value::Object(namespace) = serde_json::to_value(settings)? else {
        unreachable!("NetBoxSettings serializes to an object")
    };

    let mut out = String::from(HEADER);
    if !settings.cors_origin_regex_whitelist.is_empty() {
        out.push_str("\nimport re\n");
    }
    out.push('\n');

    for (key, value) in &namespace {
        out.push_str(key);
        out.push_str(" = ");
        if key == "CORS_ORIGIN_REGEX_WHITELIST" {
            write_patterns(&mut out, &settings.cors_origin_regex_whitelist);
        } else {
            write_literal(&mut out, value, 0);
        }
        out.push('\n');
    }
    Ok(out)
}

/// Python literal for a JSON value.
pub fn literal(value: &Value) -> String {
    let mut out = String::new();
    write_literal(&mut out, value, 0);
    out
}

fn write_patterns(out: &mut String, patterns: &[OriginPattern]) {
    out.push('[');
    for (i, pattern) in patterns.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str("re.compile(");
        write_str(out, pattern.as_str());
        out.push(')');
    }
    out.push(']');
}

fn write_literal(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => write_str(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item, depth);
            }
            out.push(']');
        }
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Object(map) => {
            out.push_str("{\n");
            for (key, item) in map {
                push_indent(out, depth + 1);
                write_str(out, key);
                out.push_str(": ");
                write_literal(out, item, depth + 1);
                out.push_str(",\n");
            }
            push_indent(out, depth);
            out.push('}');
        }
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

/// Single-quoted Python string literal.
fn write_str(out: &mut String, s: &str) {
    out.push('\'');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('\'');
}
