use crate::domain::models::NetBoxSettings;

/// Render `settings` as a JSON document keyed by NetBox setting names.
pub fn render_json(settings: &NetBoxSettings, pretty: bool) -> serde_json::Result<String> {
    let mut out = if pretty {
        serde_json::to_string_pretty(settings)?
    } else {
        serde_json::to_string(settings)?
    };
    out.push('\n');
    Ok(out)
}
