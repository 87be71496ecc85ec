//! CLI output: error mapping and settings rendering.

use crate::error::ContextError;

/// Map context errors to a string for CLI output.
pub fn map_error(e: &ContextError) -> String {
    match e {
        ContextError::Block(msg) => format!("Block failed, resource was still released: {}", msg),
        other => other.to_string(),
    }
}

/// Render settings as `key = value` lines, values as compact JSON.
pub fn format_settings(settings: &[(String, serde_json::Value)]) -> String {
    if settings.is_empty() {
        return "No settings".to_string();
    }
    settings
        .iter()
        .map(|(key, value)| format!("{} = {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
