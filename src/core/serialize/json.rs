use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::FlatMapping;

/// Render a locale's entire flat mapping as one pretty-printed JSON object.
///
/// Unicode and `/` are written unescaped. There is no comment syntax, so no
/// header is ever emitted.
pub fn render_document(mapping: &FlatMapping, sort: bool, indent: usize) -> Result<String> {
    let mut mapping = mapping.clone();
    if sort {
        mapping.sort_keys();
    }

    let indent = " ".repeat(indent);
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    mapping
        .serialize(&mut serializer)
        .context("Failed to serialize JSON")?;

    let mut content = String::from_utf8(buffer).context("Serialized JSON is not UTF-8")?;
    content.push('\n');
    Ok(content)
}
