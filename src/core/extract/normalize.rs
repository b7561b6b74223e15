//! Cleanup and validation of raw literal matches.

/// Markers that betray string interpolation inside a literal.
const INTERPOLATION_MARKERS: &[&str] = &["{{", "{$", "${"];

/// Turn a raw quoted-literal body into a translation key.
///
/// Backslash escapes are removed (`\'` becomes `'`, `\\` becomes `\`), then
/// surrounding whitespace is trimmed. Returns `None` when the result is empty,
/// starts with a `$` variable sigil, or embeds interpolation syntax.
///
/// # Examples
///
/// ```
/// use locsync::core::extract::normalize;
///
/// assert_eq!(normalize(r"  auth.failed "), Some("auth.failed".to_string()));
/// assert_eq!(normalize(r"it\'s"), Some("it's".to_string()));
/// assert_eq!(normalize("{$dynamic}"), None);
/// assert_eq!(normalize(""), None);
/// ```
pub fn normalize(raw: &str) -> Option<String> {
    let unescaped = unescape(raw);
    let key = unescaped.trim();

    if key.is_empty() || is_dynamic(key) {
        return None;
    }

    Some(key.to_string())
}

fn is_dynamic(key: &str) -> bool {
    key.starts_with('$') || INTERPOLATION_MARKERS.iter().any(|m| key.contains(m))
}

/// Drop each escaping backslash and keep the character it escapes.
fn unescape(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            // A trailing lone backslash is dropped.
            if let Some(escaped) = chars.next() {
                result.push(escaped);
            }
        } else {
            result.push(c);
        }
    }

    result
}
