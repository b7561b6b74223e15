//! Key extraction from raw source text.
//!
//! Extraction is lexical: commented-out regions are removed first, then every
//! configured [`InvocationPattern`] is matched against the remaining text and
//! each literal argument goes through [`normalize`]. Literals the normalizer
//! rejects are dropped without error.
//!
//! ```
//! use locsync::core::KeyExtractor;
//!
//! let extractor = KeyExtractor::new(&["__".to_string(), "@lang".to_string()]).unwrap();
//! let keys = extractor.extract("{{ __('dashboard.title') }} @lang('auth.failed')");
//!
//! assert!(keys.contains("dashboard.title"));
//! assert!(keys.contains("auth.failed"));
//! ```

mod comments;
mod normalize;
mod pattern;


pub use comments::strip_comments;
pub use normalize::normalize;
pub use pattern::{InvocationPattern, PatternFamily};

use anyhow::Result;

use super::KeySet;

/// Extracts translation keys using a fixed set of invocation patterns.
#[derive(Debug, Clone)]
pub struct KeyExtractor {
    patterns: Vec<InvocationPattern>,
}

impl KeyExtractor {
    /// Build an extractor for the given invocation names (e.g. `__`, `@lang`, `$t`).
    pub fn new(names: &[String]) -> Result<Self> {
        let patterns = names
            .iter()
            .map(|name| InvocationPattern::new(name.trim()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    pub fn patterns(&self) -> &[InvocationPattern] {
        &self.patterns
    }

    /// Deduplicated keys referenced by `text`.
    pub fn extract(&self, text: &str) -> KeySet {
        let mut keys = KeySet::new();
        self.extract_into(text, &mut keys);
        keys
    }

    /// Add the keys referenced by `text` to an existing set.
    pub fn extract_into(&self, text: &str, keys: &mut KeySet) {
        let content = strip_comments(text);

        for pattern in &self.patterns {
            keys.extend(pattern.raw_matches(&content).filter_map(normalize));
        }
    }
}
