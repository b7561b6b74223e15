//! Merging discovered keys into an existing flat mapping.
//!
//! Existing values are never overwritten: new keys get a generated default and
//! known keys keep whatever the store already holds.

use super::{FlatMapping, KEY_DELIMITER, KeySet};

/// Merge `discovered` into a copy of `existing`.
///
/// Keys missing from `existing` receive [`default_value`]. With `prune_missing`,
/// the result is then restricted to the discovered keys.
pub fn reconcile(discovered: &KeySet, existing: &FlatMapping, prune_missing: bool) -> FlatMapping {
    let mut result = existing.clone();

    for key in discovered {
        if !result.contains_key(key) {
            result.insert(key.clone(), default_value(key));
        }
    }

    if prune_missing {
        result.retain(|key, _| discovered.contains(key));
    }

    result
}

/// Merge `discovered` into a copy of `existing` without generating values.
///
/// New keys are inserted with an empty value so [`missing_keys`] can report them.
pub fn merge_without_defaults(discovered: &KeySet, existing: &FlatMapping) -> FlatMapping {
    let mut result = existing.clone();
    for key in discovered {
        result.entry(key.clone()).or_default();
    }
    result
}

/// Discovered keys that have no usable value in `mapping`.
///
/// A key counts as missing when it is absent, empty, or its value is the key itself.
pub fn missing_keys(discovered: &KeySet, mapping: &FlatMapping) -> Vec<String> {
    discovered
        .iter()
        .filter(|key| match mapping.get(*key) {
            None => true,
            Some(value) => value.is_empty() || value == *key,
        })
        .cloned()
        .collect()
}

/// Human-readable placeholder for a new key.
///
/// Takes the last segment, turns `_` and `-` into spaces and capitalizes each word.
///
/// # Examples
///
/// ```
/// use locsync::core::default_value;
///
/// assert_eq!(default_value("navigation.main_menu"), "Main Menu");
/// assert_eq!(default_value("auth.forgot-password"), "Forgot Password");
/// ```
pub fn default_value(key: &str) -> String {
    let last = key.rsplit(KEY_DELIMITER).next().unwrap_or(key);
    let spaced = last.replace(['_', '-'], " ");
    title_case(&spaced)
}

/// Uppercase the first character after every space, leaving the rest untouched.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;

    for c in text.chars() {
        if at_word_start {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = c.is_whitespace();
    }

    result
}
