//! Translation trees and the flat ↔ nested regrouping.
//!
//! [`build`] splits each flat key on the first [`KEY_DELIMITER`] to pick its
//! output unit. With nesting enabled, the remainder is split fully into nested
//! nodes. Without it, the remainder stays one (possibly dotted) leaf key.
//! [`flatten`] rejoins the paths, and `flatten(&build(m, nesting)) == m` holds
//! for every flat mapping `m`.
//!
//! A key that is a path prefix of another (`a.b` next to `a.b.c`) cannot own a
//! node and a leaf at once. The deeper key is then stored at the conflicting
//! level under its remaining dotted path (`"b.c"`), which flattens back to the
//! same key.

use indexmap::IndexMap;

use super::{DEFAULT_UNIT, FlatMapping, KEY_DELIMITER};

/// Entries of one tree level, in insertion order unless sorted.
pub type Entries = IndexMap<String, Tree>;

/// A translation value or a nested group of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Leaf(String),
    Node(Entries),
}

impl Tree {
    /// Sort every level of the tree by key.
    pub fn sort_recursive(&mut self) {
        if let Tree::Node(entries) = self {
            sort_entries(entries);
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            Tree::Leaf(value) => Some(value),
            Tree::Node(_) => None,
        }
    }

    /// Follow a path of segments down the tree.
    pub fn get_path(&self, path: &[&str]) -> Option<&Tree> {
        match path.split_first() {
            None => Some(self),
            Some((head, rest)) => match self {
                Tree::Node(entries) => entries.get(*head)?.get_path(rest),
                Tree::Leaf(_) => None,
            },
        }
    }
}

/// Sort one level and everything below it.
pub fn sort_entries(entries: &mut Entries) {
    entries.sort_keys();
    for tree in entries.values_mut() {
        tree.sort_recursive();
    }
}

/// One output document: the keys sharing a first segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// First key segment, or `None` for keys without a delimiter.
    pub prefix: Option<String>,
    pub entries: Entries,
}

impl Unit {
    fn new(prefix: Option<String>) -> Self {
        Self {
            prefix,
            entries: Entries::new(),
        }
    }

    /// Document name the unit is written to.
    pub fn name(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_UNIT)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn sort(&mut self) {
        sort_entries(&mut self.entries);
    }
}

/// Regroup a flat mapping into units, nested or flat per unit.
pub fn build(mapping: &FlatMapping, nesting: bool) -> Vec<Unit> {
    let mut units: IndexMap<Option<String>, Unit> = IndexMap::new();

    for (key, value) in mapping {
        let (prefix, rest) = match key.split_once(KEY_DELIMITER) {
            Some((prefix, rest)) => (Some(prefix.to_string()), rest),
            None => (None, key.as_str()),
        };

        let unit = units
            .entry(prefix.clone())
            .or_insert_with(|| Unit::new(prefix));

        if nesting {
            let segments: Vec<&str> = rest.split(KEY_DELIMITER).collect();
            insert_path(&mut unit.entries, &segments, value.clone());
        } else {
            unit.entries
                .insert(rest.to_string(), Tree::Leaf(value.clone()));
        }
    }

    units.into_values().collect()
}

/// Rejoin every unit's paths into a flat mapping.
pub fn flatten(units: &[Unit]) -> FlatMapping {
    let mut mapping = FlatMapping::new();
    for unit in units {
        flatten_entries(unit.prefix.as_deref(), &unit.entries, &mut mapping);
    }
    mapping
}

/// Flatten a single tree level, joining paths onto `prefix`.
pub fn flatten_entries(prefix: Option<&str>, entries: &Entries, out: &mut FlatMapping) {
    for (key, tree) in entries {
        let path = join_key(prefix, key);
        match tree {
            Tree::Leaf(value) => {
                out.insert(path, value.clone());
            }
            Tree::Node(children) => flatten_entries(Some(&path), children, out),
        }
    }
}

fn join_key(prefix: Option<&str>, key: &str) -> String {
    match prefix {
        Some(prefix) => format!("{}{}{}", prefix, KEY_DELIMITER, key),
        None => key.to_string(),
    }
}

/// Insert `value` at `segments`, creating interior nodes as needed.
pub(crate) fn insert_path(entries: &mut Entries, segments: &[&str], value: String) {
    let Some((head, rest)) = segments.split_first() else {
        return;
    };

    if rest.is_empty() {
        if let Some(Tree::Node(children)) = entries.get_mut(*head) {
            // The key's own slot is already a node: keep the leaf here and
            // move the node's descendants up as dotted keys.
            let children = std::mem::take(children);
            entries.insert(head.to_string(), Tree::Leaf(value));

            let mut spilled = FlatMapping::new();
            flatten_entries(Some(*head), &children, &mut spilled);
            for (path, leaf) in spilled {
                entries.insert(path, Tree::Leaf(leaf));
            }
        } else {
            entries.insert(head.to_string(), Tree::Leaf(value));
        }
        return;
    }

    match entries.get_mut(*head) {
        Some(Tree::Node(children)) => insert_path(children, rest, value),
        Some(Tree::Leaf(_)) => {
            entries.insert(segments.join(KEY_DELIMITER.to_string().as_str()), Tree::Leaf(value));
        }
        None => {
            let mut children = Entries::new();
            insert_path(&mut children, rest, value);
            entries.insert(head.to_string(), Tree::Node(children));
        }
    }
}
