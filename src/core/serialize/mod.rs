//! Writing reconciled translations back to disk.
//!
//! Per-document problems (an invalid unit name, a failed backup or write) are
//! collected as [`WriteFailure`]s so the remaining documents still get written.
//! Failing to create the target directory aborts with an error.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::core::store::{locale_dir, single_document_path, unit_document_path};
use crate::core::tree::{Entries, Tree, Unit, flatten_entries, insert_path};
use crate::core::{DEFAULT_UNIT, FlatMapping, KEY_DELIMITER};

pub mod backup;
pub mod json;
pub mod php;

/// Formatting and safety options shared by every document of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    pub sort: bool,
    pub comments: bool,
    pub indent: usize,
    pub backup: bool,
}

impl WriteOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sort: config.sort,
            comments: config.comments,
            indent: config.indent,
            backup: config.backup,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WriteFailure {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub written: Vec<PathBuf>,
    pub backups: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
}

impl WriteOutcome {
    fn record(&mut self, path: PathBuf, result: Result<Option<PathBuf>>) {
        match result {
            Ok(backup) => {
                self.backups.extend(backup);
                self.written.push(path);
            }
            Err(e) => self.failures.push(WriteFailure {
                path,
                reason: format!("{:#}", e),
            }),
        }
    }
}

/// Writes documents below a translation root.
#[derive(Debug, Clone)]
pub struct Serializer {
    root: PathBuf,
    options: WriteOptions,
}

impl Serializer {
    pub fn new(root: impl Into<PathBuf>, options: WriteOptions) -> Self {
        Self {
            root: root.into(),
            options,
        }
    }

    /// Write each unit to `<root>/<locale>/<unit>.php`.
    pub fn write_units(&self, locale: &str, units: Vec<Unit>) -> Result<WriteOutcome> {
        let dir = locale_dir(&self.root, locale);
        ensure_dir(&dir)?;

        let mut outcome = WriteOutcome::default();
        for mut unit in merge_default_units(units) {
            let name = unit.name().to_string();
            let path = unit_document_path(&self.root, locale, &name);

            if !is_valid_unit_name(&name) {
                outcome.failures.push(WriteFailure {
                    path,
                    reason: format!("Invalid translation file name \"{}\"", name),
                });
                continue;
            }

            if self.options.sort {
                unit.sort();
            }
            let content =
                php::render_unit(&unit, locale, self.options.comments, self.options.indent);
            let result = self.write_document(&path, &content);
            outcome.record(path, result);
        }

        Ok(outcome)
    }

    /// Write the whole mapping to `<root>/<locale>.json`.
    pub fn write_single_document(&self, locale: &str, mapping: &FlatMapping) -> Result<WriteOutcome> {
        ensure_dir(&self.root)?;

        let path = single_document_path(&self.root, locale);
        let result = json::render_document(mapping, self.options.sort, self.options.indent)
            .and_then(|content| self.write_document(&path, &content));

        let mut outcome = WriteOutcome::default();
        outcome.record(path, result);
        Ok(outcome)
    }

    /// Back up the previous version when enabled, then replace the file.
    fn write_document(&self, path: &Path, content: &str) -> Result<Option<PathBuf>> {
        let backup = if self.options.backup {
            backup::create_backup(path)?
        } else {
            None
        };

        fs::write(path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(backup)
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create directory: {}", dir.display()))
}

/// A unit name must stay a single file inside the locale directory.
fn is_valid_unit_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

/// Keys without a delimiter and keys prefixed with the default unit name share
/// one document. Entries of the explicitly prefixed unit win on collision.
fn merge_default_units(units: Vec<Unit>) -> Vec<Unit> {
    let mut merged: Vec<Unit> = Vec::with_capacity(units.len());
    let mut default_index: Option<usize> = None;

    for unit in units {
        if unit.name() != DEFAULT_UNIT {
            merged.push(unit);
            continue;
        }

        match default_index {
            None => {
                default_index = Some(merged.len());
                merged.push(unit);
            }
            Some(index) => {
                let existing = &mut merged[index];
                let bare = if unit.prefix.is_some() {
                    existing.prefix = unit.prefix;
                    std::mem::replace(&mut existing.entries, unit.entries)
                } else {
                    unit.entries
                };
                merge_bare_entries(&mut existing.entries, bare);
            }
        }
    }

    merged
}

/// Add the bare unit's keys to the explicit unit's entries.
///
/// A bare key already present as a leaf keeps the explicit value. One that
/// names an explicit node takes the slot and the node's keys move up as dotted
/// keys, the same way [`build`](crate::core::tree::build) resolves prefix
/// conflicts.
fn merge_bare_entries(entries: &mut Entries, bare: Entries) {
    let mut flat = FlatMapping::new();
    flatten_entries(None, &bare, &mut flat);

    for (key, value) in flat {
        if entries.get(&key).and_then(Tree::as_leaf).is_some() {
            continue;
        }
        let segments: Vec<&str> = key.split(KEY_DELIMITER).collect();
        insert_path(entries, &segments, value);
    }
}
