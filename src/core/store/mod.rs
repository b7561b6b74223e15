//! Loading a locale's persisted translations.
//!
//! Missing stores load as empty mappings. Unreadable or malformed documents are
//! skipped and reported as [`StoreWarning`]s; they never fail the load.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::StoreFormat;
use crate::core::{DEFAULT_UNIT, FlatMapping, KEY_DELIMITER, KeySet};
use crate::core::tree::flatten_entries;

pub mod json;
pub mod php;

pub const PHP_EXTENSION: &str = "php";
pub const JSON_EXTENSION: &str = "json";

/// A document that could not be read and contributed no keys.
#[derive(Debug, Clone)]
pub struct StoreWarning {
    pub file_path: String,
    pub error: String,
}

impl StoreWarning {
    fn new(path: &Path, error: impl ToString) -> Self {
        Self {
            file_path: path.to_string_lossy().to_string(),
            error: error.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct LoadedStore {
    pub mapping: FlatMapping,
    pub warnings: Vec<StoreWarning>,
    /// Number of documents that were parsed successfully.
    pub documents_read: usize,
}

impl LoadedStore {
    /// Keys without a delimiter live in the default unit document and load as
    /// `messages.<key>`. Give such entries back their bare key when `keys`
    /// contains it. The prefixed entry is kept too if `keys` names it as well.
    pub fn adopt_default_unit_keys(&mut self, keys: &KeySet) {
        let mapping = &self.mapping;
        if !mapping
            .keys()
            .any(|key| adopted_key(key, keys, mapping).is_some())
        {
            return;
        }

        let mut adopted = FlatMapping::with_capacity(mapping.len());
        for (key, value) in mapping {
            match adopted_key(key, keys, mapping) {
                Some(bare) => {
                    if keys.contains(key) {
                        adopted.insert(key.clone(), value.clone());
                    }
                    adopted.insert(bare.to_string(), value.clone());
                }
                None => {
                    adopted.insert(key.clone(), value.clone());
                }
            }
        }
        self.mapping = adopted;
    }
}

/// The bare key a `messages.<key>` entry stands for, if it is wanted.
fn adopted_key<'a>(key: &'a str, keys: &KeySet, mapping: &FlatMapping) -> Option<&'a str> {
    let bare = key
        .strip_prefix(DEFAULT_UNIT)?
        .strip_prefix(KEY_DELIMITER)?;
    (!bare.contains(KEY_DELIMITER) && keys.contains(bare) && !mapping.contains_key(bare))
        .then_some(bare)
}

/// `<root>/<locale>.json`
pub fn single_document_path(root: &Path, locale: &str) -> PathBuf {
    root.join(format!("{}.{}", locale, JSON_EXTENSION))
}

/// `<root>/<locale>/`
pub fn locale_dir(root: &Path, locale: &str) -> PathBuf {
    root.join(locale)
}

/// `<root>/<locale>/<unit>.php`
pub fn unit_document_path(root: &Path, locale: &str, unit: &str) -> PathBuf {
    locale_dir(root, locale).join(format!("{}.{}", unit, PHP_EXTENSION))
}

/// Reads translation stores below a fixed root directory.
#[derive(Debug, Clone)]
pub struct StoreReader {
    root: PathBuf,
    format: StoreFormat,
}

impl StoreReader {
    pub fn new(root: impl Into<PathBuf>, format: StoreFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Load `locale` into a flat mapping.
    pub fn load(&self, locale: &str) -> LoadedStore {
        match self.format {
            StoreFormat::SingleDocument => self.load_single_document(locale),
            StoreFormat::NestedFiles => self.load_nested_files(locale),
        }
    }

    fn load_single_document(&self, locale: &str) -> LoadedStore {
        let path = single_document_path(&self.root, locale);
        let mut store = LoadedStore::default();

        if !path.is_file() {
            return store;
        }

        let parsed = fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| json::parse_document(&content));

        match parsed {
            Ok(mapping) => {
                store.mapping = mapping;
                store.documents_read = 1;
            }
            Err(e) => store.warnings.push(StoreWarning::new(&path, format!("{:#}", e))),
        }

        store
    }

    fn load_nested_files(&self, locale: &str) -> LoadedStore {
        let dir = locale_dir(&self.root, locale);
        let mut store = LoadedStore::default();

        if !dir.is_dir() {
            return store;
        }

        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                store.warnings.push(StoreWarning::new(&dir, e));
                return store;
            }
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| {
                path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some(PHP_EXTENSION)
            })
            .collect();
        paths.sort();

        for path in paths {
            let Some(unit) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };

            let parsed = fs::read_to_string(&path)
                .map_err(anyhow::Error::from)
                .and_then(|content| php::parse_document(&content));

            match parsed {
                Ok(entries) => {
                    flatten_entries(Some(unit), &entries, &mut store.mapping);
                    store.documents_read += 1;
                }
                Err(e) => store.warnings.push(StoreWarning::new(&path, format!("{:#}", e))),
            }
        }

        store
    }
}
