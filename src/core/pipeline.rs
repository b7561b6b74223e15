//! Per-locale load → reconcile → build → write.
//!
//! Locales are processed one after another and never share state. A failed
//! document write is recorded and the run continues; a directory that cannot be
//! created stops the run.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{Config, StoreFormat};
use crate::core::reconcile::{merge_without_defaults, missing_keys, reconcile};
use crate::core::serialize::{Serializer, WriteFailure, WriteOptions, WriteOutcome};
use crate::core::store::{LoadedStore, StoreReader, StoreWarning};
use crate::core::tree::build;
use crate::core::{FlatMapping, KeySet};

/// What happened to one locale.
#[derive(Debug, Default)]
pub struct LocaleReport {
    pub locale: String,
    /// Keys in the reconciled mapping.
    pub total_keys: usize,
    pub added: Vec<String>,
    pub pruned: Vec<String>,
    pub written: Vec<PathBuf>,
    pub backups: Vec<PathBuf>,
    pub failures: Vec<WriteFailure>,
    pub warnings: Vec<StoreWarning>,
}

impl LocaleReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn absorb(&mut self, outcome: WriteOutcome) {
        self.written.extend(outcome.written);
        self.backups.extend(outcome.backups);
        self.failures.extend(outcome.failures);
    }
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub locales: Vec<LocaleReport>,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.locales.iter().all(LocaleReport::is_success)
    }

    pub fn failure_count(&self) -> usize {
        self.locales.iter().map(|l| l.failures.len()).sum()
    }
}

/// Discovered keys lacking a usable value in one locale.
#[derive(Debug, Default)]
pub struct MissingReport {
    pub locale: String,
    pub missing: Vec<String>,
    pub warnings: Vec<StoreWarning>,
}

/// Keeps the translation stores below `lang_root` in sync with a key set.
pub struct Localizer<'a> {
    config: &'a Config,
    reader: StoreReader,
    serializer: Serializer,
}

impl<'a> Localizer<'a> {
    pub fn new(config: &'a Config, lang_root: impl Into<PathBuf>) -> Self {
        let lang_root = lang_root.into();
        Self {
            config,
            reader: StoreReader::new(&lang_root, config.format),
            serializer: Serializer::new(lang_root, WriteOptions::from_config(config)),
        }
    }

    pub fn lang_root(&self) -> &Path {
        self.reader.root()
    }

    /// Reconcile and write every locale in order.
    ///
    /// With `dry_run` nothing is written; the report still lists the keys that
    /// would be added or pruned.
    pub fn generate(&self, keys: &KeySet, locales: &[String], dry_run: bool) -> Result<GenerateReport> {
        let mut report = GenerateReport::default();
        for locale in locales {
            report.locales.push(self.generate_locale(keys, locale, dry_run)?);
        }
        Ok(report)
    }

    pub fn generate_locale(&self, keys: &KeySet, locale: &str, dry_run: bool) -> Result<LocaleReport> {
        let (mapping, mut report) = self.reconcile_locale(keys, locale);

        if dry_run {
            return Ok(report);
        }

        let outcome = match self.config.format {
            StoreFormat::NestedFiles => self
                .serializer
                .write_units(locale, build(&mapping, self.config.nested))?,
            StoreFormat::SingleDocument => self.serializer.write_single_document(locale, &mapping)?,
        };
        report.absorb(outcome);

        Ok(report)
    }

    /// Load `locale` and merge `keys` into it without touching the disk.
    pub fn reconcile_locale(&self, keys: &KeySet, locale: &str) -> (FlatMapping, LocaleReport) {
        let loaded = self.load(keys, locale);
        let existing = loaded.mapping;
        let mapping = reconcile(keys, &existing, self.config.prune_missing);

        let added = keys
            .iter()
            .filter(|key| !existing.contains_key(*key))
            .cloned()
            .collect();
        let pruned = existing
            .keys()
            .filter(|key| !mapping.contains_key(*key))
            .cloned()
            .collect();

        let report = LocaleReport {
            locale: locale.to_string(),
            total_keys: mapping.len(),
            added,
            pruned,
            warnings: loaded.warnings,
            ..Default::default()
        };

        (mapping, report)
    }

    /// Keys from `keys` that have no translation yet in `locale`.
    pub fn missing(&self, keys: &KeySet, locale: &str) -> MissingReport {
        let loaded = self.load(keys, locale);
        let merged = merge_without_defaults(keys, &loaded.mapping);

        MissingReport {
            locale: locale.to_string(),
            missing: missing_keys(keys, &merged),
            warnings: loaded.warnings,
        }
    }

    fn load(&self, keys: &KeySet, locale: &str) -> LoadedStore {
        let mut loaded = self.reader.load(locale);
        if self.config.format == StoreFormat::NestedFiles {
            loaded.adopt_default_unit_keys(keys);
        }
        loaded
    }
}
