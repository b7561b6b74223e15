//! Core extraction and reconciliation engine.
//!
//! Data flows leaf-first through the submodules:
//!
//! - `extract`: find literal translation keys in raw source text
//! - `scanner`: enumerate source files and union their keys
//! - `store`: load a locale's persisted translations into a flat mapping
//! - `reconcile`: merge discovered keys into the existing mapping
//! - `tree`: regroup a flat mapping into per-unit trees and back
//! - `serialize`: render and write units to disk
//! - `pipeline`: run the whole chain for a list of locales

use std::collections::BTreeSet;

use indexmap::IndexMap;

pub mod extract;
pub mod pipeline;
pub mod reconcile;
pub mod scanner;
pub mod serialize;
pub mod store;
pub mod tree;

pub use extract::KeyExtractor;
pub use pipeline::{GenerateReport, LocaleReport, Localizer, MissingReport};
pub use reconcile::{default_value, merge_without_defaults, missing_keys, reconcile};
pub use scanner::{ScanResult, scan_sources};
pub use serialize::{Serializer, WriteFailure, WriteOptions, WriteOutcome};
pub use store::{LoadedStore, StoreReader, StoreWarning};
pub use tree::{Tree, Unit, build, flatten};

/// Separator between the segments of a translation key.
pub const KEY_DELIMITER: char = '.';

/// Unit that receives keys without a delimiter.
pub const DEFAULT_UNIT: &str = "messages";

/// Deduplicated set of translation keys found in source text.
pub type KeySet = BTreeSet<String>;

/// Flat key → value table for one locale, in insertion order.
pub type FlatMapping = IndexMap<String, String>;
