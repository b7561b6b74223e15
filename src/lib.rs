//! locsync - translation key extraction and locale file synchronization
//!
//! locsync scans source files for calls such as `__('auth.failed')`,
//! `@lang('nav.home')` or `$t('dashboard.title')`, then merges the keys it finds
//! into per-locale translation files without overwriting existing values.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, output)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction and reconciliation engine

pub mod cli;
pub mod config;
pub mod core;
