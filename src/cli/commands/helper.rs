use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use colored::Colorize;
use indexmap::IndexSet;

use super::super::args::CommonArgs;
use crate::config::{Config, load_config};
use crate::core::{KeyExtractor, ScanResult, scan_sources};

/// Everything a command needs once configuration and CLI overrides are settled.
pub struct CommandContext {
    pub root: PathBuf,
    pub config: Config,
    pub lang_root: PathBuf,
    pub locales: Vec<String>,
    pub verbose: bool,
}

impl CommandContext {
    /// Load the config for the project root, apply `overrides`, and resolve locales.
    pub fn load(common: &CommonArgs, overrides: impl FnOnce(&mut Config) -> Result<()>) -> Result<Self> {
        let root = match &common.root {
            Some(root) => root.clone(),
            None => env::current_dir().context("Failed to determine current directory")?,
        };

        let mut config = load_config(&root)?.config;
        overrides(&mut config)?;
        config.validate()?;

        let locales = resolve_locales(&common.locales, &config)?;
        let lang_root = config.resolve_lang_root(&root);

        Ok(Self {
            root,
            config,
            lang_root,
            locales,
            verbose: common.verbose,
        })
    }

    /// Extract keys from every configured source directory.
    pub fn scan(&self) -> Result<ScanResult> {
        let extractor = KeyExtractor::new(&self.config.functions)?;
        let result = scan_sources(&self.root, &self.config, &extractor, self.verbose);

        if result.skipped_count > 0 && !self.verbose {
            eprintln!(
                "{} {} file(s) could not be read (use {} for details)",
                "warning:".bold().yellow(),
                result.skipped_count,
                "-v".cyan()
            );
        }

        Ok(result)
    }

    pub fn display_path<'a>(&self, path: &'a Path) -> std::borrow::Cow<'a, str> {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
    }
}

/// Explicit locales win; otherwise the configured list is used.
fn resolve_locales(explicit: &[String], config: &Config) -> Result<Vec<String>> {
    let candidates = if explicit.is_empty() {
        config.default_locales()
    } else {
        explicit.to_vec()
    };

    let locales: Vec<String> = candidates
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect();

    if locales.is_empty() {
        bail!("No locales specified. Pass locales as arguments or set `locales` in the config file.");
    }

    Ok(locales)
}
