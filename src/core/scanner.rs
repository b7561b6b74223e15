use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use colored::Colorize;
use glob::Pattern;
use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::core::{KeySet, extract::KeyExtractor};

/// Result of scanning the configured source directories.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub keys: KeySet,
    pub files_scanned: usize,
    pub skipped_count: usize,
}

/// Walk every configured source directory under `root` and extract keys.
///
/// Directories that do not exist are skipped. A file is read when its file name
/// matches one of `config.patterns` and no `config.exclude` entry covers its
/// path, relative either to the scanned directory or to `root`.
pub fn scan_sources(
    root: &Path,
    config: &Config,
    extractor: &KeyExtractor,
    verbose: bool,
) -> ScanResult {
    let mut result = ScanResult::default();
    let patterns = compile_patterns(&config.patterns, verbose);
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for dir in &config.dirs {
        let scan_dir = root.join(dir);
        if !scan_dir.is_dir() {
            if verbose {
                eprintln!(
                    "{} Source directory does not exist: {}",
                    "warning:".bold().yellow(),
                    scan_dir.display()
                );
            }
            continue;
        }

        let walker = WalkDir::new(&scan_dir)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry, &scan_dir, root, &config.exclude));

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    result.skipped_count += 1;
                    if verbose {
                        eprintln!("{} Cannot access path: {}", "warning:".bold().yellow(), e);
                    }
                    continue;
                }
            };

            if !entry.file_type().is_file() || !matches_file_name(entry.path(), &patterns) {
                continue;
            }
            if !seen.insert(entry.path().to_path_buf()) {
                continue;
            }

            match fs::read_to_string(entry.path()) {
                Ok(content) => {
                    extractor.extract_into(&content, &mut result.keys);
                    result.files_scanned += 1;
                }
                Err(e) => {
                    result.skipped_count += 1;
                    if verbose {
                        eprintln!(
                            "{} Cannot read {}: {}",
                            "warning:".bold().yellow(),
                            entry.path().display(),
                            e
                        );
                    }
                }
            }
        }
    }

    result
}

fn compile_patterns(patterns: &[String], verbose: bool) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                if verbose {
                    eprintln!(
                        "{} Invalid file pattern '{}': {}",
                        "warning:".bold().yellow(),
                        p,
                        e
                    );
                }
                None
            }
        })
        .collect()
}

fn matches_file_name(path: &Path, patterns: &[Pattern]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    patterns.iter().any(|p| p.matches(name))
}

fn is_excluded(entry: &DirEntry, scan_dir: &Path, root: &Path, exclude: &[String]) -> bool {
    let path = entry.path();
    if path == scan_dir {
        return false;
    }

    exclude.iter().any(|excluded| {
        let excluded = excluded.trim_matches('/');
        !excluded.is_empty()
            && (path.starts_with(scan_dir.join(excluded)) || path.starts_with(root.join(excluded)))
    })
}
