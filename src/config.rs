use std::{
    fmt, fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".locsyncrc.json";

/// Largest indentation width accepted for generated documents.
pub const MAX_INDENT: usize = 16;

/// On-disk layout of a locale's translations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum StoreFormat {
    /// One `<unit>.php` array document per top-level key segment under `<langRoot>/<locale>/`.
    #[default]
    #[serde(rename = "nested-files", alias = "php", alias = "default")]
    NestedFiles,
    /// One `<langRoot>/<locale>.json` object holding every dotted key.
    #[serde(rename = "single-document", alias = "json")]
    SingleDocument,
}

impl StoreFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreFormat::NestedFiles => "nested-files",
            StoreFormat::SingleDocument => "single-document",
        }
    }
}

impl fmt::Display for StoreFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoreFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "nested-files" | "php" | "default" => Ok(StoreFormat::NestedFiles),
            "single-document" | "json" => Ok(StoreFormat::SingleDocument),
            other => bail!(
                "Invalid format \"{}\". Supported formats: nested-files (php), single-document (json)",
                other
            ),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub format: StoreFormat,
    #[serde(default = "default_source_locale", alias = "sourceLanguage")]
    pub source_locale: String,
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,
    #[serde(default = "default_true")]
    pub nested: bool,
    #[serde(default = "default_true")]
    pub sort: bool,
    #[serde(default, alias = "removeMissing")]
    pub prune_missing: bool,
    #[serde(default)]
    pub backup: bool,
    #[serde(default = "default_true")]
    pub comments: bool,
    #[serde(default = "default_indent")]
    pub indent: usize,
    #[serde(default = "default_functions")]
    pub functions: Vec<String>,
    #[serde(default = "default_dirs")]
    pub dirs: Vec<String>,
    #[serde(default = "default_patterns")]
    pub patterns: Vec<String>,
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang_root: Option<String>,
}

fn default_source_locale() -> String {
    "en".to_string()
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    4
}

fn default_functions() -> Vec<String> {
    [
        "__",
        "trans",
        "trans_choice",
        "@lang",
        "@choice",
        "Lang::get",
        "Lang::choice",
        "Lang::trans",
        "Lang::transChoice",
        "$t",
        "$tc",
    ]
    .map(String::from)
    .to_vec()
}

fn default_dirs() -> Vec<String> {
    ["app", "resources/views", "resources/js", "resources/vue", "routes"]
        .map(String::from)
        .to_vec()
}

fn default_patterns() -> Vec<String> {
    ["*.php", "*.blade.php", "*.vue", "*.js", "*.ts"]
        .map(String::from)
        .to_vec()
}

fn default_exclude() -> Vec<String> {
    [
        "vendor",
        "node_modules",
        "storage",
        "bootstrap/cache",
        ".git",
        "tests",
        "database/migrations",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: StoreFormat::default(),
            source_locale: default_source_locale(),
            locales: default_locales(),
            nested: true,
            sort: true,
            prune_missing: false,
            backup: false,
            comments: true,
            indent: default_indent(),
            functions: default_functions(),
            dirs: default_dirs(),
            patterns: default_patterns(),
            exclude: default_exclude(),
            lang_root: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid file name patterns, blank function names,
    /// or an indentation wider than [`MAX_INDENT`].
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.patterns {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'patterns': \"{}\"", pattern))?;
        }

        if let Some(name) = self.functions.iter().find(|f| f.trim().is_empty()) {
            bail!("Invalid entry in 'functions': \"{}\"", name);
        }

        if self.indent > MAX_INDENT {
            bail!(
                "Invalid 'indent' value {}: must be at most {}",
                self.indent,
                MAX_INDENT
            );
        }

        Ok(())
    }

    /// Locales used when none are given on the command line.
    pub fn default_locales(&self) -> Vec<String> {
        if self.locales.is_empty() {
            vec![self.source_locale.clone()]
        } else {
            self.locales.clone()
        }
    }

    /// Directory holding the translation stores.
    ///
    /// An explicit `langRoot` wins. Otherwise `resources/lang` is used when it
    /// already exists, and `lang` when it does not.
    pub fn resolve_lang_root(&self, project_root: &Path) -> PathBuf {
        if let Some(root) = &self.lang_root {
            return project_root.join(root);
        }
        let legacy = project_root.join("resources").join("lang");
        if legacy.is_dir() {
            legacy
        } else {
            project_root.join("lang")
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
