use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::resolve::DEFAULT_LOCALIZATION_INTERFACE;

pub const CONFIG_FILE_NAME: &str = ".strlocrc.json";

pub const TEST_FILE_PATTERNS: &[&str] = &[
    "**/*.test.tsx",
    "**/*.test.ts",
    "**/*.test.jsx",
    "**/*.test.js",
    "**/*.spec.tsx",
    "**/*.spec.ts",
    "**/*.spec.jsx",
    "**/*.spec.js",
    "**/__tests__/**",
];

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directories to scan, relative to the source root. Empty scans everything.
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_ignore_test_files")]
    pub ignore_test_files: bool,
    /// Resource directory, relative to the source root.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Base name of resource files (`<fileName>.<code>.json`).
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default)]
    pub exclude_special_chars_only: bool,
    #[serde(default)]
    pub include_languages: Vec<String>,
    #[serde(default)]
    pub exclude_languages: Vec<String>,
    #[serde(default = "default_localization_interface")]
    pub localization_interface: String,
    #[serde(default)]
    pub localized_only: bool,
    #[serde(default)]
    pub ignore_texts: Vec<String>,
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_ignores() -> Vec<String> {
    ["**/node_modules/**", "**/dist/**", "**/build/**"]
        .map(String::from)
        .to_vec()
}

fn default_ignore_test_files() -> bool {
    true
}

fn default_output_dir() -> String {
    "locales".to_string()
}

fn default_file_name() -> String {
    "strings".to_string()
}

fn default_min_length() -> usize {
    1
}

fn default_localization_interface() -> String {
    DEFAULT_LOCALIZATION_INTERFACE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: Vec::new(),
            ignores: default_ignores(),
            ignore_test_files: default_ignore_test_files(),
            output_dir: default_output_dir(),
            file_name: default_file_name(),
            min_length: default_min_length(),
            exclude_special_chars_only: false,
            include_languages: Vec::new(),
            exclude_languages: Vec::new(),
            localization_interface: default_localization_interface(),
            localized_only: false,
            ignore_texts: Vec::new(),
            ignore_patterns: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Language codes are not checked here: unknown codes are reported as
    /// warnings and skipped when the languages are selected.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in &self.ignore_patterns {
            Regex::new(pattern).with_context(|| {
                format!("Invalid regular expression in 'ignorePatterns': \"{}\"", pattern)
            })?;
        }

        if self.min_length == 0 {
            bail!("'minLength' must be at least 1");
        }
        if self.file_name.trim().is_empty() {
            bail!("'fileName' must not be empty");
        }
        // Resource files live directly in `outputDir`.
        if self.file_name.contains(['/', '\\']) || matches!(self.file_name.as_str(), "." | "..") {
            bail!(
                "'fileName' must be a plain file name, not a path: \"{}\"",
                self.file_name
            );
        }
        if self.localization_interface.trim().is_empty() {
            bail!("'localizationInterface' must not be empty");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Walk up from `start_dir` looking for the config file, stopping at the
/// repository root.
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

pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    pub path: Option<PathBuf>,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                path: Some(path),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            path: None,
        }),
    }
}
