//! Source discovery: walk the include roots and collect TS/JS files.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::TEST_FILE_PATTERNS;

const SCANNABLE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Which parts of the tree to scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions<'a> {
    /// Directories relative to the root. Empty means the whole root.
    pub includes: &'a [String],
    pub ignores: &'a [String],
    pub ignore_test_files: bool,
}

/// Files found, sorted by path.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub files: BTreeSet<String>,
    /// Entries that could not be read while walking.
    pub skipped_count: usize,
}

/// A pattern is a glob only if it has `*` or `?`.
///
/// Anything else is a literal path, so `app/[locale]` names a directory
/// instead of a character class.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

fn is_scannable_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SCANNABLE_EXTENSIONS.contains(&ext))
}

/// Ignore rules split into literal path prefixes and glob patterns.
struct IgnoreRules {
    prefixes: Vec<PathBuf>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    fn new(root: &Path, ignores: &[String], ignore_test_files: bool) -> Self {
        let mut prefixes = Vec::new();
        let mut patterns = Vec::new();

        for ignore in ignores {
            if !is_glob_pattern(ignore) {
                prefixes.push(root.join(ignore));
                continue;
            }
            match Pattern::new(ignore) {
                Ok(pattern) => patterns.push(pattern),
                Err(e) => warn!("Invalid ignore pattern '{}': {}", ignore, e),
            }
        }

        if ignore_test_files {
            patterns.extend(TEST_FILE_PATTERNS.iter().filter_map(|p| Pattern::new(p).ok()));
        }

        Self { prefixes, patterns }
    }

    fn is_ignored(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
            || self.patterns.iter().any(|p| p.matches(&path_str))
    }
}

/// Expand `includes` into the directories to walk.
fn include_roots(root: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![root.to_path_buf()];
    }

    let mut roots = Vec::new();
    for include in includes {
        let full = root.join(include);
        if !is_glob_pattern(include) {
            if full.exists() {
                roots.push(full);
            } else {
                warn!("Include path does not exist: {}", full.display());
            }
            continue;
        }
        match glob(&full.to_string_lossy()) {
            Ok(entries) => roots.extend(entries.flatten().filter(|p| p.is_dir())),
            Err(e) => warn!("Invalid include pattern '{}': {}", include, e),
        }
    }
    roots
}

pub fn scan_files(root: &Path, options: &ScanOptions<'_>) -> ScanResult {
    let rules = IgnoreRules::new(root, options.ignores, options.ignore_test_files);
    let mut result = ScanResult::default();

    for dir in include_roots(root, options.includes) {
        for entry in WalkDir::new(&dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    result.skipped_count += 1;
                    warn!("Cannot access path: {}", e);
                    continue;
                }
            };
            let path = entry.path();
            if rules.is_ignored(path) {
                continue;
            }
            if entry.file_type().is_file() && is_scannable_file(path) {
                result.files.insert(path.to_string_lossy().to_string());
            }
        }
    }

    debug!(
        "Scanned {}: {} source file(s), {} skipped",
        root.display(),
        result.files.len(),
        result.skipped_count
    );
    result
}
