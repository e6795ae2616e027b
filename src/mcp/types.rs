use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::core::{
    CorpusStats, corpus::CorpusEntry, synthesize::LanguageOutcome,
};
use crate::issues::{Issue, Report, ReportLocation};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetConfigParams {
    /// Absolute path to the project root
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ExtractLiteralsParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Only keep literals passed to a localization call (overrides config)
    pub localized_only: Option<bool>,
    /// Maximum number of keys to return (default 50, max 200)
    pub limit: Option<u32>,
    /// Number of keys to skip
    pub offset: Option<u32>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct SynthesizeResourcesParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Language codes to write (overrides config)
    pub include_languages: Option<Vec<String>>,
    /// Language codes to skip (overrides config)
    pub exclude_languages: Option<Vec<String>>,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct LookupTranslationParams {
    /// Absolute path to the project root
    pub project_root_path: String,
    /// Language code, e.g. "fr"
    pub language: String,
    /// Original texts to look up
    pub keys: Vec<String>,
}

// ============================================================
// Config Types (get_config)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDto {
    /// True if config was loaded from a file, false if using defaults
    pub from_file: bool,
    pub config: ConfigValues,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    pub includes: Vec<String>,
    pub ignores: Vec<String>,
    pub ignore_test_files: bool,
    pub output_dir: String,
    pub file_name: String,
    pub min_length: usize,
    pub exclude_special_chars_only: bool,
    pub include_languages: Vec<String>,
    pub exclude_languages: Vec<String>,
    pub localization_interface: String,
    pub localized_only: bool,
    pub ignore_texts: Vec<String>,
    pub ignore_patterns: Vec<String>,
}

impl From<Config> for ConfigValues {
    fn from(c: Config) -> Self {
        Self {
            includes: c.includes,
            ignores: c.ignores,
            ignore_test_files: c.ignore_test_files,
            output_dir: c.output_dir,
            file_name: c.file_name,
            min_length: c.min_length,
            exclude_special_chars_only: c.exclude_special_chars_only,
            include_languages: c.include_languages,
            exclude_languages: c.exclude_languages,
            localization_interface: c.localization_interface,
            localized_only: c.localized_only,
            ignore_texts: c.ignore_texts,
            ignore_patterns: c.ignore_patterns,
        }
    }
}

// ============================================================
// Shared Types
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub offset: usize,
    pub limit: usize,
    pub has_more: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueItem {
    pub severity: String,
    pub rule: String,
    pub message: String,
    pub file_path: Option<String>,
}

impl From<&Issue> for IssueItem {
    fn from(issue: &Issue) -> Self {
        let file_path = match issue.location() {
            ReportLocation::File { path } => Some(path.to_string()),
            ReportLocation::Global => None,
        };
        Self {
            severity: issue.severity().to_string(),
            rule: issue.rule().to_string(),
            message: issue.message(),
            file_path,
        }
    }
}

/// Planned or written resource file for one language.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LanguageItem {
    pub language: String,
    pub name: String,
    pub file_path: String,
    pub total: usize,
    pub retained_translations: usize,
    pub added: usize,
    pub removed: usize,
}

impl From<&LanguageOutcome> for LanguageItem {
    fn from(o: &LanguageOutcome) -> Self {
        Self {
            language: o.language.code().to_string(),
            name: o.language.name().to_string(),
            file_path: o.path.to_string_lossy().to_string(),
            total: o.stats.total,
            retained_translations: o.stats.retained_translations,
            added: o.stats.added,
            removed: o.stats.removed,
        }
    }
}

// ============================================================
// Extract Types (extract_literals)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeyItem {
    pub key: String,
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub is_localization_call: bool,
}

impl From<&CorpusEntry> for KeyItem {
    fn from(e: &CorpusEntry) -> Self {
        Self {
            key: e.key.clone(),
            file_path: e.file_path.clone(),
            line: e.line,
            col: e.col,
            is_localization_call: e.is_localization_call,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractStats {
    pub sites: usize,
    pub blank: usize,
    pub too_short: usize,
    pub no_letter_or_digit: usize,
    pub ignored: usize,
    pub not_localized: usize,
    pub duplicates: usize,
}

impl From<CorpusStats> for ExtractStats {
    fn from(s: CorpusStats) -> Self {
        Self {
            sites: s.sites,
            blank: s.blank,
            too_short: s.too_short,
            no_letter_or_digit: s.no_letter_or_digit,
            ignored: s.ignored,
            not_localized: s.not_localized,
            duplicates: s.duplicates,
        }
    }
}

/// Result of extract_literals (nothing is written)
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExtractLiteralsResult {
    pub source_file_count: usize,
    pub total_count: usize,
    pub localized_count: usize,
    pub stats: ExtractStats,
    pub items: Vec<KeyItem>,
    pub pagination: Pagination,
    /// What synthesize_resources would write
    pub languages: Vec<LanguageItem>,
    pub issues: Vec<IssueItem>,
}

// ============================================================
// Synthesize Types (synthesize_resources)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizeResourcesResult {
    /// True if every language was written
    pub success: bool,
    pub key_count: usize,
    pub written: Vec<LanguageItem>,
    pub issues: Vec<IssueItem>,
}

// ============================================================
// Lookup Types (lookup_translation)
// ============================================================

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslationItem {
    pub key: String,
    pub value: String,
    /// False when `value` is the key itself
    pub translated: bool,
}

#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupTranslationResult {
    pub language: String,
    pub file_path: String,
    pub translations: Vec<TranslationItem>,
}
