use std::path::PathBuf;

use crate::core::{CorpusStats, synthesize::LanguageOutcome};
use crate::issues::{Issue, Severity};

/// What an extract run produced, for reporting.
#[derive(Debug)]
pub struct ExtractSummary {
    pub source_files: usize,
    pub key_count: usize,
    /// Keys whose first occurrence is an argument of a localization call.
    pub localized_key_count: usize,
    pub stats: CorpusStats,
    pub output_dir: PathBuf,
    /// Successfully synthesized languages, in language order.
    pub outcomes: Vec<LanguageOutcome>,
    pub dry_run: bool,
    pub visualize: bool,
}

/// Result of running the extract command.
pub struct CommandResult {
    pub summary: ExtractSummary,
    /// Sorted issues.
    pub issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
    /// Number of files that failed to parse.
    pub parse_error_count: usize,
}

impl CommandResult {
    pub fn new(summary: ExtractSummary, mut issues: Vec<Issue>) -> Self {
        issues.sort();

        let parse_error_count = issues
            .iter()
            .filter(|i| matches!(i, Issue::ParseError(_)))
            .count();
        let error_count = issues
            .iter()
            .filter(|i| i.severity() == Severity::Error)
            .count();
        let warning_count = issues.len() - error_count;

        Self {
            summary,
            issues,
            error_count,
            warning_count,
            parse_error_count,
        }
    }
}
