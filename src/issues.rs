//! Issue types reported by an extraction run.
//!
//! Issues never abort a run: the affected file or language is skipped and the
//! rest of the work continues. Each issue carries what the reporter needs to
//! display it (CLI, MCP).

use enum_dispatch::enum_dispatch;

use crate::core::Language;

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    ParseError,
    ResourceError,
    UnknownLanguage,
    MissingInterface,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::ParseError => write!(f, "parse-error"),
            Rule::ResourceError => write!(f, "resource-error"),
            Rule::UnknownLanguage => write!(f, "unknown-language"),
            Rule::MissingInterface => write!(f, "missing-interface"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// Source file could not be read or parsed. The file contributes no literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

/// Resource file for one language could not be read, merged or written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceErrorIssue {
    pub language: Language,
    pub file_path: String,
    pub error: String,
}

impl ResourceErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ResourceError
    }
}

/// Which option a language code came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageListKind {
    Include,
    Exclude,
}

impl std::fmt::Display for LanguageListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageListKind::Include => write!(f, "include"),
            LanguageListKind::Exclude => write!(f, "exclude"),
        }
    }
}

/// A language code that names no supported language. It is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguageIssue {
    pub code: String,
    pub list: LanguageListKind,
}

impl UnknownLanguageIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::UnknownLanguage
    }
}

/// The localization interface is not declared anywhere in the scanned code,
/// so no call can be recognised as a localization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingInterfaceIssue {
    pub interface: String,
}

impl MissingInterfaceIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::MissingInterface
    }
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    ParseError(ParseErrorIssue),
    ResourceError(ResourceErrorIssue),
    UnknownLanguage(UnknownLanguageIssue),
    MissingInterface(MissingInterfaceIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::severity(),
            Issue::ResourceError(_) => ResourceErrorIssue::severity(),
            Issue::UnknownLanguage(_) => UnknownLanguageIssue::severity(),
            Issue::MissingInterface(_) => MissingInterfaceIssue::severity(),
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Issue::ParseError(_) => ParseErrorIssue::rule(),
            Issue::ResourceError(_) => ResourceErrorIssue::rule(),
            Issue::UnknownLanguage(_) => UnknownLanguageIssue::rule(),
            Issue::MissingInterface(_) => MissingInterfaceIssue::rule(),
        }
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// A specific file (source or resource).
    File { path: &'a str },
    /// Not tied to a file (configuration problems).
    Global,
}

/// Trait for types that can be reported to CLI.
///
/// Uses `enum_dispatch` for static dispatch on the `Issue` enum.
#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display.
    fn message(&self) -> String;

    fn report_severity(&self) -> Severity;

    fn report_rule(&self) -> Rule;

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("file skipped, its literals are not extracted".to_string())
    }
}

impl Report for ResourceErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "language '{}' ({}) was not written",
            self.language,
            self.language.name()
        ))
    }
}

impl Report for UnknownLanguageIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        format!("Unknown language code '{}'", self.code)
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("ignored in the {} list", self.list))
    }
}

impl Report for MissingInterfaceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Global
    }

    fn message(&self) -> String {
        format!(
            "Localization interface '{}' is not declared in the scanned sources",
            self.interface
        )
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some("no literal is marked as a localization call".to_string())
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> Option<&str> {
        match self.location() {
            ReportLocation::File { path } => Some(path),
            ReportLocation::Global => None,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use std::cmp::Ordering;

        // Global issues first, then by file path, rule, message
        match (self.sort_file_path(), other.sort_file_path()) {
            (Some(a), Some(b)) => a
                .cmp(b)
                .then_with(|| self.rule().cmp(&other.rule()))
                .then_with(|| self.message().cmp(&other.message())),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            (None, None) => self
                .rule()
                .cmp(&other.rule())
                .then_with(|| self.message().cmp(&other.message())),
        }
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
