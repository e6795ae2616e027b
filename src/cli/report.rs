//! Report formatting and printing utilities.
//!
//! Issues are displayed in cargo-style format. Kept apart from the core so
//! that strloc can be used as a library.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{CommandResult, ExtractSummary};
use crate::core::synthesize::LanguageOutcome;
use crate::issues::{Issue, Report, ReportLocation, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format to a writer.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    for issue in &sorted {
        print_issue(issue, writer);
    }

    print_summary(&sorted, writer);
}

/// Print a warning about files that could not be parsed.
pub fn print_parse_warning(count: usize, verbose: bool) {
    print_parse_warning_to(count, verbose, &mut io::stderr().lock());
}

pub fn print_parse_warning_to<W: Write>(count: usize, verbose: bool, writer: &mut W) {
    if count > 0 && !verbose {
        let _ = writeln!(
            writer,
            "{} {} file(s) could not be parsed and were skipped (see the log file for details)",
            "warning:".bold().yellow(),
            count,
        );
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut stdout = io::stdout().lock();
    report_to(&result.issues, &mut stdout);
    print_extract_to(&result.summary, &mut stdout);
    print_parse_warning(result.parse_error_count, verbose);
}

/// Print the outcome of an extract run.
pub fn print_extract_to<W: Write>(summary: &ExtractSummary, writer: &mut W) {
    if summary.visualize && !summary.outcomes.is_empty() {
        print_table_to(&summary.outcomes, writer);
        let _ = writeln!(writer);
    }

    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} key(s) from {} source {} ({} in localization calls)",
            summary.key_count,
            summary.source_files,
            if summary.source_files == 1 { "file" } else { "files" },
            summary.localized_key_count
        )
        .green()
    );

    let written = summary.outcomes.len();
    if summary.dry_run {
        let _ = writeln!(
            writer,
            "{} {} resource file(s) in {}",
            "Would write".yellow().bold(),
            written,
            summary.output_dir.display()
        );
        let _ = writeln!(writer, "Run without {} to write them.", "--dry-run".cyan());
    } else {
        let _ = writeln!(
            writer,
            "{} {} resource file(s) in {}",
            "Wrote".green().bold(),
            written,
            summary.output_dir.display()
        );
    }
}

// ============================================================
// Internal Functions
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W) {
    let severity_str = match issue.report_severity() {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: {}  {}",
        severity_str,
        issue.message(),
        issue.report_rule().to_string().dimmed().cyan()
    );

    if let ReportLocation::File { path } = issue.location() {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), path);
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(writer, "  {} {} {}", "=".blue(), "note:".bold(), details);
    }

    let _ = writeln!(writer);
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.report_severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} problems ({} {}, {} {})\n",
        FAILURE_MARK.red(),
        issues.len(),
        total_errors,
        if total_errors == 1 { "error" } else { "errors" }.red(),
        total_warnings,
        if total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        }
        .yellow()
    );
}

/// Pad `text` to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(text));
    format!("{}{}", text, " ".repeat(fill))
}

fn print_table_to<W: Write>(outcomes: &[LanguageOutcome], writer: &mut W) {
    const HEADERS: [&str; 5] = ["Code", "Language", "File", "Keys", "Translated"];

    let rows: Vec<[String; 5]> = outcomes
        .iter()
        .map(|o| {
            [
                o.language.code().to_string(),
                o.language.name().to_string(),
                o.path.display().to_string(),
                o.stats.total.to_string(),
                o.stats.retained_translations.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(UnicodeWidthStr::width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| pad(h, w))
        .collect();
    let _ = writeln!(writer, "{}", header.join("  ").trim_end().bold());

    for row in &rows {
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, w))| {
                // Counts are right-aligned.
                if i >= 3 {
                    format!("{:>w$}", cell, w = w)
                } else {
                    pad(cell, w)
                }
            })
            .collect();
        let _ = writeln!(writer, "{}", cells.join("  ").trim_end());
    }
}

// ============================================================
// Tests
// ============================================================
