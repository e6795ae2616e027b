//! Phase 4: Corpus - filter resolved literals into the ordered set of keys.

use std::collections::HashSet;

use anyhow::{Context, Result};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::{
    core::{parsers::resource::LocaleResource, resolve::ResolvedLiteral},
    utils::{contains_letter_or_digit, is_blank},
};

/// Options controlling which literals become keys.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Minimum length in characters. Values below 1 behave like 1.
    pub min_length: usize,
    /// Drop literals with no letter or digit (`"---"`, `": "`).
    pub exclude_special_chars_only: bool,
    /// Exact texts never turned into keys.
    pub ignore_texts: HashSet<String>,
    /// Texts matching any of these are never turned into keys.
    pub ignore_patterns: Vec<Regex>,
    /// Only admit arguments of localization calls.
    pub localized_only: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_length: 1,
            exclude_special_chars_only: false,
            ignore_texts: HashSet::new(),
            ignore_patterns: Vec::new(),
            localized_only: false,
        }
    }
}

impl FilterOptions {
    pub fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
        patterns
            .iter()
            .map(|p| Regex::new(p).with_context(|| format!("Invalid ignore pattern: {}", p)))
            .collect()
    }

    /// Why `text` is rejected by the text-only filters, or `None` if it is
    /// admitted.
    pub fn reject_reason(&self, text: &str) -> Option<RejectReason> {
        if is_blank(text) {
            return Some(RejectReason::Blank);
        }
        if text.chars().count() < self.min_length.max(1) {
            return Some(RejectReason::TooShort);
        }
        if self.exclude_special_chars_only && !contains_letter_or_digit(text) {
            return Some(RejectReason::NoLetterOrDigit);
        }
        if self.ignore_texts.contains(text) || self.ignore_patterns.iter().any(|p| p.is_match(text))
        {
            return Some(RejectReason::Ignored);
        }
        None
    }

    pub fn admits(&self, text: &str) -> bool {
        self.reject_reason(text).is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Blank,
    TooShort,
    NoLetterOrDigit,
    Ignored,
    NotLocalized,
    Duplicate,
}

/// Where a key was first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusEntry {
    pub key: String,
    pub file_path: String,
    pub line: usize,
    pub col: usize,
    pub is_localization_call: bool,
}

/// Counters describing what the filter did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusStats {
    pub sites: usize,
    pub blank: usize,
    pub too_short: usize,
    pub no_letter_or_digit: usize,
    pub ignored: usize,
    pub not_localized: usize,
    pub duplicates: usize,
}

impl CorpusStats {
    fn record(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::Blank => self.blank += 1,
            RejectReason::TooShort => self.too_short += 1,
            RejectReason::NoLetterOrDigit => self.no_letter_or_digit += 1,
            RejectReason::Ignored => self.ignored += 1,
            RejectReason::NotLocalized => self.not_localized += 1,
            RejectReason::Duplicate => self.duplicates += 1,
        }
    }
}

/// Ordered set of unique keys. Each key maps to the empty placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Apply the filter again. Applying the options that built the corpus
    /// yields an identical corpus.
    pub fn refilter(&self, options: &FilterOptions) -> Corpus {
        let entries = self
            .entries
            .iter()
            .filter(|e| options.admits(&e.key))
            .filter(|e| !options.localized_only || e.is_localization_call)
            .cloned()
            .collect();
        Corpus { entries }
    }

    /// The corpus as a resource: every key mapped to `""`.
    pub fn to_resource(&self) -> LocaleResource {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), Value::String(String::new())))
            .collect()
    }
}

/// Accumulates resolved literals in order and builds a [`Corpus`].
///
/// Literals must be added in a deterministic order (files sorted by path,
/// sites in source order) for the key order to be reproducible.
pub struct CorpusBuilder {
    options: FilterOptions,
    entries: Vec<CorpusEntry>,
    seen: HashSet<String>,
    stats: CorpusStats,
}

impl CorpusBuilder {
    pub fn new(options: FilterOptions) -> Self {
        Self {
            options,
            entries: Vec::new(),
            seen: HashSet::new(),
            stats: CorpusStats::default(),
        }
    }

    pub fn add(&mut self, literal: &ResolvedLiteral) {
        self.stats.sites += 1;
        let text = &literal.site.text;

        if let Some(reason) = self.options.reject_reason(text) {
            self.stats.record(reason);
            return;
        }
        if self.options.localized_only && !literal.is_localization_call {
            self.stats.record(RejectReason::NotLocalized);
            return;
        }
        if !self.seen.insert(text.clone()) {
            self.stats.record(RejectReason::Duplicate);
            return;
        }

        self.entries.push(CorpusEntry {
            key: text.clone(),
            file_path: literal.file_path.clone(),
            line: literal.site.line,
            col: literal.site.col,
            is_localization_call: literal.is_localization_call,
        });
    }

    pub fn extend<'a>(&mut self, literals: impl IntoIterator<Item = &'a ResolvedLiteral>) {
        for literal in literals {
            self.add(literal);
        }
    }

    pub fn build(self) -> (Corpus, CorpusStats) {
        (
            Corpus {
                entries: self.entries,
            },
            self.stats,
        )
    }
}
