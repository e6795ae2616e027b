//! Phase 5: Synthesis - fan the corpus out into one resource file per language.
//!
//! Existing translations are retained for keys still in the corpus; keys no
//! longer extracted are dropped. Each language is independent: a failure for
//! one language is reported and the others are still written.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Result;
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    core::{
        Language,
        corpus::Corpus,
        parsers::resource::{LocaleResource, read_resource, resource_path, write_resource},
    },
    issues::ResourceErrorIssue,
};

/// Choose target languages.
///
/// With a non-empty `include`, only those languages are candidates; `exclude`
/// always wins. Output follows the declared order of [`Language::ALL`].
pub fn select_languages(include: &[Language], exclude: &[Language]) -> Vec<Language> {
    Language::ALL
        .iter()
        .copied()
        .filter(|lang| !exclude.contains(lang))
        .filter(|lang| include.is_empty() || include.contains(lang))
        .collect()
}

/// What merging did to one language's resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeStats {
    /// Keys in the merged resource.
    pub total: usize,
    /// Keys whose non-empty translation was carried over.
    pub retained_translations: usize,
    /// Keys not present in the previous resource.
    pub added: usize,
    /// Keys of the previous resource that are no longer extracted.
    pub removed: usize,
}

/// Merge `corpus` with a language's previous resource.
///
/// The result has exactly the corpus keys in corpus order. A key keeps its
/// previous value when it had one, otherwise it maps to `""`.
pub fn merge_resource(
    corpus: &Corpus,
    existing: Option<&LocaleResource>,
) -> (LocaleResource, MergeStats) {
    let mut stats = MergeStats::default();
    let mut merged = LocaleResource::new();

    for key in corpus.keys() {
        let previous = existing.and_then(|e| e.get(key)).and_then(Value::as_str);
        match previous {
            Some(translation) => {
                if !translation.is_empty() {
                    stats.retained_translations += 1;
                }
                merged.insert(key.to_string(), Value::String(translation.to_string()));
            }
            None => {
                stats.added += 1;
                merged.insert(key.to_string(), Value::String(String::new()));
            }
        }
    }

    // `merged` holds exactly the corpus keys and has hashed lookups.
    stats.total = merged.len();
    stats.removed = existing
        .map(|e| e.keys().filter(|k| !merged.contains_key(k.as_str())).count())
        .unwrap_or(0);

    (merged, stats)
}

/// Pure fan-out: compute the resource of every language without touching
/// the filesystem.
pub fn synthesize(
    corpus: &Corpus,
    languages: &[Language],
    existing: &HashMap<Language, LocaleResource>,
) -> Vec<(Language, LocaleResource)> {
    languages
        .iter()
        .map(|lang| (*lang, merge_resource(corpus, existing.get(lang)).0))
        .collect()
}

/// Where and how resource files are written.
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub output_dir: PathBuf,
    pub base_name: String,
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// Result for one language that was synthesized successfully.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageOutcome {
    pub language: Language,
    pub path: PathBuf,
    pub stats: MergeStats,
    /// False for dry runs.
    pub written: bool,
}

#[derive(Debug, Default)]
pub struct SynthesisReport {
    /// Successful languages, in language order.
    pub outcomes: Vec<LanguageOutcome>,
    pub errors: Vec<ResourceErrorIssue>,
}

impl SynthesisReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Reads, merges and writes resource files, one rayon task per language.
pub struct LocaleSynthesizer {
    options: SynthesisOptions,
}

impl LocaleSynthesizer {
    pub fn new(options: SynthesisOptions) -> Self {
        Self { options }
    }

    pub fn resource_path(&self, language: Language) -> PathBuf {
        resource_path(&self.options.output_dir, &self.options.base_name, language)
    }

    pub fn run(&self, corpus: &Corpus, languages: &[Language]) -> SynthesisReport {
        info!(
            "Synthesizing {} key(s) for {} language(s) into {}",
            corpus.len(),
            languages.len(),
            self.options.output_dir.display()
        );

        let results: Vec<_> = languages
            .par_iter()
            .map(|lang| {
                let path = self.resource_path(*lang);
                let result = self.synthesize_one(corpus, *lang, &path);
                (*lang, path, result)
            })
            .collect();

        let mut report = SynthesisReport::default();
        for (language, path, result) in results {
            match result {
                Ok(stats) => report.outcomes.push(LanguageOutcome {
                    language,
                    path,
                    stats,
                    written: !self.options.dry_run,
                }),
                Err(e) => {
                    warn!("{}: {:#}", path.display(), e);
                    report.errors.push(ResourceErrorIssue {
                        language,
                        file_path: path.to_string_lossy().to_string(),
                        error: format!("{:#}", e),
                    });
                }
            }
        }
        report
    }

    fn synthesize_one(&self, corpus: &Corpus, language: Language, path: &Path) -> Result<MergeStats> {
        let existing = read_resource(path)?;
        let (merged, stats) = merge_resource(corpus, existing.as_ref());

        debug!(
            "{}: {} key(s), {} retained, {} added, {} removed",
            language, stats.total, stats.retained_translations, stats.added, stats.removed
        );

        if !self.options.dry_run {
            write_resource(path, &merged)?;
        }
        Ok(stats)
    }
}
