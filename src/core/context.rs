use std::{
    cell::OnceCell,
    collections::HashMap,
    path::{Component, Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context as _, Result, anyhow};
use rayon::prelude::*;
use swc_common::SourceMap;
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    core::{
        Language,
        corpus::{Corpus, CorpusBuilder, CorpusStats, FilterOptions},
        extract::LiteralClassifier,
        file_scanner::{ScanOptions, scan_files},
        language::parse_languages,
        parsers::source::{ParsedSource, parse_source},
        resolve::{LocalizationResolver, ResolvedLiteral, find_capability},
        symbols::{SemanticModel, SymbolCollector, SymbolTable, TypeId},
        synthesize::{LocaleSynthesizer, SynthesisOptions, SynthesisReport, select_languages},
    },
    issues::{
        Issue, LanguageListKind, MissingInterfaceIssue, ParseErrorIssue, UnknownLanguageIssue,
    },
};

/// Output of Phase 1: the merged symbol table and the capability it names.
pub struct SymbolData {
    pub table: SymbolTable,
    /// Id of the localization interface, if it is declared in the scan.
    pub capability: Option<TypeId>,
}

/// Orchestrates one extraction run over a source tree.
///
/// # Pipeline
///
/// 1. **Parse** every scanned file (parallel) → `parsed_files`
/// 2. **Phase 1: Symbols** → declarations per file (parallel), merged into one
///    [`SymbolTable`]
/// 3. **Phase 2: Classification** → literal sites per file (parallel)
/// 4. **Phase 3: Resolution** → each site annotated with its call symbol
/// 5. **Phase 4: Corpus** → filtered, deduplicated keys
/// 6. **Phase 5: Synthesis** → one resource per target language
///
/// Every phase is computed on first access and cached, so a caller that only
/// needs the corpus never touches the resource directory.
///
/// # Configuration Priority
///
/// The caller passes an already merged [`Config`]:
/// 1. CLI arguments
/// 2. `.strlocrc.json`
/// 3. Built-in defaults
pub struct ExtractContext {
    pub config: Config,

    /// Directory scanning starts from.
    pub root_dir: PathBuf,

    /// Source files, sorted by path.
    pub files: Vec<String>,

    /// Resource directory, resolved against `root_dir`.
    pub output_dir: PathBuf,

    /// Target languages in declaration order.
    pub languages: Vec<Language>,

    filter: FilterOptions,
    language_issues: Vec<UnknownLanguageIssue>,

    parsed_files: OnceCell<HashMap<String, ParsedSource>>,
    parse_errors: OnceCell<Vec<ParseErrorIssue>>,
    symbols: OnceCell<SymbolData>,
    resolved: OnceCell<Vec<ResolvedLiteral>>,
    corpus: OnceCell<(Corpus, CorpusStats)>,
}

impl ExtractContext {
    /// Validate `config`, select languages and scan `root_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if the config is invalid or `root_dir` does not exist.
    pub fn new(root_dir: impl Into<PathBuf>, config: Config) -> Result<Self> {
        let root_dir = root_dir.into();
        if !root_dir.is_dir() {
            return Err(anyhow!("Source root does not exist: {}", root_dir.display()));
        }
        config.validate()?;

        let filter = filter_options(&config)?;
        let (languages, language_issues) = target_languages(&config);
        let output_dir = resolve_under_root(&root_dir, Path::new(&config.output_dir));

        let scan = scan_files(
            &root_dir,
            &ScanOptions {
                includes: &config.includes,
                ignores: &config.ignores,
                ignore_test_files: config.ignore_test_files,
            },
        );
        if scan.skipped_count > 0 {
            warn!("{} path(s) skipped due to access errors", scan.skipped_count);
        }
        info!(
            "Scanning {}: {} source file(s), {} target language(s)",
            root_dir.display(),
            scan.files.len(),
            languages.len()
        );

        Ok(Self {
            config,
            root_dir,
            files: scan.files.into_iter().collect(),
            output_dir,
            languages,
            filter,
            language_issues,
            parsed_files: OnceCell::new(),
            parse_errors: OnceCell::new(),
            symbols: OnceCell::new(),
            resolved: OnceCell::new(),
            corpus: OnceCell::new(),
        })
    }

    /// Parsed AST for every readable, parsable source file.
    ///
    /// Reading and parsing run in parallel, one `SourceMap` per file. Files
    /// that fail are recorded in `parse_errors()` and skipped by every later
    /// phase.
    pub fn parsed_files(&self) -> &HashMap<String, ParsedSource> {
        self.parsed_files.get_or_init(|| {
            let results: Vec<_> = self
                .files
                .par_iter()
                .map(|file_path| {
                    let parsed = std::fs::read_to_string(file_path)
                        .with_context(|| format!("Failed to read file: {}", file_path))
                        .and_then(|code| {
                            parse_source(code, file_path, Arc::new(SourceMap::default()))
                        });
                    (file_path.clone(), parsed)
                })
                .collect();

            let mut parsed = HashMap::new();
            let mut errors = Vec::new();
            for (file_path, result) in results {
                match result {
                    Ok(p) => {
                        parsed.insert(file_path, p);
                    }
                    Err(e) => {
                        warn!("Skipping {}: {:#}", file_path, e);
                        errors.push(ParseErrorIssue {
                            file_path,
                            error: format!("{:#}", e),
                        });
                    }
                }
            }

            let _ = self.parse_errors.set(errors);
            parsed
        })
    }

    pub fn parse_errors(&self) -> &[ParseErrorIssue] {
        self.parsed_files();
        self.parse_errors.get_or_init(Vec::new)
    }

    /// Phase 1: collect declarations from every file and merge them.
    ///
    /// Declarations are merged in path order so that duplicate members
    /// resolve the same way on every run.
    pub fn symbols(&self) -> &SymbolData {
        self.symbols.get_or_init(|| {
            let parsed_files = self.parsed_files();
            let mut declarations: Vec<_> = parsed_files
                .par_iter()
                .map(|(file_path, parsed)| SymbolCollector::collect(file_path, &parsed.module))
                .collect();
            declarations.sort_by(|a, b| a.file_path.cmp(&b.file_path));

            let table = SymbolTable::build(declarations);
            let capability = find_capability(
                &SemanticModel::new(&table, Vec::new()),
                &self.config.localization_interface,
            );
            debug!(
                "Symbol table: {} type(s), capability {:?}",
                table.type_count(),
                capability
            );

            SymbolData { table, capability }
        })
    }

    /// Phases 2 and 3: classify and resolve every file.
    ///
    /// The result lists files in path order and sites in source order.
    pub fn resolved_literals(&self) -> &[ResolvedLiteral] {
        self.resolved.get_or_init(|| {
            let parsed_files = self.parsed_files();
            let symbols = self.symbols();

            let per_file: Vec<Vec<ResolvedLiteral>> = self
                .files
                .par_iter()
                .filter_map(|file_path| {
                    let parsed = parsed_files.get(file_path)?;
                    let classified =
                        LiteralClassifier::new(file_path, &parsed.source_map, &symbols.table)
                            .classify(&parsed.module);
                    let model = SemanticModel::new(&symbols.table, classified.locals);
                    let resolver =
                        LocalizationResolver::new(&model, symbols.capability.as_deref());
                    Some(resolver.resolve_sites(file_path, classified.sites))
                })
                .collect();

            per_file.into_iter().flatten().collect()
        })
    }

    /// Phase 4: filtered, deduplicated keys.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus_with_stats().0
    }

    pub fn corpus_stats(&self) -> CorpusStats {
        self.corpus_with_stats().1
    }

    fn corpus_with_stats(&self) -> &(Corpus, CorpusStats) {
        self.corpus.get_or_init(|| {
            let mut builder = CorpusBuilder::new(self.filter.clone());
            builder.extend(self.resolved_literals());
            let (corpus, stats) = builder.build();
            info!("Corpus: {} key(s) from {} site(s)", corpus.len(), stats.sites);
            (corpus, stats)
        })
    }

    /// Phase 5: merge the corpus into every target language's resource.
    pub fn synthesize(&self, dry_run: bool) -> SynthesisReport {
        LocaleSynthesizer::new(SynthesisOptions {
            output_dir: self.output_dir.clone(),
            base_name: self.config.file_name.clone(),
            dry_run,
        })
        .run(self.corpus(), &self.languages)
    }

    /// Issues found before synthesis: unknown languages, unparsable files
    /// and a missing localization interface.
    pub fn issues(&self) -> Vec<Issue> {
        let mut issues: Vec<Issue> = self
            .language_issues
            .iter()
            .cloned()
            .map(Issue::UnknownLanguage)
            .collect();
        issues.extend(self.parse_errors().iter().cloned().map(Issue::ParseError));
        if self.symbols().capability.is_none() {
            issues.push(Issue::MissingInterface(MissingInterfaceIssue {
                interface: self.config.localization_interface.clone(),
            }));
        }
        issues
    }
}

fn filter_options(config: &Config) -> Result<FilterOptions> {
    Ok(FilterOptions {
        min_length: config.min_length,
        exclude_special_chars_only: config.exclude_special_chars_only,
        ignore_texts: config.ignore_texts.iter().cloned().collect(),
        ignore_patterns: FilterOptions::compile_patterns(&config.ignore_patterns)?,
        localized_only: config.localized_only,
    })
}

fn target_languages(config: &Config) -> (Vec<Language>, Vec<UnknownLanguageIssue>) {
    let include = parse_languages(&config.include_languages);
    let exclude = parse_languages(&config.exclude_languages);

    let unknown = include
        .unknown
        .into_iter()
        .map(|code| (code, LanguageListKind::Include))
        .chain(
            exclude
                .unknown
                .into_iter()
                .map(|code| (code, LanguageListKind::Exclude)),
        )
        .map(|(code, list)| {
            warn!("Ignoring unknown language code '{}' in the {} list", code, list);
            UnknownLanguageIssue { code, list }
        })
        .collect();

    (
        select_languages(&include.languages, &exclude.languages),
        unknown,
    )
}

/// Resolve a configured path against the source root.
///
/// When the root is `.` the relative path is kept as-is so that reported
/// paths stay short (`locales/strings.en.json` rather than
/// `./locales/strings.en.json`).
pub fn resolve_under_root(root_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        path.to_path_buf()
    } else {
        let rel = path.strip_prefix(Path::new(".")).unwrap_or(path);
        root_dir.join(rel)
    }
}
