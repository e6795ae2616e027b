use anyhow::Result;
use tracing::{debug, info};

use super::super::{args::ExtractArgs, args::ExtractCommand, exit_status::ExitStatus, report};
use super::{CommandResult, ExtractSummary};
use crate::{
    config::{Config, load_config},
    core::ExtractContext,
    issues::Issue,
};

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let config = merged_config(args)?;
    let ctx = ExtractContext::new(&args.source_root, config)?;

    let corpus = ctx.corpus();
    let synthesis = ctx.synthesize(args.dry_run);

    let mut issues = ctx.issues();
    issues.extend(synthesis.errors.into_iter().map(Issue::ResourceError));

    let summary = ExtractSummary {
        source_files: ctx.files.len(),
        key_count: corpus.len(),
        localized_key_count: corpus
            .entries()
            .iter()
            .filter(|e| e.is_localization_call)
            .count(),
        stats: ctx.corpus_stats(),
        output_dir: ctx.output_dir.clone(),
        outcomes: synthesis.outcomes,
        dry_run: args.dry_run,
        visualize: args.visualize,
    };
    let result = CommandResult::new(summary, issues);
    info!(
        "Extract finished: {} key(s), {} error(s), {} warning(s)",
        result.summary.key_count, result.error_count, result.warning_count
    );

    report::print(&result, args.verbose);
    Ok(ExitStatus::from_error_count(result.error_count))
}

/// Merge the config file with CLI overrides (CLI > file > defaults).
fn merged_config(args: &ExtractArgs) -> Result<Config> {
    let loaded = load_config(&args.source_root)?;
    match &loaded.path {
        Some(path) => debug!("Using config file {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    let mut config = loaded.config;
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.to_string_lossy().to_string();
    }
    if let Some(filename) = &args.filename {
        config.file_name = filename.clone();
    }
    if let Some(min_length) = args.min_length {
        config.min_length = min_length;
    }
    if args.exclude_special_chars_only {
        config.exclude_special_chars_only = true;
    }
    if !args.include_languages.is_empty() {
        config.include_languages = args.include_languages.clone();
    }
    if !args.exclude_languages.is_empty() {
        config.exclude_languages = args.exclude_languages.clone();
    }
    if let Some(interface) = &args.interface {
        config.localization_interface = interface.clone();
    }
    if args.localized_only {
        config.localized_only = true;
    }
    Ok(config)
}
