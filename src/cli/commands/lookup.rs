use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::super::{args::LookupCommand, exit_status::ExitStatus};
use crate::{
    config::load_config,
    core::{Language, context::resolve_under_root},
    runtime::{LazyLocalizationLoader, Localize, Localizer},
};

/// Print the translation of each key, one per line.
pub fn lookup(cmd: LookupCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let language: Language = args.language.parse()?;

    let root = PathBuf::from(".");
    let mut config = load_config(&root)?.config;
    if let Some(filename) = &args.filename {
        config.file_name = filename.clone();
        config.validate()?;
    }
    let locales_dir = args
        .locales_dir
        .clone()
        .unwrap_or_else(|| resolve_under_root(&root, Path::new(&config.output_dir)));

    let localizer = Localizer::with_language(
        LazyLocalizationLoader::new(locales_dir, config.file_name),
        language,
    );
    for key in &args.keys {
        let translation = localizer
            .get(key)
            .with_context(|| format!("Failed to look up \"{}\"", key))?;
        println!("{}", translation);
    }

    Ok(ExitStatus::Success)
}
