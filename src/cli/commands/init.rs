use std::{fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::exit_status::ExitStatus;
use super::super::report::SUCCESS_MARK;
use crate::config::{CONFIG_FILE_NAME, default_config_json, find_config_file};

/// Write a default `.strlocrc.json` into the working directory.
pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    // A config further up the tree stops applying here once this one exists.
    let cwd = std::env::current_dir().context("Failed to read the working directory")?;
    let shadowed = cwd.parent().and_then(find_config_file);

    let content = default_config_json()?;
    fs::write(config_path, format!("{}\n", content))
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    if let Some(parent) = shadowed {
        println!(
            "{} {} is no longer used for this directory",
            "note:".bold(),
            parent.display()
        );
    }

    Ok(ExitStatus::Success)
}
