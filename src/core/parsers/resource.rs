use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::core::Language;

/// Extension of generated resource files.
pub const RESOURCE_EXTENSION: &str = "json";

/// Ordered `key -> translation` mapping for one language.
///
/// An empty translation means "untranslated". Key order follows insertion order
/// (serde_json is built with `preserve_order`).
pub type LocaleResource = Map<String, Value>;

/// Path of the resource file for one language:
/// `<output_dir>/<base_name>.<code>.json`.
pub fn resource_path(output_dir: &Path, base_name: &str, language: Language) -> PathBuf {
    output_dir.join(format!(
        "{}.{}.{}",
        base_name,
        language.code(),
        RESOURCE_EXTENSION
    ))
}

/// Read an existing flat resource file.
///
/// A missing file yields `None` and an empty file an empty mapping, so both
/// are simply rewritten. The root must be an object whose values are all
/// strings; anything else is treated as a malformed resource.
pub fn read_resource(path: &Path) -> Result<Option<LocaleResource>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read resource file: {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Some(LocaleResource::new()));
    }

    parse_resource(&content)
        .with_context(|| format!("Malformed resource file: {}", path.display()))
        .map(Some)
}

/// Parse the content of a flat resource file.
pub fn parse_resource(content: &str) -> Result<LocaleResource> {
    let value: Value = serde_json::from_str(content).context("Failed to parse JSON")?;
    let Value::Object(map) = value else {
        bail!("Root of a resource file must be an object");
    };

    if let Some((key, _)) = map.iter().find(|(_, v)| !v.is_string()) {
        bail!("Value for key \"{}\" is not a string", key);
    }

    Ok(map)
}

/// Write a resource file with 2-space indentation and a trailing newline,
/// creating parent directories if needed.
pub fn write_resource(path: &Path, resource: &LocaleResource) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(resource).context("Failed to serialize JSON")?;

    fs::write(path, format!("{}\n", content))
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}
