use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, run};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["outputDir"], "locales");
    assert_eq!(parsed["fileName"], "strings");
    assert_eq!(parsed["minLength"], 1);
    assert_eq!(parsed["localizationInterface"], "ILocalizer");
    assert!(parsed["includeLanguages"].as_array().is_some_and(Vec::is_empty));

    assert!(
        content.contains("\n  \"includes\""),
        "Config should use 2-space indentation"
    );
    assert!(content.ends_with("}\n"));

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .strlocrc.json

    ----- stderr -----
    ");

    assert!(test.root().join(".strlocrc.json").exists());
    let content = test.read_file(".strlocrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".strlocrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .strlocrc.json already exists
    ");

    // The existing file is left untouched.
    assert_eq!(test.read_file(".strlocrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_then_extract_uses_defaults() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;

    let (code, _, _) = run(test.command().arg("init"))?;
    assert_eq!(code, 0);

    let (code, stdout, _) = run(test.extract_command().args(["-i", "en"]))?;
    assert_eq!(code, 0);
    assert!(stdout.contains("Extracted 1 key(s) from 1 source file "));
    assert!(test.root().join("locales/strings.en.json").exists());

    Ok(())
}

#[test]
fn test_init_notes_shadowed_parent_config() -> Result<()> {
    let test = CliTest::new()?;
    let parent = test.root().parent().context("project has a parent")?;
    std::fs::write(parent.join(".strlocrc.json"), "{}")?;

    let (code, stdout, _) = run(test.command().arg("init"))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Created .strlocrc.json"));
    assert!(stdout.contains("is no longer used for this directory"));

    Ok(())
}
