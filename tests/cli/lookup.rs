use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

fn project_with_french() -> Result<CliTest> {
    CliTest::with_file(
        "locales/strings.fr.json",
        "{\n  \"Save\": \"Enregistrer\",\n  \"Cancel\": \"\"\n}\n",
    )
}

#[test]
fn test_lookup_prints_translations() -> Result<()> {
    let test = project_with_french()?;

    let (code, stdout, _) = run(test
        .lookup_command()
        .args(["-l", "fr", "Save", "Cancel", "Unknown"]))?;

    assert_eq!(code, 0);
    // Untranslated and unknown keys fall back to the key.
    assert_eq!(stdout, "Enregistrer\nCancel\nUnknown\n");

    Ok(())
}

#[test]
fn test_lookup_language_is_case_insensitive() -> Result<()> {
    let test = project_with_french()?;

    let (code, stdout, _) = run(test.lookup_command().args(["--language", "FR", "Save"]))?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "Enregistrer\n");

    Ok(())
}

#[test]
fn test_lookup_uses_config_location() -> Result<()> {
    let test = CliTest::with_file("i18n/messages.de.json", r#"{ "Save": "Speichern" }"#)?;
    test.write_file(
        ".strlocrc.json",
        r#"{ "outputDir": "i18n", "fileName": "messages" }"#,
    )?;

    let (code, stdout, _) = run(test.lookup_command().args(["-l", "de", "Save"]))?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "Speichern\n");

    Ok(())
}

#[test]
fn test_lookup_explicit_dir_and_filename() -> Result<()> {
    let test = CliTest::with_file("res/ui.es.json", r#"{ "Save": "Guardar" }"#)?;

    let (code, stdout, _) = run(test
        .lookup_command()
        .args(["-l", "es", "--locales-dir", "res", "-f", "ui", "Save"]))?;

    assert_eq!(code, 0);
    assert_eq!(stdout, "Guardar\n");

    Ok(())
}

#[test]
fn test_lookup_missing_resource_is_an_error() -> Result<()> {
    let test = project_with_french()?;

    let (code, stdout, stderr) = run(test.lookup_command().args(["-l", "de", "Save"]))?;

    assert_eq!(code, 2);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Failed to look up \"Save\""));
    assert!(stderr.contains("resource file for 'de' not found"));

    Ok(())
}

#[test]
fn test_lookup_malformed_resource_is_an_error() -> Result<()> {
    let test = CliTest::with_file("locales/strings.fr.json", r#"{ "Save": 1 }"#)?;

    let (code, _, stderr) = run(test.lookup_command().args(["-l", "fr", "Save"]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Failed to look up \"Save\""));

    Ok(())
}

#[test]
fn test_lookup_unknown_language_is_an_error() -> Result<()> {
    let test = project_with_french()?;

    let (code, _, stderr) = run(test.lookup_command().args(["-l", "zz", "Save"]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Unknown language code: \"zz\""));

    Ok(())
}

#[test]
fn test_lookup_file_name_with_path_is_an_error() -> Result<()> {
    let test = project_with_french()?;

    let (code, _, stderr) = run(test
        .lookup_command()
        .args(["-l", "fr", "-f", "../strings", "Save"]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("'fileName' must be a plain file name"));

    Ok(())
}
