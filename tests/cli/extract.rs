use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const LOCALIZER: &str = r#"export interface ILocalizer {
    get(literal: string): string;
}

export class Localizer implements ILocalizer {
    get(literal: string) {
        return literal;
    }
}

export const localizer = new Localizer();
"#;

fn project_with_page(page: &str) -> Result<CliTest> {
    let test = CliTest::with_file("src/i18n.ts", LOCALIZER)?;
    test.write_file("src/page.ts", page)?;
    Ok(test)
}

#[test]
fn test_extract_writes_one_file_per_language() -> Result<()> {
    let test = project_with_page(
        r#"import { localizer } from "./i18n";

class Logger {
    info(message: string) {}
}
const logger = new Logger();

localizer.get("Save");
logger.info("Save");
"#,
    )?;

    let (code, stdout, _) = run(test.extract_command().args(["-i", "en,fr"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Extracted 1 key(s) from 2 source files"));
    assert!(stdout.contains("Wrote 2 resource file(s) in locales"));
    assert_eq!(test.read_file("locales/strings.en.json")?, "{\n  \"Save\": \"\"\n}\n");
    assert_eq!(test.read_file("locales/strings.fr.json")?, "{\n  \"Save\": \"\"\n}\n");
    assert!(!test.root().join("locales/strings.de.json").exists());

    Ok(())
}

#[test]
fn test_extract_keeps_order_of_first_occurrence() -> Result<()> {
    let test = CliTest::with_file(
        "app.js",
        r#"alert("Zebra");
alert("Apple");
alert("Zebra");
"#,
    )?;

    let (code, _, _) = run(test.extract_command().args(["-i", "de"]))?;

    assert_eq!(code, 0);
    assert_eq!(
        test.read_file("locales/strings.de.json")?,
        "{\n  \"Zebra\": \"\",\n  \"Apple\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;

    let (code, stdout, _) = run(test.extract_command().args(["-i", "en,fr", "--dry-run"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Would write 2 resource file(s) in locales"));
    assert!(stdout.contains("Run without --dry-run to write them."));
    assert!(!test.root().join("locales").exists());

    Ok(())
}

#[test]
fn test_extract_retains_translations_and_drops_stale_keys() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Save"); alert("Cancel");"#)?;
    test.write_file(
        "locales/strings.fr.json",
        "{\n  \"Save\": \"Enregistrer\",\n  \"Old\": \"Ancien\"\n}\n",
    )?;

    let (code, _, _) = run(test.extract_command().args(["-i", "fr"]))?;

    assert_eq!(code, 0);
    assert_eq!(
        test.read_file("locales/strings.fr.json")?,
        "{\n  \"Save\": \"Enregistrer\",\n  \"Cancel\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_filters_short_and_symbol_only_literals() -> Result<()> {
    let test = CliTest::with_file(
        "app.ts",
        r#"alert("OK"); alert("Submit"); alert("---"); alert("  ");"#,
    )?;

    let (code, _, _) = run(test.extract_command().args(["-i", "en", "-m", "3", "-e"]))?;

    assert_eq!(code, 0);
    assert_eq!(
        test.read_file("locales/strings.en.json")?,
        "{\n  \"Submit\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_localized_only() -> Result<()> {
    let test = project_with_page(
        r#"import { localizer } from "./i18n";

localizer.get("Title");
console.log("debug output");
"#,
    )?;

    let (code, stdout, _) = run(test
        .extract_command()
        .args(["-i", "en", "--localized-only"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("Extracted 1 key(s)"));
    assert_eq!(
        test.read_file("locales/strings.en.json")?,
        "{\n  \"Title\": \"\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_output_dir_and_filename_from_config() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;
    test.write_file(
        ".strlocrc.json",
        r#"{ "outputDir": "i18n", "fileName": "messages", "includeLanguages": ["ja"] }"#,
    )?;

    let (code, _, _) = run(&mut test.extract_command())?;

    assert_eq!(code, 0);
    assert_eq!(test.read_file("i18n/messages.ja.json")?, "{\n  \"Hello\": \"\"\n}\n");

    Ok(())
}

#[test]
fn test_extract_cli_overrides_config() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;
    test.write_file(
        ".strlocrc.json",
        r#"{ "fileName": "messages", "includeLanguages": ["ja"] }"#,
    )?;

    let (code, _, _) = run(test
        .extract_command()
        .args(["-f", "ui", "-o", "out", "-i", "ko"]))?;

    assert_eq!(code, 0);
    assert!(test.root().join("out/ui.ko.json").exists());
    assert!(!test.root().join("out/ui.ja.json").exists());

    Ok(())
}

#[test]
fn test_extract_source_root_option() -> Result<()> {
    let test = CliTest::with_file("web/app.ts", r#"alert("Hello");"#)?;

    let (code, _, _) = run(test.extract_command().args(["-d", "web", "-i", "en"]))?;

    assert_eq!(code, 0);
    assert!(test.root().join("web/locales/strings.en.json").exists());

    Ok(())
}

#[test]
fn test_extract_parse_error_exits_with_failure() -> Result<()> {
    let test = CliTest::with_file("ok.ts", r#"alert("Hello");"#)?;
    test.write_file("broken.ts", "const = ;")?;

    let (code, stdout, stderr) = run(test.extract_command().args(["-i", "en"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("parse-error"));
    assert!(stdout.contains("broken.ts"));
    assert!(stderr.contains("1 file(s) could not be parsed"));
    // The readable file is still extracted.
    assert_eq!(test.read_file("locales/strings.en.json")?, "{\n  \"Hello\": \"\"\n}\n");

    Ok(())
}

#[test]
fn test_extract_malformed_resource_is_reported() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;
    test.write_file("locales/strings.fr.json", "{ not json")?;

    let (code, stdout, _) = run(test.extract_command().args(["-i", "en,fr"]))?;

    assert_eq!(code, 1);
    assert!(stdout.contains("resource-error"));
    assert!(stdout.contains("language 'fr' (French) was not written"));
    // Other languages are still written, the malformed file is left alone.
    assert!(test.root().join("locales/strings.en.json").exists());
    assert_eq!(test.read_file("locales/strings.fr.json")?, "{ not json");

    Ok(())
}

#[test]
fn test_extract_unknown_language_is_a_warning() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;

    let (code, stdout, _) = run(test.extract_command().args(["-i", "fr,zz"]))?;

    assert_eq!(code, 0);
    assert!(stdout.contains("warning: Unknown language code 'zz'"));
    assert!(stdout.contains("Wrote 1 resource file(s)"));

    Ok(())
}

#[test]
fn test_extract_visualize_prints_table() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;

    let (code, stdout, _) = run(test
        .extract_command()
        .args(["-i", "en,fr", "--visualize"]))?;

    assert_eq!(code, 0);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines[..3],
        [
            "Code  Language  File                     Keys  Translated",
            "en    English   locales/strings.en.json     1           0",
            "fr    French    locales/strings.fr.json     1           0",
        ]
    );

    Ok(())
}

#[test]
fn test_extract_ignores_test_files_and_node_modules() -> Result<()> {
    let test = CliTest::with_file("src/app.ts", r#"alert("Kept");"#)?;
    test.write_file("src/app.test.ts", r#"alert("Test only");"#)?;
    test.write_file("node_modules/lib/index.js", r#"alert("Vendored");"#)?;

    let (code, _, _) = run(test.extract_command().args(["-i", "en"]))?;

    assert_eq!(code, 0);
    assert_eq!(test.read_file("locales/strings.en.json")?, "{\n  \"Kept\": \"\"\n}\n");

    Ok(())
}

#[test]
fn test_extract_missing_source_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let (code, _, stderr) = run(test.extract_command().args(["-d", "missing"]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("Source root does not exist"));

    Ok(())
}

#[test]
fn test_extract_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;
    test.write_file(".strlocrc.json", r#"{ "ignorePatterns": ["("] }"#)?;

    let (code, _, stderr) = run(&mut test.extract_command())?;

    assert_eq!(code, 2);
    assert!(stderr.contains("ignorePatterns"));

    Ok(())
}

#[test]
fn test_extract_file_name_with_path_is_an_error() -> Result<()> {
    let test = CliTest::with_file("app.ts", r#"alert("Hello");"#)?;

    let (code, _, stderr) = run(test.extract_command().args(["-f", "../escaped"]))?;

    assert_eq!(code, 2);
    assert!(stderr.contains("'fileName' must be a plain file name"));
    assert!(!test.root().join("escaped.en.json").exists());

    Ok(())
}
