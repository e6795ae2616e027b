use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use strloc::mcp::{StrlocMcpServer, types::LookupTranslationParams};

use crate::{McpTestFixture, extract_tool_result_json};

fn params(fixture: &McpTestFixture, language: &str, keys: &[&str]) -> LookupTranslationParams {
    LookupTranslationParams {
        project_root_path: fixture.root(),
        language: language.to_string(),
        keys: keys.iter().map(|k| k.to_string()).collect(),
    }
}

// ============================================================================
// lookup_translation tests
// ============================================================================

#[tokio::test]
async fn test_lookup_translation() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_resource_file("fr", &json!({ "Save": "Enregistrer", "Cancel": "" }))
        .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .lookup_translation(Parameters(params(&fixture, "fr", &["Save", "Cancel", "New"])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["language"], "fr");
    assert!(
        json_result["filePath"]
            .as_str()
            .unwrap()
            .ends_with("strings.fr.json")
    );
    assert_eq!(
        json_result["translations"],
        json!([
            { "key": "Save", "value": "Enregistrer", "translated": true },
            { "key": "Cancel", "value": "Cancel", "translated": false },
            { "key": "New", "value": "New", "translated": false }
        ])
    );
}

#[tokio::test]
async fn test_lookup_translation_follows_config() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({ "outputDir": "i18n", "fileName": "ui" }))
        .unwrap();
    fixture
        .write_source_file("i18n/ui.de.json", r#"{ "Save": "Speichern" }"#)
        .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .lookup_translation(Parameters(params(&fixture, "de", &["Save"])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["translations"][0]["value"], "Speichern");
}

#[tokio::test]
async fn test_lookup_translation_unknown_language() {
    let fixture = McpTestFixture::new().unwrap();
    let server = StrlocMcpServer::new();

    let err = server
        .lookup_translation(Parameters(params(&fixture, "zz", &["Save"])))
        .await
        .unwrap_err();
    assert!(err.message.contains("Unknown language code"));
}

#[tokio::test]
async fn test_lookup_translation_missing_resource() {
    let fixture = McpTestFixture::new().unwrap();
    let server = StrlocMcpServer::new();

    let err = server
        .lookup_translation(Parameters(params(&fixture, "it", &["Save"])))
        .await
        .unwrap_err();
    assert!(err.message.contains("not found"));
}

#[tokio::test]
async fn test_lookup_translation_identical_translation() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_resource_file("de", &json!({ "OK": "OK", "Menu": "" }))
        .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .lookup_translation(Parameters(params(&fixture, "de", &["OK", "Menu"])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(
        json_result["translations"],
        json!([
            { "key": "OK", "value": "OK", "translated": true },
            { "key": "Menu", "value": "Menu", "translated": false }
        ])
    );
}
