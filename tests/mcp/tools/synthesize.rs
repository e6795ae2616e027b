use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use strloc::mcp::{StrlocMcpServer, types::SynthesizeResourcesParams};

use crate::{McpTestFixture, extract_tool_result_json, fixture_app};

fn params(
    fixture: &McpTestFixture,
    include: &[&str],
    exclude: &[&str],
) -> SynthesizeResourcesParams {
    let list = |codes: &[&str]| {
        (!codes.is_empty()).then(|| codes.iter().map(|c| c.to_string()).collect())
    };
    SynthesizeResourcesParams {
        project_root_path: fixture.root(),
        include_languages: list(include),
        exclude_languages: list(exclude),
    }
}

// ============================================================================
// synthesize_resources tests
// ============================================================================

#[tokio::test]
async fn test_synthesize_writes_resources() {
    let fixture = fixture_app().unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .synthesize_resources(Parameters(params(&fixture, &["en", "ja"], &[])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    assert_eq!(json_result["keyCount"], 2);
    assert_eq!(json_result["written"].as_array().unwrap().len(), 2);

    let expected = json!({ "Save": "", "Loading": "" });
    assert_eq!(fixture.read_resource_file("en").unwrap(), expected);
    assert_eq!(fixture.read_resource_file("ja").unwrap(), expected);
}

#[tokio::test]
async fn test_synthesize_exclude_languages() {
    let fixture = fixture_app().unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .synthesize_resources(Parameters(params(&fixture, &["en", "fr", "de"], &["fr"])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let codes: Vec<&str> = json_result["written"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["language"].as_str().unwrap())
        .collect();
    assert_eq!(codes, vec!["en", "de"]);
    assert!(!fixture.root_path().join("locales/strings.fr.json").exists());
}

#[tokio::test]
async fn test_synthesize_retains_translations() {
    let fixture = fixture_app().unwrap();
    fixture
        .write_resource_file("fr", &json!({ "Save": "Enregistrer", "Gone": "Parti" }))
        .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .synthesize_resources(Parameters(params(&fixture, &["fr"], &[])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let fr = &json_result["written"][0];
    assert_eq!(fr["retainedTranslations"], 1);
    assert_eq!(fr["added"], 1);
    assert_eq!(fr["removed"], 1);
    assert_eq!(
        fixture.read_resource_file("fr").unwrap(),
        json!({ "Save": "Enregistrer", "Loading": "" })
    );
}

#[tokio::test]
async fn test_synthesize_malformed_resource_fails_that_language() {
    let fixture = fixture_app().unwrap();
    fixture
        .write_resource_file("fr", &json!({ "Save": ["not", "a", "string"] }))
        .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .synthesize_resources(Parameters(params(&fixture, &["en", "fr"], &[])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], false);
    assert_eq!(json_result["written"].as_array().unwrap().len(), 1);
    let issues = json_result["issues"].as_array().unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0]["rule"], "resource-error");
    assert!(fixture.root_path().join("locales/strings.en.json").exists());
}

#[tokio::test]
async fn test_synthesize_unknown_language_is_a_warning() {
    let fixture = fixture_app().unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .synthesize_resources(Parameters(params(&fixture, &["en", "xx"], &[])))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["success"], true);
    let issues = json_result["issues"].as_array().unwrap();
    assert_eq!(issues[0]["rule"], "unknown-language");
    assert_eq!(issues[0]["severity"], "warning");
}
