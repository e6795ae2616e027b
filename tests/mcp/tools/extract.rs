use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use strloc::mcp::{StrlocMcpServer, types::ExtractLiteralsParams};

use crate::{
    McpTestFixture, assert_pagination, extract_tool_result_json, fixture_app,
    fixture_many_literals,
};

fn params(fixture: &McpTestFixture) -> ExtractLiteralsParams {
    ExtractLiteralsParams {
        project_root_path: fixture.root(),
        localized_only: None,
        limit: None,
        offset: None,
    }
}

// ============================================================================
// extract_literals tests
// ============================================================================

#[tokio::test]
async fn test_extract_literals_lists_keys() {
    let fixture = fixture_app().unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .extract_literals(Parameters(params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["sourceFileCount"], 2);
    assert_eq!(json_result["totalCount"], 2);
    assert_eq!(json_result["localizedCount"], 1);

    let items = json_result["items"].as_array().unwrap();
    let keys: Vec<&str> = items.iter().map(|i| i["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["Save", "Loading"]);
    assert_eq!(items[0]["isLocalizationCall"], true);
    assert_eq!(items[1]["isLocalizationCall"], false);
    assert!(items[0]["filePath"].as_str().unwrap().ends_with("app.ts"));

    assert!(json_result["issues"].as_array().unwrap().is_empty());
    assert_pagination(&json_result, 0, 50, false);
}

#[tokio::test]
async fn test_extract_literals_writes_nothing() {
    let fixture = fixture_app().unwrap();
    fixture
        .write_config(&json!({ "includeLanguages": ["en", "fr"] }))
        .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .extract_literals(Parameters(params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    let languages = json_result["languages"].as_array().unwrap();
    assert_eq!(languages.len(), 2);
    assert_eq!(languages[1]["language"], "fr");
    assert_eq!(languages[1]["name"], "French");
    assert_eq!(languages[1]["total"], 2);
    assert_eq!(languages[1]["added"], 2);
    assert!(!fixture.root_path().join("locales").exists());
}

#[tokio::test]
async fn test_extract_literals_localized_only_override() {
    let fixture = fixture_app().unwrap();
    let server = StrlocMcpServer::new();

    let mut p = params(&fixture);
    p.localized_only = Some(true);
    let result = server.extract_literals(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    assert_eq!(json_result["items"][0]["key"], "Save");
    assert_eq!(json_result["stats"]["notLocalized"], 1);
}

#[tokio::test]
async fn test_extract_literals_pagination() {
    let fixture = fixture_many_literals(30).unwrap();
    let server = StrlocMcpServer::new();

    let mut p = params(&fixture);
    p.limit = Some(10);
    p.offset = Some(20);
    let result = server.extract_literals(Parameters(p)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 30);
    let items = json_result["items"].as_array().unwrap();
    assert_eq!(items.len(), 10);
    assert_eq!(items[0]["key"], "Message 020");
    assert_pagination(&json_result, 20, 10, false);

    let mut p = params(&fixture);
    p.limit = Some(10);
    let result = server.extract_literals(Parameters(p)).await.unwrap();
    assert_pagination(&extract_tool_result_json(&result), 0, 10, true);
}

#[tokio::test]
async fn test_extract_literals_limit_is_capped() {
    let fixture = fixture_many_literals(3).unwrap();
    let server = StrlocMcpServer::new();

    let mut p = params(&fixture);
    p.limit = Some(1000);
    let result = server.extract_literals(Parameters(p)).await.unwrap();

    assert_pagination(&extract_tool_result_json(&result), 0, 200, false);
}

#[tokio::test]
async fn test_extract_literals_reports_issues() {
    let fixture = McpTestFixture::with_sources(vec![
        ("src/ok.ts", r#"alert("Hello");"#),
        ("src/broken.ts", "const = ;"),
    ])
    .unwrap();
    let server = StrlocMcpServer::new();

    let result = server
        .extract_literals(Parameters(params(&fixture)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["totalCount"], 1);
    let issues = json_result["issues"].as_array().unwrap();
    let rules: Vec<&str> = issues.iter().map(|i| i["rule"].as_str().unwrap()).collect();
    // Global issues sort before file issues.
    assert_eq!(rules, vec!["missing-interface", "parse-error"]);
    assert_eq!(issues[1]["severity"], "error");
    assert!(issues[1]["filePath"].as_str().unwrap().ends_with("broken.ts"));
    assert!(issues[0]["filePath"].is_null());
}

#[tokio::test]
async fn test_extract_literals_missing_root_is_an_error() {
    let fixture = McpTestFixture::new().unwrap();
    let server = StrlocMcpServer::new();

    let mut p = params(&fixture);
    p.project_root_path = fixture.root_path().join("missing").to_string_lossy().to_string();
    let err = server.extract_literals(Parameters(p)).await.unwrap_err();

    assert!(err.message.contains("Source root does not exist"));
}
