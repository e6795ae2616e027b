use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;
use strloc::mcp::{StrlocMcpServer, types::GetConfigParams};

use crate::{McpTestFixture, extract_tool_result_json};

// ============================================================================
// get_config tests
// ============================================================================

#[tokio::test]
async fn test_get_config_defaults() {
    let fixture = McpTestFixture::new().unwrap();
    let server = StrlocMcpServer::new();

    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], false);
    assert_eq!(json_result["config"]["outputDir"], "locales");
    assert_eq!(json_result["config"]["fileName"], "strings");
    assert_eq!(json_result["config"]["localizationInterface"], "ILocalizer");
    assert!(json_result["config"]["ignores"].is_array());
}

#[tokio::test]
async fn test_get_config_from_strlocrc() {
    let fixture = McpTestFixture::new().unwrap();
    fixture
        .write_config(&json!({
            "outputDir": "i18n",
            "minLength": 2,
            "includeLanguages": ["fr", "de"]
        }))
        .unwrap();

    let server = StrlocMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let result = server.get_config(params).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["fromFile"], true);
    assert_eq!(json_result["config"]["outputDir"], "i18n");
    assert_eq!(json_result["config"]["minLength"], 2);
    assert_eq!(json_result["config"]["includeLanguages"], json!(["fr", "de"]));
    // Unset fields keep their defaults.
    assert_eq!(json_result["config"]["fileName"], "strings");
}

#[tokio::test]
async fn test_get_config_invalid_file_is_an_error() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_config(&json!({ "minLength": 0 })).unwrap();

    let server = StrlocMcpServer::new();
    let params = Parameters(GetConfigParams {
        project_root_path: fixture.root(),
    });

    let err = server.get_config(params).await.unwrap_err();
    assert!(err.message.contains("minLength"));
}
