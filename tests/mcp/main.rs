use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Test fixture for MCP integration tests
///
/// Manages a temporary TypeScript project with a `locales/` directory
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Create a test project with one source file per `(path, content)` pair
    ///
    /// # Example
    /// ```ignore
    /// let fixture = McpTestFixture::with_sources(vec![
    ///     ("src/app.ts", r#"alert("Hello");"#),
    /// ])?;
    /// ```
    pub fn with_sources(sources: Vec<(&str, &str)>) -> Result<Self> {
        let fixture = Self::new()?;
        for (path, content) in sources {
            fixture.write_source_file(path, content)?;
        }
        Ok(fixture)
    }

    /// Write a TS/JS source file
    pub fn write_source_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write source file: {}", path.display()))?;
        Ok(())
    }

    /// Write a resource file to locales/strings.<code>.json
    pub fn write_resource_file(&self, code: &str, content: &Value) -> Result<()> {
        let dir = self.project_root.join("locales");
        fs::create_dir_all(&dir)?;
        let path = dir.join(format!("strings.{}.json", code));
        let json_str = serde_json::to_string_pretty(content)
            .with_context(|| format!("Failed to serialize JSON for language: {}", code))?;
        fs::write(&path, format!("{}\n", json_str))
            .with_context(|| format!("Failed to write resource file: {}", path.display()))?;
        Ok(())
    }

    /// Read a resource file from locales/strings.<code>.json
    pub fn read_resource_file(&self, code: &str) -> Result<Value> {
        let path = self
            .project_root
            .join("locales")
            .join(format!("strings.{}.json", code));
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read resource file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON from: {}", path.display()))
    }

    /// Write a .strlocrc.json config file
    pub fn write_config(&self, content: &Value) -> Result<()> {
        let path = self.project_root.join(".strlocrc.json");
        let json_str = serde_json::to_string_pretty(content)?;
        fs::write(&path, format!("{}\n", json_str))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

// ============================================================================
// Fixture Generators
// ============================================================================

pub const LOCALIZER_SOURCE: &str = r#"
export interface ILocalizer { get(literal: string): string; }
export class Localizer implements ILocalizer {
    get(literal: string) { return literal; }
}
export const localizer = new Localizer();
"#;

/// A project with one localization call and one plain literal
pub fn fixture_app() -> Result<McpTestFixture> {
    McpTestFixture::with_sources(vec![
        ("src/i18n.ts", LOCALIZER_SOURCE),
        (
            "src/app.ts",
            r#"
import { localizer } from "./i18n";
localizer.get("Save");
console.log("Loading");
"#,
        ),
    ])
}

/// A project with `count` distinct literals in one file
pub fn fixture_many_literals(count: usize) -> Result<McpTestFixture> {
    let source: String = (0..count)
        .map(|i| format!("alert(\"Message {:03}\");\n", i))
        .collect();
    McpTestFixture::with_sources(vec![("src/messages.ts", source.as_str())])
}

// ============================================================================
// Assertion Helpers
// ============================================================================

/// Assert pagination fields in an extract result
pub fn assert_pagination(
    result: &Value,
    expected_offset: usize,
    expected_limit: usize,
    expected_has_more: bool,
) {
    let pagination = &result["pagination"];
    assert_eq!(
        pagination["offset"].as_u64().unwrap(),
        expected_offset as u64,
        "Pagination offset mismatch"
    );
    assert_eq!(
        pagination["limit"].as_u64().unwrap(),
        expected_limit as u64,
        "Pagination limit mismatch"
    );
    assert_eq!(
        pagination["hasMore"].as_bool().unwrap(),
        expected_has_more,
        "Pagination hasMore mismatch"
    );
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let text_content = result.content[0]
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
