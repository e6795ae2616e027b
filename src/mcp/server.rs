use std::path::{Path, PathBuf};

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;
use tracing::info;

use crate::{
    config::{Config, load_config},
    core::{ExtractContext, Language, context::resolve_under_root},
    issues::Issue,
    runtime::{LazyLocalizationLoader, LoadError, Localize, LocalizationLoader, Localizer},
};

use super::types::{
    ConfigDto, ConfigValues, ExtractLiteralsParams, ExtractLiteralsResult, GetConfigParams,
    IssueItem, KeyItem, LanguageItem, LookupTranslationParams, LookupTranslationResult,
    Pagination, SynthesizeResourcesParams, SynthesizeResourcesResult, TranslationItem,
};

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

fn load_project_config(root: &Path) -> Result<Config, McpError> {
    load_config(root)
        .map(|r| r.config)
        .map_err(|e| McpError::internal_error(format!("Failed to load config: {:#}", e), None))
}

fn open_context(root: &Path, config: Config) -> Result<ExtractContext, McpError> {
    ExtractContext::new(root, config)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))
}

#[derive(Clone)]
pub struct StrlocMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for StrlocMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl StrlocMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the current strloc configuration
    #[tool(description = "Get the current strloc configuration.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let path = Path::new(&params.0.project_root_path);

        let result = load_config(path).map_err(|e| {
            McpError::internal_error(format!("Failed to load config: {:#}", e), None)
        })?;

        json_result(&ConfigDto {
            from_file: result.from_file,
            config: ConfigValues::from(result.config),
        })
    }

    /// Dry-run extraction: keys and the per-language plan
    #[tool(
        description = "Extract string literals without writing anything. Returns a paginated list of keys, filter statistics, the resource file each language would get, and any issues."
    )]
    pub async fn extract_literals(
        &self,
        params: Parameters<ExtractLiteralsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = PathBuf::from(&params.project_root_path);
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let mut config = load_project_config(&root)?;
        if let Some(localized_only) = params.localized_only {
            config.localized_only = localized_only;
        }
        let ctx = open_context(&root, config)?;

        let corpus = ctx.corpus();
        let plan = ctx.synthesize(true);

        let mut issues = ctx.issues();
        issues.extend(plan.errors.into_iter().map(Issue::ResourceError));
        issues.sort();

        let items: Vec<KeyItem> = corpus
            .entries()
            .iter()
            .skip(offset)
            .take(limit)
            .map(KeyItem::from)
            .collect();
        let has_more = offset + items.len() < corpus.len();

        json_result(&ExtractLiteralsResult {
            source_file_count: ctx.files.len(),
            total_count: corpus.len(),
            localized_count: corpus
                .entries()
                .iter()
                .filter(|e| e.is_localization_call)
                .count(),
            stats: ctx.corpus_stats().into(),
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
            languages: plan.outcomes.iter().map(LanguageItem::from).collect(),
            issues: issues.iter().map(IssueItem::from).collect(),
        })
    }

    /// Write resource files
    #[tool(
        description = "Extract string literals and write one resource file per target language. Existing translations are kept; keys no longer found in the code are removed."
    )]
    pub async fn synthesize_resources(
        &self,
        params: Parameters<SynthesizeResourcesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = PathBuf::from(&params.project_root_path);

        let mut config = load_project_config(&root)?;
        if let Some(include) = params.include_languages {
            config.include_languages = include;
        }
        if let Some(exclude) = params.exclude_languages {
            config.exclude_languages = exclude;
        }
        let ctx = open_context(&root, config)?;

        let report = ctx.synthesize(false);
        let success = !report.has_errors();

        let mut issues = ctx.issues();
        issues.extend(report.errors.into_iter().map(Issue::ResourceError));
        issues.sort();

        info!(
            "MCP synthesize: {} language(s) written, {} issue(s)",
            report.outcomes.len(),
            issues.len()
        );

        json_result(&SynthesizeResourcesResult {
            success,
            key_count: ctx.corpus().len(),
            written: report.outcomes.iter().map(LanguageItem::from).collect(),
            issues: issues.iter().map(IssueItem::from).collect(),
        })
    }

    /// Look up translations
    #[tool(
        description = "Look up translations of original texts in a language's resource file. Untranslated or unknown keys return the key itself."
    )]
    pub async fn lookup_translation(
        &self,
        params: Parameters<LookupTranslationParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let root = PathBuf::from(&params.project_root_path);

        let language: Language = params
            .language
            .parse()
            .map_err(|e| McpError::invalid_params(format!("{}", e), None))?;

        let config = load_project_config(&root)?;
        let loader = LazyLocalizationLoader::new(
            resolve_under_root(&root, Path::new(&config.output_dir)),
            config.file_name,
        );
        let file_path = loader.path_for(language).to_string_lossy().to_string();
        let load_error = |e: LoadError| McpError::internal_error(e.to_string(), None);
        // The same cached map backs both the lookup and the `translated` flag.
        let map = loader.load(language).map_err(load_error)?;
        let localizer = Localizer::with_language(loader, language);

        let translations = params
            .keys
            .into_iter()
            .map(|key| {
                let value = localizer.get(&key)?;
                Ok(TranslationItem {
                    translated: map.get(&key).is_some_and(|v| !v.is_empty()),
                    key,
                    value,
                })
            })
            .collect::<Result<Vec<_>, LoadError>>()
            .map_err(load_error)?;

        json_result(&LookupTranslationResult {
            language: language.code().to_string(),
            file_path,
            translations,
        })
    }
}

#[tool_handler]
impl ServerHandler for StrlocMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "strloc MCP extracts user-facing string literals from TypeScript/JavaScript projects into per-language JSON resource files.\n\n\
                 Available tools:\n\
                 1. get_config - Get project configuration\n\
                 2. extract_literals - Preview the keys and the files that would be written (no writes)\n\
                 3. synthesize_resources - Write the resource files\n\
                 4. lookup_translation - Look up translations in a written resource file\n\n\
                 Recommended Workflow:\n\
                 1. Use extract_literals to review the keys and any issues\n\
                 2. Adjust ignoreTexts / ignorePatterns / minLength in .strlocrc.json if needed\n\
                 3. Run synthesize_resources\n\
                 4. Fill in the empty translations, then verify with lookup_translation"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            info!("Starting MCP server on stdio");
            let service = StrlocMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
