//! Handsontable documentation MCP service.
//!
//! This module exposes the documentation tools over MCP: fetching a page as
//! markdown, keyword search over the static index, and category listing.
//!
//! # Main Components
//!
//! - [`DocsService`]: MCP tool service owning the shared fetcher and index
//! - [`DocsFetcher`]: fetch-cache-convert pipeline
//! - [`DocsIndex`]: precomputed documentation structure
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use hdocs_mcp::config::Config;
//! use hdocs_mcp::docs_fetcher::DocsFetcher;
//! use hdocs_mcp::docs_index::DocsIndex;
//! use hdocs_mcp::mcp::DocsService;
//!
//! fn example() -> anyhow::Result<()> {
//!     let fetcher = Arc::new(DocsFetcher::new(Config::default())?);
//!     let index = Arc::new(DocsIndex::embedded()?);
//!     let service = DocsService::new(fetcher, index);
//!     Ok(())
//! }
//! ```

use rmcp::model::{
    Implementation, ListPromptsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities,
};
use rmcp::service::RequestContext;
use rmcp::{Error as McpError, RoleServer, ServerHandler, model::ServerInfo, tool};
use rmcp::{
    model::{Content, IntoContents},
    schemars,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::docs_fetcher::{DocContent, DocsFetcher};
use crate::docs_index::{DocsIndex, SearchResults};
use crate::error::DocsError;
use crate::validate;

/// Implements conversion from DocContent to MCP Contents.
impl IntoContents for DocContent {
    fn into_contents(self) -> Vec<Content> {
        vec![Content::text(self.content)]
    }
}

/// Every failure renders as an `Error: <message>` text payload in the
/// protocol's error arm.
impl IntoContents for DocsError {
    fn into_contents(self) -> Vec<Content> {
        vec![Content::text(format!("Error: {}", self))]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct GetDocParams {
    #[schemars(
        description = "The documentation topic (e.g. \"column-sorting\", \"filters\", \"installation\"). Use search_docs to find available topics."
    )]
    pub topic: String,

    #[schemars(description = "The framework version of the docs: javascript, react or angular (default: javascript)")]
    #[serde(default)]
    pub framework: Option<String>,

    #[schemars(description = "Whether this is a guide or API reference (default: guide)")]
    #[serde(default, rename = "type")]
    pub doc_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SearchDocsParams {
    #[schemars(description = "Keyword to search for (e.g. \"column\", \"filter\", \"sort\")")]
    pub keyword: String,
}

/// MCP service exposing the documentation tools.
///
/// The fetcher and the index are shared across every connection; cloning the
/// service clones only the handles.
#[derive(Clone)]
pub struct DocsService {
    fetcher: Arc<DocsFetcher>,
    index: Arc<DocsIndex>,
}

#[tool(tool_box)]
impl DocsService {
    pub fn new(fetcher: Arc<DocsFetcher>, index: Arc<DocsIndex>) -> Self {
        Self { fetcher, index }
    }

    #[tool(
        description = "Fetch Handsontable documentation for a specific topic and framework. Returns the documentation as markdown."
    )]
    async fn get_doc(
        &self,
        #[tool(aggr)] params: GetDocParams,
    ) -> Result<DocContent, DocsError> {
        let topic = validate::validate_topic(&params.topic)?;
        let framework = validate::validate_framework(params.framework.as_deref())?;
        let doc_type = validate::validate_doc_type(params.doc_type.as_deref())?;

        tracing::info!(topic = %topic, framework = %framework, doc_type = %doc_type, "get_doc request");

        let url = self.fetcher.doc_url(framework, &topic, doc_type.is_api());
        let markdown = self.fetcher.fetch_and_convert(&url).await?;

        Ok(DocContent {
            content: format!(
                "# Handsontable Documentation: {topic} ({framework})\n\nSource: {url}\n\n{markdown}"
            ),
        })
    }

    #[tool(
        description = "Search for Handsontable documentation topics by keyword. Returns matching API endpoints, guide topics, and categories."
    )]
    async fn search_docs(
        &self,
        #[tool(aggr)] params: SearchDocsParams,
    ) -> Result<DocContent, DocsError> {
        let keyword = validate::validate_keyword(&params.keyword)?;

        tracing::info!(keyword = %keyword, "search_docs request");

        let results = self.index.search(keyword);

        Ok(DocContent {
            content: render_search_report(keyword, &results),
        })
    }

    #[tool(
        description = "List all available documentation categories with their topics. Useful for browsing the documentation structure."
    )]
    async fn list_categories(&self) -> DocContent {
        tracing::info!("list_categories request");

        DocContent {
            content: render_category_listing(&self.index),
        }
    }
}

/// Number of sample pages shown per category in the listing.
const CATEGORY_PAGE_SAMPLE: usize = 5;

fn render_search_report(keyword: &str, results: &SearchResults) -> String {
    let total = results.total();
    let mut report = format!("# Search Results for \"{keyword}\"\n\nFound {total} matches:\n\n");

    if !results.api_endpoints.is_empty() {
        report.push_str(&format!(
            "## API Endpoints ({})\n",
            results.api_endpoints.len()
        ));
        for endpoint in &results.api_endpoints {
            report.push_str(&format!("- {endpoint}\n"));
        }
        report.push('\n');
    }

    if !results.guide_topics.is_empty() {
        report.push_str(&format!("## Guide Topics ({})\n", results.guide_topics.len()));
        for topic in &results.guide_topics {
            report.push_str(&format!("- {topic}\n"));
        }
        report.push('\n');
    }

    if !results.categories.is_empty() {
        report.push_str(&format!("## Categories ({})\n", results.categories.len()));
        for category in &results.categories {
            report.push_str(&format!("- {category}\n"));
        }
        report.push('\n');
    }

    if total == 0 {
        report.push_str(
            "No matches found. Try different keywords or use list_categories to browse all topics.\n",
        );
    }

    report
}

fn render_category_listing(index: &DocsIndex) -> String {
    let mut listing = String::from("# Handsontable Documentation Categories\n\n");
    listing.push_str(&format!(
        "Total: {} categories, {} pages\n\n",
        index.categories.len(),
        index.total_urls
    ));

    for category in &index.categories {
        listing.push_str(&format!(
            "## {} ({} pages)\n",
            category.title, category.page_count
        ));
        for page in category.pages.iter().take(CATEGORY_PAGE_SAMPLE) {
            let topic_name = page.rsplit('/').next().unwrap_or(page);
            listing.push_str(&format!("- {topic_name}\n"));
        }
        if category.pages.len() > CATEGORY_PAGE_SAMPLE {
            listing.push_str(&format!(
                "- ... and {} more\n",
                category.pages.len() - CATEGORY_PAGE_SAMPLE
            ));
        }
        listing.push('\n');
    }

    listing.push_str("\n## Frameworks Available\n");
    for framework in &index.frameworks {
        listing.push_str(&format!("- {framework}\n"));
    }

    listing
}

#[tool(tool_box)]
impl ServerHandler for DocsService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder()
                .enable_tools() // We only need tools capability
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "This server provides access to Handsontable documentation. \
                Use the 'get_doc' tool to fetch a documentation page as markdown, \
                specifying the topic, the framework (javascript, react, angular) \
                and whether you want a guide or the API reference. Use \
                'search_docs' to find topics by keyword and 'list_categories' to \
                browse the documentation structure. Fetched pages are cached for \
                better performance."
                    .to_string(),
            ),
        }
    }

    async fn list_prompts(
        &self,
        _request: PaginatedRequestParam,
        _: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        // We don't use prompts in this implementation
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: vec![],
        })
    }
}
