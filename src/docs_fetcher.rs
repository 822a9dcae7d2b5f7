//! Fetching documentation pages and converting them to markdown.
//!
//! The pipeline is cache-first: a hit returns immediately, a miss passes the
//! rate limiter, performs the HTTP GET, carves the content subtree out of the
//! page, converts it to markdown and caches the result. Failed fetches cache
//! nothing.

use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

use crate::cache::{DocCache, TtlCache};
use crate::config::Config;
use crate::error::DocsError;
use crate::rate_limit::RateLimiter;
use crate::validate::Framework;

/// Selectors tried in order when locating the primary content subtree.
const CONTENT_SELECTORS: [&str; 4] = ["main", "[role=\"main\"]", ".content", "article"];

/// Structural chrome removed from the content subtree before conversion.
const STRIP_SELECTORS: [&str; 9] = [
    "nav",
    "header",
    "footer",
    ".sidebar",
    ".navigation",
    ".breadcrumb",
    "script",
    "style",
    "iframe",
];

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct DocContent {
    pub content: String,
}

/// Builds the canonical URL for a documentation page.
///
/// Pure and total: no I/O, no failure modes for well-formed inputs.
pub fn build_doc_url(base_url: &str, framework: Framework, path: &str, is_api: bool) -> String {
    let framework_segment = format!("{framework}-data-grid");

    if is_api {
        return format!("{base_url}/{framework_segment}/api/{path}/");
    }

    // Guide paths may already carry their full structure.
    if path.starts_with("guides/") || path.starts_with("api/") {
        let remainder = path.strip_prefix("guides/").unwrap_or(path);
        return format!("{base_url}/{framework_segment}/{remainder}");
    }

    format!("{base_url}/{framework_segment}/{path}/")
}

/// Fetches documentation pages and converts them to markdown.
///
/// Owns the HTTP client, the document cache and the rate limiter; one
/// instance is shared by every tool call.
pub struct DocsFetcher {
    client: Client,
    cache: Arc<dyn DocCache>,
    rate_limiter: RateLimiter,
    config: Config,
}

impl DocsFetcher {
    pub fn new(config: Config) -> Result<Self, DocsError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            cache: Arc::new(TtlCache::new(config.cache_ttl, config.max_cache_size)),
            rate_limiter: RateLimiter::new(config.rate_limit_delay),
            config,
        })
    }

    /// Replaces the default cache, keeping everything else.
    pub fn with_cache(mut self, cache: Arc<dyn DocCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Canonical URL for `topic` under the configured documentation root.
    pub fn doc_url(&self, framework: Framework, topic: &str, is_api: bool) -> String {
        build_doc_url(&self.config.base_url, framework, topic, is_api)
    }

    /// Fetches `url` and returns its content as markdown.
    ///
    /// Cache hits return without rate limiting or network I/O. Everything
    /// that fails past the URL check is logged and re-raised as a single
    /// wrapped fetch error.
    pub async fn fetch_and_convert(&self, url: &str) -> Result<String, DocsError> {
        if !url.starts_with(&self.config.base_url) {
            return Err(DocsError::InvalidInput(
                "Invalid URL: Must be from handsontable.com".to_string(),
            ));
        }

        if let Some(content) = self.cache.get(url).await {
            tracing::debug!(url = %url, "cache hit");
            return Ok(content);
        }

        self.rate_limiter.acquire().await;

        match self.fetch_fresh(url).await {
            Ok(markdown) => {
                self.cache.put(url.to_string(), markdown.clone()).await;
                tracing::info!(
                    url = %url,
                    content_length = markdown.len(),
                    "successfully fetched and cached"
                );
                Ok(markdown)
            }
            Err(err) => {
                tracing::error!(url = %url, error = %err, "failed to fetch documentation");
                Err(DocsError::Fetch(err.to_string()))
            }
        }
    }

    async fn fetch_fresh(&self, url: &str) -> Result<String, DocsError> {
        tracing::info!(url = %url, "fetching documentation");

        let target = Url::parse(url)?;
        let response = self.client.get(target).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(url = %url, status = status.as_u16(), "http error");
            return Err(DocsError::Http {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let html = response.text().await?;
        let content = extract_content(&html);
        convert_to_markdown(&content)
    }
}

/// Selects the primary content subtree and drops structural chrome from it.
///
/// Returns the inner HTML of whatever survives. Falls back to the document
/// body when no content selector matches.
fn extract_content(html: &str) -> String {
    let mut document = Html::parse_document(html);

    let root_id = {
        let picked = CONTENT_SELECTORS
            .into_iter()
            .filter_map(|raw| Selector::parse(raw).ok())
            .find_map(|selector| document.select(&selector).next().map(|element| element.id()));

        match picked {
            Some(id) => id,
            None => Selector::parse("body")
                .ok()
                .and_then(|selector| document.select(&selector).next())
                .map(|body| body.id())
                .unwrap_or_else(|| document.root_element().id()),
        }
    };

    let doomed: Vec<_> = match document.tree.get(root_id).and_then(ElementRef::wrap) {
        Some(root) => STRIP_SELECTORS
            .into_iter()
            .filter_map(|raw| Selector::parse(raw).ok())
            .flat_map(|selector| {
                root.select(&selector)
                    .map(|element| element.id())
                    .collect::<Vec<_>>()
            })
            .collect(),
        None => Vec::new(),
    };

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    document
        .tree
        .get(root_id)
        .and_then(ElementRef::wrap)
        .map(|root| root.inner_html())
        .unwrap_or_default()
}

/// Converts an HTML fragment to markdown with ATX headings and fenced code
/// blocks.
fn convert_to_markdown(html: &str) -> Result<String, DocsError> {
    use htmd::options::{CodeBlockStyle, HeadingStyle, Options};
    use htmd::HtmlToMarkdown;

    let converter = HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            ..Options::default()
        })
        .build();

    converter
        .convert(html)
        .map_err(|err| DocsError::Convert(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    const BASE: &str = "https://handsontable.com/docs";

    #[test]
    fn test_build_doc_url_for_guides() {
        assert_eq!(
            build_doc_url(BASE, Framework::React, "column-sorting", false),
            "https://handsontable.com/docs/react-data-grid/column-sorting/"
        );
    }

    #[test]
    fn test_build_doc_url_for_api_reference() {
        assert_eq!(
            build_doc_url(BASE, Framework::Javascript, "core", true),
            "https://handsontable.com/docs/javascript-data-grid/api/core/"
        );
    }

    #[test]
    fn test_build_doc_url_strips_leading_guides_prefix() {
        assert_eq!(
            build_doc_url(BASE, Framework::Javascript, "guides/getting-started/installation", false),
            "https://handsontable.com/docs/javascript-data-grid/getting-started/installation"
        );
    }

    #[test]
    fn test_build_doc_url_keeps_api_prefixed_paths() {
        assert_eq!(
            build_doc_url(BASE, Framework::Angular, "api/hooks", false),
            "https://handsontable.com/docs/angular-data-grid/api/hooks"
        );
    }

    #[test]
    fn test_extract_content_prefers_main_and_strips_chrome() {
        let html = r#"<!DOCTYPE html><html><body>
            <nav><a href="/">Top nav</a></nav>
            <main>
                <nav class="breadcrumb">Docs / Guides</nav>
                <div class="sidebar">Sidebar links</div>
                <h1>Column sorting</h1>
                <p>Sort data by one or multiple columns.</p>
                <script>var tracked = true;</script>
                <footer>Page footer</footer>
            </main>
            </body></html>"#;

        let content = extract_content(html);

        assert!(content.contains("Column sorting"));
        assert!(content.contains("Sort data by one or multiple columns."));
        assert!(!content.contains("Top nav"));
        assert!(!content.contains("Docs / Guides"));
        assert!(!content.contains("Sidebar links"));
        assert!(!content.contains("tracked"));
        assert!(!content.contains("Page footer"));
    }

    #[test]
    fn test_extract_content_falls_back_to_body() {
        let html = "<html><body><h1>Bare page</h1><p>No landmark elements.</p></body></html>";

        let content = extract_content(html);

        assert!(content.contains("Bare page"));
        assert!(content.contains("No landmark elements."));
    }

    #[test]
    fn test_extract_content_uses_role_main_when_present() {
        let html = r#"<html><body>
            <div role="main"><p>Role-main content</p></div>
            <footer>Outside</footer>
            </body></html>"#;

        let content = extract_content(html);

        assert!(content.contains("Role-main content"));
        assert!(!content.contains("Outside"));
    }

    #[test]
    fn test_convert_to_markdown_uses_atx_headings_and_fences() {
        let html = "<h1>Install</h1><p>Run this:</p><pre><code>npm install handsontable</code></pre>";

        let markdown = convert_to_markdown(html).unwrap();

        assert!(markdown.contains("# Install"));
        assert!(markdown.contains("```"));
        assert!(markdown.contains("npm install handsontable"));
    }

    fn fetcher_with_base_url(base_url: &str) -> DocsFetcher {
        let config = Config {
            base_url: base_url.to_string(),
            ..Config::default()
        };
        DocsFetcher::new(config).expect("failed to build HTTP client")
    }

    #[tokio::test]
    async fn test_fetch_and_convert_success() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/javascript-data-grid/installation/")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body("<html><body><main><h1>Installation</h1><p>Install the grid.</p></main></body></html>")
            .create_async()
            .await;

        let fetcher = fetcher_with_base_url(&server.url());
        let url = fetcher.doc_url(Framework::Javascript, "installation", false);

        let markdown = fetcher.fetch_and_convert(&url).await.unwrap();
        mock.assert_async().await;

        assert!(markdown.contains("# Installation"));
        assert!(markdown.contains("Install the grid."));
    }

    #[tokio::test]
    async fn test_fetch_and_convert_rejects_foreign_urls() {
        let fetcher = fetcher_with_base_url("http://127.0.0.1:9");

        let err = fetcher
            .fetch_and_convert("https://example.com/docs/page/")
            .await
            .unwrap_err();

        assert!(matches!(err, DocsError::InvalidInput(_)));
        assert_eq!(err.to_string(), "Invalid URL: Must be from handsontable.com");
    }

    #[tokio::test]
    async fn test_fetch_and_convert_surfaces_http_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/javascript-data-grid/api/missing/")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = fetcher_with_base_url(&server.url());
        let url = fetcher.doc_url(Framework::Javascript, "missing", true);

        let err = fetcher.fetch_and_convert(&url).await.unwrap_err();
        mock.assert_async().await;

        assert!(matches!(err, DocsError::Fetch(_)));
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("Not Found"));
    }

    #[tokio::test]
    async fn test_second_fetch_is_served_from_cache() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/react-data-grid/column-sorting/")
            .with_status(200)
            .with_body("<html><body><main><h1>Column sorting</h1></main></body></html>")
            .expect(1)
            .create_async()
            .await;

        let fetcher = fetcher_with_base_url(&server.url());
        let url = fetcher.doc_url(Framework::React, "column-sorting", false);

        let first = fetcher.fetch_and_convert(&url).await.unwrap();
        let second = fetcher.fetch_and_convert(&url).await.unwrap();

        mock.assert_async().await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_cached() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/javascript-data-grid/flaky/")
            .with_status(500)
            .expect(2)
            .create_async()
            .await;

        let fetcher = fetcher_with_base_url(&server.url());
        let url = fetcher.doc_url(Framework::Javascript, "flaky", false);

        assert!(fetcher.fetch_and_convert(&url).await.is_err());
        assert!(fetcher.fetch_and_convert(&url).await.is_err());

        mock.assert_async().await;
    }
}
