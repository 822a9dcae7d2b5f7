use anyhow::Result;
use rmcp::ServiceExt;
use rmcp::transport::sse_server::SseServer;
use rmcp::transport::stdio;
use std::sync::Arc;
use tracing_subscriber::{self, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::docs_fetcher::DocsFetcher;
use crate::docs_index::DocsIndex;
use crate::mcp::DocsService;

fn build_service() -> Result<DocsService> {
    let fetcher = Arc::new(DocsFetcher::new(Config::default())?);
    let index = Arc::new(DocsIndex::embedded()?);
    Ok(DocsService::new(fetcher, index))
}

// start sse server
pub async fn start_sse_server(addr: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service = build_service()?;
    let ct = SseServer::serve(addr.parse()?)
        .await?
        .with_service(move || service.clone());

    tokio::signal::ctrl_c().await?;
    ct.cancel();
    Ok(())
}

// start stdio server
pub async fn start_stdio_server() -> Result<()> {
    // Log to stderr so stdout stays protocol-only
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::DEBUG.into()),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting Handsontable docs MCP server");

    let service = build_service()?.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    service.waiting().await?;
    Ok(())
}
