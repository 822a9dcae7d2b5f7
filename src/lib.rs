//! Handsontable Documentation MCP Service
//!
//! This crate provides a Model Context Protocol (MCP) service for fetching
//! Handsontable documentation from handsontable.com. Pages are stripped of
//! navigation chrome, converted to markdown and cached; a precomputed index
//! of known documentation paths backs keyword search and category browsing.
//!
//! # Features
//!
//! - Fetch documentation pages and convert them to markdown
//! - Bounded, time-expiring document cache with FIFO eviction
//! - Minimum-interval rate limiting of outbound requests
//! - Keyword search and category listing over a static index
//! - MCP server implementation over SSE or stdio transports
//!
//! # Modules
//!
//! - [`cache`]: bounded TTL cache for fetched documents
//! - [`config`]: tunables for the fetch pipeline
//! - [`docs_fetcher`]: URL construction and the fetch-convert pipeline
//! - [`docs_index`]: static documentation structure and search
//! - [`error`]: error taxonomy shared across the crate
//! - [`mcp`]: MCP server implementation and tool handling
//! - [`rate_limit`]: outbound request spacing
//! - [`server`]: transport startup
//! - [`validate`]: parameter validation and sanitization

pub mod cache;
pub mod config;
pub mod docs_fetcher;
pub mod docs_index;
pub mod error;
pub mod mcp;
pub mod rate_limit;
pub mod server;
pub mod validate;
