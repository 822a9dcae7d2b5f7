use std::time::Duration;

/// Tunables for the fetch pipeline.
///
/// Defaults match the production documentation site: pages are cached for an
/// hour, at most 100 at a time, with outbound requests spaced 100ms apart.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root under which every fetchable page must live.
    pub base_url: String,
    /// How long a cached page stays servable.
    pub cache_ttl: Duration,
    /// Maximum number of cached pages.
    pub max_cache_size: usize,
    /// Minimum spacing between outbound requests.
    pub rate_limit_delay: Duration,
    /// Per-request timeout on the HTTP client.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://handsontable.com/docs".to_string(),
            cache_ttl: Duration::from_secs(60 * 60),
            max_cache_size: 100,
            rate_limit_delay: Duration::from_millis(100),
            request_timeout: Duration::from_secs(30),
        }
    }
}
