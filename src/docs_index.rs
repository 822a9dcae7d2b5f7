//! Static documentation structure and keyword search.
//!
//! The index is a precomputed snapshot of every known documentation path,
//! baked into the binary at compile time. It is loaded once at startup and
//! treated as read-only for the lifetime of the process; searching and
//! listing never touch the network.

use serde::Deserialize;

const EMBEDDED_INDEX: &str = include_str!("../docs-structure.json");

/// One browsable documentation category and its known pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub title: String,
    pub pages: Vec<String>,
    pub page_count: usize,
}

/// Precomputed index of known documentation endpoints, topics and categories.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocsIndex {
    pub api_endpoints: Vec<String>,
    pub guide_topics: Vec<String>,
    pub categories: Vec<Category>,
    pub frameworks: Vec<String>,
    pub total_urls: usize,
}

/// Keyword matches across the three index collections, in index order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub api_endpoints: Vec<String>,
    pub guide_topics: Vec<String>,
    pub categories: Vec<String>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.api_endpoints.len() + self.guide_topics.len() + self.categories.len()
    }
}

impl DocsIndex {
    /// Deserializes the index bundled with the binary.
    pub fn embedded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(EMBEDDED_INDEX)
    }

    /// Case-insensitive substring search over API endpoints, guide topics
    /// and category titles. Empty result vectors mean "no matches"; search
    /// never fails.
    pub fn search(&self, keyword: &str) -> SearchResults {
        let needle = keyword.trim().to_lowercase();

        SearchResults {
            api_endpoints: self
                .api_endpoints
                .iter()
                .filter(|endpoint| endpoint.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            guide_topics: self
                .guide_topics
                .iter()
                .filter(|topic| topic.to_lowercase().contains(&needle))
                .cloned()
                .collect(),
            categories: self
                .categories
                .iter()
                .filter(|category| category.title.to_lowercase().contains(&needle))
                .map(|category| category.title.clone())
                .collect(),
        }
    }
}
