use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Trait for a document cache implementation.
#[async_trait]
pub trait DocCache: Send + Sync {
    /// Returns the cached content for `url` if present and not expired.
    async fn get(&self, url: &str) -> Option<String>;
    /// Stores `content` under `url`, evicting the oldest entry at capacity.
    async fn put(&self, url: String, content: String);
    async fn len(&self) -> usize;
    async fn clear(&self);
}

#[derive(Debug, Clone)]
struct CacheEntry {
    content: String,
    stored_at: Instant,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    // Keys in insertion order. Reads and overwrites never touch this, so
    // eviction stays strictly FIFO regardless of access pattern.
    order: VecDeque<String>,
}

/// Bounded in-memory cache with per-entry TTL and FIFO eviction.
///
/// An expired entry reports a miss but stays in place until it is overwritten
/// or its slot is evicted; callers cannot distinguish "absent" from
/// "expired".
#[derive(Debug, Clone)]
pub struct TtlCache {
    state: Arc<RwLock<CacheState>>,
    ttl: Duration,
    max_entries: usize,
}

impl TtlCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            state: Arc::new(RwLock::new(CacheState::default())),
            ttl,
            max_entries,
        }
    }
}

#[async_trait]
impl DocCache for TtlCache {
    async fn get(&self, url: &str) -> Option<String> {
        let state = self.state.read().await;
        let entry = state.entries.get(url)?;

        if entry.stored_at.elapsed() < self.ttl {
            Some(entry.content.clone())
        } else {
            None
        }
    }

    async fn put(&self, url: String, content: String) {
        let mut state = self.state.write().await;

        if state.entries.len() >= self.max_entries {
            if let Some(oldest) = state.order.pop_front() {
                state.entries.remove(&oldest);
                tracing::debug!(evicted = %oldest, "cache eviction");
            }
        }

        let entry = CacheEntry {
            content,
            stored_at: Instant::now(),
        };

        // An overwrite keeps the key's original insertion slot; only a key
        // new to the map joins the back of the eviction queue.
        if state.entries.insert(url.clone(), entry).is_none() {
            state.order.push_back(url);
        }
    }

    async fn len(&self) -> usize {
        self.state.read().await.entries.len()
    }

    async fn clear(&self) {
        let mut state = self.state.write().await;
        state.entries.clear();
        state.order.clear();
    }
}
