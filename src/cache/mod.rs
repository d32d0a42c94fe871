//! Route cache and revalidation
//!
//! Rendered list responses are cached per route path and normalized query.
//! A successful mutation calls [`Revalidator::invalidate`] on the route it
//! affected; the next read of that route recomputes from the store.
//!
//! ```text
//! create/update/delete ──▶ Revalidator::invalidate("/dashboard/invoices")
//!                                   │
//! GET /dashboard/invoices ──▶ RouteCache::get ── miss ──▶ store ──▶ RouteCache::put
//! ```

use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;

/// Cached responses kept per route unless configured otherwise
pub const DEFAULT_MAX_ENTRIES: usize = 256;

/// Marks cached data for a route as stale
pub trait Revalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

#[derive(Debug, Default)]
struct RouteEntry {
    /// Bumped on every invalidation of the route
    generation: u64,
    pages: HashMap<String, Value>,
}

/// In-process cache of rendered route responses
///
/// Writers capture [`RouteCache::generation`] before reading the store and
/// hand it back to [`RouteCache::put`]; a put whose generation is older than
/// the route's current one is dropped, so a response computed before an
/// invalidation is never cached after it.
///
/// Keys carry user-chosen search text, so each route holds at most
/// `max_entries` responses. Once full, new keys are served uncached until
/// the next invalidation empties the route.
#[derive(Debug)]
pub struct RouteCache {
    routes: RwLock<HashMap<String, RouteEntry>>,
    max_entries: usize,
}

impl Default for RouteCache {
    fn default() -> Self {
        Self::with_limit(DEFAULT_MAX_ENTRIES)
    }
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache holding at most `max_entries` responses per route
    pub fn with_limit(max_entries: usize) -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            max_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Cached response for `path` under `key`
    pub fn get(&self, path: &str, key: &str) -> Option<Value> {
        let routes = self.routes.read().ok()?;
        routes.get(path)?.pages.get(key).cloned()
    }

    /// Current generation of `path`
    pub fn generation(&self, path: &str) -> u64 {
        self.routes
            .read()
            .ok()
            .and_then(|routes| routes.get(path).map(|entry| entry.generation))
            .unwrap_or_default()
    }

    /// Store a response computed at `generation`
    ///
    /// Returns whether the response was kept. A new key is refused once the
    /// route is full; an existing key is always refreshed.
    pub fn put(&self, path: &str, generation: u64, key: impl Into<String>, value: Value) -> bool {
        let Ok(mut routes) = self.routes.write() else {
            return false;
        };
        let entry = routes.entry(path.to_string()).or_default();
        if entry.generation != generation {
            return false;
        }
        let key = key.into();
        if !entry.pages.contains_key(&key) && entry.pages.len() >= self.max_entries {
            tracing::trace!(path, key = %key, "route cache full");
            return false;
        }
        entry.pages.insert(key, value);
        true
    }

    /// Number of cached responses for `path`
    pub fn cached_count(&self, path: &str) -> usize {
        self.routes
            .read()
            .ok()
            .and_then(|routes| routes.get(path).map(|entry| entry.pages.len()))
            .unwrap_or_default()
    }
}

impl Revalidator for RouteCache {
    fn invalidate(&self, path: &str) {
        let Ok(mut routes) = self.routes.write() else {
            return;
        };
        let entry = routes.entry(path.to_string()).or_default();
        let dropped = entry.pages.len();
        entry.pages.clear();
        entry.generation += 1;
        tracing::debug!(path, dropped, generation = entry.generation, "route revalidated");
    }
}
