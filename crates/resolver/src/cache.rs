//! Process-lifetime memoization of resolved endpoints.

use chainrpc_primitives::{Environment, ResolvedEndpoint, Transport};
use chainrpc_registry::{DefaultHashBuilder, HashMap};
use parking_lot::RwLock;

/// Identifies one resolution.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct CacheKey {
    /// The resolved chain.
    pub chain_id: u64,
    /// The calling client.
    pub client_id: String,
    /// The deployment environment.
    pub environment: Environment,
    /// The requested transport.
    pub transport: Transport,
}

/// A map from [CacheKey] to [ResolvedEndpoint] shared across threads.
///
/// Entries never expire and are never evicted: the registry they are derived from is immutable,
/// and the key space is bounded by the number of chains times the number of distinct clients.
/// Concurrent misses on the same key compute the same value, so a lost race only costs a
/// redundant resolution.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<CacheKey, ResolvedEndpoint, DefaultHashBuilder>>,
}

impl ResolutionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached endpoint for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<ResolvedEndpoint> {
        self.entries.read().get(key).cloned()
    }

    /// Stores `value` under `key`, overwriting any previous entry.
    pub fn put(&self, key: CacheKey, value: ResolvedEndpoint) {
        self.entries.write().insert(key, value);
    }

    /// Returns the number of cached endpoints.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
