//! Thread-safe, compute-once cache for resolved schemas
//!
//! Fetching a schema document is expensive, and many histograms resolved in
//! parallel tend to share a revision. `SchemaCache` guarantees that concurrent
//! requests for the same key trigger at most one fetch.
//!
//! # Design
//!
//! Each entry is in one of two states:
//! - `Computing`: a thread is fetching this key, others wait on the condvar
//! - `Ready(Arc<V>)`: the value is available and shared by all callers
//!
//! Allowed transitions:
//! - `None` → `Computing` → `Ready(value)`
//! - `Computing` → `None` when the fetch fails or panics, so the next caller retries
//! - `Ready(value)` → `None` via eviction or `clear()`
//!
//! Only `Ready` entries are ever evicted. Waiters sleep on the same mutex that
//! guards the entries, so a completion can never be missed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use tracing::{debug, trace};

/// Cache eviction policy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CachePolicy {
    /// No caching, every request fetches
    NoCache,
    /// Least recently used eviction; `max_entries: 0` stores nothing
    Lru { max_entries: usize },
    /// Never evict, only add
    Unbounded,
}

enum CacheEntryState<V> {
    Computing,
    Ready(Arc<V>),
}

struct CacheStorage<K, V> {
    entries: HashMap<K, CacheEntryState<V>>,
    /// Last access time of each `Ready` entry
    access_order: HashMap<K, u64>,
    access_counter: u64,
}

impl<K: Hash + Eq + Clone, V> CacheStorage<K, V> {
    fn new() -> Self {
        Self {
            entries: HashMap::new(),
            access_order: HashMap::new(),
            access_counter: 0,
        }
    }

    fn touch(&mut self, key: K) {
        self.access_counter += 1;
        self.access_order.insert(key, self.access_counter);
    }

    fn ready_count(&self) -> usize {
        self.entries
            .values()
            .filter(|v| matches!(v, CacheEntryState::Ready(_)))
            .count()
    }

    fn evict_lru(&mut self) -> Option<K> {
        let key = self
            .access_order
            .iter()
            .min_by_key(|(_, time)| **time)
            .map(|(key, _)| key.clone())?;

        self.access_order.remove(&key);
        if matches!(self.entries.get(&key), Some(CacheEntryState::Ready(_))) {
            self.entries.remove(&key);
        }
        Some(key)
    }
}

/// Thread-safe cache with compute-once semantics
///
/// Clones share the same storage, so one cache can be injected into several
/// resolvers.
///
/// # Example
///
/// ```rust
/// use telemetry_schema::{CachePolicy, SchemaCache};
///
/// let cache = SchemaCache::<String, Vec<f64>>::new(CachePolicy::Lru { max_entries: 8 });
/// let value = cache
///     .get_or_try_compute("tip".to_string(), |_| Ok::<_, std::io::Error>(vec![0.0, 1.0]))
///     .unwrap();
/// assert_eq!(value.len(), 2);
/// assert_eq!(cache.stats().misses, 1);
/// ```
pub struct SchemaCache<K, V> {
    storage: Arc<Mutex<CacheStorage<K, V>>>,
    /// Signalled whenever a `Computing` entry is resolved or abandoned
    completed: Arc<Condvar>,
    policy: CachePolicy,
    hits: Arc<AtomicUsize>,
    misses: Arc<AtomicUsize>,
}

impl<K, V> SchemaCache<K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    /// Create a new cache with the specified policy
    pub fn new(policy: CachePolicy) -> Self {
        Self {
            storage: Arc::new(Mutex::new(CacheStorage::new())),
            completed: Arc::new(Condvar::new()),
            policy,
            hits: Arc::new(AtomicUsize::new(0)),
            misses: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Eviction policy of this cache
    pub fn policy(&self) -> &CachePolicy {
        &self.policy
    }

    /// Get a cached value or compute it if not present
    ///
    /// If several threads request the same key at once, only one runs
    /// `compute`; the others block until it finishes and receive the same
    /// `Arc`. A failed computation is not cached: its error goes to the caller
    /// that ran it, and waiting threads retry.
    pub fn get_or_try_compute<E, F>(&self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce(&K) -> Result<V, E>,
    {
        // An LRU that may hold nothing behaves like no cache at all
        if matches!(
            self.policy,
            CachePolicy::NoCache | CachePolicy::Lru { max_entries: 0 }
        ) {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return compute(&key).map(Arc::new);
        }

        let mut storage = self.lock();
        loop {
            let ready = match storage.entries.get(&key) {
                Some(CacheEntryState::Ready(value)) => Some(Arc::clone(value)),
                Some(CacheEntryState::Computing) => None,
                None => break,
            };

            match ready {
                Some(value) => {
                    storage.touch(key);
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Ok(value);
                }
                None => {
                    trace!(?key, "Waiting for in-flight computation");
                    storage = self
                        .completed
                        .wait(storage)
                        .unwrap_or_else(PoisonError::into_inner);
                }
            }
        }

        storage.entries.insert(key.clone(), CacheEntryState::Computing);
        drop(storage);
        self.misses.fetch_add(1, Ordering::Relaxed);

        // Clears the Computing marker if `compute` fails or unwinds
        let pending = PendingEntry {
            cache: self,
            key: Some(key.clone()),
        };
        let value = Arc::new(compute(&key)?);
        pending.complete(Arc::clone(&value));
        Ok(value)
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let entries = self.lock().ready_count();

        CacheStats {
            hits,
            misses,
            entries,
            hit_rate: if hits + misses > 0 {
                hits as f64 / (hits + misses) as f64
            } else {
                0.0
            },
        }
    }

    /// Clear all entries and reset statistics
    ///
    /// Threads waiting on an in-flight computation are woken and will fetch
    /// again themselves.
    pub fn clear(&self) {
        let mut storage = self.lock();
        storage.entries.clear();
        storage.access_order.clear();
        storage.access_counter = 0;
        drop(storage);

        self.completed.notify_all();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }

    fn lock(&self) -> MutexGuard<'_, CacheStorage<K, V>> {
        self.storage.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn store_ready(&self, key: K, value: Arc<V>) {
        let mut storage = self.lock();

        if let CachePolicy::Lru { max_entries } = self.policy {
            while storage.ready_count() >= max_entries {
                match storage.evict_lru() {
                    Some(evicted) => debug!(?evicted, "Evicted least recently used entry"),
                    None => break,
                }
            }
        }

        storage.entries.insert(key.clone(), CacheEntryState::Ready(value));
        storage.touch(key);
        drop(storage);
        self.completed.notify_all();
    }
}

impl<K, V> Clone for SchemaCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            completed: Arc::clone(&self.completed),
            policy: self.policy.clone(),
            hits: Arc::clone(&self.hits),
            misses: Arc::clone(&self.misses),
        }
    }
}

struct PendingEntry<'a, K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    cache: &'a SchemaCache<K, V>,
    key: Option<K>,
}

impl<K, V> PendingEntry<'_, K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    fn complete(mut self, value: Arc<V>) {
        if let Some(key) = self.key.take() {
            self.cache.store_ready(key, value);
        }
    }
}

impl<K, V> Drop for PendingEntry<'_, K, V>
where
    K: Hash + Eq + Clone + fmt::Debug,
{
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };

        let mut storage = self.cache.lock();
        if matches!(storage.entries.get(&key), Some(CacheEntryState::Computing)) {
            storage.entries.remove(&key);
        }
        drop(storage);

        debug!(?key, "Computation abandoned, entry released");
        self.cache.completed.notify_all();
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses
    pub misses: usize,
    /// Number of ready entries currently in cache
    pub entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}
