//! In-memory TTL cache shared across data clients
//!
//! Provides a `DataCache` that stores type-erased JSON payloads with expiry
//! timestamps, so a collection fetched by one screen's client is still warm
//! when another client asks for it moments later.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use super::clock::{Clock, SystemClock};

/// A stored payload together with its expiry window
#[derive(Debug, Clone)]
struct CacheEntry {
    /// The cached payload, type-erased to JSON
    value: serde_json::Value,
    /// When the payload was cached
    cached_at: DateTime<Utc>,
    /// When the entry stops being fresh
    expires_at: DateTime<Utc>,
}

/// Result of reading from the cache, including metadata about freshness
///
/// Expired entries are still returned (with `is_expired = true`) so callers
/// can fall back to stale data when the backend is unavailable.
#[derive(Debug)]
pub struct CachedData<T> {
    /// The cached data
    pub data: T,
    /// When the data was originally cached
    pub cached_at: DateTime<Utc>,
    /// Whether the entry's TTL has elapsed
    pub is_expired: bool,
}

/// In-memory key/value cache with per-entry TTLs
///
/// One instance is created at startup and handed to every data client; the
/// handle is cheap to clone and all clones share the same map. Payloads are
/// stored as `serde_json::Value`, so the cache holds no knowledge of their
/// shape; consumers serialize on write and deserialize on read. The map is
/// never a source of truth: any entry may be dropped at any time and the
/// consumer falls back to the backend.
///
/// An entry whose expiry has passed is logically absent: [`contains`] and
/// [`get`] treat it as a miss even though it physically remains in the map
/// until overwritten or purged.
///
/// [`contains`]: DataCache::contains
/// [`get`]: DataCache::get
#[derive(Clone)]
pub struct DataCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Arc<dyn Clock>,
}

impl DataCache {
    /// Creates an empty cache backed by the system clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates an empty cache with a caller-provided clock
    ///
    /// Tests install a [`ManualClock`] here to simulate elapsed time
    /// without sleeping.
    ///
    /// [`ManualClock`]: super::clock::ManualClock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Returns true if a fresh entry exists for `key`
    ///
    /// Fresh means current time is strictly before the entry's expiry.
    /// Returns false for unknown keys and for expired keys. Never touches
    /// the map contents, so checking freshness has no observable effect.
    pub fn contains(&self, key: &str) -> bool {
        let entries = self.entries.read();
        match entries.get(key) {
            Some(entry) => self.clock.now() < entry.expires_at,
            None => false,
        }
    }

    /// Stores `data` under `key` with the given time-to-live
    ///
    /// Always overwrites any prior entry for the key; the new TTL alone
    /// governs expiry. A zero or negative TTL is valid: the entry is stored
    /// but is already stale, so [`contains`] reports false right away.
    ///
    /// The only possible failure is serializing the payload, and a failed
    /// write merely degrades to a cache miss, so callers typically ignore
    /// the result with `let _ =`.
    ///
    /// [`contains`]: DataCache::contains
    pub fn write<T: Serialize>(
        &self,
        key: &str,
        data: &T,
        ttl: Duration,
    ) -> Result<(), serde_json::Error> {
        let value = serde_json::to_value(data)?;
        let now = self.clock.now();
        let entry = CacheEntry {
            value,
            cached_at: now,
            expires_at: now + ttl,
        };

        debug!(key, ttl_ms = ttl.num_milliseconds(), "cache write");
        self.entries.write().insert(key.to_string(), entry);
        Ok(())
    }

    /// Reads the entry for `key`, expired or not
    ///
    /// Returns `None` if no entry exists or the stored payload does not
    /// deserialize into `T`. An expired entry comes back with
    /// `is_expired = true`, which fetch paths use to serve stale data when
    /// the backend is unreachable.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CachedData<T>> {
        let entries = self.entries.read();
        let entry = match entries.get(key) {
            Some(entry) => entry,
            None => {
                debug!(key, "cache miss");
                return None;
            }
        };

        let is_expired = self.clock.now() >= entry.expires_at;
        let data: T = serde_json::from_value(entry.value.clone()).ok()?;
        debug!(key, is_expired, "cache hit");

        Some(CachedData {
            data,
            cached_at: entry.cached_at,
            is_expired,
        })
    }

    /// Returns the fresh value for `key`, or `None`
    ///
    /// A stale or missing key is a plain miss, not an error; the caller
    /// falls back to the authoritative backend fetch.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let cached = self.read::<T>(key)?;
        if cached.is_expired {
            return None;
        }
        Some(cached.data)
    }

    /// Removes the entry for `key` outright
    ///
    /// Used after a mutation makes the remote record authoritative again;
    /// the next fetch goes to the backend regardless of remaining TTL.
    pub fn invalidate(&self, key: &str) {
        debug!(key, "cache invalidate");
        self.entries.write().remove(key);
    }

    /// Drops every entry
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Physically removes entries whose TTL has elapsed
    ///
    /// Purely a space reclamation; expired entries are already invisible to
    /// [`contains`] and [`get`]. Returns how many entries were removed.
    ///
    /// [`contains`]: DataCache::contains
    /// [`get`]: DataCache::get
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| now < entry.expires_at);
        before - entries.len()
    }

    /// Number of entries physically in the map, fresh or stale
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if the map holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for DataCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DataCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCache")
            .field("entries", &self.entries.read().len())
            .finish()
    }
}
