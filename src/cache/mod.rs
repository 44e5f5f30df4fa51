//! Session-scoped TTL cache for backend data
//!
//! This module provides the in-memory cache every data client consults
//! before issuing a network fetch. Entries carry an expiry timestamp; a key
//! whose TTL has elapsed is logically absent even while it physically
//! remains in the map. Expired entries are still readable through
//! [`DataCache::read`] with an `is_expired` flag, letting fetch paths fall
//! back to stale data when the backend is unavailable.

mod clock;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{CachedData, DataCache};
