//! Classroom and roster fetching
//!
//! Classroom metadata changes rarely compared to how often screens ask for
//! it, so every fetch goes through the shared TTL cache: fresh entries are
//! served directly, misses hit the backend and repopulate the cache, and a
//! stale entry is better than nothing when the backend is unreachable.

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::cache::DataCache;
use crate::data::backend::{BackendClient, BackendError};
use crate::data::{Classroom, Student};

/// Backend collection holding classroom documents
const CLASSROOMS_COLLECTION: &str = "classrooms";

/// Backend collection holding student documents
const STUDENTS_COLLECTION: &str = "students";

/// Cache key for the full classroom listing
const CLASSROOMS_CACHE_KEY: &str = "classrooms-all";

/// Cache TTL in minutes for classroom data
const CLASSROOM_CACHE_TTL_MINUTES: i64 = 5;

/// Errors that can occur when working with classrooms
#[derive(Debug, Error)]
pub enum ClassroomError {
    /// A classroom cannot be renamed to an empty name
    #[error("Classroom name must not be empty")]
    EmptyName,

    /// The backend request failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Client for fetching and mutating classroom data
///
/// Integrates with [`DataCache`] for 5-minute caching of classroom
/// metadata and rosters. Mutations invalidate the affected keys so the
/// next read returns to the backend.
#[derive(Debug, Clone)]
pub struct ClassroomClient {
    backend: BackendClient,
    cache: Option<DataCache>,
}

impl ClassroomClient {
    /// Creates a client without caching
    pub fn new(backend: BackendClient) -> Self {
        Self {
            backend,
            cache: None,
        }
    }

    /// Creates a client that consults the shared cache before fetching
    pub fn with_cache(backend: BackendClient, cache: DataCache) -> Self {
        Self {
            backend,
            cache: Some(cache),
        }
    }

    /// TTL applied to every classroom cache entry
    fn cache_ttl() -> chrono::Duration {
        chrono::Duration::minutes(CLASSROOM_CACHE_TTL_MINUTES)
    }

    /// Generates the cache key for a single classroom
    fn classroom_cache_key(id: &str) -> String {
        format!("classroom-{}", id)
    }

    /// Generates the cache key for a classroom's roster
    fn roster_cache_key(classroom_id: &str) -> String {
        format!("roster-{}", classroom_id)
    }

    /// Fetches all classrooms visible to the project
    ///
    /// # Behavior
    /// - Serves a fresh cache entry without touching the network
    /// - Otherwise fetches from the backend and repopulates the cache
    /// - On backend failure, falls back to an expired cache entry if one
    ///   exists
    pub async fn fetch_classrooms(&self) -> Result<Vec<Classroom>, ClassroomError> {
        // Check cache first
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Vec<Classroom>>(CLASSROOMS_CACHE_KEY) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self
            .backend
            .list_documents::<Classroom>(CLASSROOMS_COLLECTION)
            .await
        {
            Ok(classrooms) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(CLASSROOMS_CACHE_KEY, &classrooms, Self::cache_ttl());
                }
                Ok(classrooms)
            }
            Err(e) => {
                // Try to return cached data on failure (even if expired)
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Vec<Classroom>>(CLASSROOMS_CACHE_KEY) {
                        debug!("backend unavailable, serving stale classroom listing");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Fetches a single classroom by id
    pub async fn fetch_classroom(&self, id: &str) -> Result<Classroom, ClassroomError> {
        let cache_key = Self::classroom_cache_key(id);

        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Classroom>(&cache_key) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self
            .backend
            .get_document::<Classroom>(CLASSROOMS_COLLECTION, id)
            .await
        {
            Ok(classroom) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(&cache_key, &classroom, Self::cache_ttl());
                }
                Ok(classroom)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Classroom>(&cache_key) {
                        debug!(id, "backend unavailable, serving stale classroom");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Fetches the student roster for a classroom
    pub async fn fetch_roster(&self, classroom_id: &str) -> Result<Vec<Student>, ClassroomError> {
        let cache_key = Self::roster_cache_key(classroom_id);

        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Vec<Student>>(&cache_key) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self
            .backend
            .list_documents_filtered::<Student>(STUDENTS_COLLECTION, "classroom_id", classroom_id)
            .await
        {
            Ok(students) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(&cache_key, &students, Self::cache_ttl());
                }
                Ok(students)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Vec<Student>>(&cache_key) {
                        debug!(classroom_id, "backend unavailable, serving stale roster");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Renames a classroom
    ///
    /// Patches the backend record, then invalidates both the per-classroom
    /// entry and the listing so the next read reflects the change instead
    /// of a cached copy with the old name.
    pub async fn rename_classroom(
        &self,
        id: &str,
        name: &str,
    ) -> Result<Classroom, ClassroomError> {
        if name.trim().is_empty() {
            return Err(ClassroomError::EmptyName);
        }

        let updated = self
            .backend
            .patch_document::<Classroom>(CLASSROOMS_COLLECTION, id, &json!({ "name": name }))
            .await?;

        if let Some(ref cache) = self.cache {
            cache.invalidate(&Self::classroom_cache_key(id));
            cache.invalidate(CLASSROOMS_CACHE_KEY);
        }

        Ok(updated)
    }

    /// Re-fetches the classroom listing, bypassing the freshness check
    ///
    /// Used by the background refresh loop: the fetched listing overwrites
    /// whatever entry is currently cached, fresh or not.
    pub async fn refresh_classrooms(&self) -> Result<Vec<Classroom>, ClassroomError> {
        let classrooms = self
            .backend
            .list_documents::<Classroom>(CLASSROOMS_COLLECTION)
            .await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.write(CLASSROOMS_CACHE_KEY, &classrooms, Self::cache_ttl());
        }

        Ok(classrooms)
    }
}
