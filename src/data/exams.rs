//! Exam schedule fetching and publishing
//!
//! Exam listings are cached per classroom under `exams-<classroom_id>`.
//! Publishing an exam invalidates that classroom's listing so students
//! never see a cached unpublished state after the mutation.

use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::cache::DataCache;
use crate::data::backend::{BackendClient, BackendError};
use crate::data::Exam;

/// Backend collection holding exam documents
const EXAMS_COLLECTION: &str = "exams";

/// Cache TTL in minutes for exam listings
const EXAM_CACHE_TTL_MINUTES: i64 = 5;

/// Errors that can occur when working with exams
#[derive(Debug, Error)]
pub enum ExamError {
    /// The backend request failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Client for fetching exam schedules
#[derive(Debug, Clone)]
pub struct ExamClient {
    backend: BackendClient,
    cache: Option<DataCache>,
}

impl ExamClient {
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

    fn cache_ttl() -> chrono::Duration {
        chrono::Duration::minutes(EXAM_CACHE_TTL_MINUTES)
    }

    /// Generates the cache key for a classroom's exam listing
    fn exams_cache_key(classroom_id: &str) -> String {
        format!("exams-{}", classroom_id)
    }

    /// Fetches the exams scheduled for a classroom
    ///
    /// Serves a fresh cache entry if present; otherwise fetches from the
    /// backend and repopulates the cache, falling back to an expired entry
    /// when the backend is unreachable.
    pub async fn fetch_exams(&self, classroom_id: &str) -> Result<Vec<Exam>, ExamError> {
        let cache_key = Self::exams_cache_key(classroom_id);

        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Vec<Exam>>(&cache_key) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self
            .backend
            .list_documents_filtered::<Exam>(EXAMS_COLLECTION, "classroom_id", classroom_id)
            .await
        {
            Ok(exams) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(&cache_key, &exams, Self::cache_ttl());
                }
                Ok(exams)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Vec<Exam>>(&cache_key) {
                        debug!(classroom_id, "backend unavailable, serving stale exams");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Publishes an exam so students can see it
    ///
    /// Patches the backend record, then invalidates the classroom's exam
    /// listing (forced refresh on next read).
    pub async fn publish_exam(&self, classroom_id: &str, exam_id: &str) -> Result<Exam, ExamError> {
        let updated = self
            .backend
            .patch_document::<Exam>(EXAMS_COLLECTION, exam_id, &json!({ "published": true }))
            .await?;

        if let Some(ref cache) = self.cache {
            cache.invalidate(&Self::exams_cache_key(classroom_id));
        }

        Ok(updated)
    }
}
