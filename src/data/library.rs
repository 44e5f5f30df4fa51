//! Content library: learning games, media galleries, sign-language videos
//!
//! Library content is curated and changes slowly, so it gets a longer TTL
//! than classroom data. The sign-video listing is cached once under a
//! single key; category views filter the cached listing client-side
//! instead of multiplying cache entries per category.

use thiserror::Error;
use tracing::debug;

use crate::cache::DataCache;
use crate::data::backend::{BackendClient, BackendError};
use crate::data::{Game, MediaItem, SignVideo};

/// Backend collection holding game documents
const GAMES_COLLECTION: &str = "games";

/// Backend collection holding gallery documents
const MEDIA_COLLECTION: &str = "media";

/// Backend collection holding sign-video documents
const SIGN_VIDEOS_COLLECTION: &str = "sign_videos";

/// Cache key for the game catalog
const GAMES_CACHE_KEY: &str = "games-all";

/// Cache key for the sign-video library
const SIGN_VIDEOS_CACHE_KEY: &str = "sign-videos-all";

/// Cache TTL in minutes for library content
const LIBRARY_CACHE_TTL_MINUTES: i64 = 30;

/// Errors that can occur when fetching library content
#[derive(Debug, Error)]
pub enum LibraryError {
    /// The backend request failed
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Client for the platform's content library
#[derive(Debug, Clone)]
pub struct LibraryClient {
    backend: BackendClient,
    cache: Option<DataCache>,
}

impl LibraryClient {
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
        chrono::Duration::minutes(LIBRARY_CACHE_TTL_MINUTES)
    }

    /// Generates the cache key for a classroom's gallery
    fn gallery_cache_key(classroom_id: &str) -> String {
        format!("gallery-{}", classroom_id)
    }

    /// Fetches the learning-game catalog
    pub async fn fetch_games(&self) -> Result<Vec<Game>, LibraryError> {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Vec<Game>>(GAMES_CACHE_KEY) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self.backend.list_documents::<Game>(GAMES_COLLECTION).await {
            Ok(games) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(GAMES_CACHE_KEY, &games, Self::cache_ttl());
                }
                Ok(games)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Vec<Game>>(GAMES_CACHE_KEY) {
                        debug!("backend unavailable, serving stale game catalog");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Fetches the media gallery for a classroom
    pub async fn fetch_gallery(&self, classroom_id: &str) -> Result<Vec<MediaItem>, LibraryError> {
        let cache_key = Self::gallery_cache_key(classroom_id);

        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Vec<MediaItem>>(&cache_key) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self
            .backend
            .list_documents_filtered::<MediaItem>(MEDIA_COLLECTION, "classroom_id", classroom_id)
            .await
        {
            Ok(items) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(&cache_key, &items, Self::cache_ttl());
                }
                Ok(items)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Vec<MediaItem>>(&cache_key) {
                        debug!(classroom_id, "backend unavailable, serving stale gallery");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Fetches the full sign-language video library
    pub async fn fetch_sign_videos(&self) -> Result<Vec<SignVideo>, LibraryError> {
        if let Some(ref cache) = self.cache {
            if let Some(cached) = cache.read::<Vec<SignVideo>>(SIGN_VIDEOS_CACHE_KEY) {
                if !cached.is_expired {
                    return Ok(cached.data);
                }
            }
        }

        match self
            .backend
            .list_documents::<SignVideo>(SIGN_VIDEOS_COLLECTION)
            .await
        {
            Ok(videos) => {
                if let Some(ref cache) = self.cache {
                    let _ = cache.write(SIGN_VIDEOS_CACHE_KEY, &videos, Self::cache_ttl());
                }
                Ok(videos)
            }
            Err(e) => {
                if let Some(ref cache) = self.cache {
                    if let Some(cached) = cache.read::<Vec<SignVideo>>(SIGN_VIDEOS_CACHE_KEY) {
                        debug!("backend unavailable, serving stale sign-video library");
                        return Ok(cached.data);
                    }
                }
                Err(e.into())
            }
        }
    }

    /// Fetches sign videos in one category
    ///
    /// Filters the cached full listing client-side; category views share
    /// the single `sign-videos-all` cache entry.
    pub async fn fetch_sign_videos_in_category(
        &self,
        category: &str,
    ) -> Result<Vec<SignVideo>, LibraryError> {
        let videos = self.fetch_sign_videos().await?;
        Ok(filter_by_category(videos, category))
    }

    /// Re-fetches the sign-video library, bypassing the freshness check
    ///
    /// Used by the background refresh loop; the result overwrites the
    /// cached listing regardless of its remaining TTL.
    pub async fn refresh_sign_videos(&self) -> Result<Vec<SignVideo>, LibraryError> {
        let videos = self
            .backend
            .list_documents::<SignVideo>(SIGN_VIDEOS_COLLECTION)
            .await?;

        if let Some(ref cache) = self.cache {
            let _ = cache.write(SIGN_VIDEOS_CACHE_KEY, &videos, Self::cache_ttl());
        }

        Ok(videos)
    }
}

/// Keeps only the videos whose category matches, case-insensitively
fn filter_by_category(videos: Vec<SignVideo>, category: &str) -> Vec<SignVideo> {
    let wanted = category.trim().to_lowercase();
    videos
        .into_iter()
        .filter(|v| v.category.to_lowercase() == wanted)
        .collect()
}
