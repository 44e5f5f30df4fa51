//! Background data refresh system
//!
//! Keeps the classroom listing and the sign-video library warm by
//! re-fetching them on fixed intervals and overwriting the cached entries,
//! using tokio channels to communicate updates to the main application.

use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::cache::DataCache;
use crate::data::{Classroom, ClassroomClient, LibraryClient, SignVideo};

/// Messages sent from background refresh to the main app
#[derive(Debug, Clone)]
pub enum RefreshMessage {
    /// The classroom listing was re-fetched
    ClassroomsUpdated(Vec<Classroom>),
    /// The sign-video library was re-fetched
    SignVideosUpdated(Vec<SignVideo>),
    /// An error occurred during refresh
    RefreshError(String),
    /// A refresh cycle started
    RefreshStarted,
    /// A refresh cycle completed
    RefreshCompleted,
}

/// Configuration for refresh intervals
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Interval between classroom listing refreshes
    pub classroom_interval: Duration,
    /// Interval between sign-video library refreshes
    pub library_interval: Duration,
    /// Whether auto-refresh is enabled
    pub enabled: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            classroom_interval: Duration::from_secs(300),  // 5 minutes
            library_interval: Duration::from_secs(1800),   // 30 minutes
            enabled: true,
        }
    }
}

/// Handle for controlling the background refresh system
pub struct RefreshHandle {
    /// Channel for receiving refresh messages
    pub receiver: mpsc::Receiver<RefreshMessage>,
    /// Flag to signal shutdown
    shutdown_tx: mpsc::Sender<()>,
}

impl RefreshHandle {
    /// Spawns the background refresh task
    ///
    /// Each tick re-fetches the relevant collection through its client,
    /// which overwrites the cached entry whether or not it was still
    /// fresh, then purges entries whose TTL has elapsed. The first tick of
    /// each interval fires immediately and is skipped.
    ///
    /// # Arguments
    /// * `config` - Refresh intervals, and whether to refresh at all
    /// * `classrooms` - Client used to re-fetch the classroom listing
    /// * `library` - Client used to re-fetch the sign-video library
    /// * `cache` - The shared cache, for purging stale entries per cycle
    ///
    /// # Returns
    /// A RefreshHandle that receives updates via the `receiver` channel
    pub fn spawn(
        config: RefreshConfig,
        classrooms: ClassroomClient,
        library: LibraryClient,
        cache: Option<DataCache>,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel(32);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if config.enabled {
            let tx = msg_tx.clone();

            tokio::spawn(async move {
                let mut classroom_tick = tokio::time::interval(config.classroom_interval);
                let mut library_tick = tokio::time::interval(config.library_interval);
                // Skip the first ticks (immediate)
                classroom_tick.tick().await;
                library_tick.tick().await;

                loop {
                    tokio::select! {
                        _ = classroom_tick.tick() => {
                            let _ = tx.send(RefreshMessage::RefreshStarted).await;

                            match classrooms.refresh_classrooms().await {
                                Ok(listing) => {
                                    info!(count = listing.len(), "classroom listing refreshed");
                                    let _ = tx.send(RefreshMessage::ClassroomsUpdated(listing)).await;
                                }
                                Err(e) => {
                                    warn!(error = %e, "classroom refresh failed");
                                    let _ = tx.send(RefreshMessage::RefreshError(e.to_string())).await;
                                }
                            }

                            if let Some(ref cache) = cache {
                                let purged = cache.purge_expired();
                                if purged > 0 {
                                    debug!(purged, "purged expired cache entries");
                                }
                            }

                            let _ = tx.send(RefreshMessage::RefreshCompleted).await;
                        }
                        _ = library_tick.tick() => {
                            let _ = tx.send(RefreshMessage::RefreshStarted).await;

                            match library.refresh_sign_videos().await {
                                Ok(videos) => {
                                    info!(count = videos.len(), "sign-video library refreshed");
                                    let _ = tx.send(RefreshMessage::SignVideosUpdated(videos)).await;
                                }
                                Err(e) => {
                                    warn!(error = %e, "library refresh failed");
                                    let _ = tx.send(RefreshMessage::RefreshError(e.to_string())).await;
                                }
                            }

                            let _ = tx.send(RefreshMessage::RefreshCompleted).await;
                        }
                        _ = shutdown_rx.recv() => {
                            break;
                        }
                    }
                }
            });
        }

        Self {
            receiver: msg_rx,
            shutdown_tx,
        }
    }

    /// Shuts down the background refresh task
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// Checks for pending refresh messages without blocking
///
/// # Returns
/// * `Some(RefreshMessage)` if a message was available
/// * `None` if no messages are pending
pub fn try_recv(handle: &mut RefreshHandle) -> Option<RefreshMessage> {
    handle.receiver.try_recv().ok()
}
