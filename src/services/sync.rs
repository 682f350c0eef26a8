//! The episode synchronization engine: reconciles each followed show's
//! local state against the upstream feed and enriches what it finds.

use chrono::Local;
use thiserror::Error;
use tracing::{info, warn};

use crate::clients::imdb::{EpisodeFeed, FeedError};
use crate::clients::youtube::VideoSearch;
use crate::db::Store;
use crate::entities::{new_episode, show};
use crate::services::enrich::Enricher;
use crate::services::filter;

/// Errors that abort a single show's sync. Other shows are unaffected.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("store error: {0}")]
    Store(String),
}

impl From<anyhow::Error> for SyncError {
    fn from(err: anyhow::Error) -> Self {
        Self::Store(err.to_string())
    }
}

#[derive(Debug, Default)]
pub struct SyncStats {
    pub shows: i32,
    pub inserted: i32,
    pub failed_shows: i32,
}

pub struct SyncService<F, V> {
    store: Store,
    feed: F,
    enricher: Enricher<V>,
}

impl<F: EpisodeFeed, V: VideoSearch> SyncService<F, V> {
    #[must_use]
    pub const fn new(store: Store, feed: F, enricher: Enricher<V>) -> Self {
        Self {
            store,
            feed,
            enricher,
        }
    }

    /// Sync every show with notifications enabled. Shows are processed
    /// independently; one failure is logged and does not abort the rest.
    pub async fn sync_all(&self) -> Result<SyncStats, SyncError> {
        let shows = self.store.list_notify_enabled().await?;
        let mut stats = SyncStats::default();

        info!("Syncing {} followed shows...", shows.len());

        for show in &shows {
            stats.shows += 1;

            match self.sync_show(show).await {
                Ok(inserted) => {
                    stats.inserted += i32::try_from(inserted.len()).unwrap_or(i32::MAX);

                    if !inserted.is_empty() {
                        info!(
                            event = "show_synced",
                            show = %show.name,
                            inserted = inserted.len(),
                            "New episodes discovered"
                        );
                    }
                }
                Err(e) => {
                    stats.failed_shows += 1;
                    warn!("Sync failed for '{}': {}", show.name, e);
                }
            }
        }

        info!(
            event = "sync_finished",
            shows = stats.shows,
            inserted = stats.inserted,
            failed = stats.failed_shows,
            "Sync cycle completed"
        );

        Ok(stats)
    }

    /// Reconcile one show against the upstream feed, one page at a time.
    /// Every page commits atomically (new rows + counter + resume token),
    /// so a failure mid-walk leaves the state of the last good page and
    /// the next sync picks up from there.
    pub async fn sync_show(
        &self,
        show: &show::Model,
    ) -> Result<Vec<new_episode::Model>, SyncError> {
        let today = Local::now().date_naive();

        // A resumed walk continues numbering where the last one stopped.
        // A fresh walk renumbers the whole feed from zero and relies on
        // the reconcile floor to skip everything already known.
        let mut token = show.resume_token.clone();
        let mut counter = if token.is_some() { show.latest_episode } else { 0 };
        let mut latest = show.latest_episode;
        let mut inserted_all = Vec::new();

        loop {
            let page = self
                .feed
                .fetch_page(&show.external_id, token.as_deref())
                .await?;

            let outcome = filter::scan_released(&page.episodes, counter, today);
            counter = outcome.counter;

            let done = outcome.hit_future || page.next_page_token.is_none();

            // A continuation token is only persisted once numbering has
            // caught up with what earlier syncs assigned. Before that
            // point a crash restarts the rescan from page one, which is a
            // pure re-walk of already-known episodes.
            let caught_up = counter >= latest;
            let store_token = if done || !caught_up {
                None
            } else {
                page.next_page_token.clone()
            };

            let inserted = self
                .store
                .reconcile_page(show.id, &outcome.episodes, store_token.as_deref())
                .await?;
            latest = latest.max(counter);

            for row in &inserted {
                self.enrich_episode(&show.name, row).await;
            }
            inserted_all.extend(inserted);

            if done {
                break;
            }
            token = page.next_page_token;
        }

        Ok(inserted_all)
    }

    /// Enrichment is best-effort: a failed search must not lose the
    /// already-committed episode row.
    async fn enrich_episode(&self, show_name: &str, row: &new_episode::Model) {
        match self.enricher.enrich(show_name, row.number).await {
            Ok(Some(video)) => {
                if let Err(e) = self.store.set_video(row.id, &video).await {
                    warn!(
                        "Failed to store video for '{}' episode {}: {}",
                        show_name, row.number, e
                    );
                }
            }
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Video search failed for '{}' episode {}: {}",
                    show_name, row.number, e
                );
            }
        }
    }
}
