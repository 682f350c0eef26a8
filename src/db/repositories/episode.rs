use crate::entities::{new_episode, prelude::*};
use crate::models::episode::{PendingEpisode, VideoKind, VideoMatch};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

/// Repository for the per-show episode delta produced by sync.
pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Commit one page worth of sync results atomically: insert every
    /// emitted episode whose number exceeds both `last_watched` and the
    /// `latest_episode` persisted before this page, advance
    /// `latest_episode` (it never decreases), and store the page's
    /// continuation token. A crash therefore never leaves the resume
    /// token pointing past unpersisted episodes.
    pub async fn reconcile_page(
        &self,
        show_id: i32,
        episodes: &[PendingEpisode],
        resume_token: Option<&str>,
    ) -> anyhow::Result<Vec<new_episode::Model>> {
        let txn = self.conn.begin().await?;

        let Some(show) = Show::find_by_id(show_id).one(&txn).await? else {
            anyhow::bail!("Show with ID {show_id} no longer exists");
        };

        let floor = show.last_watched.max(show.latest_episode);

        let mut inserted = Vec::new();
        for episode in episodes {
            if episode.number <= floor {
                continue;
            }

            let row = new_episode::ActiveModel {
                show_id: Set(show_id),
                number: Set(episode.number),
                title: Set(episode.title.clone()),
                plot: Set(episode.plot.clone()),
                rating: Set(episode.rating),
                has_trailer: Set(false),
                has_related_video: Set(false),
                video_link: Set(None),
                video_title: Set(None),
                ..Default::default()
            };

            let result = NewEpisode::insert(row).exec(&txn).await?;
            inserted.push(new_episode::Model {
                id: result.last_insert_id,
                show_id,
                number: episode.number,
                title: episode.title.clone(),
                plot: episode.plot.clone(),
                rating: episode.rating,
                has_trailer: false,
                has_related_video: false,
                video_link: None,
                video_title: None,
            });
        }

        let latest = episodes
            .iter()
            .map(|e| e.number)
            .max()
            .map_or(show.latest_episode, |n| n.max(show.latest_episode));

        let mut update = show.into_active_model();
        update.latest_episode = Set(latest);
        update.resume_token = Set(resume_token.map(str::to_string));
        update.update(&txn).await?;

        txn.commit().await?;

        Ok(inserted)
    }

    /// Delete every episode row with `number <= number` for the show.
    /// Used when the user advances their watched count.
    pub async fn prune_through(&self, show_id: i32, number: i32) -> anyhow::Result<u64> {
        let result = NewEpisode::delete_many()
            .filter(new_episode::Column::ShowId.eq(show_id))
            .filter(new_episode::Column::Number.lte(number))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected)
    }

    /// Record an enrichment result on one episode row. The two
    /// classification flags stay mutually exclusive.
    pub async fn set_video(&self, episode_id: i32, video: &VideoMatch) -> anyhow::Result<()> {
        let Some(row) = NewEpisode::find_by_id(episode_id).one(&self.conn).await? else {
            anyhow::bail!("Episode with ID {episode_id} no longer exists");
        };

        let mut update = row.into_active_model();
        match video.kind {
            VideoKind::Trailer => {
                update.has_trailer = Set(true);
                update.has_related_video = Set(false);
            }
            VideoKind::Related => {
                update.has_trailer = Set(false);
                update.has_related_video = Set(true);
            }
        }
        update.video_link = Set(Some(video.link.clone()));
        update.video_title = Set(Some(video.title.clone()));

        update.update(&self.conn).await?;
        Ok(())
    }

    pub async fn pending_for_show(&self, show_id: i32) -> anyhow::Result<Vec<new_episode::Model>> {
        Ok(NewEpisode::find()
            .filter(new_episode::Column::ShowId.eq(show_id))
            .order_by_asc(new_episode::Column::Number)
            .all(&self.conn)
            .await?)
    }
}
