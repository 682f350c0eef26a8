use crate::entities::{new_episode, show};
use crate::models::episode::{PendingEpisode, VideoMatch};
use crate::models::show::{NewShow, ShowChanges};
use anyhow::Result;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

/// Handle to the sqlite store. Cheap to clone; owns the connection pool.
#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    fn show_repo(&self) -> repositories::show::ShowRepository {
        repositories::show::ShowRepository::new(self.conn.clone())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    pub async fn add_show(&self, new_show: &NewShow) -> Result<show::Model> {
        self.show_repo().add(new_show).await
    }

    pub async fn get_show(&self, id: i32) -> Result<Option<show::Model>> {
        self.show_repo().get(id).await
    }

    pub async fn get_show_by_name(&self, name: &str) -> Result<Option<show::Model>> {
        self.show_repo().get_by_name(name).await
    }

    pub async fn list_shows(&self) -> Result<Vec<show::Model>> {
        self.show_repo().list_all().await
    }

    pub async fn list_notify_enabled(&self) -> Result<Vec<show::Model>> {
        self.show_repo().list_notify_enabled().await
    }

    pub async fn update_show(&self, id: i32, changes: &ShowChanges) -> Result<()> {
        self.show_repo().update_fields(id, changes).await
    }

    pub async fn remove_show(&self, name: &str) -> Result<bool> {
        self.show_repo().remove_by_name(name).await
    }

    pub async fn reconcile_page(
        &self,
        show_id: i32,
        episodes: &[PendingEpisode],
        resume_token: Option<&str>,
    ) -> Result<Vec<new_episode::Model>> {
        self.episode_repo()
            .reconcile_page(show_id, episodes, resume_token)
            .await
    }

    pub async fn prune_through(&self, show_id: i32, number: i32) -> Result<u64> {
        self.episode_repo().prune_through(show_id, number).await
    }

    pub async fn set_video(&self, episode_id: i32, video: &VideoMatch) -> Result<()> {
        self.episode_repo().set_video(episode_id, video).await
    }

    pub async fn pending_for_show(&self, show_id: i32) -> Result<Vec<new_episode::Model>> {
        self.episode_repo().pending_for_show(show_id).await
    }
}
