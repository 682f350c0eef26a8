use crate::entities::{prelude::*, show};
use crate::models::show::{NewShow, ShowChanges};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

pub struct ShowRepository {
    conn: DatabaseConnection,
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Insert a new show. Unique violations on `name` or `external_id`
    /// surface as errors to the caller.
    pub async fn add(&self, new_show: &NewShow) -> anyhow::Result<show::Model> {
        let active_model = show::ActiveModel {
            external_id: Set(new_show.external_id.clone()),
            name: Set(new_show.name.clone()),
            imdb_link: Set(new_show.imdb_link.clone()),
            status: Set(new_show.status),
            latest_episode: Set(0),
            last_watched: Set(new_show.last_watched),
            rating: Set(new_show.rating),
            notify: Set(new_show.notify),
            resume_token: Set(None),
            ..Default::default()
        };

        let result = Show::insert(active_model).exec(&self.conn).await?;

        let model = Show::find_by_id(result.last_insert_id)
            .one(&self.conn)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Failed to load show after insert"))?;

        info!("Added show: {} ({})", model.name, model.external_id);
        Ok(model)
    }

    pub async fn get(&self, id: i32) -> anyhow::Result<Option<show::Model>> {
        Ok(Show::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn get_by_name(&self, name: &str) -> anyhow::Result<Option<show::Model>> {
        Ok(Show::find()
            .filter(show::Column::Name.eq(name))
            .one(&self.conn)
            .await?)
    }

    pub async fn list_all(&self) -> anyhow::Result<Vec<show::Model>> {
        Ok(Show::find()
            .order_by_asc(show::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_notify_enabled(&self) -> anyhow::Result<Vec<show::Model>> {
        Ok(Show::find()
            .filter(show::Column::Notify.eq(true))
            .order_by_asc(show::Column::Name)
            .all(&self.conn)
            .await?)
    }

    pub async fn update_fields(&self, id: i32, changes: &ShowChanges) -> anyhow::Result<()> {
        let Some(model) = Show::find_by_id(id).one(&self.conn).await? else {
            anyhow::bail!("Show with ID {id} not found");
        };

        let mut update = model.into_active_model();

        if let Some(name) = &changes.name {
            update.name = Set(name.clone());
        }
        if let Some(last_watched) = changes.last_watched {
            update.last_watched = Set(last_watched);
        }
        if let Some(rating) = changes.rating {
            update.rating = Set(rating);
        }
        if let Some(notify) = changes.notify {
            update.notify = Set(notify);
        }
        if let Some(status) = changes.status {
            update.status = Set(status);
        }

        update.update(&self.conn).await?;
        Ok(())
    }

    /// Delete a show by name. Its new_episodes rows go with it (cascade).
    pub async fn remove_by_name(&self, name: &str) -> anyhow::Result<bool> {
        let result = Show::delete_many()
            .filter(show::Column::Name.eq(name))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
