use sea_orm::entity::prelude::*;

/// Watch status of a tracked show. Stored as its snake_case string in sqlite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ShowStatus {
    #[sea_orm(string_value = "plan_to_watch")]
    PlanToWatch,
    #[sea_orm(string_value = "watching")]
    Watching,
    #[sea_orm(string_value = "on_hold")]
    OnHold,
    #[sea_orm(string_value = "dropped")]
    Dropped,
    #[sea_orm(string_value = "watched")]
    Watched,
}

impl ShowStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlanToWatch => "plan_to_watch",
            Self::Watching => "watching",
            Self::OnHold => "on_hold",
            Self::Dropped => "dropped",
            Self::Watched => "watched",
        }
    }
}

/// Whether a show in this status should be polled for new episodes by
/// default. Used when the status changes and the caller did not override
/// the notify flag explicitly.
#[must_use]
pub const fn default_notify_for(status: ShowStatus) -> bool {
    matches!(status, ShowStatus::PlanToWatch | ShowStatus::Watching)
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "shows")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Upstream title id (e.g. `tt0903747`). Unique across all shows.
    #[sea_orm(unique)]
    pub external_id: String,
    #[sea_orm(unique)]
    pub name: String,
    pub imdb_link: String,
    pub status: ShowStatus,
    /// Highest sequential episode number ever assigned. Only increases.
    pub latest_episode: i32,
    pub last_watched: i32,
    pub rating: f32,
    pub notify: bool,
    /// Opaque pagination cursor into the upstream episode feed. Present
    /// only while a sync is partway through the feed.
    pub resume_token: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::new_episode::Entity")]
    NewEpisode,
}

impl Related<super::new_episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::NewEpisode.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notify_defaults_follow_status() {
        assert!(default_notify_for(ShowStatus::PlanToWatch));
        assert!(default_notify_for(ShowStatus::Watching));
        assert!(!default_notify_for(ShowStatus::OnHold));
        assert!(!default_notify_for(ShowStatus::Dropped));
        assert!(!default_notify_for(ShowStatus::Watched));
    }
}
