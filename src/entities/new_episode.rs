use sea_orm::entity::prelude::*;

/// An episode discovered by sync that the user has not watched yet.
/// At most one row exists per `(show_id, number)`; the pair is enforced
/// by a unique index. `has_trailer` and `has_related_video` are mutually
/// exclusive and both start false until enrichment fills them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "new_episodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub show_id: i32,
    pub number: i32,
    pub title: String,
    pub plot: String,
    pub rating: f32,
    pub has_trailer: bool,
    pub has_related_video: bool,
    pub video_link: Option<String>,
    pub video_title: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::show::Entity",
        from = "Column::ShowId",
        to = "super::show::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Show,
}

impl Related<super::show::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Show.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
