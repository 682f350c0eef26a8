use crate::entities::new_episode;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(Show)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(NewEpisode)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // One row per (show, number): reconcile relies on this to reject
        // duplicate inserts even if its own guards are bypassed.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_new_episodes_show_number")
                    .table(NewEpisode)
                    .col(new_episode::Column::ShowId)
                    .col(new_episode::Column::Number)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NewEpisode).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Show).to_owned())
            .await?;

        Ok(())
    }
}
