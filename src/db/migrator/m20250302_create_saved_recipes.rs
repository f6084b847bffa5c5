use crate::entities::prelude::*;
use crate::entities::saved_recipes;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Composite primary key (user_id, recipe_id) doubles as the
        // uniqueness constraint on the pair.
        manager
            .create_table(
                schema
                    .create_table_from_entity(SavedRecipes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_saved_recipes_recipe_id")
                    .table(SavedRecipes)
                    .col(saved_recipes::Column::RecipeId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SavedRecipes).to_owned())
            .await
    }
}
