use sea_orm_migration::prelude::*;

use super::{m20260715_000001_recipes::Recipes, m20260715_000002_ingredients::Ingredients};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RecipesIngredients::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RecipesIngredients::RecipeId)
                            .blob()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(RecipesIngredients::IngredientId)
                            .blob()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(RecipesIngredients::RecipeId)
                            .col(RecipesIngredients::IngredientId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recipes_ingredients-recipe_id")
                            .from(RecipesIngredients::Table, RecipesIngredients::RecipeId)
                            .to(Recipes::Table, Recipes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-recipes_ingredients-ingredient_id")
                            .from(RecipesIngredients::Table, RecipesIngredients::IngredientId)
                            .to(Ingredients::Table, Ingredients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-recipes_ingredients-ingredient_id")
                    .table(RecipesIngredients::Table)
                    .col(RecipesIngredients::IngredientId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RecipesIngredients::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
pub enum RecipesIngredients {
    Table,
    RecipeId,
    IngredientId,
}
