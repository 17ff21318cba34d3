use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, TransactionTrait};
use uuid::Uuid;

use crate::{
    EngineError, Recipe, ResultEngine,
    query::{self, ListParams},
    recipe_ingredients::IngredientDelta,
    recipes, store,
    util::{validate_description, validate_name},
};

use super::{Engine, with_tx};

impl Engine {
    /// Create a recipe and link the given ingredient ids, atomically. An
    /// unknown ingredient id fails the whole call with
    /// [`EngineError::UnknownIngredient`] and nothing is written. Unlike
    /// ingredients, recipe names may repeat.
    pub async fn create_recipe(
        &self,
        id: Option<Uuid>,
        name: &str,
        description: &str,
        created_at: Option<DateTime<Utc>>,
        ingredient_ids: &[Uuid],
    ) -> ResultEngine<Recipe> {
        let recipe = Recipe::new(id, name, description, created_at)?;

        with_tx!(self, |db_tx| {
            if let Some(supplied) = id {
                let exists = store::get_by_id::<recipes::Entity, _>(&db_tx, supplied)
                    .await?
                    .is_some();
                if exists {
                    return Err(EngineError::ExistingKey(supplied.to_string()));
                }
            }

            let model =
                store::insert(&db_tx, recipes::ActiveModel::from(&recipe), &recipe.name).await?;
            self.link_ingredients(&db_tx, recipe.id, ingredient_ids)
                .await?;

            let mut created = Recipe::from(model);
            created.ingredients = self.resolve_ingredients(&db_tx, recipe.id).await?;

            Ok(created)
        })
    }

    /// List a page of recipes, without ingredient expansion. Sort and filter
    /// entries outside the whitelists fail with
    /// [`EngineError::InvalidQuery`] before any row is read.
    pub async fn list_recipes(&self, params: &ListParams) -> ResultEngine<Vec<Recipe>> {
        let query = query::translate(params)?;
        let models = store::list_page::<recipes::Entity, _>(&self.database, &query).await?;

        Ok(models.into_iter().map(Recipe::from).collect())
    }

    /// Return a recipe by id with its ingredient set resolved, or `None`
    /// when absent.
    pub async fn recipe(&self, id: Uuid) -> ResultEngine<Option<Recipe>> {
        with_tx!(self, |db_tx| {
            let Some(model) = store::get_by_id::<recipes::Entity, _>(&db_tx, id).await? else {
                return Ok(None);
            };

            let mut recipe = Recipe::from(model);
            recipe.ingredients = self.resolve_ingredients(&db_tx, id).await?;

            Ok(Some(recipe))
        })
    }

    /// Partially update a recipe and apply its membership deltas, in one
    /// transaction. Deletions run before the scalar update; `updated_at` is
    /// refreshed even when no field changed. Returns `None` when the id does
    /// not exist.
    pub async fn update_recipe(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
        ingredients: &[IngredientDelta],
    ) -> ResultEngine<Option<Recipe>> {
        let name = name
            .map(|value| validate_name(value, "recipe"))
            .transpose()?;
        let description = description
            .map(|value| validate_description(value, "recipe"))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let exists = store::get_by_id::<recipes::Entity, _>(&db_tx, id)
                .await?
                .is_some();
            if !exists {
                return Ok(None);
            }

            self.apply_ingredient_deltas(&db_tx, id, ingredients)
                .await?;

            let mut changes = recipes::ActiveModel {
                id: ActiveValue::Set(id),
                updated_at: ActiveValue::Set(Some(Utc::now())),
                ..Default::default()
            };
            if let Some(name) = name {
                changes.name = ActiveValue::Set(name);
            }
            if let Some(description) = description {
                changes.description = ActiveValue::Set(description);
            }

            let Some(model) = store::update_partial(&db_tx, changes, &id.to_string()).await?
            else {
                return Ok(None);
            };

            let mut recipe = Recipe::from(model);
            recipe.ingredients = self.resolve_ingredients(&db_tx, id).await?;

            Ok(Some(recipe))
        })
    }

    /// Delete a recipe and its association rows, returning the pre-deletion
    /// snapshot with the ingredient set resolved. Returns `None` when the id
    /// does not exist. Stored ingredients themselves are left untouched.
    pub async fn delete_recipe(&self, id: Uuid) -> ResultEngine<Option<Recipe>> {
        with_tx!(self, |db_tx| {
            let Some(model) = store::get_by_id::<recipes::Entity, _>(&db_tx, id).await? else {
                return Ok(None);
            };

            let mut recipe = Recipe::from(model);
            recipe.ingredients = self.resolve_ingredients(&db_tx, id).await?;

            self.unlink_recipe(&db_tx, id).await?;
            store::delete_by_id::<recipes::Entity, _>(&db_tx, id).await?;

            Ok(Some(recipe))
        })
    }
}
