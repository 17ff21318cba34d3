use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, Ingredient, ResultEngine, ingredients,
    query::{self, ListParams},
    recipe_ingredients::IngredientRef,
    store,
    util::{validate_description, validate_name},
};

use super::{Engine, with_tx};

impl Engine {
    /// Create an ingredient. `id` and `created_at` default when absent;
    /// names are unique across the table and a collision fails with
    /// [`EngineError::ExistingKey`].
    pub async fn create_ingredient(
        &self,
        id: Option<Uuid>,
        name: &str,
        description: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> ResultEngine<Ingredient> {
        let ingredient = Ingredient::new(id, name, description, created_at)?;

        with_tx!(self, |db_tx| {
            if let Some(supplied) = id {
                let exists = store::get_by_id::<ingredients::Entity, _>(&db_tx, supplied)
                    .await?
                    .is_some();
                if exists {
                    return Err(EngineError::ExistingKey(supplied.to_string()));
                }
            }

            let taken = ingredients::Entity::find()
                .filter(ingredients::Column::Name.eq(ingredient.name.clone()))
                .one(&db_tx)
                .await?
                .is_some();
            if taken {
                return Err(EngineError::ExistingKey(ingredient.name.clone()));
            }

            let model = store::insert(
                &db_tx,
                ingredients::ActiveModel::from(&ingredient),
                &ingredient.name,
            )
            .await?;

            Ok(Ingredient::from(model))
        })
    }

    /// List a page of ingredients. Sort and filter entries outside the
    /// whitelists fail with [`EngineError::InvalidQuery`] before any row is
    /// read.
    pub async fn list_ingredients(&self, params: &ListParams) -> ResultEngine<Vec<Ingredient>> {
        let query = query::translate(params)?;
        let models = store::list_page::<ingredients::Entity, _>(&self.database, &query).await?;

        Ok(models.into_iter().map(Ingredient::from).collect())
    }

    /// Return an ingredient by id, or `None` when absent.
    pub async fn ingredient(&self, id: Uuid) -> ResultEngine<Option<Ingredient>> {
        let model = store::get_by_id::<ingredients::Entity, _>(&self.database, id).await?;

        Ok(model.map(Ingredient::from))
    }

    /// Partially update an ingredient: absent fields keep their stored
    /// values, `updated_at` is refreshed either way. Returns `None` when the
    /// id does not exist.
    pub async fn update_ingredient(
        &self,
        id: Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> ResultEngine<Option<Ingredient>> {
        let name = name
            .map(|value| validate_name(value, "ingredient"))
            .transpose()?;
        let description = description
            .map(|value| validate_description(value, "ingredient"))
            .transpose()?;

        with_tx!(self, |db_tx| {
            let exists = store::get_by_id::<ingredients::Entity, _>(&db_tx, id)
                .await?
                .is_some();
            if !exists {
                return Ok(None);
            }

            let key = name.clone().unwrap_or_else(|| id.to_string());
            let mut changes = ingredients::ActiveModel {
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

            let model = store::update_partial(&db_tx, changes, &key).await?;

            Ok(model.map(Ingredient::from))
        })
    }

    /// Delete an ingredient, returning its pre-deletion snapshot. Association
    /// rows pointing at it go away with the cascade. Returns `None` when the
    /// id does not exist.
    pub async fn delete_ingredient(&self, id: Uuid) -> ResultEngine<Option<Ingredient>> {
        with_tx!(self, |db_tx| {
            let Some(model) = store::get_by_id::<ingredients::Entity, _>(&db_tx, id).await? else {
                return Ok(None);
            };

            store::delete_by_id::<ingredients::Entity, _>(&db_tx, id).await?;

            Ok(Some(Ingredient::from(model)))
        })
    }

    /// Resolve the `{id, name}` ingredient references of a recipe, ordered
    /// by name. Unknown recipe ids yield an empty list, not an error.
    pub async fn ingredients_for_recipe(
        &self,
        recipe_id: Uuid,
    ) -> ResultEngine<Vec<IngredientRef>> {
        with_tx!(self, |db_tx| {
            self.resolve_ingredients(&db_tx, recipe_id).await
        })
    }
}
