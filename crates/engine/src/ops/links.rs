use sea_orm::{ActiveValue, DatabaseTransaction, Order, QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{
    EngineError, ResultEngine, ingredients,
    recipe_ingredients::{self, IngredientDelta, IngredientRef},
    store,
};

use super::Engine;

impl Engine {
    /// Link the given ingredients to a recipe, skipping pairs already
    /// present. Every id must name a stored ingredient; an unknown id fails
    /// with [`EngineError::UnknownIngredient`]. Caller must run this inside
    /// the same transaction as the recipe write.
    pub(super) async fn link_ingredients(
        &self,
        db_tx: &DatabaseTransaction,
        recipe_id: Uuid,
        ingredient_ids: &[Uuid],
    ) -> ResultEngine<()> {
        for &ingredient_id in ingredient_ids {
            let known = store::get_by_id::<ingredients::Entity, _>(db_tx, ingredient_id)
                .await?
                .is_some();
            if !known {
                return Err(EngineError::UnknownIngredient(ingredient_id.to_string()));
            }

            let linked = recipe_ingredients::Entity::find_by_id((recipe_id, ingredient_id))
                .one(db_tx)
                .await?
                .is_some();
            if linked {
                continue;
            }

            let link = recipe_ingredients::ActiveModel {
                recipe_id: ActiveValue::Set(recipe_id),
                ingredient_id: ActiveValue::Set(ingredient_id),
            };
            store::insert(db_tx, link, &ingredient_id.to_string()).await?;
        }

        Ok(())
    }

    /// Apply membership deltas for a recipe: entries flagged `is_deleted`
    /// are unlinked first, the rest are linked when not already present.
    pub(super) async fn apply_ingredient_deltas(
        &self,
        db_tx: &DatabaseTransaction,
        recipe_id: Uuid,
        deltas: &[IngredientDelta],
    ) -> ResultEngine<()> {
        let (deletions, additions): (Vec<&IngredientDelta>, Vec<&IngredientDelta>) =
            deltas.iter().partition(|delta| delta.is_deleted);

        for delta in &deletions {
            recipe_ingredients::Entity::delete_by_id((recipe_id, delta.id))
                .exec(db_tx)
                .await?;
        }

        let additions: Vec<Uuid> = additions.iter().map(|delta| delta.id).collect();
        self.link_ingredients(db_tx, recipe_id, &additions).await
    }

    /// Remove every association row for a recipe.
    pub(super) async fn unlink_recipe(
        &self,
        db_tx: &DatabaseTransaction,
        recipe_id: Uuid,
    ) -> ResultEngine<()> {
        recipe_ingredients::Entity::delete_many()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .exec(db_tx)
            .await?;

        Ok(())
    }

    /// Resolve the `{id, name}` ingredient set of a recipe, ordered by
    /// ingredient name. Unknown recipe ids yield an empty list.
    pub(super) async fn resolve_ingredients(
        &self,
        db_tx: &DatabaseTransaction,
        recipe_id: Uuid,
    ) -> ResultEngine<Vec<IngredientRef>> {
        let links = recipe_ingredients::Entity::find()
            .filter(recipe_ingredients::Column::RecipeId.eq(recipe_id))
            .find_also_related(ingredients::Entity)
            .order_by(ingredients::Column::Name, Order::Asc)
            .all(db_tx)
            .await?;

        let mut refs = Vec::with_capacity(links.len());
        for (_, ingredient) in links {
            let Some(ingredient) = ingredient else {
                continue;
            };
            refs.push(IngredientRef {
                id: ingredient.id,
                name: ingredient.name,
            });
        }

        Ok(refs)
    }
}
