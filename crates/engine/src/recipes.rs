//! Recipe primitives.
//!
//! A `Recipe` owns a set of ingredient references through the
//! `recipes_ingredients` association table. The `ingredients` field is only
//! populated on single-entity reads; list operations return it empty.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultEngine,
    recipe_ingredients::IngredientRef,
    util::{validate_description, validate_name},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<IngredientRef>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Recipe {
    /// Build a validated recipe. `id` and `created_at` fall back to a fresh
    /// v4 uuid and the current instant when not supplied.
    pub fn new(
        id: Option<Uuid>,
        name: &str,
        description: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: validate_name(name, "recipe")?,
            description: validate_description(description, "recipe")?,
            ingredients: Vec::new(),
            created_at: created_at.unwrap_or_else(Utc::now),
            updated_at: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "recipes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::recipe_ingredients::Entity")]
    RecipeIngredients,
}

impl Related<super::recipe_ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RecipeIngredients.def()
    }
}

impl Related<super::ingredients::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_ingredients::Relation::Ingredients.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_ingredients::Relation::Recipes.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Recipe> for ActiveModel {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: ActiveValue::Set(recipe.id),
            name: ActiveValue::Set(recipe.name.clone()),
            description: ActiveValue::Set(recipe.description.clone()),
            created_at: ActiveValue::Set(recipe.created_at),
            updated_at: ActiveValue::Set(recipe.updated_at),
        }
    }
}

impl From<Model> for Recipe {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            ingredients: Vec::new(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
