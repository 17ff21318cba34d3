//! Ingredient primitives.
//!
//! An `Ingredient` is a reusable component referenced by recipes through the
//! `recipes_ingredients` association table. Ingredient names are unique
//! across the whole table.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    ResultEngine,
    util::{validate_description, validate_name},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Ingredient {
    /// Build a validated ingredient. `id` and `created_at` fall back to a
    /// fresh v4 uuid and the current instant when not supplied.
    pub fn new(
        id: Option<Uuid>,
        name: &str,
        description: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> ResultEngine<Self> {
        Ok(Self {
            id: id.unwrap_or_else(Uuid::new_v4),
            name: validate_name(name, "ingredient")?,
            description: validate_description(description, "ingredient")?,
            created_at: created_at.unwrap_or_else(Utc::now),
            updated_at: None,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ingredients")]
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

impl Related<super::recipes::Entity> for Entity {
    fn to() -> RelationDef {
        super::recipe_ingredients::Relation::Recipes.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::recipe_ingredients::Relation::Ingredients.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Ingredient> for ActiveModel {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ActiveValue::Set(ingredient.id),
            name: ActiveValue::Set(ingredient.name.clone()),
            description: ActiveValue::Set(ingredient.description.clone()),
            created_at: ActiveValue::Set(ingredient.created_at),
            updated_at: ActiveValue::Set(ingredient.updated_at),
        }
    }
}

impl From<Model> for Ingredient {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
