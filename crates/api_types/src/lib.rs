use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod list {
    use super::*;

    /// Query string for the list endpoints. `sort` and `filters` repeat,
    /// one entry per key occurrence.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ListRequest {
        pub limit: Option<u64>,
        pub offset: Option<u64>,
        #[serde(default)]
        pub sort: Vec<String>,
        #[serde(default)]
        pub filters: Vec<String>,
    }
}

pub mod ingredient {
    use super::*;

    /// Request body for `POST /ingredients`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientNew {
        /// Optional: if absent, the server assigns a fresh UUID.
        pub id: Option<Uuid>,
        pub name: String,
        pub description: String,
        /// Optional: if absent, server uses now().
        pub created_at: Option<DateTime<Utc>>,
    }

    /// Request body for `PATCH /ingredients/{id}`.
    ///
    /// Absent fields keep their stored values.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct IngredientUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
    }

    /// An ingredient as returned by the API.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientView {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub created_at: DateTime<Utc>,
        /// `null` until the first update.
        pub updated_at: Option<DateTime<Utc>>,
    }
}

pub mod recipe {
    use super::*;

    /// An `{id, name}` reference to a stored ingredient.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientRef {
        pub id: Uuid,
        pub name: String,
    }

    /// Request body for `POST /recipes`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeNew {
        /// Optional: if absent, the server assigns a fresh UUID.
        pub id: Option<Uuid>,
        pub name: String,
        pub description: String,
        /// Optional: if absent, server uses now().
        pub created_at: Option<DateTime<Utc>>,
        /// Ingredients to link. Every id must name a stored ingredient.
        #[serde(default)]
        pub ingredients: Vec<IngredientRef>,
    }

    /// One membership change inside a recipe update.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IngredientChange {
        pub id: Uuid,
        /// When true the ingredient is unlinked instead of linked.
        #[serde(default)]
        pub is_deleted: bool,
    }

    /// Request body for `PATCH /recipes/{id}`.
    ///
    /// Absent fields keep their stored values.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RecipeUpdate {
        pub name: Option<String>,
        pub description: Option<String>,
        #[serde(default)]
        pub ingredients: Vec<IngredientChange>,
    }

    /// A recipe without its ingredient expansion (list, create and delete
    /// responses).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeView {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub created_at: DateTime<Utc>,
        /// `null` until the first update.
        pub updated_at: Option<DateTime<Utc>>,
    }

    /// A recipe with its ingredient set resolved (get-one and update
    /// responses).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RecipeExpanded {
        pub id: Uuid,
        pub name: String,
        pub description: String,
        pub created_at: DateTime<Utc>,
        /// `null` until the first update.
        pub updated_at: Option<DateTime<Utc>>,
        /// Ordered by ingredient name.
        pub ingredients: Vec<IngredientRef>,
    }
}
