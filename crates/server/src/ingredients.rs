//! Ingredients API endpoints

use api_types::{
    ingredient::{IngredientNew, IngredientUpdate, IngredientView},
    list::ListRequest,
    recipe::IngredientRef,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

const INGREDIENT_NOT_FOUND: &str = "Ingredient does not exist";

fn list_params(request: ListRequest) -> engine::ListParams {
    engine::ListParams {
        limit: request.limit,
        offset: request.offset,
        sort: request.sort,
        filters: request.filters,
    }
}

fn view(ingredient: engine::Ingredient) -> IngredientView {
    IngredientView {
        id: ingredient.id,
        name: ingredient.name,
        description: ingredient.description,
        created_at: ingredient.created_at,
        updated_at: ingredient.updated_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(request): Query<ListRequest>,
) -> Result<Json<Vec<IngredientView>>, ServerError> {
    let ingredients = state.engine.list_ingredients(&list_params(request)).await?;

    Ok(Json(ingredients.into_iter().map(view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IngredientNew>,
) -> Result<(StatusCode, Json<IngredientView>), ServerError> {
    let ingredient = state
        .engine
        .create_ingredient(
            payload.id,
            &payload.name,
            &payload.description,
            payload.created_at,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(view(ingredient))))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IngredientView>, ServerError> {
    let ingredient = state
        .engine
        .ingredient(id)
        .await?
        .ok_or(ServerError::NotFound(INGREDIENT_NOT_FOUND))?;

    Ok(Json(view(ingredient)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<IngredientUpdate>,
) -> Result<Json<IngredientView>, ServerError> {
    let ingredient = state
        .engine
        .update_ingredient(id, payload.name.as_deref(), payload.description.as_deref())
        .await?
        .ok_or(ServerError::NotFound(INGREDIENT_NOT_FOUND))?;

    Ok(Json(view(ingredient)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IngredientView>, ServerError> {
    let ingredient = state
        .engine
        .delete_ingredient(id)
        .await?
        .ok_or(ServerError::NotFound(INGREDIENT_NOT_FOUND))?;

    Ok(Json(view(ingredient)))
}

/// The `{id, name}` references linked to a recipe. Unknown recipe ids yield
/// an empty list.
pub async fn list_for_recipe(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<IngredientRef>>, ServerError> {
    let refs = state.engine.ingredients_for_recipe(id).await?;

    let refs = refs
        .into_iter()
        .map(|entry| IngredientRef {
            id: entry.id,
            name: entry.name,
        })
        .collect();

    Ok(Json(refs))
}
