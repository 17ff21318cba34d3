//! Recipes API endpoints

use api_types::{
    list::ListRequest,
    recipe::{IngredientRef, RecipeExpanded, RecipeNew, RecipeUpdate, RecipeView},
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use axum_extra::extract::Query;
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

const RECIPE_NOT_FOUND: &str = "Recipe does not exist";

fn list_params(request: ListRequest) -> engine::ListParams {
    engine::ListParams {
        limit: request.limit,
        offset: request.offset,
        sort: request.sort,
        filters: request.filters,
    }
}

fn bare_view(recipe: engine::Recipe) -> RecipeView {
    RecipeView {
        id: recipe.id,
        name: recipe.name,
        description: recipe.description,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
    }
}

fn expanded_view(recipe: engine::Recipe) -> RecipeExpanded {
    let ingredients = recipe
        .ingredients
        .into_iter()
        .map(|entry| IngredientRef {
            id: entry.id,
            name: entry.name,
        })
        .collect();

    RecipeExpanded {
        id: recipe.id,
        name: recipe.name,
        description: recipe.description,
        created_at: recipe.created_at,
        updated_at: recipe.updated_at,
        ingredients,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(request): Query<ListRequest>,
) -> Result<Json<Vec<RecipeView>>, ServerError> {
    let recipes = state.engine.list_recipes(&list_params(request)).await?;

    Ok(Json(recipes.into_iter().map(bare_view).collect()))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<RecipeNew>,
) -> Result<(StatusCode, Json<RecipeView>), ServerError> {
    let ingredient_ids: Vec<Uuid> = payload.ingredients.iter().map(|entry| entry.id).collect();

    let recipe = state
        .engine
        .create_recipe(
            payload.id,
            &payload.name,
            &payload.description,
            payload.created_at,
            &ingredient_ids,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(bare_view(recipe))))
}

pub async fn detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeExpanded>, ServerError> {
    let recipe = state
        .engine
        .recipe(id)
        .await?
        .ok_or(ServerError::NotFound(RECIPE_NOT_FOUND))?;

    Ok(Json(expanded_view(recipe)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecipeUpdate>,
) -> Result<Json<RecipeExpanded>, ServerError> {
    let deltas: Vec<engine::IngredientDelta> = payload
        .ingredients
        .iter()
        .map(|change| engine::IngredientDelta {
            id: change.id,
            is_deleted: change.is_deleted,
        })
        .collect();

    let recipe = state
        .engine
        .update_recipe(
            id,
            payload.name.as_deref(),
            payload.description.as_deref(),
            &deltas,
        )
        .await?
        .ok_or(ServerError::NotFound(RECIPE_NOT_FOUND))?;

    Ok(Json(expanded_view(recipe)))
}

pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeView>, ServerError> {
    let recipe = state
        .engine
        .delete_recipe(id)
        .await?
        .ok_or(ServerError::NotFound(RECIPE_NOT_FOUND))?;

    Ok(Json(bare_view(recipe)))
}
