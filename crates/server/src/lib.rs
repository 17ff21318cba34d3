use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{app, run, run_with_listener, spawn_with_listener};

mod ingredients;
mod recipes;
mod server;

pub mod types {
    pub mod ingredient {
        pub use api_types::ingredient::{IngredientNew, IngredientUpdate, IngredientView};
    }

    pub mod recipe {
        pub use api_types::recipe::{
            IngredientChange, IngredientRef, RecipeExpanded, RecipeNew, RecipeUpdate, RecipeView,
        };
    }

    pub mod list {
        pub use api_types::list::ListRequest;
    }
}

pub enum ServerError {
    Engine(EngineError),
    NotFound(&'static str),
}

//TODO: Find a better solution
#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidQuery(_)
        | EngineError::InvalidField(_)
        | EngineError::UnknownIngredient(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => {
                (status_for_engine_error(&err), message_for_engine_error(err))
            }
            ServerError::NotFound(detail) => (StatusCode::NOT_FOUND, detail.to_string()),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}
