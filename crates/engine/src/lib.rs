pub use error::EngineError;
pub use ingredients::Ingredient;
pub use ops::{Engine, EngineBuilder};
pub use query::{DEFAULT_LIMIT, DEFAULT_OFFSET, ListParams, MAX_LIMIT};
pub use recipe_ingredients::{IngredientDelta, IngredientRef};
pub use recipes::Recipe;

mod error;
mod ingredients;
mod ops;
mod query;
mod recipe_ingredients;
mod recipes;
mod store;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
