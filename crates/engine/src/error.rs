//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`InvalidQuery`] thrown when a sort or filter fragment falls outside the whitelist.
//! - [`InvalidField`] thrown when a payload field breaks a shape constraint.
//! - [`ExistingKey`] thrown when a unique key collides.
//! - [`UnknownIngredient`] thrown when an association references a missing ingredient.
//!
//! Absence of an addressed entity is not an error: lookups return
//! `Option::None` and the caller decides how to surface it.
//!
//!  [`InvalidQuery`]: EngineError::InvalidQuery
//!  [`InvalidField`]: EngineError::InvalidField
//!  [`ExistingKey`]: EngineError::ExistingKey
//!  [`UnknownIngredient`]: EngineError::UnknownIngredient
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
    #[error("Invalid field: {0}")]
    InvalidField(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Unknown ingredient: {0}")]
    UnknownIngredient(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    /// Refine a write error, mapping recognizable constraint violations onto
    /// their domain variants. `key` names the value that collided.
    pub(crate) fn from_write(err: DbErr, key: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::ExistingKey(key.to_string()),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                Self::UnknownIngredient(key.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidQuery(a), Self::InvalidQuery(b)) => a == b,
            (Self::InvalidField(a), Self::InvalidField(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::UnknownIngredient(a), Self::UnknownIngredient(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
