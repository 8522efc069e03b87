//! Repository Module
//!
//! CRUD operations over the SQLite pool, one module per table.
//! Repositories are free functions taking `&SqlitePool` (or a transaction
//! for the bulk operations) and returning [`RepoResult`].

pub mod admin;
pub mod assessment;
pub mod blackpoint;
pub mod course;
pub mod leave;
pub mod member;
pub mod progress;
pub mod quit;
pub mod reminder;
pub mod retention;
pub mod settings;
pub mod video;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Database(msg) => AppError::Database(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Repository result alias
pub type RepoResult<T> = Result<T, RepoError>;
