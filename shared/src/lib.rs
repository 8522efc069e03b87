//! Shared types for the 紫夜公会 guild management system
//!
//! Domain models and payload DTOs used by the API server (and any future
//! client crate). Database derives are feature-gated behind `db` so pure
//! clients don't pull in sqlx.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
