//! # prognos-storage
//!
//! SQLite persistence layer. One write connection, versioned migrations,
//! and an implementation of every collaborator store trait.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use prognos_core::errors::{PrognosError, StorageError};

/// Helper to convert a string error into a PrognosError::StorageError.
pub(crate) fn to_storage_err(msg: String) -> PrognosError {
    PrognosError::StorageError(StorageError::SqliteError { message: msg })
}
