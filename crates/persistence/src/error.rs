// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;
use thiserror::Error;
use tip_split::StoreError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    DatabaseError(String),
    /// Database connection failed.
    #[error("Database connection failed: {0}")]
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),
    /// A stored row could not be turned back into a domain value.
    #[error("Reconstruction error: {0}")]
    ReconstructionError(String),
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Initialization error.
    #[error("Initialization error: {0}")]
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    #[error("Foreign key enforcement is not enabled")]
    ForeignKeyEnforcementNotEnabled,
    /// The requested record was not found.
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// The kind of record.
        entity: &'static str,
        /// The key that was looked up.
        key: String,
    },
    /// A unique key is already taken.
    #[error("{entity} '{key}' already exists")]
    Duplicate {
        /// The kind of record.
        entity: &'static str,
        /// The clashing key.
        key: String,
    },
}

impl PersistenceError {
    pub(crate) fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub(crate) fn duplicate(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::Duplicate {
            entity,
            key: key.to_string(),
        }
    }
}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::not_found("record", "unknown"),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::duplicate("record", info.message())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound { entity, key } => Self::NotFound { entity, key },
            PersistenceError::Duplicate { entity, key } => Self::DuplicateKey { entity, key },
            other => Self::Backend(other.to_string()),
        }
    }
}
