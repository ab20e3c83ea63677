// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::lifecycle::ShiftLifecycle;
use thiserror::Error;
use tip_split_domain::DomainError;

/// Errors that can occur while moving a shift through its lifecycle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// A domain rule was violated.
    #[error("Domain violation: {0}")]
    DomainViolation(#[from] DomainError),
    /// The requested lifecycle transition is not permitted.
    #[error("Invalid shift transition from {from} to {to}")]
    InvalidTransition {
        /// The current lifecycle state.
        from: ShiftLifecycle,
        /// The requested lifecycle state.
        to: ShiftLifecycle,
    },
}

/// Errors reported by a store implementation.
///
/// Each backend translates its own failures into this type so callers can
/// tell a missing record or a key clash apart from an infrastructure fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The keyed record does not exist.
    #[error("{entity} '{key}' not found")]
    NotFound {
        /// The kind of record (e.g., "shift").
        entity: &'static str,
        /// The key that was looked up.
        key: String,
    },
    /// A record with the same unique key already exists.
    #[error("{entity} '{key}' already exists")]
    DuplicateKey {
        /// The kind of record (e.g., "employee").
        entity: &'static str,
        /// The clashing key.
        key: String,
    },
    /// The backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    /// Builds a `NotFound` error for any displayable key.
    #[must_use]
    pub fn not_found(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Builds a `DuplicateKey` error for any displayable key.
    #[must_use]
    pub fn duplicate(entity: &'static str, key: impl std::fmt::Display) -> Self {
        Self::DuplicateKey {
            entity,
            key: key.to_string(),
        }
    }
}
