//! # Store Error Types
//!
//! Error types for repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Repository lookup / CoreError from a domain rule                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds entity and id                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in agri-hub) ← Serialized for frontend                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use agri_core::CoreError;
use thiserror::Error;

/// Repository operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found.
    ///
    /// ## When This Occurs
    /// - ID doesn't exist
    /// - Update or status change on a missing record
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique key violation (id or email already taken).
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// A domain rule rejected the change (status machine, stock, ...).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;
