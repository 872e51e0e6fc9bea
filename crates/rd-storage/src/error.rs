//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Entity not found by name.
    #[error("{entity_type} not found: '{name}'")]
    NotFound {
        /// Type of entity (e.g., "Role").
        entity_type: &'static str,
        /// Normalized entity name.
        name: String,
    },

    /// Duplicate entity (unique constraint violation).
    #[error("duplicate {entity_type}: '{name}' already exists")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Normalized entity name.
        name: String,
    },

    /// Storage backend unavailable (connection lost, pool closed).
    ///
    /// The directory core never retries these; retry policy belongs to
    /// the backend.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Storage query error.
    #[error("storage query error: {0}")]
    Query(String),

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, name: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            name: name.into(),
        }
    }

    /// Creates an unavailable error.
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable(reason.into())
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a duplicate error.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Checks if this is an unavailability error.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
