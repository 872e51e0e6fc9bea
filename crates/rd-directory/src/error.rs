//! Directory error taxonomy.
//!
//! Every failure carries the operation name and the offending argument,
//! enough to reconstruct the ASP.NET role-provider exception text.

use rd_storage::StorageError;
use thiserror::Error;

/// Result type alias using the directory error type.
pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Errors returned by the directory service and role store.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A role name or user identifier is empty or contains the reserved
    /// delimiter.
    #[error("{operation}: {argument} '{value}' is empty or contains ','")]
    InvalidName {
        /// Operation that rejected the name.
        operation: &'static str,
        /// Name of the offending argument.
        argument: &'static str,
        /// The rejected value.
        value: String,
    },

    /// A role with the same name already exists (case-insensitive).
    #[error("{operation}: role '{role}' already exists")]
    AlreadyExists {
        /// Operation that hit the collision.
        operation: &'static str,
        /// The colliding role name.
        role: String,
    },

    /// The named role does not exist.
    #[error("{operation}: role '{role}' was not found")]
    NotFound {
        /// Operation that missed.
        operation: &'static str,
        /// The missing role name.
        role: String,
    },

    /// The role still has members and deletion was not forced.
    #[error("{operation}: role '{role}' has one or more members")]
    RolePopulated {
        /// Operation that was rejected.
        operation: &'static str,
        /// The populated role name.
        role: String,
    },

    /// A bulk array argument contains a repeated entry.
    #[error("{operation}: {argument} contains a duplicate element '{value}'")]
    DuplicateElement {
        /// Operation that rejected the array.
        operation: &'static str,
        /// Name of the offending array argument.
        argument: &'static str,
        /// The repeated value.
        value: String,
    },

    /// The identity collaborator reported no active identity.
    #[error("{operation}: there is no current user")]
    NoCurrentUser {
        /// Operation that required a current user.
        operation: &'static str,
    },

    /// Role management is not enabled for this directory.
    #[error("{operation}: role management is not enabled")]
    Disabled {
        /// Operation that was refused.
        operation: &'static str,
    },

    /// A storage collaborator failure.
    ///
    /// Unavailability surfaces here as `StorageError::Unavailable`; the
    /// directory never retries.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageError),
}

impl DirectoryError {
    /// Creates an invalid name error.
    #[must_use]
    pub fn invalid_name(
        operation: &'static str,
        argument: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidName {
            operation,
            argument,
            value: value.into(),
        }
    }

    /// Creates an already exists error.
    #[must_use]
    pub fn already_exists(operation: &'static str, role: impl Into<String>) -> Self {
        Self::AlreadyExists {
            operation,
            role: role.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(operation: &'static str, role: impl Into<String>) -> Self {
        Self::NotFound {
            operation,
            role: role.into(),
        }
    }

    /// Creates a populated role error.
    #[must_use]
    pub fn populated(operation: &'static str, role: impl Into<String>) -> Self {
        Self::RolePopulated {
            operation,
            role: role.into(),
        }
    }

    /// Creates a duplicate element error.
    #[must_use]
    pub fn duplicate_element(
        operation: &'static str,
        argument: &'static str,
        value: impl Into<String>,
    ) -> Self {
        Self::DuplicateElement {
            operation,
            argument,
            value: value.into(),
        }
    }

    /// Creates a no current user error.
    #[must_use]
    pub const fn no_current_user(operation: &'static str) -> Self {
        Self::NoCurrentUser { operation }
    }

    /// Creates a disabled error.
    #[must_use]
    pub const fn disabled(operation: &'static str) -> Self {
        Self::Disabled { operation }
    }

    /// Checks if this is an invalid name error.
    #[must_use]
    pub const fn is_invalid_name(&self) -> bool {
        matches!(self, Self::InvalidName { .. })
    }

    /// Checks if this is an already exists error.
    #[must_use]
    pub const fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }

    /// Checks if this is a not found error.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Checks if this is a populated role error.
    #[must_use]
    pub const fn is_populated(&self) -> bool {
        matches!(self, Self::RolePopulated { .. })
    }

    /// Checks if this is a duplicate element error.
    #[must_use]
    pub const fn is_duplicate_element(&self) -> bool {
        matches!(self, Self::DuplicateElement { .. })
    }

    /// Checks if this is a disabled error.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_carry_operation_and_argument() {
        let err = DirectoryError::invalid_name("create_role", "role_name", "a,b");
        assert!(err.is_invalid_name());
        assert_eq!(
            err.to_string(),
            "create_role: role_name 'a,b' is empty or contains ','"
        );
    }

    #[test]
    fn disabled_error_mirrors_role_manager_message() {
        let err = DirectoryError::disabled("list_roles");
        assert!(err.is_disabled());
        assert!(err.to_string().contains("role management is not enabled"));
    }

    #[test]
    fn storage_errors_wrap() {
        let err: DirectoryError = StorageError::unavailable("pool closed").into();
        assert!(matches!(
            err,
            DirectoryError::Storage(StorageError::Unavailable(_))
        ));
    }
}
