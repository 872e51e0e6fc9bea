//! Directory storage engine trait.

use async_trait::async_trait;
use rd_model::Role;

use crate::error::StorageResult;

/// Durable storage for roles and membership edges.
///
/// Implementations must be thread-safe and support concurrent access.
/// All names passed to an engine are already validated and normalized
/// by the caller; engines compare by the normalized key only.
///
/// Any key-value or relational backend satisfying these six operations
/// is acceptable.
#[async_trait]
pub trait DirectoryEngine: Send + Sync {
    /// Inserts a new role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::Duplicate` if a role with the same
    /// normalized name exists in the same application partition.
    async fn insert_role(&self, role: &Role) -> StorageResult<()>;

    /// Deletes a role and cascades all of its membership edges.
    ///
    /// The role and its edges are removed atomically: no reader may
    /// observe the role gone while edges remain.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the role doesn't exist.
    async fn delete_role(&self, application: &str, name_key: &str) -> StorageResult<()>;

    /// Inserts a membership edge.
    ///
    /// Inserting an edge that already exists is a no-op; the casing of
    /// the first insert wins.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the role doesn't exist.
    async fn insert_member(
        &self,
        application: &str,
        name_key: &str,
        user: &str,
    ) -> StorageResult<()>;

    /// Removes a membership edge.
    ///
    /// Removing an edge that doesn't exist is a no-op.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the role doesn't exist.
    async fn remove_member(
        &self,
        application: &str,
        name_key: &str,
        user: &str,
    ) -> StorageResult<()>;

    /// Lists all roles in an application partition.
    ///
    /// Order is unspecified but stable within a single snapshot.
    async fn list_roles(&self, application: &str) -> StorageResult<Vec<Role>>;

    /// Lists the member user identifiers of a role.
    ///
    /// ## Errors
    ///
    /// Returns `StorageError::NotFound` if the role doesn't exist.
    async fn list_members(&self, application: &str, name_key: &str) -> StorageResult<Vec<String>>;
}
