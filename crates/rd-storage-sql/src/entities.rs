//! Database entity types for `sqlx`.
//!
//! These types map directly to database rows and are converted to
//! domain models.

use chrono::{DateTime, Utc};
use rd_model::Role;
use rd_storage::{StorageError, StorageResult};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for roles.
#[derive(Debug, Clone, FromRow)]
pub struct RoleRow {
    pub id: String,
    pub application: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl RoleRow {
    /// Converts the row into a domain role.
    ///
    /// Fails with `StorageError::Internal` if the stored id is not a
    /// valid UUID.
    pub fn into_role(self) -> StorageResult<Role> {
        let id = Uuid::parse_str(&self.id)
            .map_err(|e| StorageError::Internal(format!("corrupt role id '{}': {e}", self.id)))?;

        Ok(Role {
            id,
            application: self.application,
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
