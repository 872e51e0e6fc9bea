//! Role store.
//!
//! Durable CRUD for roles and raw membership edges within one
//! application partition, over a pluggable storage engine. The store is
//! the source of truth the membership index is derived from.

use std::sync::Arc;

use rd_model::{name_key, Role};
use rd_storage::DirectoryEngine;

use crate::error::{DirectoryError, Result};
use crate::validate::ensure_valid_name;

/// Role store for one application partition.
#[derive(Clone)]
pub struct RoleStore {
    engine: Arc<dyn DirectoryEngine>,
    application: String,
}

impl RoleStore {
    /// Creates a store over the given engine and partition.
    #[must_use]
    pub fn new(engine: Arc<dyn DirectoryEngine>, application: impl Into<String>) -> Self {
        Self {
            engine,
            application: application.into(),
        }
    }

    /// Returns the application partition this store serves.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.application
    }

    /// Creates a new role and returns it.
    ///
    /// ## Errors
    ///
    /// Fails with an invalid-name error for empty or delimited names,
    /// and an already-exists error on a case-insensitive collision.
    pub async fn create_role(&self, name: &str) -> Result<Role> {
        ensure_valid_name("create_role", "role_name", name)?;

        let role = Role::new(self.application.clone(), name);
        match self.engine.insert_role(&role).await {
            Ok(()) => Ok(role),
            Err(e) if e.is_duplicate() => Err(DirectoryError::already_exists("create_role", name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes a role and all of its membership edges atomically.
    ///
    /// ## Errors
    ///
    /// Fails with a not-found error if the role is absent, and a
    /// populated-role error if it still has members and `force` is
    /// false.
    pub async fn delete_role(&self, name: &str, force: bool) -> Result<()> {
        ensure_valid_name("delete_role", "role_name", name)?;
        let key = name_key(name);

        let members = match self.engine.list_members(&self.application, &key).await {
            Ok(members) => members,
            Err(e) if e.is_not_found() => {
                return Err(DirectoryError::not_found("delete_role", name));
            }
            Err(e) => return Err(e.into()),
        };
        if !force && !members.is_empty() {
            return Err(DirectoryError::populated("delete_role", name));
        }

        match self.engine.delete_role(&self.application, &key).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_not_found() => Err(DirectoryError::not_found("delete_role", name)),
            Err(e) => Err(e.into()),
        }
    }

    /// Checks whether a role exists. Pure lookup, never mutates.
    ///
    /// ## Errors
    ///
    /// Fails with an invalid-name error for empty or delimited names.
    pub async fn role_exists(&self, name: &str) -> Result<bool> {
        ensure_valid_name("role_exists", "role_name", name)?;
        let key = name_key(name);

        let roles = self.engine.list_roles(&self.application).await?;
        Ok(roles.iter().any(|role| role.name_key() == key))
    }

    /// Lists all roles in the partition.
    ///
    /// ## Errors
    ///
    /// Propagates engine failures.
    pub async fn list_roles(&self) -> Result<Vec<Role>> {
        Ok(self.engine.list_roles(&self.application).await?)
    }

    /// Inserts a membership edge. Existing edges are a no-op.
    ///
    /// Callers are expected to have verified the role exists; the edge
    /// is written through to the engine.
    ///
    /// ## Errors
    ///
    /// Propagates engine failures.
    pub async fn add_member(&self, role_key: &str, user: &str) -> Result<()> {
        Ok(self
            .engine
            .insert_member(&self.application, role_key, user)
            .await?)
    }

    /// Removes a membership edge. Absent edges are a no-op.
    ///
    /// ## Errors
    ///
    /// Propagates engine failures.
    pub async fn remove_member(&self, role_key: &str, user: &str) -> Result<()> {
        Ok(self
            .engine
            .remove_member(&self.application, role_key, user)
            .await?)
    }
}

impl std::fmt::Debug for RoleStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleStore")
            .field("application", &self.application)
            .finish_non_exhaustive()
    }
}
