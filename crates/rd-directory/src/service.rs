//! Directory service.
//!
//! The public contract: input validation, bulk-operation semantics, and
//! orchestration of the role store and membership index. Every mutating
//! call updates store and index as one unit behind a per-partition
//! write lock; read-only queries share the read half.

use std::sync::Arc;

use rd_model::name_key;
use rd_storage::DirectoryEngine;
use tokio::sync::RwLock;

use crate::available::AvailableRoles;
use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::identity::IdentityContext;
use crate::index::MembershipIndex;
use crate::store::RoleStore;
use crate::validate::{ensure_elements, ensure_valid_name};

/// Store and index guarded together: a reader never observes a store
/// change without the matching index change.
struct Inner {
    store: RoleStore,
    index: MembershipIndex,
}

/// Role directory for one application partition.
///
/// Construct with [`RoleDirectory::open`], which rebuilds the
/// membership index from the engine. All operations fail with a
/// disabled error while the configuration has role management turned
/// off.
pub struct RoleDirectory {
    config: DirectoryConfig,
    inner: RwLock<Inner>,
}

impl RoleDirectory {
    /// Opens a directory over the given engine, rebuilding the
    /// membership index from the stored state.
    ///
    /// ## Errors
    ///
    /// Propagates engine failures from the index rebuild.
    pub async fn open(config: DirectoryConfig, engine: Arc<dyn DirectoryEngine>) -> Result<Self> {
        let index = MembershipIndex::rebuild(engine.as_ref(), &config.application).await?;
        let store = RoleStore::new(engine, config.application.clone());

        tracing::info!(
            application = %config.application,
            roles = index.role_count(),
            "role directory opened"
        );

        Ok(Self {
            config,
            inner: RwLock::new(Inner { store, index }),
        })
    }

    /// Returns the directory configuration record.
    ///
    /// The cookie settings within are pass-through for an external
    /// session layer; the directory itself never interprets them.
    #[must_use]
    pub const fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    /// Returns the application partition this directory serves.
    #[must_use]
    pub fn application(&self) -> &str {
        &self.config.application
    }

    fn ensure_enabled(&self, operation: &'static str) -> Result<()> {
        if self.config.enabled {
            Ok(())
        } else {
            Err(DirectoryError::disabled(operation))
        }
    }

    // === Role CRUD ===

    /// Adds a new role to the directory.
    pub async fn create_role(&self, name: &str) -> Result<()> {
        self.ensure_enabled("create_role")?;

        let mut inner = self.inner.write().await;
        let role = inner.store.create_role(name).await?;
        inner.index.role_created(&role);
        tracing::debug!(role = %role.name, "role created");
        Ok(())
    }

    /// Removes a role and all of its membership edges.
    ///
    /// A role that still has members is only deleted when `force` is
    /// true.
    pub async fn delete_role(&self, name: &str, force: bool) -> Result<()> {
        self.ensure_enabled("delete_role")?;

        let mut inner = self.inner.write().await;
        inner.store.delete_role(name, force).await?;
        inner.index.role_deleted(&name_key(name));
        tracing::debug!(role = name, force, "role deleted");
        Ok(())
    }

    /// Checks whether the named role exists.
    pub async fn role_exists(&self, name: &str) -> Result<bool> {
        self.ensure_enabled("role_exists")?;

        let inner = self.inner.read().await;
        inner.store.role_exists(name).await
    }

    /// Lists the names of all roles in the partition.
    pub async fn list_roles(&self) -> Result<Vec<String>> {
        self.ensure_enabled("list_roles")?;

        let inner = self.inner.read().await;
        let roles = inner.store.list_roles().await?;
        Ok(roles.into_iter().map(|role| role.name).collect())
    }

    // === Membership mutation ===

    /// Adds one user to one role. Adding an existing member is a no-op.
    pub async fn add_user_to_role(&self, user: &str, role: &str) -> Result<()> {
        self.add_members("add_user_to_role", &[user], &[role]).await
    }

    /// Adds several users to one role.
    pub async fn add_users_to_role(&self, users: &[&str], role: &str) -> Result<()> {
        self.add_members("add_users_to_role", users, &[role]).await
    }

    /// Adds one user to several roles.
    pub async fn add_user_to_roles(&self, user: &str, roles: &[&str]) -> Result<()> {
        self.add_members("add_user_to_roles", &[user], roles).await
    }

    /// Adds several users to several roles.
    pub async fn add_users_to_roles(&self, users: &[&str], roles: &[&str]) -> Result<()> {
        self.add_members("add_users_to_roles", users, roles).await
    }

    /// Removes one user from one role. Absent edges are a no-op.
    pub async fn remove_user_from_role(&self, user: &str, role: &str) -> Result<()> {
        self.remove_members("remove_user_from_role", &[user], &[role])
            .await
    }

    /// Removes several users from one role.
    pub async fn remove_users_from_role(&self, users: &[&str], role: &str) -> Result<()> {
        self.remove_members("remove_users_from_role", users, &[role])
            .await
    }

    /// Removes one user from several roles.
    pub async fn remove_user_from_roles(&self, user: &str, roles: &[&str]) -> Result<()> {
        self.remove_members("remove_user_from_roles", &[user], roles)
            .await
    }

    /// Removes several users from several roles.
    pub async fn remove_users_from_roles(&self, users: &[&str], roles: &[&str]) -> Result<()> {
        self.remove_members("remove_users_from_roles", users, roles)
            .await
    }

    async fn add_members(
        &self,
        operation: &'static str,
        users: &[&str],
        roles: &[&str],
    ) -> Result<()> {
        self.ensure_enabled(operation)?;
        ensure_elements(operation, "username", users)?;
        ensure_elements(operation, "role_name", roles)?;

        let mut inner = self.inner.write().await;
        let role_keys = require_roles(operation, &inner.index, roles)?;

        for key in &role_keys {
            for &user in users {
                if inner.index.is_user_in_role(user, key) {
                    continue;
                }
                inner.store.add_member(key, user).await?;
                inner.index.member_added(key, user);
            }
        }

        tracing::debug!(
            operation,
            users = users.len(),
            roles = roles.len(),
            "membership edges added"
        );
        Ok(())
    }

    async fn remove_members(
        &self,
        operation: &'static str,
        users: &[&str],
        roles: &[&str],
    ) -> Result<()> {
        self.ensure_enabled(operation)?;
        ensure_elements(operation, "username", users)?;
        ensure_elements(operation, "role_name", roles)?;

        let mut inner = self.inner.write().await;
        let role_keys = require_roles(operation, &inner.index, roles)?;

        for key in &role_keys {
            for &user in users {
                if !inner.index.is_user_in_role(user, key) {
                    continue;
                }
                inner.store.remove_member(key, user).await?;
                inner.index.member_removed(key, user);
            }
        }

        tracing::debug!(
            operation,
            users = users.len(),
            roles = roles.len(),
            "membership edges removed"
        );
        Ok(())
    }

    // === Membership queries ===

    /// Lists the roles a user is in. Unknown users yield an empty set.
    pub async fn roles_for_user(&self, user: &str) -> Result<Vec<String>> {
        self.ensure_enabled("roles_for_user")?;
        ensure_valid_name("roles_for_user", "username", user)?;

        let inner = self.inner.read().await;
        Ok(inner.index.roles_for_user(user))
    }

    /// Lists the members of a role.
    pub async fn users_in_role(&self, role: &str) -> Result<Vec<String>> {
        self.ensure_enabled("users_in_role")?;
        ensure_valid_name("users_in_role", "role_name", role)?;

        let inner = self.inner.read().await;
        inner
            .index
            .users_in_role(&name_key(role))
            .ok_or_else(|| DirectoryError::not_found("users_in_role", role))
    }

    /// Lists the members of a role whose identifier contains the match
    /// string (case-insensitive).
    pub async fn find_users_in_role(&self, role: &str, username_to_match: &str) -> Result<Vec<String>> {
        self.ensure_enabled("find_users_in_role")?;
        ensure_valid_name("find_users_in_role", "role_name", role)?;
        if username_to_match.is_empty() {
            return Err(DirectoryError::invalid_name(
                "find_users_in_role",
                "username_to_match",
                username_to_match,
            ));
        }

        let inner = self.inner.read().await;
        inner
            .index
            .find_users_in_role(&name_key(role), username_to_match)
            .ok_or_else(|| DirectoryError::not_found("find_users_in_role", role))
    }

    /// Checks whether a user is in a role.
    pub async fn is_user_in_role(&self, user: &str, role: &str) -> Result<bool> {
        self.ensure_enabled("is_user_in_role")?;
        ensure_valid_name("is_user_in_role", "username", user)?;
        ensure_valid_name("is_user_in_role", "role_name", role)?;

        let inner = self.inner.read().await;
        Ok(inner.index.is_user_in_role(user, &name_key(role)))
    }

    /// Lists the roles the currently logged-on user is in.
    ///
    /// Fails with a no-current-user error when the identity
    /// collaborator reports no active identity.
    pub async fn roles_for_current_user(
        &self,
        identity: &dyn IdentityContext,
    ) -> Result<Vec<String>> {
        self.ensure_enabled("roles_for_current_user")?;
        let user = identity
            .current_user()
            .ok_or_else(|| DirectoryError::no_current_user("roles_for_current_user"))?;
        ensure_valid_name("roles_for_current_user", "username", user)?;

        let inner = self.inner.read().await;
        Ok(inner.index.roles_for_user(user))
    }

    /// Checks whether the currently logged-on user is in a role.
    pub async fn is_current_user_in_role(
        &self,
        identity: &dyn IdentityContext,
        role: &str,
    ) -> Result<bool> {
        self.ensure_enabled("is_current_user_in_role")?;
        let user = identity
            .current_user()
            .ok_or_else(|| DirectoryError::no_current_user("is_current_user_in_role"))?;
        ensure_valid_name("is_current_user_in_role", "username", user)?;
        ensure_valid_name("is_current_user_in_role", "role_name", role)?;

        let inner = self.inner.read().await;
        Ok(inner.index.is_user_in_role(user, &name_key(role)))
    }

    /// Produces the roles not currently assigned to a user: the
    /// complement of [`RoleDirectory::roles_for_user`] against
    /// [`RoleDirectory::list_roles`], as a restartable snapshot.
    pub async fn available_roles_for_user(&self, user: &str) -> Result<AvailableRoles> {
        self.ensure_enabled("available_roles_for_user")?;
        ensure_valid_name("available_roles_for_user", "username", user)?;

        let inner = self.inner.read().await;
        let roles = inner.store.list_roles().await?;
        let assigned = inner.index.assigned_role_keys(user);
        Ok(AvailableRoles::new(roles, assigned))
    }
}

/// Resolves bulk role arguments to normalized keys, requiring every
/// role to exist before any edge is touched.
fn require_roles(
    operation: &'static str,
    index: &MembershipIndex,
    roles: &[&str],
) -> Result<Vec<String>> {
    let mut keys = Vec::with_capacity(roles.len());
    for &role in roles {
        let key = name_key(role);
        if !index.contains_role(&key) {
            return Err(DirectoryError::not_found(operation, role));
        }
        keys.push(key);
    }
    Ok(keys)
}
