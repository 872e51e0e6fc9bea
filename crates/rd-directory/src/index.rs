//! Membership index.
//!
//! Derived in-memory state answering membership queries in time
//! proportional to the result, not to directory size. The index is
//! rebuilt from the role store on open and maintained incrementally on
//! every mutation; it is never a source of truth.

use std::collections::{BTreeMap, HashMap, HashSet};

use rd_model::{name_key, Role};
use rd_storage::{DirectoryEngine, StorageResult};

/// One indexed role: display name plus members keyed by normalized
/// user identifier (value keeps first-seen casing).
#[derive(Debug)]
struct RoleEntry {
    name: String,
    members: BTreeMap<String, String>,
}

/// Index from users to roles and roles to users.
///
/// All lookups take normalized keys except where noted; query results
/// return display casing.
#[derive(Debug, Default)]
pub struct MembershipIndex {
    /// Normalized role name to role entry.
    roles: HashMap<String, RoleEntry>,
    /// Normalized user identifier to normalized role names.
    users: HashMap<String, HashSet<String>>,
}

impl MembershipIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the index from an engine snapshot of one application
    /// partition.
    ///
    /// ## Errors
    ///
    /// Propagates engine failures.
    pub async fn rebuild(
        engine: &dyn DirectoryEngine,
        application: &str,
    ) -> StorageResult<Self> {
        let mut index = Self::new();
        for role in engine.list_roles(application).await? {
            let key = role.name_key();
            index.role_created(&role);
            for user in engine.list_members(application, &key).await? {
                index.member_added(&key, &user);
            }
        }
        Ok(index)
    }

    /// Records a newly created role.
    pub fn role_created(&mut self, role: &Role) {
        self.roles.insert(
            role.name_key(),
            RoleEntry {
                name: role.name.clone(),
                members: BTreeMap::new(),
            },
        );
    }

    /// Records a role deletion, dropping all of its membership edges.
    pub fn role_deleted(&mut self, role_key: &str) {
        let Some(entry) = self.roles.remove(role_key) else {
            return;
        };
        for user_key in entry.members.keys() {
            if let Some(assigned) = self.users.get_mut(user_key) {
                assigned.remove(role_key);
                if assigned.is_empty() {
                    self.users.remove(user_key);
                }
            }
        }
    }

    /// Records a new membership edge.
    pub fn member_added(&mut self, role_key: &str, user: &str) {
        let Some(entry) = self.roles.get_mut(role_key) else {
            return;
        };
        let user_key = name_key(user);
        entry
            .members
            .entry(user_key.clone())
            .or_insert_with(|| user.to_string());
        self.users
            .entry(user_key)
            .or_default()
            .insert(role_key.to_string());
    }

    /// Records a removed membership edge.
    pub fn member_removed(&mut self, role_key: &str, user: &str) {
        let user_key = name_key(user);
        if let Some(entry) = self.roles.get_mut(role_key) {
            entry.members.remove(&user_key);
        }
        if let Some(assigned) = self.users.get_mut(&user_key) {
            assigned.remove(role_key);
            if assigned.is_empty() {
                self.users.remove(&user_key);
            }
        }
    }

    /// Checks whether a role is present, by normalized key.
    #[must_use]
    pub fn contains_role(&self, role_key: &str) -> bool {
        self.roles.contains_key(role_key)
    }

    /// Returns the number of indexed roles.
    #[must_use]
    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    /// Returns the sorted display names of the roles a user is in.
    ///
    /// Unknown users yield an empty set, never an error.
    #[must_use]
    pub fn roles_for_user(&self, user: &str) -> Vec<String> {
        let Some(assigned) = self.users.get(&name_key(user)) else {
            return Vec::new();
        };
        let mut names: Vec<String> = assigned
            .iter()
            .filter_map(|key| self.roles.get(key).map(|entry| entry.name.clone()))
            .collect();
        names.sort();
        names
    }

    /// Returns the normalized keys of the roles a user is in.
    #[must_use]
    pub fn assigned_role_keys(&self, user: &str) -> HashSet<String> {
        self.users.get(&name_key(user)).cloned().unwrap_or_default()
    }

    /// Returns the members of a role, or `None` if the role is absent.
    #[must_use]
    pub fn users_in_role(&self, role_key: &str) -> Option<Vec<String>> {
        self.roles
            .get(role_key)
            .map(|entry| entry.members.values().cloned().collect())
    }

    /// Returns the members of a role whose identifier contains the
    /// pattern (case-insensitive), or `None` if the role is absent.
    #[must_use]
    pub fn find_users_in_role(&self, role_key: &str, pattern: &str) -> Option<Vec<String>> {
        let pattern = name_key(pattern);
        self.roles.get(role_key).map(|entry| {
            entry
                .members
                .iter()
                .filter(|(key, _)| key.contains(&pattern))
                .map(|(_, user)| user.clone())
                .collect()
        })
    }

    /// Set-membership check for one user and one role.
    #[must_use]
    pub fn is_user_in_role(&self, user: &str, role_key: &str) -> bool {
        self.users
            .get(&name_key(user))
            .is_some_and(|assigned| assigned.contains(role_key))
    }
}
