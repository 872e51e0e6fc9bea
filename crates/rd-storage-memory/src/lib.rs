//! # rd-storage-memory
//!
//! In-memory implementation of the directory storage engine.
//!
//! Useful for tests and for embedding the directory without external
//! storage. All data is lost when the engine is dropped.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use parking_lot::RwLock;
use rd_model::Role;
use rd_storage::{DirectoryEngine, StorageError, StorageResult};

/// A stored role together with its membership edges.
///
/// Members are keyed by the normalized user identifier; the value keeps
/// the casing of the first insert for display.
#[derive(Debug, Clone)]
struct StoredRole {
    role: Role,
    members: BTreeMap<String, String>,
}

/// In-memory directory storage engine.
///
/// Roles are held per application partition in a map keyed by the
/// normalized role name, so `list_roles` order is stable (key order)
/// within a snapshot.
#[derive(Debug, Default)]
pub struct MemoryEngine {
    partitions: RwLock<HashMap<String, BTreeMap<String, StoredRole>>>,
}

impl MemoryEngine {
    /// Creates a new empty engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of roles stored for an application partition.
    #[must_use]
    pub fn role_count(&self, application: &str) -> usize {
        self.partitions
            .read()
            .get(application)
            .map_or(0, BTreeMap::len)
    }
}

#[async_trait]
impl DirectoryEngine for MemoryEngine {
    async fn insert_role(&self, role: &Role) -> StorageResult<()> {
        let mut partitions = self.partitions.write();
        let roles = partitions.entry(role.application.clone()).or_default();
        let key = role.name_key();

        if roles.contains_key(&key) {
            return Err(StorageError::duplicate("Role", key));
        }

        roles.insert(
            key,
            StoredRole {
                role: role.clone(),
                members: BTreeMap::new(),
            },
        );
        Ok(())
    }

    async fn delete_role(&self, application: &str, name_key: &str) -> StorageResult<()> {
        let mut partitions = self.partitions.write();
        let roles = partitions
            .get_mut(application)
            .ok_or_else(|| StorageError::not_found("Role", name_key))?;

        // Removing the entry drops its membership edges with it.
        if roles.remove(name_key).is_none() {
            return Err(StorageError::not_found("Role", name_key));
        }
        Ok(())
    }

    async fn insert_member(
        &self,
        application: &str,
        name_key: &str,
        user: &str,
    ) -> StorageResult<()> {
        let mut partitions = self.partitions.write();
        let stored = partitions
            .get_mut(application)
            .and_then(|roles| roles.get_mut(name_key))
            .ok_or_else(|| StorageError::not_found("Role", name_key))?;

        stored
            .members
            .entry(rd_model::name_key(user))
            .or_insert_with(|| user.to_string());
        Ok(())
    }

    async fn remove_member(
        &self,
        application: &str,
        name_key: &str,
        user: &str,
    ) -> StorageResult<()> {
        let mut partitions = self.partitions.write();
        let stored = partitions
            .get_mut(application)
            .and_then(|roles| roles.get_mut(name_key))
            .ok_or_else(|| StorageError::not_found("Role", name_key))?;

        stored.members.remove(&rd_model::name_key(user));
        Ok(())
    }

    async fn list_roles(&self, application: &str) -> StorageResult<Vec<Role>> {
        let partitions = self.partitions.read();
        Ok(partitions
            .get(application)
            .map(|roles| roles.values().map(|s| s.role.clone()).collect())
            .unwrap_or_default())
    }

    async fn list_members(&self, application: &str, name_key: &str) -> StorageResult<Vec<String>> {
        let partitions = self.partitions.read();
        let stored = partitions
            .get(application)
            .and_then(|roles| roles.get(name_key))
            .ok_or_else(|| StorageError::not_found("Role", name_key))?;

        Ok(stored.members.values().cloned().collect())
    }
}
