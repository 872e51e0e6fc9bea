//! Role domain model.
//!
//! Roles are named groups granting membership-based authorization.
//! Each role belongs to exactly one application partition and owns a
//! set of member user identifiers (stored as edges by the engine).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::name::name_key;

/// A directory role.
///
/// Role names are unique within their application partition under
/// case-insensitive comparison. The original casing is kept for
/// display; [`Role::name_key`] yields the normalized lookup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Role {
    /// Unique identifier.
    pub id: Uuid,
    /// Application partition this role belongs to.
    pub application: String,
    /// Role name as supplied at creation time.
    pub name: String,
    /// When the role was created.
    pub created_at: DateTime<Utc>,
    /// When the role was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// Creates a new role in the given application partition.
    #[must_use]
    pub fn new(application: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            application: application.into(),
            name: name.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the normalized lookup key for this role's name.
    #[must_use]
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}
