//! Lazy complement of a user's assigned roles.

use std::collections::HashSet;

use rd_model::Role;

/// The roles not currently assigned to a user.
///
/// A finite, restartable sequence over a snapshot of the directory:
/// iterate it as many times as needed, each pass yields the same
/// complement in the same (unspecified) order.
#[derive(Debug, Clone)]
pub struct AvailableRoles {
    /// Display name and normalized key of every role in the snapshot.
    entries: Vec<(String, String)>,
    /// Normalized keys of the user's assigned roles.
    assigned: HashSet<String>,
}

impl AvailableRoles {
    pub(crate) fn new(roles: Vec<Role>, assigned: HashSet<String>) -> Self {
        Self {
            entries: roles
                .into_iter()
                .map(|role| {
                    let key = role.name_key();
                    (role.name, key)
                })
                .collect(),
            assigned,
        }
    }

    /// Iterates over the unassigned role names.
    #[must_use]
    pub fn iter(&self) -> AvailableRolesIter<'_> {
        AvailableRolesIter {
            entries: self.entries.iter(),
            assigned: &self.assigned,
        }
    }
}

impl<'a> IntoIterator for &'a AvailableRoles {
    type Item = &'a str;
    type IntoIter = AvailableRolesIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over unassigned role names.
#[derive(Debug)]
pub struct AvailableRolesIter<'a> {
    entries: std::slice::Iter<'a, (String, String)>,
    assigned: &'a HashSet<String>,
}

impl<'a> Iterator for AvailableRolesIter<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.entries
            .by_ref()
            .find(|(_, key)| !self.assigned.contains(key))
            .map(|(name, _)| name.as_str())
    }
}
