use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Union of the permission names contributed by every role of a user.
///
/// Derived on demand and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffectivePermissions(BTreeSet<String>);

impl EffectivePermissions {
    /// Builds the set from permission names, dropping duplicates.
    #[must_use]
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        Self(names.into_iter().collect())
    }

    /// Builds the union of several role permission sets.
    #[must_use]
    pub fn union_of<R, N>(role_permissions: R) -> Self
    where
        R: IntoIterator<Item = N>,
        N: IntoIterator<Item = String>,
    {
        Self(role_permissions.into_iter().flatten().collect())
    }

    /// Returns whether the set holds the permission name.
    #[must_use]
    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }

    /// Returns whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of distinct permission names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the names in ascending order for page payloads.
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}
