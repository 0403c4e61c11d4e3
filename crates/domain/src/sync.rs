use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Desired association set for a sync operation.
///
/// An absent input is the empty set: syncing with no target clears every
/// association instead of leaving them unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncTarget(BTreeSet<String>);

impl SyncTarget {
    /// Builds a target from submitted names, treating `None` as empty.
    #[must_use]
    pub fn from_optional(names: Option<Vec<String>>) -> Self {
        Self::from_names(names.unwrap_or_default())
    }

    /// Builds a target from names, dropping duplicates.
    #[must_use]
    pub fn from_names(names: impl IntoIterator<Item = String>) -> Self {
        Self(names.into_iter().collect())
    }

    /// Returns whether the target clears every association.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of distinct target names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the target holds the name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    /// Iterates names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns target names absent from `catalog`, in ascending order.
    #[must_use]
    pub fn missing_from<'a>(&'a self, catalog: &BTreeSet<String>) -> Vec<&'a str> {
        self.iter().filter(|name| !catalog.contains(*name)).collect()
    }

    /// Returns the names as an owned vector for driver binds.
    #[must_use]
    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

/// Additions and removals turning a current association set into a target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Names present in the target but not yet associated.
    pub to_add: BTreeSet<String>,
    /// Names associated now but absent from the target.
    pub to_remove: BTreeSet<String>,
}

impl SyncPlan {
    /// Computes `target - current` and `current - target`.
    #[must_use]
    pub fn between(current: &BTreeSet<String>, target: &SyncTarget) -> Self {
        Self {
            to_add: target.0.difference(current).cloned().collect(),
            to_remove: current.difference(&target.0).cloned().collect(),
        }
    }

    /// Returns whether applying the plan changes nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }

    /// Applies the plan to a current set.
    #[must_use]
    pub fn apply(&self, current: &BTreeSet<String>) -> BTreeSet<String> {
        current
            .iter()
            .filter(|name| !self.to_remove.contains(*name))
            .cloned()
            .chain(self.to_add.iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::collection::btree_set;
    use proptest::prelude::*;

    use super::{SyncPlan, SyncTarget};

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|value| (*value).to_owned()).collect()
    }

    #[test]
    fn absent_input_is_empty_target() {
        let target = SyncTarget::from_optional(None);
        assert!(target.is_empty());

        let plan = SyncPlan::between(&set(&["users.view", "users.edit"]), &target);
        assert_eq!(plan.to_remove, set(&["users.edit", "users.view"]));
        assert!(plan.to_add.is_empty());
    }

    #[test]
    fn unchanged_entries_are_left_alone() {
        let current = set(&["a", "b"]);
        let plan = SyncPlan::between(&current, &SyncTarget::from_names(set(&["b", "c"])));

        assert_eq!(plan.to_add, set(&["c"]));
        assert_eq!(plan.to_remove, set(&["a"]));
        assert!(!plan.to_add.contains("b") && !plan.to_remove.contains("b"));
    }

    #[test]
    fn missing_from_reports_unknown_names() {
        let target = SyncTarget::from_names(set(&["roles.view", "roles.fly"]));
        let catalog = set(&["roles.view", "roles.edit"]);

        assert_eq!(target.missing_from(&catalog), vec!["roles.fly"]);
    }

    proptest! {
        #[test]
        fn applying_plan_yields_target(
            current in btree_set("[a-d]", 0..4),
            target in btree_set("[a-d]", 0..4),
        ) {
            let sync_target = SyncTarget::from_names(target.clone());
            let plan = SyncPlan::between(&current, &sync_target);
            let synced = plan.apply(&current);

            prop_assert_eq!(&synced, &target);
            prop_assert!(SyncPlan::between(&synced, &sync_target).is_noop());
        }
    }
}
