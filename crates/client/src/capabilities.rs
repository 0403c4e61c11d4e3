use std::collections::BTreeSet;

use serde_json::Value;

/// Permission names propagated with the current page render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capabilities {
    permissions: BTreeSet<String>,
}

impl Capabilities {
    /// Reads `props.auth.permissions` from a full page payload.
    #[must_use]
    pub fn from_page(page: &Value) -> Self {
        page.get("props")
            .map(Self::from_props)
            .unwrap_or_default()
    }

    /// Reads `auth.permissions` from page props.
    #[must_use]
    pub fn from_props(props: &Value) -> Self {
        Self::from_permissions(
            props
                .get("auth")
                .and_then(|auth| auth.get("permissions")),
        )
    }

    /// Reads a permission list. Anything but an array of strings yields no capability.
    #[must_use]
    pub fn from_permissions(permissions: Option<&Value>) -> Self {
        let Some(Value::Array(entries)) = permissions else {
            return Self::default();
        };

        let names: Option<BTreeSet<String>> = entries
            .iter()
            .map(|entry| entry.as_str().map(str::to_owned))
            .collect();

        names
            .map(|permissions| Self { permissions })
            .unwrap_or_default()
    }

    /// Returns whether the named permission is present.
    #[must_use]
    pub fn can(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Returns whether any of the named permissions is present.
    #[must_use]
    pub fn can_any(&self, permissions: &[&str]) -> bool {
        permissions.iter().any(|permission| self.can(permission))
    }

    /// Returns whether no permission was propagated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }
}

/// Checks one permission against a raw `auth.permissions` value.
#[must_use]
pub fn can(permissions: Option<&Value>, permission: &str) -> bool {
    Capabilities::from_permissions(permissions).can(permission)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::{Value, json};

    use super::{Capabilities, can};

    #[test]
    fn can_reports_membership() {
        let permissions = json!(["roles.view", "roles.edit"]);

        assert!(can(Some(&permissions), "roles.edit"));
        assert!(!can(Some(&permissions), "roles.delete"));
    }

    #[test]
    fn empty_or_absent_permissions_deny() {
        assert!(!can(Some(&json!([])), "roles.edit"));
        assert!(!can(None, "roles.edit"));
    }

    #[test]
    fn malformed_payloads_deny() {
        assert!(!can(Some(&json!("roles.edit")), "roles.edit"));
        assert!(!can(Some(&json!({"roles.edit": true})), "roles.edit"));
        assert!(!can(Some(&json!(["roles.edit", 7])), "roles.edit"));
        assert!(!can(Some(&Value::Null), "roles.edit"));
    }

    #[test]
    fn from_page_reads_nested_auth_props() {
        let page = json!({
            "component": "Users/Index",
            "props": {
                "auth": {
                    "user": {"id": 1, "name": "Alice", "email": "alice@example.com"},
                    "permissions": ["users.view"]
                }
            },
            "url": "/users"
        });

        let capabilities = Capabilities::from_page(&page);
        assert!(capabilities.can("users.view"));
        assert!(capabilities.can_any(&["users.edit", "users.view"]));
        assert!(!capabilities.can_any(&["users.edit", "users.delete"]));
    }

    #[test]
    fn from_page_without_auth_is_empty() {
        assert!(Capabilities::from_page(&json!({"props": {}})).is_empty());
        assert!(Capabilities::from_page(&json!({})).is_empty());
    }

    proptest! {
        #[test]
        fn can_matches_list_membership(
            names in proptest::collection::vec("[a-z]{1,6}\\.[a-z]{1,6}", 0..8),
            probe in "[a-z]{1,6}\\.[a-z]{1,6}",
        ) {
            let permissions = Value::from(names.clone());
            prop_assert_eq!(can(Some(&permissions), &probe), names.contains(&probe));
        }
    }
}
