use serde::Serialize;
use warden_domain::{Ability, Resource};

use crate::Capabilities;

/// Buttons and row actions shown on a resource listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceAffordances {
    /// "Create" button above the listing.
    pub create: bool,
    /// Per-row "Show" link.
    pub show: bool,
    /// Per-row "Edit" link.
    pub edit: bool,
    /// Per-row "Delete" button.
    pub delete: bool,
}

impl ResourceAffordances {
    /// Resolves which listing affordances the user may see for a resource.
    #[must_use]
    pub fn for_resource(capabilities: &Capabilities, resource: Resource) -> Self {
        let allows = |ability| capabilities.can(&resource.permission(ability));

        Self {
            create: allows(Ability::Create),
            show: allows(Ability::View),
            edit: allows(Ability::Edit),
            delete: allows(Ability::Delete),
        }
    }

    /// Returns whether any per-row action is visible.
    #[must_use]
    pub fn has_row_actions(&self) -> bool {
        self.show || self.edit || self.delete
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use warden_domain::Resource;

    use super::ResourceAffordances;
    use crate::Capabilities;

    #[test]
    fn editor_sees_show_and_edit_but_not_create_or_delete() {
        let capabilities =
            Capabilities::from_permissions(Some(&json!(["users.view", "users.edit"])));

        let users = ResourceAffordances::for_resource(&capabilities, Resource::Users);
        assert_eq!(
            users,
            ResourceAffordances {
                create: false,
                show: true,
                edit: true,
                delete: false,
            }
        );
        assert!(users.has_row_actions());

        let roles = ResourceAffordances::for_resource(&capabilities, Resource::Roles);
        assert_eq!(roles, ResourceAffordances::default());
        assert!(!roles.has_row_actions());
    }
}
