use serde::Serialize;
use warden_domain::{Ability, Resource};

use crate::Capabilities;

/// Entry of the main navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavigationItem {
    /// Visible label.
    pub label: &'static str,
    /// Target path.
    pub href: &'static str,
}

const DASHBOARD: NavigationItem = NavigationItem {
    label: "Dashboard",
    href: "/dashboard",
};

const USERS: NavigationItem = NavigationItem {
    label: "Users",
    href: "/users",
};

const ROLES: NavigationItem = NavigationItem {
    label: "Roles",
    href: "/roles",
};

/// Builds the main navigation for the current user.
///
/// Dashboard and Users are always listed. Roles appears only when the user
/// holds any role management permission.
#[must_use]
pub fn main_navigation(capabilities: &Capabilities) -> Vec<NavigationItem> {
    let mut items = vec![DASHBOARD, USERS];

    let role_permissions: Vec<String> = Ability::all()
        .iter()
        .map(|ability| Resource::Roles.permission(*ability))
        .collect();
    if role_permissions
        .iter()
        .any(|permission| capabilities.can(permission))
    {
        items.push(ROLES);
    }

    items
}
