use chrono::{DateTime, Utc};
use warden_domain::{PermissionId, RoleId, UserId};

/// Permission catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionRecord {
    /// Stable permission identifier.
    pub permission_id: PermissionId,
    /// Unique permission name.
    pub name: String,
}

/// Role reference attached to a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    /// Stable role identifier.
    pub role_id: RoleId,
    /// Unique role name.
    pub name: String,
}

/// Role with its current permission set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    /// Stable role identifier.
    pub role_id: RoleId,
    /// Unique role name.
    pub name: String,
    /// Permissions attached to the role, ordered by name.
    pub permissions: Vec<PermissionRecord>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl RoleRecord {
    /// Returns attached permission names in stored order.
    #[must_use]
    pub fn permission_names(&self) -> Vec<String> {
        self.permissions
            .iter()
            .map(|permission| permission.name.clone())
            .collect()
    }
}

/// User with its current role set. The password hash never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Stable user identifier.
    pub user_id: UserId,
    /// Display name.
    pub name: String,
    /// Unique lowercase email address.
    pub email: String,
    /// Roles assigned to the user, ordered by name.
    pub roles: Vec<RoleSummary>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Returns assigned role names in stored order.
    #[must_use]
    pub fn role_names(&self) -> Vec<String> {
        self.roles.iter().map(|role| role.name.clone()).collect()
    }
}
