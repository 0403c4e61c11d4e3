use warden_domain::{EmailAddress, RoleName, SyncTarget, UserName};

/// Submitted payload for creating or updating a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRoleInput {
    /// Role name.
    pub name: String,
    /// Target permission names; `None` clears every permission.
    pub permissions: Option<Vec<String>>,
}

/// Submitted payload for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Target role names; `None` assigns no role.
    pub roles: Option<Vec<String>>,
}

/// Submitted payload for updating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserInput {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// New plaintext password; absent or empty keeps the current hash.
    pub password: Option<String>,
    /// Target role names; `None` clears every role.
    pub roles: Option<Vec<String>>,
}

/// Validated role write handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleWrite {
    /// Role name.
    pub name: RoleName,
    /// Exact permission set after the write.
    pub permissions: SyncTarget,
}

/// Validated user creation handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserWrite {
    /// Display name.
    pub name: UserName,
    /// Email address.
    pub email: EmailAddress,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Exact role set after the write.
    pub roles: SyncTarget,
}

/// Validated user update handed to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdateWrite {
    /// Display name.
    pub name: UserName,
    /// Email address.
    pub email: EmailAddress,
    /// Replacement password hash, if a new password was submitted.
    pub password_hash: Option<String>,
    /// Exact role set after the write.
    pub roles: SyncTarget,
}
