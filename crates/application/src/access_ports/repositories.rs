use async_trait::async_trait;

use warden_core::AppResult;
use warden_domain::{EmailAddress, PermissionName, RoleId, SyncTarget, UserId};

use super::inputs::{NewUserWrite, RoleWrite, UserUpdateWrite};
use super::records::{PermissionRecord, RoleRecord, RoleSummary, UserRecord};

/// Repository port for the flat permission catalog.
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// Lists catalog entries ordered by name.
    async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>>;

    /// Creates the permission if missing and returns the stored entry.
    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<PermissionRecord>;
}

/// Repository port for roles and the role-permission association.
///
/// Writes that touch associations validate target names against the catalog
/// and apply row and association changes in a single transaction.
#[async_trait]
pub trait RoleRepository: Send + Sync {
    /// Lists roles with their permissions ordered by role name.
    async fn list_roles(&self) -> AppResult<Vec<RoleRecord>>;

    /// Finds a role by identifier.
    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>>;

    /// Creates a role and attaches exactly the target permissions.
    async fn create_role(&self, input: RoleWrite) -> AppResult<RoleRecord>;

    /// Renames a role and replaces its permissions with the target.
    async fn update_role(&self, role_id: RoleId, input: RoleWrite) -> AppResult<RoleRecord>;

    /// Replaces the role's permissions with the target and returns the new set.
    async fn sync_role_permissions(
        &self,
        role_id: RoleId,
        target: &SyncTarget,
    ) -> AppResult<Vec<PermissionRecord>>;

    /// Deletes a role, detaching it from every user.
    async fn delete_role(&self, role_id: RoleId) -> AppResult<()>;
}

/// Repository port for users and the user-role association.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Lists users with their roles ordered by id.
    async fn list_users(&self) -> AppResult<Vec<UserRecord>>;

    /// Finds a user by identifier.
    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Finds a user by normalized email.
    async fn find_user_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserRecord>>;

    /// Creates a user and assigns exactly the target roles.
    async fn create_user(&self, input: NewUserWrite) -> AppResult<UserRecord>;

    /// Updates a user and replaces its roles with the target.
    async fn update_user(&self, user_id: UserId, input: UserUpdateWrite) -> AppResult<UserRecord>;

    /// Replaces the user's roles with the target and returns the new set.
    async fn sync_user_roles(
        &self,
        user_id: UserId,
        target: &SyncTarget,
    ) -> AppResult<Vec<RoleSummary>>;

    /// Deletes a user and its role assignments.
    async fn delete_user(&self, user_id: UserId) -> AppResult<()>;
}

/// Repository port for effective permission lookups.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Lists distinct permission names granted to a user through its roles.
    async fn list_permissions_for_user(&self, user_id: UserId) -> AppResult<Vec<String>>;
}

/// Port for password hashing. Keeps the application free of direct
/// cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;
}
