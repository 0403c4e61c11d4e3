use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use warden_application::{
    AuthorizationRepository, NewUserWrite, PermissionRecord, PermissionRepository, RoleRecord,
    RoleRepository, RoleSummary, RoleWrite, UserRecord, UserRepository, UserUpdateWrite,
    unknown_permission_errors, unknown_role_errors,
};
use warden_core::{AppError, AppResult, FieldErrors};
use warden_domain::{
    EmailAddress, PermissionId, PermissionName, RoleId, SyncPlan, SyncTarget, UserId,
};

mod permissions;
mod roles;
mod users;

/// In-memory implementation of every access-control port.
///
/// Each mutation runs under a single write lock, so row writes and association
/// syncs are atomic with respect to other requests.
#[derive(Debug, Default)]
pub struct InMemoryAccessRepository {
    state: RwLock<AccessState>,
}

impl InMemoryAccessRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Default)]
struct AccessState {
    last_permission_id: i64,
    last_role_id: i64,
    last_user_id: i64,
    permissions: BTreeMap<i64, String>,
    roles: BTreeMap<i64, StoredRole>,
    users: BTreeMap<i64, StoredUser>,
}

#[derive(Debug, Clone)]
struct StoredRole {
    name: String,
    permission_ids: BTreeSet<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredUser {
    name: String,
    email: String,
    password_hash: String,
    role_ids: BTreeSet<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccessState {
    fn permission_records(&self, ids: &BTreeSet<i64>) -> Vec<PermissionRecord> {
        let mut records: Vec<PermissionRecord> = ids
            .iter()
            .filter_map(|id| {
                self.permissions.get(id).map(|name| PermissionRecord {
                    permission_id: PermissionId::new(*id),
                    name: name.clone(),
                })
            })
            .collect();
        records.sort_by(|left, right| left.name.cmp(&right.name));
        records
    }

    fn role_summaries(&self, ids: &BTreeSet<i64>) -> Vec<RoleSummary> {
        let mut summaries: Vec<RoleSummary> = ids
            .iter()
            .filter_map(|id| {
                self.roles.get(id).map(|role| RoleSummary {
                    role_id: RoleId::new(*id),
                    name: role.name.clone(),
                })
            })
            .collect();
        summaries.sort_by(|left, right| left.name.cmp(&right.name));
        summaries
    }

    fn role_record(&self, role_id: i64, role: &StoredRole) -> RoleRecord {
        RoleRecord {
            role_id: RoleId::new(role_id),
            name: role.name.clone(),
            permissions: self.permission_records(&role.permission_ids),
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }

    fn user_record(&self, user_id: i64, user: &StoredUser) -> UserRecord {
        UserRecord {
            user_id: UserId::new(user_id),
            name: user.name.clone(),
            email: user.email.clone(),
            roles: self.role_summaries(&user.role_ids),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }

    /// Computes the permission ids a role holds after syncing to the target.
    fn synced_permission_ids(
        &self,
        current: &BTreeSet<i64>,
        target: &SyncTarget,
    ) -> AppResult<BTreeSet<i64>> {
        let by_name: BTreeMap<&str, i64> = self
            .permissions
            .iter()
            .map(|(id, name)| (name.as_str(), *id))
            .collect();
        let current_names = current
            .iter()
            .filter_map(|id| self.permissions.get(id).cloned())
            .collect();

        synced_ids(&by_name, &current_names, target, unknown_permission_errors)
    }

    /// Computes the role ids a user holds after syncing to the target.
    fn synced_role_ids(
        &self,
        current: &BTreeSet<i64>,
        target: &SyncTarget,
    ) -> AppResult<BTreeSet<i64>> {
        let by_name: BTreeMap<&str, i64> = self
            .roles
            .iter()
            .map(|(id, role)| (role.name.as_str(), *id))
            .collect();
        let current_names = current
            .iter()
            .filter_map(|id| self.roles.get(id).map(|role| role.name.clone()))
            .collect();

        synced_ids(&by_name, &current_names, target, unknown_role_errors)
    }
}

fn synced_ids(
    by_name: &BTreeMap<&str, i64>,
    current_names: &BTreeSet<String>,
    target: &SyncTarget,
    unknown_members: fn(&[&str]) -> FieldErrors,
) -> AppResult<BTreeSet<i64>> {
    let missing: Vec<&str> = target
        .iter()
        .filter(|name| !by_name.contains_key(name))
        .collect();
    unknown_members(&missing).into_result()?;

    SyncPlan::between(current_names, target)
        .apply(current_names)
        .iter()
        .map(|name| {
            by_name.get(name.as_str()).copied().ok_or_else(|| {
                AppError::Internal(format!("association member '{name}' vanished during sync"))
            })
        })
        .collect()
}

fn taken(field: &str) -> AppError {
    AppError::InvalidFields(FieldErrors::single(
        field,
        format!("the {field} has already been taken"),
    ))
}

#[async_trait]
impl PermissionRepository for InMemoryAccessRepository {
    async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        self.list_permissions_impl().await
    }

    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<PermissionRecord> {
        self.ensure_permission_impl(name).await
    }
}

#[async_trait]
impl RoleRepository for InMemoryAccessRepository {
    async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
        self.list_roles_impl().await
    }

    async fn find_role(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>> {
        self.find_role_impl(role_id).await
    }

    async fn create_role(&self, input: RoleWrite) -> AppResult<RoleRecord> {
        self.create_role_impl(input).await
    }

    async fn update_role(&self, role_id: RoleId, input: RoleWrite) -> AppResult<RoleRecord> {
        self.update_role_impl(role_id, input).await
    }

    async fn sync_role_permissions(
        &self,
        role_id: RoleId,
        target: &SyncTarget,
    ) -> AppResult<Vec<PermissionRecord>> {
        self.sync_role_permissions_impl(role_id, target).await
    }

    async fn delete_role(&self, role_id: RoleId) -> AppResult<()> {
        self.delete_role_impl(role_id).await
    }
}

#[async_trait]
impl UserRepository for InMemoryAccessRepository {
    async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.list_users_impl().await
    }

    async fn find_user(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_user_impl(user_id).await
    }

    async fn find_user_by_email(&self, email: &EmailAddress) -> AppResult<Option<UserRecord>> {
        self.find_user_by_email_impl(email).await
    }

    async fn create_user(&self, input: NewUserWrite) -> AppResult<UserRecord> {
        self.create_user_impl(input).await
    }

    async fn update_user(&self, user_id: UserId, input: UserUpdateWrite) -> AppResult<UserRecord> {
        self.update_user_impl(user_id, input).await
    }

    async fn sync_user_roles(
        &self,
        user_id: UserId,
        target: &SyncTarget,
    ) -> AppResult<Vec<RoleSummary>> {
        self.sync_user_roles_impl(user_id, target).await
    }

    async fn delete_user(&self, user_id: UserId) -> AppResult<()> {
        self.delete_user_impl(user_id).await
    }
}

#[async_trait]
impl AuthorizationRepository for InMemoryAccessRepository {
    async fn list_permissions_for_user(&self, user_id: UserId) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        let Some(user) = state.users.get(&user_id.as_i64()) else {
            return Ok(Vec::new());
        };

        let names: BTreeSet<String> = user
            .role_ids
            .iter()
            .filter_map(|role_id| state.roles.get(role_id))
            .flat_map(|role| role.permission_ids.iter())
            .filter_map(|permission_id| state.permissions.get(permission_id).cloned())
            .collect();

        Ok(names.into_iter().collect())
    }
}
