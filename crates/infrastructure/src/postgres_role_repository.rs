use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use warden_application::{PermissionRecord, RoleRecord, RoleRepository, RoleWrite};
use warden_core::{AppError, AppResult};
use warden_domain::{PermissionId, RoleId, SyncTarget};

use crate::postgres_association_sync::{MemberRow, ROLE_PERMISSIONS, map_unique_violation};

mod roles;

/// PostgreSQL-backed repository for roles and their permissions.
#[derive(Clone)]
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    role_id: i64,
    role_name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    permission_id: Option<i64>,
    permission_name: Option<String>,
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
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

/// Folds joined rows, already ordered by role name, into role records.
fn aggregate_roles(rows: Vec<RoleRow>) -> Vec<RoleRecord> {
    let mut roles: Vec<RoleRecord> = Vec::new();

    for row in rows {
        let starts_new_role = roles
            .last()
            .is_none_or(|role| role.role_id.as_i64() != row.role_id);
        if starts_new_role {
            roles.push(RoleRecord {
                role_id: RoleId::new(row.role_id),
                name: row.role_name,
                permissions: Vec::new(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }

        if let (Some(permission_id), Some(permission_name), Some(role)) =
            (row.permission_id, row.permission_name, roles.last_mut())
        {
            role.permissions.push(PermissionRecord {
                permission_id: PermissionId::new(permission_id),
                name: permission_name,
            });
        }
    }

    roles
}

fn permission_records(rows: Vec<MemberRow>) -> Vec<PermissionRecord> {
    rows.into_iter()
        .map(|row| PermissionRecord {
            permission_id: PermissionId::new(row.id),
            name: row.name,
        })
        .collect()
}

fn map_role_write_error(error: sqlx::Error) -> AppError {
    map_unique_violation(error, "name", "save role")
}

#[cfg(test)]
mod tests;
