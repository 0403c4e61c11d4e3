//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use warden_application::{NewUserWrite, RoleSummary, UserRecord, UserRepository, UserUpdateWrite};
use warden_core::{AppError, AppResult};
use warden_domain::{EmailAddress, RoleId, SyncTarget, UserId};

use crate::postgres_association_sync::{MemberRow, USER_ROLES, map_unique_violation};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    user_name: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    role_id: Option<i64>,
    role_name: Option<String>,
}

mod account;
mod lookup;

#[async_trait]
impl UserRepository for PostgresUserRepository {
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

/// Folds joined rows, already ordered by user id, into user records.
fn aggregate_users(rows: Vec<UserRow>) -> Vec<UserRecord> {
    let mut users: Vec<UserRecord> = Vec::new();

    for row in rows {
        let starts_new_user = users
            .last()
            .is_none_or(|user| user.user_id.as_i64() != row.user_id);
        if starts_new_user {
            users.push(UserRecord {
                user_id: UserId::new(row.user_id),
                name: row.user_name,
                email: row.email,
                roles: Vec::new(),
                created_at: row.created_at,
                updated_at: row.updated_at,
            });
        }

        if let (Some(role_id), Some(role_name), Some(user)) =
            (row.role_id, row.role_name, users.last_mut())
        {
            user.roles.push(RoleSummary {
                role_id: RoleId::new(role_id),
                name: role_name,
            });
        }
    }

    users
}

fn role_summaries(rows: Vec<MemberRow>) -> Vec<RoleSummary> {
    rows.into_iter()
        .map(|row| RoleSummary {
            role_id: RoleId::new(row.id),
            name: row.name,
        })
        .collect()
}

fn map_user_write_error(error: sqlx::Error) -> AppError {
    map_unique_violation(error, "email", "save user")
}

#[cfg(test)]
mod tests;
