use async_trait::async_trait;

use warden_application::AuthorizationRepository;
use warden_core::{AppError, AppResult};
use warden_domain::UserId;

use sqlx::PgPool;

/// PostgreSQL-backed repository for effective permission lookups.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn list_permissions_for_user(&self, user_id: UserId) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT permissions.name
            FROM user_roles
            INNER JOIN role_permissions
                ON role_permissions.role_id = user_roles.role_id
            INNER JOIN permissions
                ON permissions.id = role_permissions.permission_id
            WHERE user_roles.user_id = $1
            ORDER BY permissions.name
            "#,
        )
        .bind(user_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to load permissions for user '{user_id}': {error}"
            ))
        })
    }
}
