use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use warden_application::{PermissionRecord, PermissionRepository};
use warden_core::{AppError, AppResult};
use warden_domain::{PermissionId, PermissionName};

/// PostgreSQL-backed permission catalog.
#[derive(Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PermissionRow {
    id: i64,
    name: String,
}

impl From<PermissionRow> for PermissionRecord {
    fn from(row: PermissionRow) -> Self {
        Self {
            permission_id: PermissionId::new(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        let rows = sqlx::query_as::<_, PermissionRow>(
            r#"
            SELECT id, name
            FROM permissions
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list permissions: {error}")))?;

        Ok(rows.into_iter().map(PermissionRecord::from).collect())
    }

    async fn ensure_permission(&self, name: &PermissionName) -> AppResult<PermissionRecord> {
        let row = sqlx::query_as::<_, PermissionRow>(
            r#"
            INSERT INTO permissions (name)
            VALUES ($1)
            ON CONFLICT (name) DO UPDATE
            SET name = EXCLUDED.name
            RETURNING id, name
            "#,
        )
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to ensure permission '{name}': {error}"))
        })?;

        Ok(row.into())
    }
}
