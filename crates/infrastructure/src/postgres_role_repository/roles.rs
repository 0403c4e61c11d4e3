use sqlx::postgres::PgExecutor;
use sqlx::{Postgres, Transaction};

use super::*;

const SELECT_ROLES: &str = r#"
    SELECT
        roles.id AS role_id,
        roles.name AS role_name,
        roles.created_at,
        roles.updated_at,
        permissions.id AS permission_id,
        permissions.name AS permission_name
    FROM roles
    LEFT JOIN role_permissions
        ON role_permissions.role_id = roles.id
    LEFT JOIN permissions
        ON permissions.id = role_permissions.permission_id
"#;

impl PostgresRoleRepository {
    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<RoleRecord>> {
        let sql = format!("{SELECT_ROLES} ORDER BY roles.name, roles.id, permissions.name");

        let rows = sqlx::query_as::<_, RoleRow>(sql.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list roles: {error}")))?;

        Ok(aggregate_roles(rows))
    }

    pub(super) async fn find_role_impl(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>> {
        fetch_role(&self.pool, role_id).await
    }

    pub(super) async fn create_role_impl(&self, input: RoleWrite) -> AppResult<RoleRecord> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        let role_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO roles (name)
            VALUES ($1)
            RETURNING id
            "#,
        )
        .bind(input.name.as_str())
        .fetch_one(&mut *transaction)
        .await
        .map_err(map_role_write_error)?;

        ROLE_PERMISSIONS
            .sync(&mut transaction, role_id, &input.permissions)
            .await?;

        let role = reload_role(&mut transaction, RoleId::new(role_id)).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(role)
    }

    pub(super) async fn update_role_impl(
        &self,
        role_id: RoleId,
        input: RoleWrite,
    ) -> AppResult<RoleRecord> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        ROLE_PERMISSIONS
            .lock_owner(&mut transaction, role_id.as_i64())
            .await?;

        sqlx::query(
            r#"
            UPDATE roles
            SET name = $2, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_i64())
        .bind(input.name.as_str())
        .execute(&mut *transaction)
        .await
        .map_err(map_role_write_error)?;

        ROLE_PERMISSIONS
            .sync(&mut transaction, role_id.as_i64(), &input.permissions)
            .await?;

        let role = reload_role(&mut transaction, role_id).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(role)
    }

    pub(super) async fn sync_role_permissions_impl(
        &self,
        role_id: RoleId,
        target: &SyncTarget,
    ) -> AppResult<Vec<PermissionRecord>> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        ROLE_PERMISSIONS
            .lock_owner(&mut transaction, role_id.as_i64())
            .await?;
        let members = ROLE_PERMISSIONS
            .sync(&mut transaction, role_id.as_i64(), target)
            .await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(permission_records(members))
    }

    pub(super) async fn delete_role_impl(&self, role_id: RoleId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM roles
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete role: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        }

        Ok(())
    }
}

async fn fetch_role<'e, E>(executor: E, role_id: RoleId) -> AppResult<Option<RoleRecord>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{SELECT_ROLES} WHERE roles.id = $1 ORDER BY permissions.name");

    let rows = sqlx::query_as::<_, RoleRow>(sql.as_str())
        .bind(role_id.as_i64())
        .fetch_all(executor)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find role: {error}")))?;

    Ok(aggregate_roles(rows).into_iter().next())
}

async fn reload_role(
    transaction: &mut Transaction<'_, Postgres>,
    role_id: RoleId,
) -> AppResult<RoleRecord> {
    fetch_role(&mut **transaction, role_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
}
