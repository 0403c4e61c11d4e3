use super::lookup::reload_user;
use super::*;

impl PostgresUserRepository {
    pub(super) async fn create_user_impl(&self, input: NewUserWrite) -> AppResult<UserRecord> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        let user_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(input.name.as_str())
        .bind(input.email.as_str())
        .bind(input.password_hash.as_str())
        .fetch_one(&mut *transaction)
        .await
        .map_err(map_user_write_error)?;

        USER_ROLES
            .sync(&mut transaction, user_id, &input.roles)
            .await?;

        let user = reload_user(&mut transaction, UserId::new(user_id)).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(user)
    }

    pub(super) async fn update_user_impl(
        &self,
        user_id: UserId,
        input: UserUpdateWrite,
    ) -> AppResult<UserRecord> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        USER_ROLES
            .lock_owner(&mut transaction, user_id.as_i64())
            .await?;

        sqlx::query(
            r#"
            UPDATE users
            SET name = $2,
                email = $3,
                password_hash = COALESCE($4, password_hash),
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .bind(input.name.as_str())
        .bind(input.email.as_str())
        .bind(input.password_hash.as_deref())
        .execute(&mut *transaction)
        .await
        .map_err(map_user_write_error)?;

        USER_ROLES
            .sync(&mut transaction, user_id.as_i64(), &input.roles)
            .await?;

        let user = reload_user(&mut transaction, user_id).await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(user)
    }

    pub(super) async fn sync_user_roles_impl(
        &self,
        user_id: UserId,
        target: &SyncTarget,
    ) -> AppResult<Vec<RoleSummary>> {
        let mut transaction =
            self.pool.begin().await.map_err(|error| {
                AppError::Internal(format!("failed to begin transaction: {error}"))
            })?;

        USER_ROLES
            .lock_owner(&mut transaction, user_id.as_i64())
            .await?;
        let members = USER_ROLES
            .sync(&mut transaction, user_id.as_i64(), target)
            .await?;

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!("failed to commit transaction: {error}"))
        })?;

        Ok(role_summaries(members))
    }

    pub(super) async fn delete_user_impl(&self, user_id: UserId) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete user: {error}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        Ok(())
    }
}
