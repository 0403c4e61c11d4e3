use sqlx::postgres::PgExecutor;
use sqlx::{Postgres, Transaction};

use super::*;

pub(super) const SELECT_USERS: &str = r#"
    SELECT
        users.id AS user_id,
        users.name AS user_name,
        users.email,
        users.created_at,
        users.updated_at,
        roles.id AS role_id,
        roles.name AS role_name
    FROM users
    LEFT JOIN user_roles
        ON user_roles.user_id = users.id
    LEFT JOIN roles
        ON roles.id = user_roles.role_id
"#;

impl PostgresUserRepository {
    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<UserRecord>> {
        let sql = format!("{SELECT_USERS} ORDER BY users.id, roles.name");

        let rows = sqlx::query_as::<_, UserRow>(sql.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to list users: {error}")))?;

        Ok(aggregate_users(rows))
    }

    pub(super) async fn find_user_impl(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        fetch_user(&self.pool, user_id).await
    }

    pub(super) async fn find_user_by_email_impl(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<UserRecord>> {
        let sql = format!("{SELECT_USERS} WHERE users.email = $1 ORDER BY roles.name");

        let rows = sqlx::query_as::<_, UserRow>(sql.as_str())
            .bind(email.as_str())
            .fetch_all(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to find user by email: {error}"))
            })?;

        Ok(aggregate_users(rows).into_iter().next())
    }
}

pub(super) async fn fetch_user<'e, E>(executor: E, user_id: UserId) -> AppResult<Option<UserRecord>>
where
    E: PgExecutor<'e>,
{
    let sql = format!("{SELECT_USERS} WHERE users.id = $1 ORDER BY roles.name");

    let rows = sqlx::query_as::<_, UserRow>(sql.as_str())
        .bind(user_id.as_i64())
        .fetch_all(executor)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find user: {error}")))?;

    Ok(aggregate_users(rows).into_iter().next())
}

pub(super) async fn reload_user(
    transaction: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> AppResult<UserRecord> {
    fetch_user(&mut **transaction, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
}
