//! Transactional many-to-many sync shared by the role and user adapters.

use std::collections::BTreeSet;

use sqlx::{FromRow, Postgres, Transaction};

use warden_application::{unknown_permission_errors, unknown_role_errors};
use warden_core::{AppError, AppResult, FieldErrors};
use warden_domain::{SyncPlan, SyncTarget};

/// Table layout of one owner-to-member association.
pub(crate) struct Association {
    owner_table: &'static str,
    owner_label: &'static str,
    link_table: &'static str,
    owner_column: &'static str,
    member_table: &'static str,
    member_column: &'static str,
    unknown_members: fn(&[&str]) -> FieldErrors,
}

/// Roles owning permissions.
pub(crate) const ROLE_PERMISSIONS: Association = Association {
    owner_table: "roles",
    owner_label: "role",
    link_table: "role_permissions",
    owner_column: "role_id",
    member_table: "permissions",
    member_column: "permission_id",
    unknown_members: unknown_permission_errors,
};

/// Users owning roles.
pub(crate) const USER_ROLES: Association = Association {
    owner_table: "users",
    owner_label: "user",
    link_table: "user_roles",
    owner_column: "user_id",
    member_table: "roles",
    member_column: "role_id",
    unknown_members: unknown_role_errors,
};

/// Member row attached to an owner.
#[derive(Debug, FromRow)]
pub(crate) struct MemberRow {
    pub(crate) id: i64,
    pub(crate) name: String,
}

impl Association {
    /// Locks the owner row so concurrent syncs on it serialize.
    pub(crate) async fn lock_owner(
        &self,
        transaction: &mut Transaction<'_, Postgres>,
        owner_id: i64,
    ) -> AppResult<()> {
        let sql = format!("SELECT id FROM {} WHERE id = $1 FOR UPDATE", self.owner_table);

        sqlx::query_scalar::<_, i64>(sql.as_str())
            .bind(owner_id)
            .fetch_optional(&mut **transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to lock {}: {error}", self.owner_label))
            })?
            .ok_or_else(|| {
                AppError::NotFound(format!("{} '{owner_id}' does not exist", self.owner_label))
            })?;

        Ok(())
    }

    /// Replaces the owner's members with exactly the target names.
    ///
    /// The caller must hold the owner row lock. Returns the members read back
    /// inside the transaction, ordered by name.
    pub(crate) async fn sync(
        &self,
        transaction: &mut Transaction<'_, Postgres>,
        owner_id: i64,
        target: &SyncTarget,
    ) -> AppResult<Vec<MemberRow>> {
        self.ensure_members_exist(transaction, target).await?;

        let current = self.current_names(transaction, owner_id).await?;
        let plan = SyncPlan::between(&current, target);
        if plan.is_noop() {
            return self.list_members(transaction, owner_id).await;
        }

        if !plan.to_remove.is_empty() {
            let sql = format!(
                "DELETE FROM {link} AS link USING {member} AS member \
                 WHERE link.{member_column} = member.id \
                 AND link.{owner_column} = $1 \
                 AND member.name = ANY($2)",
                link = self.link_table,
                member = self.member_table,
                member_column = self.member_column,
                owner_column = self.owner_column,
            );

            sqlx::query(sql.as_str())
                .bind(owner_id)
                .bind(plan.to_remove.iter().cloned().collect::<Vec<_>>())
                .execute(&mut **transaction)
                .await
                .map_err(|error| {
                    AppError::Internal(format!(
                        "failed to detach {} from {}: {error}",
                        self.member_table, self.owner_label
                    ))
                })?;
        }

        if !plan.to_add.is_empty() {
            let sql = format!(
                "INSERT INTO {link} ({owner_column}, {member_column}) \
                 SELECT $1, member.id FROM {member} AS member \
                 WHERE member.name = ANY($2) \
                 ON CONFLICT ({owner_column}, {member_column}) DO NOTHING",
                link = self.link_table,
                member = self.member_table,
                member_column = self.member_column,
                owner_column = self.owner_column,
            );

            sqlx::query(sql.as_str())
                .bind(owner_id)
                .bind(plan.to_add.iter().cloned().collect::<Vec<_>>())
                .execute(&mut **transaction)
                .await
                .map_err(|error| {
                    AppError::Internal(format!(
                        "failed to attach {} to {}: {error}",
                        self.member_table, self.owner_label
                    ))
                })?;
        }

        self.list_members(transaction, owner_id).await
    }

    /// Lists members currently attached to the owner, ordered by name.
    pub(crate) async fn list_members(
        &self,
        transaction: &mut Transaction<'_, Postgres>,
        owner_id: i64,
    ) -> AppResult<Vec<MemberRow>> {
        let sql = format!(
            "SELECT member.id, member.name \
             FROM {link} AS link \
             INNER JOIN {member} AS member ON member.id = link.{member_column} \
             WHERE link.{owner_column} = $1 \
             ORDER BY member.name",
            link = self.link_table,
            member = self.member_table,
            member_column = self.member_column,
            owner_column = self.owner_column,
        );

        sqlx::query_as::<_, MemberRow>(sql.as_str())
            .bind(owner_id)
            .fetch_all(&mut **transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to list {} of {}: {error}",
                    self.member_table, self.owner_label
                ))
            })
    }

    async fn ensure_members_exist(
        &self,
        transaction: &mut Transaction<'_, Postgres>,
        target: &SyncTarget,
    ) -> AppResult<()> {
        if target.is_empty() {
            return Ok(());
        }

        let sql = format!(
            "SELECT name FROM {} WHERE name = ANY($1)",
            self.member_table
        );

        let known = sqlx::query_scalar::<_, String>(sql.as_str())
            .bind(target.to_vec())
            .fetch_all(&mut **transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!(
                    "failed to resolve {}: {error}",
                    self.member_table
                ))
            })?
            .into_iter()
            .collect::<BTreeSet<_>>();

        (self.unknown_members)(&target.missing_from(&known)).into_result()
    }

    async fn current_names(
        &self,
        transaction: &mut Transaction<'_, Postgres>,
        owner_id: i64,
    ) -> AppResult<BTreeSet<String>> {
        Ok(self
            .list_members(transaction, owner_id)
            .await?
            .into_iter()
            .map(|row| row.name)
            .collect())
    }
}

/// Translates a unique violation on a form field into a field error.
pub(crate) fn map_unique_violation(error: sqlx::Error, field: &str, action: &str) -> AppError {
    if let sqlx::Error::Database(database_error) = &error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::InvalidFields(FieldErrors::single(
            field,
            format!("the {field} has already been taken"),
        ));
    }

    AppError::Internal(format!("failed to {action}: {error}"))
}
