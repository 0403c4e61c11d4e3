use warden_core::{AppError, AppResult, UserIdentity};
use warden_domain::{SyncTarget, UserId};

use super::UserService;
use super::validation::PasswordField;
use crate::{
    CreateUserInput, NewUserWrite, RoleSummary, UpdateUserInput, UserRecord, UserUpdateWrite,
};

impl UserService {
    /// Creates a user, hashes its password, and assigns exactly the submitted roles.
    pub async fn create_user(
        &self,
        actor: &UserIdentity,
        input: CreateUserInput,
    ) -> AppResult<UserRecord> {
        let validated = self
            .validate_user_form(
                input.name,
                input.email,
                PasswordField::Required(input.password),
                input.roles,
            )
            .await?;

        let Some(password) = validated.password.as_deref() else {
            return Err(AppError::Internal(
                "validated user form is missing its password".to_owned(),
            ));
        };
        let password_hash = self.password_hasher.hash_password(password)?;

        let user = self
            .users
            .create_user(NewUserWrite {
                name: validated.name,
                email: validated.email,
                password_hash,
                roles: validated.roles,
            })
            .await?;

        tracing::info!(
            actor = actor.user_id(),
            user_id = %user.user_id,
            roles = user.roles.len(),
            "user created"
        );

        Ok(user)
    }

    /// Updates profile fields, optionally rehashes the password, and replaces roles.
    pub async fn update_user(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AppResult<UserRecord> {
        let validated = self
            .validate_user_form(
                input.name,
                input.email,
                PasswordField::Optional(input.password),
                input.roles,
            )
            .await?;

        let password_hash = validated
            .password
            .as_deref()
            .map(|password| self.password_hasher.hash_password(password))
            .transpose()?;
        let password_changed = password_hash.is_some();

        let user = self
            .users
            .update_user(
                user_id,
                UserUpdateWrite {
                    name: validated.name,
                    email: validated.email,
                    password_hash,
                    roles: validated.roles,
                },
            )
            .await?;

        tracing::info!(
            actor = actor.user_id(),
            user_id = %user.user_id,
            roles = user.roles.len(),
            password_changed,
            "user updated"
        );

        Ok(user)
    }

    /// Replaces the roles of a user and returns the new set.
    pub async fn sync_user_roles(
        &self,
        actor: &UserIdentity,
        user_id: UserId,
        roles: Option<Vec<String>>,
    ) -> AppResult<Vec<RoleSummary>> {
        let target = SyncTarget::from_optional(roles);
        self.validate_role_target(&target).await?.into_result()?;

        let assigned = self.users.sync_user_roles(user_id, &target).await?;

        tracing::info!(
            actor = actor.user_id(),
            user_id = %user_id,
            roles = assigned.len(),
            "user roles synchronized"
        );

        Ok(assigned)
    }

    /// Deletes a user together with its role assignments.
    pub async fn delete_user(&self, actor: &UserIdentity, user_id: UserId) -> AppResult<()> {
        self.users.delete_user(user_id).await?;

        tracing::info!(actor = actor.user_id(), user_id = %user_id, "user deleted");
        Ok(())
    }
}
