use std::sync::Arc;

use warden_core::{AppError, AppResult, FieldErrors, UserIdentity};
use warden_domain::{RoleId, RoleName, SyncTarget};

use crate::form_validation::{collect_field, name_set};
use crate::{
    PermissionRecord, PermissionRepository, RoleRecord, RoleRepository, RoleWrite, SaveRoleInput,
    unknown_permission_errors,
};

/// Application service for role administration.
#[derive(Clone)]
pub struct RoleService {
    roles: Arc<dyn RoleRepository>,
    permissions: Arc<dyn PermissionRepository>,
}

impl RoleService {
    /// Creates a role service from repository implementations.
    #[must_use]
    pub fn new(roles: Arc<dyn RoleRepository>, permissions: Arc<dyn PermissionRepository>) -> Self {
        Self { roles, permissions }
    }

    /// Lists every role with its permissions.
    pub async fn list_roles(&self) -> AppResult<Vec<RoleRecord>> {
        self.roles.list_roles().await
    }

    /// Returns one role or a not-found error.
    pub async fn get_role(&self, role_id: RoleId) -> AppResult<RoleRecord> {
        self.roles
            .find_role(role_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("role '{role_id}' does not exist")))
    }

    /// Lists every role name, used to populate assignment forms.
    pub async fn role_names(&self) -> AppResult<Vec<String>> {
        Ok(self
            .roles
            .list_roles()
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect())
    }

    /// Lists every catalog permission name, used to populate role forms.
    pub async fn permission_names(&self) -> AppResult<Vec<String>> {
        Ok(self
            .permissions
            .list_permissions()
            .await?
            .into_iter()
            .map(|permission| permission.name)
            .collect())
    }

    /// Creates a role with exactly the submitted permissions.
    pub async fn create_role(
        &self,
        actor: &UserIdentity,
        input: SaveRoleInput,
    ) -> AppResult<RoleRecord> {
        let write = self.validate_role_input(input).await?;
        let role = self.roles.create_role(write).await?;

        tracing::info!(
            actor = actor.user_id(),
            role_id = %role.role_id,
            role = %role.name,
            permissions = role.permissions.len(),
            "role created"
        );

        Ok(role)
    }

    /// Renames a role and replaces its permissions with the submitted set.
    pub async fn update_role(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        input: SaveRoleInput,
    ) -> AppResult<RoleRecord> {
        let write = self.validate_role_input(input).await?;
        let role = self.roles.update_role(role_id, write).await?;

        tracing::info!(
            actor = actor.user_id(),
            role_id = %role.role_id,
            role = %role.name,
            permissions = role.permissions.len(),
            "role updated"
        );

        Ok(role)
    }

    /// Replaces the permissions of a role and returns the new set.
    pub async fn sync_role_permissions(
        &self,
        actor: &UserIdentity,
        role_id: RoleId,
        permissions: Option<Vec<String>>,
    ) -> AppResult<Vec<PermissionRecord>> {
        let target = SyncTarget::from_optional(permissions);
        self.validate_permission_target(&target).await?.into_result()?;

        let attached = self.roles.sync_role_permissions(role_id, &target).await?;

        tracing::info!(
            actor = actor.user_id(),
            role_id = %role_id,
            permissions = attached.len(),
            "role permissions synchronized"
        );

        Ok(attached)
    }

    /// Deletes a role and detaches it from every user.
    pub async fn delete_role(&self, actor: &UserIdentity, role_id: RoleId) -> AppResult<()> {
        self.roles.delete_role(role_id).await?;

        tracing::info!(actor = actor.user_id(), role_id = %role_id, "role deleted");
        Ok(())
    }

    async fn validate_role_input(&self, input: SaveRoleInput) -> AppResult<RoleWrite> {
        let mut errors = FieldErrors::new();

        let name = collect_field(&mut errors, "name", RoleName::new(input.name));
        let target = SyncTarget::from_optional(input.permissions);
        errors.merge(self.validate_permission_target(&target).await?);

        match name {
            Some(name) if errors.is_empty() => Ok(RoleWrite {
                name,
                permissions: target,
            }),
            _ => Err(AppError::InvalidFields(errors)),
        }
    }

    async fn validate_permission_target(&self, target: &SyncTarget) -> AppResult<FieldErrors> {
        if target.is_empty() {
            return Ok(FieldErrors::new());
        }

        let catalog = name_set(self.permission_names().await?);
        Ok(unknown_permission_errors(&target.missing_from(&catalog)))
    }
}
