use std::sync::Arc;

use warden_core::{AppError, AppResult};
use warden_domain::{EffectivePermissions, PermissionRequirement, UserId};

use crate::AuthorizationRepository;

/// Message returned for every authorization denial. Never names the missing
/// permission so clients cannot enumerate the policy.
pub const FORBIDDEN_MESSAGE: &str = "insufficient permissions";

/// Application service for permission checks against the effective set of a user.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Resolves the union of permissions across every role of the user.
    pub async fn effective_permissions(&self, user_id: UserId) -> AppResult<EffectivePermissions> {
        let names = self.repository.list_permissions_for_user(user_id).await?;
        Ok(EffectivePermissions::from_names(names))
    }

    /// Checks an already resolved permission set against a requirement.
    pub fn authorize(
        permissions: &EffectivePermissions,
        requirement: &PermissionRequirement,
    ) -> AppResult<()> {
        if requirement.is_satisfied_by(permissions) {
            return Ok(());
        }

        Err(AppError::Forbidden(FORBIDDEN_MESSAGE.to_owned()))
    }
}

#[cfg(test)]
mod tests;
