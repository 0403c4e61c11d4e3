use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use warden_core::{AppError, AppResult};
use warden_domain::{EffectivePermissions, PermissionRequirement, Resource, ResourceAction, UserId};

use super::{AuthorizationRepository, AuthorizationService, FORBIDDEN_MESSAGE};

struct FakeAuthorizationRepository {
    map: HashMap<i64, Vec<String>>,
}

#[async_trait]
impl AuthorizationRepository for FakeAuthorizationRepository {
    async fn list_permissions_for_user(&self, user_id: UserId) -> AppResult<Vec<String>> {
        Ok(self.map.get(&user_id.as_i64()).cloned().unwrap_or_default())
    }
}

fn service_with(user_id: i64, permissions: &[&str]) -> AuthorizationService {
    let repository = FakeAuthorizationRepository {
        map: HashMap::from([(
            user_id,
            permissions.iter().map(|name| (*name).to_owned()).collect(),
        )]),
    };
    AuthorizationService::new(Arc::new(repository))
}

#[tokio::test]
async fn granted_user_passes_edit_requirement() -> AppResult<()> {
    let service = service_with(1, &["users.view", "users.edit"]);
    let requirement = ResourceAction::Edit.required_permissions(Resource::Users);

    let permissions = service.effective_permissions(UserId::new(1)).await?;
    AuthorizationService::authorize(&permissions, &requirement)?;
    assert_eq!(permissions.len(), 2);
    Ok(())
}

#[tokio::test]
async fn missing_grant_is_denied_with_generic_message() -> AppResult<()> {
    let service = service_with(1, &["users.view"]);
    let requirement = ResourceAction::Destroy.required_permissions(Resource::Users);

    let permissions = service.effective_permissions(UserId::new(1)).await?;
    let result = AuthorizationService::authorize(&permissions, &requirement);
    assert!(matches!(
        result,
        Err(AppError::Forbidden(ref message)) if message == FORBIDDEN_MESSAGE
    ));
    Ok(())
}

#[tokio::test]
async fn user_without_roles_has_empty_permissions() -> AppResult<()> {
    let service = service_with(1, &["roles.view"]);

    let permissions = service.effective_permissions(UserId::new(2)).await?;
    assert!(permissions.is_empty());
    Ok(())
}

#[tokio::test]
async fn any_of_requirement_accepts_single_matching_permission() -> AppResult<()> {
    let service = service_with(1, &["roles.delete"]);
    let permissions = service.effective_permissions(UserId::new(1)).await?;

    let roles_index = ResourceAction::Index.required_permissions(Resource::Roles);
    assert!(AuthorizationService::authorize(&permissions, &roles_index).is_ok());

    let users_index = ResourceAction::Index.required_permissions(Resource::Users);
    assert!(AuthorizationService::authorize(&permissions, &users_index).is_err());
    Ok(())
}

#[test]
fn authorize_matches_parsed_requirement() -> AppResult<()> {
    let permissions = EffectivePermissions::from_names(["roles.edit".to_owned()]);
    let requirement: PermissionRequirement = "roles.view|roles.edit".parse()?;

    assert!(AuthorizationService::authorize(&permissions, &requirement).is_ok());
    Ok(())
}
