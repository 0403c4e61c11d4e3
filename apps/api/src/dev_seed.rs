use tracing::info;
use warden_application::{CreateUserInput, SaveRoleInput};
use warden_core::{AppResult, UserIdentity};

use crate::state::AppState;

const DEV_SEED_ACTOR_ID: i64 = 0;
const DEV_SEED_ACTOR_NAME: &str = "dev-seed";
const DEV_SEED_ACTOR_EMAIL: &str = "dev-seed@warden.local";

const DEV_SEED_ADMIN_ROLE: &str = "admin";
const DEV_SEED_ADMIN_NAME: &str = "Administrator";
const DEV_SEED_ADMIN_EMAIL: &str = "admin@warden.local";
const DEV_SEED_ADMIN_PASSWORD: &str = "change-me-admin";

/// Ensures the permission catalog, an `admin` role holding every permission,
/// and an admin user assigned to it. Safe to run repeatedly.
pub async fn run(state: &AppState) -> AppResult<()> {
    let actor = UserIdentity::new(DEV_SEED_ACTOR_ID, DEV_SEED_ACTOR_NAME, DEV_SEED_ACTOR_EMAIL);

    let catalog: Vec<String> = state
        .permission_catalog_service
        .ensure_default_catalog()
        .await?
        .into_iter()
        .map(|permission| permission.name)
        .collect();

    let existing_role = state
        .role_service
        .list_roles()
        .await?
        .into_iter()
        .find(|role| role.name == DEV_SEED_ADMIN_ROLE);

    match existing_role {
        Some(role) => {
            state
                .role_service
                .sync_role_permissions(&actor, role.role_id, Some(catalog))
                .await?;
        }
        None => {
            state
                .role_service
                .create_role(
                    &actor,
                    SaveRoleInput {
                        name: DEV_SEED_ADMIN_ROLE.to_owned(),
                        permissions: Some(catalog),
                    },
                )
                .await?;
        }
    }

    let admin_roles = Some(vec![DEV_SEED_ADMIN_ROLE.to_owned()]);
    match state.user_service.find_by_email(DEV_SEED_ADMIN_EMAIL).await? {
        Some(user) => {
            state
                .user_service
                .sync_user_roles(&actor, user.user_id, admin_roles)
                .await?;
        }
        None => {
            state
                .user_service
                .create_user(
                    &actor,
                    CreateUserInput {
                        name: DEV_SEED_ADMIN_NAME.to_owned(),
                        email: DEV_SEED_ADMIN_EMAIL.to_owned(),
                        password: DEV_SEED_ADMIN_PASSWORD.to_owned(),
                        roles: admin_roles,
                    },
                )
                .await?;
        }
    }

    info!(
        email = DEV_SEED_ADMIN_EMAIL,
        role = DEV_SEED_ADMIN_ROLE,
        "development seed applied"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use warden_core::AppResult;
    use warden_domain::Resource;

    use super::{DEV_SEED_ADMIN_EMAIL, run};
    use crate::test_support::memory_state;

    #[tokio::test]
    async fn seed_grants_admin_every_permission_and_is_repeatable() -> AppResult<()> {
        let state = memory_state();

        run(&state).await?;
        run(&state).await?;

        let roles = state.role_service.list_roles().await?;
        assert_eq!(roles.len(), 1);

        let Some(admin) = state.user_service.find_by_email(DEV_SEED_ADMIN_EMAIL).await? else {
            panic!("admin user missing after seed");
        };
        assert_eq!(admin.role_names(), vec!["admin"]);

        let permissions = state
            .authorization_service
            .effective_permissions(admin.user_id)
            .await?;
        let mut expected = Resource::default_catalog();
        expected.sort();
        assert_eq!(permissions.to_sorted_vec(), expected);
        Ok(())
    }
}
