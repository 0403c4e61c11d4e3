use warden_application::{
    AuthorizationRepository, NewUserWrite, RoleRecord, RoleRepository, RoleWrite, UserRepository,
    UserUpdateWrite,
};
use warden_core::AppError;
use warden_domain::{EmailAddress, RoleName, SyncTarget, UserName};

use super::PostgresUserRepository;
use crate::postgres_test_support::{ensure_permissions, test_pool, unique_name};
use crate::{PostgresAuthorizationRepository, PostgresRoleRepository};

async fn create_role(repository: &PostgresRoleRepository, permissions: &[String]) -> RoleRecord {
    let Ok(name) = RoleName::new(unique_name("role")) else {
        panic!("invalid test role name");
    };
    let created = repository
        .create_role(RoleWrite {
            name,
            permissions: SyncTarget::from_names(permissions.iter().cloned()),
        })
        .await;
    match created {
        Ok(role) => role,
        Err(error) => panic!("failed to create role: {error}"),
    }
}

fn new_user(email: &str, roles: &[&RoleRecord]) -> NewUserWrite {
    let (Ok(name), Ok(email)) = (UserName::new("Alice"), EmailAddress::new(email)) else {
        panic!("invalid test user");
    };
    NewUserWrite {
        name,
        email,
        password_hash: "not-a-real-hash".to_owned(),
        roles: SyncTarget::from_names(roles.iter().map(|role| role.name.clone())),
    }
}

#[tokio::test]
async fn effective_permissions_are_union_of_role_permissions() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let roles = PostgresRoleRepository::new(pool.clone());
    let users = PostgresUserRepository::new(pool.clone());
    let authorization = PostgresAuthorizationRepository::new(pool.clone());

    let prefix = unique_name("union");
    let catalog = ensure_permissions(
        &pool,
        &[
            format!("{prefix}.a").as_str(),
            format!("{prefix}.b").as_str(),
            format!("{prefix}.c").as_str(),
        ],
    )
    .await;
    let first = create_role(&roles, &catalog[..2]).await;
    let second = create_role(&roles, &catalog[1..]).await;

    let email = format!("{}@example.com", unique_name("union"));
    let Ok(user) = users.create_user(new_user(&email, &[&first, &second])).await else {
        panic!("failed to create user");
    };

    let Ok(effective) = authorization.list_permissions_for_user(user.user_id).await else {
        panic!("failed to load effective permissions");
    };
    assert_eq!(effective, catalog);
}

#[tokio::test]
async fn deleting_role_detaches_it_from_users() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let roles = PostgresRoleRepository::new(pool.clone());
    let users = PostgresUserRepository::new(pool.clone());
    let role = create_role(&roles, &[]).await;

    let email = format!("{}@example.com", unique_name("detach"));
    let Ok(user) = users.create_user(new_user(&email, &[&role])).await else {
        panic!("failed to create user");
    };
    assert_eq!(user.roles.len(), 1);

    assert!(roles.delete_role(role.role_id).await.is_ok());

    let Ok(Some(reloaded)) = users.find_user(user.user_id).await else {
        panic!("user disappeared");
    };
    assert!(reloaded.roles.is_empty());
}

#[tokio::test]
async fn update_without_password_keeps_hash_and_clears_roles() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let roles = PostgresRoleRepository::new(pool.clone());
    let users = PostgresUserRepository::new(pool.clone());
    let role = create_role(&roles, &[]).await;

    let email = format!("{}@example.com", unique_name("update"));
    let Ok(user) = users.create_user(new_user(&email, &[&role])).await else {
        panic!("failed to create user");
    };

    let (Ok(name), Ok(email_address)) = (UserName::new("Alice B"), EmailAddress::new(&email))
    else {
        panic!("invalid test user");
    };
    let updated = users
        .update_user(
            user.user_id,
            UserUpdateWrite {
                name,
                email: email_address,
                password_hash: None,
                roles: SyncTarget::default(),
            },
        )
        .await;
    let Ok(updated) = updated else {
        panic!("failed to update user: {updated:?}");
    };
    assert_eq!(updated.name, "Alice B");
    assert!(updated.roles.is_empty());

    let stored_hash = sqlx::query_scalar::<_, String>("SELECT password_hash FROM users WHERE id = $1")
        .bind(user.user_id.as_i64())
        .fetch_one(&pool)
        .await;
    assert!(matches!(stored_hash, Ok(ref hash) if hash == "not-a-real-hash"));
}

#[tokio::test]
async fn duplicate_email_is_a_field_error_and_lookup_ignores_case() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PostgresUserRepository::new(pool);
    let email = format!("{}@example.com", unique_name("dup"));

    assert!(users.create_user(new_user(&email, &[])).await.is_ok());
    let duplicate = users
        .create_user(new_user(&email.to_uppercase(), &[]))
        .await;
    let Err(AppError::InvalidFields(errors)) = duplicate else {
        panic!("expected field errors, got {duplicate:?}");
    };
    assert!(!errors.messages("email").is_empty());

    let Ok(lookup) = EmailAddress::new(email.to_uppercase()) else {
        panic!("invalid email");
    };
    assert!(matches!(users.find_user_by_email(&lookup).await, Ok(Some(_))));
}

#[tokio::test]
async fn sync_user_roles_rejects_unknown_role() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = PostgresUserRepository::new(pool);
    let email = format!("{}@example.com", unique_name("sync"));
    let Ok(user) = users.create_user(new_user(&email, &[])).await else {
        panic!("failed to create user");
    };

    let target = SyncTarget::from_names([unique_name("ghost-role")]);
    let result = users.sync_user_roles(user.user_id, &target).await;
    let Err(AppError::InvalidFields(errors)) = result else {
        panic!("expected field errors");
    };
    assert!(!errors.messages("roles").is_empty());
}
