use warden_application::{RoleRepository, RoleWrite};
use warden_core::AppError;
use warden_domain::{RoleName, SyncTarget};

use super::PostgresRoleRepository;
use crate::postgres_test_support::{ensure_permissions, test_pool, unique_name};

fn role_write(name: &str, permissions: &[String]) -> RoleWrite {
    let Ok(name) = RoleName::new(name) else {
        panic!("invalid test role name");
    };
    RoleWrite {
        name,
        permissions: SyncTarget::from_names(permissions.iter().cloned()),
    }
}

fn names(role: &warden_application::RoleRecord) -> Vec<String> {
    role.permission_names()
}

#[tokio::test]
async fn sync_replaces_permission_set_and_is_idempotent() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRoleRepository::new(pool.clone());
    let prefix = unique_name("perm");
    let catalog = ensure_permissions(
        &pool,
        &[
            format!("{prefix}.a").as_str(),
            format!("{prefix}.b").as_str(),
            format!("{prefix}.c").as_str(),
        ],
    )
    .await;

    let created = repository
        .create_role(role_write(&unique_name("role"), &catalog[..2]))
        .await;
    let Ok(role) = created else {
        panic!("failed to create role: {created:?}");
    };
    assert_eq!(names(&role), catalog[..2].to_vec());

    let target = SyncTarget::from_names(catalog[1..].iter().cloned());
    let first = repository.sync_role_permissions(role.role_id, &target).await;
    let second = repository.sync_role_permissions(role.role_id, &target).await;
    let (Ok(first), Ok(second)) = (first, second) else {
        panic!("sync failed");
    };
    assert_eq!(first, second);
    let synced: Vec<_> = first.into_iter().map(|record| record.name).collect();
    assert_eq!(synced, catalog[1..].to_vec());

    let cleared = repository
        .sync_role_permissions(role.role_id, &SyncTarget::default())
        .await;
    assert!(matches!(cleared, Ok(ref records) if records.is_empty()));
}

#[tokio::test]
async fn sync_with_unknown_permission_changes_nothing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRoleRepository::new(pool.clone());
    let catalog = ensure_permissions(&pool, &[unique_name("known").as_str()]).await;

    let Ok(role) = repository
        .create_role(role_write(&unique_name("role"), &catalog))
        .await
    else {
        panic!("failed to create role");
    };

    let target = SyncTarget::from_names([unique_name("ghost")]);
    let result = repository.sync_role_permissions(role.role_id, &target).await;
    assert!(matches!(result, Err(AppError::InvalidFields(_))));

    let Ok(Some(reloaded)) = repository.find_role(role.role_id).await else {
        panic!("role disappeared");
    };
    assert_eq!(names(&reloaded), catalog);
}

#[tokio::test]
async fn duplicate_role_name_is_a_field_error() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRoleRepository::new(pool);
    let name = unique_name("dup");

    assert!(repository.create_role(role_write(&name, &[])).await.is_ok());
    let duplicate = repository.create_role(role_write(&name, &[])).await;

    let Err(AppError::InvalidFields(errors)) = duplicate else {
        panic!("expected field errors, got {duplicate:?}");
    };
    assert!(!errors.messages("name").is_empty());
}

#[tokio::test]
async fn delete_missing_role_is_not_found() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repository = PostgresRoleRepository::new(pool);

    let result = repository
        .delete_role(warden_domain::RoleId::new(i64::MAX))
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}
