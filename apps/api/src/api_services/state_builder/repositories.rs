use std::sync::Arc;

use sqlx::PgPool;
use warden_application::{
    AuthorizationRepository, PermissionRepository, RoleRepository, UserRepository,
};
use warden_infrastructure::{
    InMemoryAccessRepository, PostgresAuthorizationRepository, PostgresPermissionRepository,
    PostgresRoleRepository, PostgresUserRepository,
};

pub(super) struct RepositorySet {
    pub(super) permission_repository: Arc<dyn PermissionRepository>,
    pub(super) role_repository: Arc<dyn RoleRepository>,
    pub(super) user_repository: Arc<dyn UserRepository>,
    pub(super) authorization_repository: Arc<dyn AuthorizationRepository>,
}

pub(super) fn build_postgres_repository_set(pool: &PgPool) -> RepositorySet {
    RepositorySet {
        permission_repository: Arc::new(PostgresPermissionRepository::new(pool.clone())),
        role_repository: Arc::new(PostgresRoleRepository::new(pool.clone())),
        user_repository: Arc::new(PostgresUserRepository::new(pool.clone())),
        authorization_repository: Arc::new(PostgresAuthorizationRepository::new(pool.clone())),
    }
}

pub(super) fn build_memory_repository_set() -> RepositorySet {
    let repository = Arc::new(InMemoryAccessRepository::new());

    RepositorySet {
        permission_repository: repository.clone(),
        role_repository: repository.clone(),
        user_repository: repository.clone(),
        authorization_repository: repository,
    }
}
