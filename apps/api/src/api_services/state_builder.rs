use std::sync::Arc;

use sqlx::PgPool;
use warden_application::{
    AuthorizationService, PermissionCatalogService, RoleService, UserService,
};
use warden_infrastructure::Argon2PasswordHasher;

use crate::api_config::ApiConfig;
use crate::state::AppState;

mod repositories;

use repositories::RepositorySet;

pub fn build_postgres_state(pool: &PgPool, config: &ApiConfig) -> AppState {
    build_app_state(repositories::build_postgres_repository_set(pool), config)
}

pub fn build_memory_state(config: &ApiConfig) -> AppState {
    build_app_state(repositories::build_memory_repository_set(), config)
}

fn build_app_state(repositories: RepositorySet, config: &ApiConfig) -> AppState {
    let password_hasher = Arc::new(Argon2PasswordHasher::new());

    AppState {
        authorization_service: AuthorizationService::new(repositories.authorization_repository),
        role_service: RoleService::new(
            repositories.role_repository.clone(),
            repositories.permission_repository.clone(),
        ),
        user_service: UserService::new(
            repositories.user_repository,
            repositories.role_repository,
            password_hasher,
        ),
        permission_catalog_service: PermissionCatalogService::new(
            repositories.permission_repository,
        ),
        frontend_url: config.frontend_url.clone(),
        bootstrap_token: config.bootstrap_token.clone(),
    }
}
