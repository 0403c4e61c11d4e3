//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_access_repository;
mod postgres_association_sync;
mod postgres_authorization_repository;
mod postgres_permission_repository;
mod postgres_role_repository;
#[cfg(test)]
mod postgres_test_support;
mod postgres_user_repository;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_access_repository::InMemoryAccessRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_permission_repository::PostgresPermissionRepository;
pub use postgres_role_repository::PostgresRoleRepository;
pub use postgres_user_repository::PostgresUserRepository;
