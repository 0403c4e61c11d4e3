//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod authorization_service;
mod form_validation;
mod permission_catalog_service;
mod role_service;
mod user_service;

pub use access_ports::{
    AuthorizationRepository, CreateUserInput, NewUserWrite, PERMISSIONS_FIELD, PasswordHasher,
    PermissionRecord, PermissionRepository, ROLES_FIELD, RoleRecord, RoleRepository, RoleSummary,
    RoleWrite, SaveRoleInput, UpdateUserInput, UserRecord, UserRepository, UserUpdateWrite,
    unknown_permission_errors, unknown_role_errors,
};
pub use authorization_service::{AuthorizationService, FORBIDDEN_MESSAGE};
pub use permission_catalog_service::PermissionCatalogService;
pub use role_service::RoleService;
pub use user_service::UserService;
