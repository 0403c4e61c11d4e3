mod inputs;
mod records;
mod repositories;
mod validation;

pub use inputs::{
    CreateUserInput, NewUserWrite, RoleWrite, SaveRoleInput, UpdateUserInput, UserUpdateWrite,
};
pub use records::{PermissionRecord, RoleRecord, RoleSummary, UserRecord};
pub use repositories::{
    AuthorizationRepository, PasswordHasher, PermissionRepository, RoleRepository, UserRepository,
};
pub use validation::{
    PERMISSIONS_FIELD, ROLES_FIELD, unknown_permission_errors, unknown_role_errors,
};
