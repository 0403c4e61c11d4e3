//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod effective;
mod permission;
mod requirement;
mod role;
mod sync;
mod user;

pub use effective::EffectivePermissions;
pub use permission::{Ability, PermissionId, PermissionName, Resource};
pub use requirement::{PermissionRequirement, ResourceAction};
pub use role::{ROLE_NAME_MAX_LENGTH, RoleId, RoleName};
pub use sync::{SyncPlan, SyncTarget};
pub use user::{
    EmailAddress, PASSWORD_MAX_LENGTH, PASSWORD_MIN_LENGTH, USER_NAME_MAX_LENGTH, UserId, UserName,
    validate_password,
};
