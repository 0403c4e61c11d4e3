use serde::{Deserialize, Serialize};
use ts_rs::TS;

mod conversions;

/// Incoming payload for role creation and update.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/save-role-request.ts"
)]
pub struct SaveRoleRequest {
    #[serde(default)]
    pub name: String,
    /// Target permission names; absent clears every permission.
    pub permissions: Option<Vec<String>>,
}

/// Incoming payload for replacing the permissions of a role.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/sync-role-permissions-request.ts"
)]
pub struct SyncRolePermissionsRequest {
    pub permissions: Option<Vec<String>>,
}

/// Incoming payload for user creation.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/create-user-request.ts"
)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub roles: Option<Vec<String>>,
}

/// Incoming payload for user update. An absent or empty password keeps the current one.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/update-user-request.ts"
)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<String>,
    pub roles: Option<Vec<String>>,
}

/// Incoming payload for replacing the roles of a user.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/sync-user-roles-request.ts"
)]
pub struct SyncUserRolesRequest {
    pub roles: Option<Vec<String>>,
}

/// API representation of a catalog permission.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/permission-response.ts"
)]
pub struct PermissionResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
}

/// API representation of a role attached to a user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-summary-response.ts"
)]
pub struct RoleSummaryResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
}

/// API representation of a role.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/role-response.ts"
)]
pub struct RoleResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub permissions: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// API representation of a user.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/user-response.ts"
)]
pub struct UserResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub email: String,
    pub roles: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}
