use warden_application::{
    CreateUserInput, PermissionRecord, RoleRecord, RoleSummary, SaveRoleInput, UpdateUserInput,
    UserRecord,
};

use super::{
    CreateUserRequest, PermissionResponse, RoleResponse, RoleSummaryResponse, SaveRoleRequest,
    UpdateUserRequest, UserResponse,
};

impl From<SaveRoleRequest> for SaveRoleInput {
    fn from(value: SaveRoleRequest) -> Self {
        Self {
            name: value.name,
            permissions: value.permissions,
        }
    }
}

impl From<CreateUserRequest> for CreateUserInput {
    fn from(value: CreateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
            roles: value.roles,
        }
    }
}

impl From<UpdateUserRequest> for UpdateUserInput {
    fn from(value: UpdateUserRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            password: value.password,
            roles: value.roles,
        }
    }
}

impl From<PermissionRecord> for PermissionResponse {
    fn from(value: PermissionRecord) -> Self {
        Self {
            id: value.permission_id.as_i64(),
            name: value.name,
        }
    }
}

impl From<RoleSummary> for RoleSummaryResponse {
    fn from(value: RoleSummary) -> Self {
        Self {
            id: value.role_id.as_i64(),
            name: value.name,
        }
    }
}

impl From<RoleRecord> for RoleResponse {
    fn from(value: RoleRecord) -> Self {
        Self {
            id: value.role_id.as_i64(),
            permissions: value.permission_names(),
            name: value.name,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

impl From<UserRecord> for UserResponse {
    fn from(value: UserRecord) -> Self {
        Self {
            id: value.user_id.as_i64(),
            roles: value.role_names(),
            name: value.name,
            email: value.email,
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}
