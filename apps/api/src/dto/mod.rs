mod access;
mod auth;
mod common;
mod page;

pub use access::{
    CreateUserRequest, PermissionResponse, RoleResponse, RoleSummaryResponse, SaveRoleRequest,
    SyncRolePermissionsRequest, SyncUserRolesRequest, UpdateUserRequest, UserResponse,
};
pub use auth::{AuthUserResponse, BootstrapRequest, MeResponse};
pub use common::HealthResponse;
pub use page::{PageAuthPayload, PageResponse};

#[cfg(test)]
mod tests {
    use super::{
        AuthUserResponse, BootstrapRequest, CreateUserRequest, HealthResponse, MeResponse,
        PageAuthPayload, PageResponse, PermissionResponse, RoleResponse, RoleSummaryResponse,
        SaveRoleRequest, SyncRolePermissionsRequest, SyncUserRolesRequest, UpdateUserRequest,
        UserResponse,
    };

    use crate::error::ErrorResponse;
    use ts_rs::Config;
    use ts_rs::TS;

    #[test]
    fn export_ts_bindings() -> Result<(), ts_rs::ExportError> {
        let config = Config::default();

        AuthUserResponse::export(&config)?;
        BootstrapRequest::export(&config)?;
        CreateUserRequest::export(&config)?;
        ErrorResponse::export(&config)?;
        HealthResponse::export(&config)?;
        MeResponse::export(&config)?;
        PageAuthPayload::export(&config)?;
        PageResponse::export(&config)?;
        PermissionResponse::export(&config)?;
        RoleResponse::export(&config)?;
        RoleSummaryResponse::export(&config)?;
        SaveRoleRequest::export(&config)?;
        SyncRolePermissionsRequest::export(&config)?;
        SyncUserRolesRequest::export(&config)?;
        UpdateUserRequest::export(&config)?;
        UserResponse::export(&config)?;

        Ok(())
    }
}
