use warden_application::{
    AuthorizationService, PermissionCatalogService, RoleService, UserService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub authorization_service: AuthorizationService,
    pub role_service: RoleService,
    pub user_service: UserService,
    pub permission_catalog_service: PermissionCatalogService,
    pub frontend_url: String,
    pub bootstrap_token: String,
}
