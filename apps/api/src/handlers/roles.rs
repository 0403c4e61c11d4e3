use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::Uri;
use axum::response::Redirect;
use warden_domain::RoleId;

use crate::dto::{
    PageResponse, PermissionResponse, RoleResponse, SaveRoleRequest, SyncRolePermissionsRequest,
};
use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::page::Page;
use crate::state::AppState;

const ROLES_INDEX: &str = "/roles";

pub async fn index_roles_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let roles: Vec<RoleResponse> = state
        .role_service
        .list_roles()
        .await?
        .into_iter()
        .map(RoleResponse::from)
        .collect();

    Ok(Page::new("Roles/Index")
        .with_prop("roles", &roles)?
        .render(&auth, &uri)?)
}

pub async fn create_role_page_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let permissions = state.role_service.permission_names().await?;

    Ok(Page::new("Roles/Create")
        .with_prop("permissions", &permissions)?
        .render(&auth, &uri)?)
}

pub async fn store_role_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<SaveRoleRequest>,
) -> ApiResult<Redirect> {
    state
        .role_service
        .create_role(&auth.identity, payload.into())
        .await?;

    Ok(Redirect::to(ROLES_INDEX))
}

pub async fn show_role_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(role_id): Path<i64>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let role = state.role_service.get_role(RoleId::new(role_id)).await?;

    Ok(Page::new("Roles/Show")
        .with_prop("role", &RoleResponse::from(role))?
        .render(&auth, &uri)?)
}

pub async fn edit_role_page_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(role_id): Path<i64>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let role = state.role_service.get_role(RoleId::new(role_id)).await?;
    let permissions = state.role_service.permission_names().await?;

    Ok(Page::new("Roles/Edit")
        .with_prop("role", &RoleResponse::from(role))?
        .with_prop("permissions", &permissions)?
        .render(&auth, &uri)?)
}

pub async fn update_role_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(role_id): Path<i64>,
    Json(payload): Json<SaveRoleRequest>,
) -> ApiResult<Redirect> {
    state
        .role_service
        .update_role(&auth.identity, RoleId::new(role_id), payload.into())
        .await?;

    Ok(Redirect::to(ROLES_INDEX))
}

pub async fn sync_role_permissions_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(role_id): Path<i64>,
    Json(payload): Json<SyncRolePermissionsRequest>,
) -> ApiResult<Json<Vec<PermissionResponse>>> {
    let permissions = state
        .role_service
        .sync_role_permissions(&auth.identity, RoleId::new(role_id), payload.permissions)
        .await?
        .into_iter()
        .map(PermissionResponse::from)
        .collect();

    Ok(Json(permissions))
}

pub async fn destroy_role_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(role_id): Path<i64>,
) -> ApiResult<Redirect> {
    state
        .role_service
        .delete_role(&auth.identity, RoleId::new(role_id))
        .await?;

    Ok(Redirect::to(ROLES_INDEX))
}
