use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::Uri;
use axum::response::Redirect;
use warden_domain::UserId;

use crate::dto::{
    CreateUserRequest, PageResponse, RoleSummaryResponse, SyncUserRolesRequest,
    UpdateUserRequest, UserResponse,
};
use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::page::Page;
use crate::state::AppState;

const USERS_INDEX: &str = "/users";

pub async fn index_users_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let users: Vec<UserResponse> = state
        .user_service
        .list_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Page::new("Users/Index")
        .with_prop("users", &users)?
        .render(&auth, &uri)?)
}

pub async fn create_user_page_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let roles = state.user_service.role_names().await?;

    Ok(Page::new("Users/Create")
        .with_prop("roles", &roles)?
        .render(&auth, &uri)?)
}

pub async fn store_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateUserRequest>,
) -> ApiResult<Redirect> {
    state
        .user_service
        .create_user(&auth.identity, payload.into())
        .await?;

    Ok(Redirect::to(USERS_INDEX))
}

pub async fn show_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let user = state.user_service.get_user(UserId::new(user_id)).await?;

    Ok(Page::new("Users/Show")
        .with_prop("user", &UserResponse::from(user))?
        .render(&auth, &uri)?)
}

pub async fn edit_user_page_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    let user = state.user_service.get_user(UserId::new(user_id)).await?;
    let roles = state.user_service.role_names().await?;

    Ok(Page::new("Users/Edit")
        .with_prop("user", &UserResponse::from(user))?
        .with_prop("roles", &roles)?
        .render(&auth, &uri)?)
}

pub async fn update_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
    Json(payload): Json<UpdateUserRequest>,
) -> ApiResult<Redirect> {
    state
        .user_service
        .update_user(&auth.identity, UserId::new(user_id), payload.into())
        .await?;

    Ok(Redirect::to(USERS_INDEX))
}

pub async fn sync_user_roles_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
    Json(payload): Json<SyncUserRolesRequest>,
) -> ApiResult<Json<Vec<RoleSummaryResponse>>> {
    let roles = state
        .user_service
        .sync_user_roles(&auth.identity, UserId::new(user_id), payload.roles)
        .await?
        .into_iter()
        .map(RoleSummaryResponse::from)
        .collect();

    Ok(Json(roles))
}

pub async fn destroy_user_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(user_id): Path<i64>,
) -> ApiResult<Redirect> {
    state
        .user_service
        .delete_user(&auth.identity, UserId::new(user_id))
        .await?;

    Ok(Redirect::to(USERS_INDEX))
}
