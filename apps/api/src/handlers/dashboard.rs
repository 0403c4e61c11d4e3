use axum::Json;
use axum::extract::Extension;
use axum::http::Uri;

use crate::dto::PageResponse;
use crate::error::ApiResult;
use crate::middleware::AuthContext;
use crate::page::Page;

pub async fn dashboard_handler(
    Extension(auth): Extension<AuthContext>,
    uri: Uri,
) -> ApiResult<Json<PageResponse>> {
    Ok(Page::new("Dashboard").render(&auth, &uri)?)
}
