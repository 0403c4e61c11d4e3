use serde::Serialize;
use serde_json::Value;
use ts_rs::TS;

use super::AuthUserResponse;

/// Authorization context embedded into every page as `props.auth`.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/page-auth-payload.ts"
)]
pub struct PageAuthPayload {
    pub user: AuthUserResponse,
    pub permissions: Vec<String>,
}

/// Rendered page: a view id, its props, and the request path.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/page-response.ts"
)]
pub struct PageResponse {
    pub component: String,
    #[ts(type = "Record<string, unknown>")]
    pub props: Value,
    pub url: String,
}
