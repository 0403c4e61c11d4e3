use serde::{Deserialize, Serialize};
use ts_rs::TS;
use warden_core::UserIdentity;

/// Development session bootstrap payload.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/bootstrap-request.ts"
)]
pub struct BootstrapRequest {
    pub email: String,
    pub token: String,
}

/// API representation of the authenticated user.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/auth-user-response.ts"
)]
pub struct AuthUserResponse {
    #[ts(type = "number")]
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<&UserIdentity> for AuthUserResponse {
    fn from(identity: &UserIdentity) -> Self {
        Self {
            id: identity.user_id(),
            name: identity.display_name().to_owned(),
            email: identity.email().to_owned(),
        }
    }
}

/// Current session user with the permissions loaded for this request.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/me-response.ts"
)]
pub struct MeResponse {
    pub user: AuthUserResponse,
    pub permissions: Vec<String>,
}
