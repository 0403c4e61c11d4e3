use axum::extract::{MatchedPath, Request, State};
use axum::http::{HeaderValue, Method, header};
use axum::middleware::Next;
use axum::response::Response;
use tower_sessions::Session;
use url::Url;
use warden_application::{AuthorizationService, FORBIDDEN_MESSAGE};
use warden_core::{AppError, UserIdentity};
use warden_domain::{EffectivePermissions, UserId};

use crate::auth::SESSION_USER_KEY;
use crate::error::ApiResult;
use crate::route_policy::{RoutePolicy, resolve_route_policy};
use crate::state::AppState;

/// Acting user plus the permissions loaded for the current request.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub identity: UserIdentity,
    pub permissions: EffectivePermissions,
}

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let identity = session
        .get::<UserIdentity>(SESSION_USER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Reloads the session user and their effective permissions, then checks them
/// against the policy of the matched route before the handler runs.
pub async fn authorize_route(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let mut identity = request
        .extensions()
        .get::<UserIdentity>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let decision = match resolve_route_policy(request.method(), &matched_path) {
        None => Err(AppError::Forbidden(FORBIDDEN_MESSAGE.to_owned())),
        Some(policy) => {
            identity = current_identity(&state, &identity).await?;
            let permissions = state
                .authorization_service
                .effective_permissions(UserId::new(identity.user_id()))
                .await?;

            match policy {
                RoutePolicy::Authenticated => Ok(permissions),
                RoutePolicy::Requires(requirement) => {
                    AuthorizationService::authorize(&permissions, &requirement)
                        .map(|()| permissions)
                }
            }
        }
    };

    let permissions = match decision {
        Ok(permissions) => permissions,
        Err(error) => {
            tracing::warn!(
                user_id = identity.user_id(),
                method = %request.method(),
                path = %matched_path,
                "authorization denied"
            );
            return Err(error.into());
        }
    };

    request.extensions_mut().insert(AuthContext {
        identity,
        permissions,
    });
    Ok(next.run(request).await)
}

/// Re-reads the session user so pages show the stored name and email.
async fn current_identity(state: &AppState, identity: &UserIdentity) -> ApiResult<UserIdentity> {
    let user = match state
        .user_service
        .get_user(UserId::new(identity.user_id()))
        .await
    {
        Ok(user) => user,
        Err(AppError::NotFound(_)) => {
            return Err(AppError::Unauthorized("session user no longer exists".to_owned()).into());
        }
        Err(error) => return Err(error.into()),
    };

    Ok(UserIdentity::new(user.user_id.as_i64(), user.name, user.email))
}

pub async fn require_same_origin_for_mutations(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    if is_state_changing_method(request.method()) {
        let headers = request.headers();

        if let Some(fetch_site) = headers.get("sec-fetch-site")
            && fetch_site == HeaderValue::from_static("cross-site")
        {
            return Err(AppError::Unauthorized("cross-site request blocked".to_owned()).into());
        }

        let origin = headers
            .get(header::ORIGIN)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        let referer = headers
            .get(header::REFERER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        let allowed_origin = state.frontend_url.as_str();
        let origin_is_allowed = is_same_origin(origin, allowed_origin);
        let referer_is_allowed = is_same_origin(referer, allowed_origin);

        if !origin_is_allowed && !referer_is_allowed {
            return Err(AppError::Unauthorized("origin validation failed".to_owned()).into());
        }
    }

    Ok(next.run(request).await)
}

/// Compares scheme, host and port of two absolute URLs.
fn is_same_origin(candidate: &str, allowed: &str) -> bool {
    match (Url::parse(candidate), Url::parse(allowed)) {
        (Ok(candidate), Ok(allowed)) => {
            let origin = candidate.origin();
            origin.is_tuple() && origin == allowed.origin()
        }
        _ => false,
    }
}

fn is_state_changing_method(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

#[cfg(test)]
mod tests {
    use axum::http::Method;

    use super::{is_same_origin, is_state_changing_method};

    #[test]
    fn only_writes_are_state_changing() {
        assert!(is_state_changing_method(&Method::POST));
        assert!(is_state_changing_method(&Method::PUT));
        assert!(is_state_changing_method(&Method::PATCH));
        assert!(is_state_changing_method(&Method::DELETE));
        assert!(!is_state_changing_method(&Method::GET));
        assert!(!is_state_changing_method(&Method::OPTIONS));
    }

    #[test]
    fn referer_must_share_the_frontend_origin() {
        let frontend = "http://localhost:3000";

        assert!(is_same_origin("http://localhost:3000", frontend));
        assert!(is_same_origin("http://localhost:3000/users/4/edit", frontend));
        assert!(!is_same_origin("http://localhost:3000.evil.example/users", frontend));
        assert!(!is_same_origin("http://localhost:30001/users", frontend));
        assert!(!is_same_origin("https://localhost:3000/users", frontend));
        assert!(!is_same_origin("", frontend));
    }
}
