use axum::Router;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};
use warden_core::AppError;

use crate::state::AppState;
use crate::{auth, handlers, middleware};

mod cors;

pub fn build_router<Store>(
    app_state: AppState,
    frontend_url: &str,
    session_layer: SessionManagerLayer<Store>,
) -> Result<Router, AppError>
where
    Store: SessionStore + Clone,
{
    let protected_routes = Router::new()
        .route("/dashboard", get(handlers::dashboard::dashboard_handler))
        .route("/auth/me", get(auth::me_handler))
        .route(
            "/roles",
            get(handlers::roles::index_roles_handler).post(handlers::roles::store_role_handler),
        )
        .route(
            "/roles/create",
            get(handlers::roles::create_role_page_handler),
        )
        .route(
            "/roles/{role_id}",
            get(handlers::roles::show_role_handler)
                .put(handlers::roles::update_role_handler)
                .patch(handlers::roles::update_role_handler)
                .delete(handlers::roles::destroy_role_handler),
        )
        .route(
            "/roles/{role_id}/edit",
            get(handlers::roles::edit_role_page_handler),
        )
        .route(
            "/roles/{role_id}/permissions",
            put(handlers::roles::sync_role_permissions_handler),
        )
        .route(
            "/users",
            get(handlers::users::index_users_handler).post(handlers::users::store_user_handler),
        )
        .route(
            "/users/create",
            get(handlers::users::create_user_page_handler),
        )
        .route(
            "/users/{user_id}",
            get(handlers::users::show_user_handler)
                .put(handlers::users::update_user_handler)
                .patch(handlers::users::update_user_handler)
                .delete(handlers::users::destroy_user_handler),
        )
        .route(
            "/users/{user_id}/edit",
            get(handlers::users::edit_user_page_handler),
        )
        .route(
            "/users/{user_id}/roles",
            put(handlers::users::sync_user_roles_handler),
        )
        .route_layer(from_fn_with_state(
            app_state.clone(),
            middleware::authorize_route,
        ))
        .route_layer(from_fn(middleware::require_auth));

    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route("/auth/bootstrap", post(auth::bootstrap_handler))
        .route("/auth/logout", post(auth::logout_handler));

    Ok(Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::require_same_origin_for_mutations,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .layer(session_layer)
        .with_state(app_state))
}
