//! Warden API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod auth;
mod dev_seed;
mod dto;
mod error;
mod handlers;
mod middleware;
mod page;
mod route_policy;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;

use axum::Router;
use tracing::info;
use warden_core::AppError;

use crate::api_config::{ApiCommand, ApiConfig, StoreBackend};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    match (&config.store, config.command) {
        (StoreBackend::Postgres { database_url }, ApiCommand::Migrate) => {
            api_services::connect_and_migrate(database_url).await?;
            info!("database migrations applied successfully");
            Ok(())
        }
        (StoreBackend::Postgres { database_url }, ApiCommand::Seed) => {
            let pool = api_services::connect_and_migrate(database_url).await?;
            let app_state = api_services::build_postgres_state(&pool, &config);
            dev_seed::run(&app_state).await
        }
        (StoreBackend::Postgres { database_url }, ApiCommand::Serve) => {
            let pool = api_services::connect_and_migrate(database_url).await?;
            let app_state = api_services::build_postgres_state(&pool, &config);
            app_state
                .permission_catalog_service
                .ensure_default_catalog()
                .await?;

            let session_layer =
                api_services::build_postgres_session_layer(pool, config.cookie_secure).await?;
            let app = api_router::build_router(app_state, &config.frontend_url, session_layer)?;
            serve(app, config.socket_address()?).await
        }
        (StoreBackend::Memory, ApiCommand::Migrate) => Err(AppError::Validation(
            "the migrate command requires WARDEN_STORE=postgres".to_owned(),
        )),
        (StoreBackend::Memory, command) => {
            let app_state = api_services::build_memory_state(&config);
            dev_seed::run(&app_state).await?;
            if command == ApiCommand::Seed {
                return Ok(());
            }

            let session_layer = api_services::build_memory_session_layer(config.cookie_secure);
            let app = api_router::build_router(app_state, &config.frontend_url, session_layer)?;
            serve(app, config.socket_address()?).await
        }
    }
}

async fn serve(app: Router, address: SocketAddr) -> Result<(), AppError> {
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind API listener: {error}")))?;

    info!(%address, "warden-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
