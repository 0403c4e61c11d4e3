use sqlx::PgPool;
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;
use warden_core::AppError;

pub async fn build_postgres_session_layer(
    pool: PgPool,
    cookie_secure: bool,
) -> Result<SessionManagerLayer<PostgresStore>, AppError> {
    let session_store = PostgresStore::new(pool)
        .with_table_name("tower_sessions")
        .map_err(|error| {
            AppError::Validation(format!("invalid session table name configuration: {error}"))
        })?;

    session_store.migrate().await.map_err(|error| {
        AppError::Internal(format!("failed to initialize session store: {error}"))
    })?;

    Ok(configure_session_layer(session_store, cookie_secure))
}

/// Process-local sessions for the in-memory backend; lost on restart.
pub fn build_memory_session_layer(cookie_secure: bool) -> SessionManagerLayer<MemoryStore> {
    configure_session_layer(MemoryStore::default(), cookie_secure)
}

fn configure_session_layer<Store>(store: Store, cookie_secure: bool) -> SessionManagerLayer<Store>
where
    Store: SessionStore,
{
    SessionManagerLayer::new(store)
        .with_secure(cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::minutes(30)))
}
