//! Shared Postgres fixtures for adapter tests. Tests skip when `DATABASE_URL` is unset.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;

use warden_application::PermissionRepository;
use warden_domain::PermissionName;

use crate::PostgresPermissionRepository;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub(crate) async fn test_pool() -> Option<PgPool> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        return None;
    };

    let pool = match PgPoolOptions::new()
        .max_connections(2)
        .connect(database_url.as_str())
        .await
    {
        Ok(pool) => pool,
        Err(error) => panic!("failed to connect to DATABASE_URL in test: {error}"),
    };

    if let Err(error) = MIGRATOR.run(&pool).await {
        panic!("failed to run migrations for postgres adapter tests: {error}");
    }

    Some(pool)
}

/// Returns a name unique to this test run so parallel tests never collide.
pub(crate) fn unique_name(prefix: &str) -> String {
    let nanos = chrono::Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_default();
    format!("{prefix}-{nanos}")
}

/// Creates catalog permissions and returns their names.
pub(crate) async fn ensure_permissions(pool: &PgPool, names: &[&str]) -> Vec<String> {
    let repository = PostgresPermissionRepository::new(pool.clone());
    let mut created = Vec::new();
    for name in names {
        let Ok(name) = PermissionName::new(*name) else {
            panic!("invalid test permission name '{name}'");
        };
        match repository.ensure_permission(&name).await {
            Ok(record) => created.push(record.name),
            Err(error) => panic!("failed to ensure permission: {error}"),
        }
    }
    created
}
