use std::sync::Arc;

use warden_core::AppResult;
use warden_domain::{PermissionName, Resource};

use crate::{PermissionRecord, PermissionRepository};

/// Application service for the flat permission catalog.
#[derive(Clone)]
pub struct PermissionCatalogService {
    repository: Arc<dyn PermissionRepository>,
}

impl PermissionCatalogService {
    /// Creates a catalog service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn PermissionRepository>) -> Self {
        Self { repository }
    }

    /// Lists every catalog entry ordered by name.
    pub async fn list_permissions(&self) -> AppResult<Vec<PermissionRecord>> {
        self.repository.list_permissions().await
    }

    /// Ensures every `<resource>.<ability>` permission exists. Idempotent.
    pub async fn ensure_default_catalog(&self) -> AppResult<Vec<PermissionRecord>> {
        let mut records = Vec::new();
        for name in Resource::default_catalog() {
            let name = PermissionName::new(name)?;
            records.push(self.repository.ensure_permission(&name).await?);
        }

        tracing::info!(permissions = records.len(), "permission catalog ensured");
        Ok(records)
    }
}
