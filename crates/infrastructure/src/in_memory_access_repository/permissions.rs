use super::*;

impl InMemoryAccessRepository {
    pub(super) async fn list_permissions_impl(&self) -> AppResult<Vec<PermissionRecord>> {
        let state = self.state.read().await;
        let ids = state.permissions.keys().copied().collect();
        Ok(state.permission_records(&ids))
    }

    pub(super) async fn ensure_permission_impl(
        &self,
        name: &PermissionName,
    ) -> AppResult<PermissionRecord> {
        let mut state = self.state.write().await;

        if let Some((id, existing)) = state
            .permissions
            .iter()
            .find(|(_, existing)| existing.as_str() == name.as_str())
        {
            return Ok(PermissionRecord {
                permission_id: PermissionId::new(*id),
                name: existing.clone(),
            });
        }

        state.last_permission_id += 1;
        let permission_id = state.last_permission_id;
        state
            .permissions
            .insert(permission_id, name.as_str().to_owned());

        Ok(PermissionRecord {
            permission_id: PermissionId::new(permission_id),
            name: name.as_str().to_owned(),
        })
    }
}
