use super::*;

impl InMemoryAccessRepository {
    pub(super) async fn list_roles_impl(&self) -> AppResult<Vec<RoleRecord>> {
        let state = self.state.read().await;
        let mut roles: Vec<RoleRecord> = state
            .roles
            .iter()
            .map(|(role_id, role)| state.role_record(*role_id, role))
            .collect();
        roles.sort_by(|left, right| left.name.cmp(&right.name));
        Ok(roles)
    }

    pub(super) async fn find_role_impl(&self, role_id: RoleId) -> AppResult<Option<RoleRecord>> {
        let state = self.state.read().await;
        Ok(state
            .roles
            .get(&role_id.as_i64())
            .map(|role| state.role_record(role_id.as_i64(), role)))
    }

    pub(super) async fn create_role_impl(&self, input: RoleWrite) -> AppResult<RoleRecord> {
        let mut state = self.state.write().await;

        if state
            .roles
            .values()
            .any(|role| role.name == input.name.as_str())
        {
            return Err(taken("name"));
        }

        let permission_ids = state.synced_permission_ids(&BTreeSet::new(), &input.permissions)?;
        let now = Utc::now();
        let role = StoredRole {
            name: input.name.as_str().to_owned(),
            permission_ids,
            created_at: now,
            updated_at: now,
        };

        state.last_role_id += 1;
        let role_id = state.last_role_id;
        let record = state.role_record(role_id, &role);
        state.roles.insert(role_id, role);

        Ok(record)
    }

    pub(super) async fn update_role_impl(
        &self,
        role_id: RoleId,
        input: RoleWrite,
    ) -> AppResult<RoleRecord> {
        let mut state = self.state.write().await;
        let key = role_id.as_i64();

        let Some(current) = state.roles.get(&key).cloned() else {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        };

        if state
            .roles
            .iter()
            .any(|(other_id, other)| *other_id != key && other.name == input.name.as_str())
        {
            return Err(taken("name"));
        }

        let permission_ids =
            state.synced_permission_ids(&current.permission_ids, &input.permissions)?;
        let role = StoredRole {
            name: input.name.as_str().to_owned(),
            permission_ids,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        let record = state.role_record(key, &role);
        state.roles.insert(key, role);

        Ok(record)
    }

    pub(super) async fn sync_role_permissions_impl(
        &self,
        role_id: RoleId,
        target: &SyncTarget,
    ) -> AppResult<Vec<PermissionRecord>> {
        let mut state = self.state.write().await;
        let key = role_id.as_i64();

        let Some(current) = state.roles.get(&key).map(|role| role.permission_ids.clone()) else {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        };

        let permission_ids = state.synced_permission_ids(&current, target)?;
        let records = state.permission_records(&permission_ids);
        if let Some(role) = state.roles.get_mut(&key) {
            role.permission_ids = permission_ids;
        }

        Ok(records)
    }

    pub(super) async fn delete_role_impl(&self, role_id: RoleId) -> AppResult<()> {
        let mut state = self.state.write().await;
        let key = role_id.as_i64();

        if state.roles.remove(&key).is_none() {
            return Err(AppError::NotFound(format!("role '{role_id}' does not exist")));
        }

        for user in state.users.values_mut() {
            user.role_ids.remove(&key);
        }

        Ok(())
    }
}
