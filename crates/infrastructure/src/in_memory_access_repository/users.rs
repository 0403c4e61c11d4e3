use super::*;

impl InMemoryAccessRepository {
    pub(super) async fn list_users_impl(&self) -> AppResult<Vec<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .map(|(user_id, user)| state.user_record(*user_id, user))
            .collect())
    }

    pub(super) async fn find_user_impl(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .get(&user_id.as_i64())
            .map(|user| state.user_record(user_id.as_i64(), user)))
    }

    pub(super) async fn find_user_by_email_impl(
        &self,
        email: &EmailAddress,
    ) -> AppResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|(_, user)| user.email == email.as_str())
            .map(|(user_id, user)| state.user_record(*user_id, user)))
    }

    pub(super) async fn create_user_impl(&self, input: NewUserWrite) -> AppResult<UserRecord> {
        let mut state = self.state.write().await;

        if state
            .users
            .values()
            .any(|user| user.email == input.email.as_str())
        {
            return Err(taken("email"));
        }

        let role_ids = state.synced_role_ids(&BTreeSet::new(), &input.roles)?;
        let now = Utc::now();
        let user = StoredUser {
            name: input.name.as_str().to_owned(),
            email: input.email.as_str().to_owned(),
            password_hash: input.password_hash,
            role_ids,
            created_at: now,
            updated_at: now,
        };

        state.last_user_id += 1;
        let user_id = state.last_user_id;
        let record = state.user_record(user_id, &user);
        state.users.insert(user_id, user);

        Ok(record)
    }

    pub(super) async fn update_user_impl(
        &self,
        user_id: UserId,
        input: UserUpdateWrite,
    ) -> AppResult<UserRecord> {
        let mut state = self.state.write().await;
        let key = user_id.as_i64();

        let Some(current) = state.users.get(&key).cloned() else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };

        if state
            .users
            .iter()
            .any(|(other_id, other)| *other_id != key && other.email == input.email.as_str())
        {
            return Err(taken("email"));
        }

        let role_ids = state.synced_role_ids(&current.role_ids, &input.roles)?;
        let user = StoredUser {
            name: input.name.as_str().to_owned(),
            email: input.email.as_str().to_owned(),
            password_hash: input.password_hash.unwrap_or(current.password_hash),
            role_ids,
            created_at: current.created_at,
            updated_at: Utc::now(),
        };

        let record = state.user_record(key, &user);
        state.users.insert(key, user);

        Ok(record)
    }

    pub(super) async fn sync_user_roles_impl(
        &self,
        user_id: UserId,
        target: &SyncTarget,
    ) -> AppResult<Vec<RoleSummary>> {
        let mut state = self.state.write().await;
        let key = user_id.as_i64();

        let Some(current) = state.users.get(&key).map(|user| user.role_ids.clone()) else {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        };

        let role_ids = state.synced_role_ids(&current, target)?;
        let summaries = state.role_summaries(&role_ids);
        if let Some(user) = state.users.get_mut(&key) {
            user.role_ids = role_ids;
        }

        Ok(summaries)
    }

    pub(super) async fn delete_user_impl(&self, user_id: UserId) -> AppResult<()> {
        let mut state = self.state.write().await;

        if state.users.remove(&user_id.as_i64()).is_none() {
            return Err(AppError::NotFound(format!("user '{user_id}' does not exist")));
        }

        Ok(())
    }

    /// Returns the stored password hash for a user.
    pub async fn password_hash(&self, user_id: UserId) -> Option<String> {
        self.state
            .read()
            .await
            .users
            .get(&user_id.as_i64())
            .map(|user| user.password_hash.clone())
    }
}
