use warden_core::{AppError, AppResult};
use warden_domain::{EmailAddress, UserId};

use super::UserService;
use crate::UserRecord;

impl UserService {
    /// Lists every user with assigned roles.
    pub async fn list_users(&self) -> AppResult<Vec<UserRecord>> {
        self.users.list_users().await
    }

    /// Returns one user or a not-found error.
    pub async fn get_user(&self, user_id: UserId) -> AppResult<UserRecord> {
        self.users
            .find_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user '{user_id}' does not exist")))
    }

    /// Finds a user by email, normalizing case and whitespace.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let Ok(email) = EmailAddress::new(email) else {
            return Ok(None);
        };
        self.users.find_user_by_email(&email).await
    }

    /// Lists every role name, used to populate assignment forms.
    pub async fn role_names(&self) -> AppResult<Vec<String>> {
        Ok(self
            .roles
            .list_roles()
            .await?
            .into_iter()
            .map(|role| role.name)
            .collect())
    }
}
