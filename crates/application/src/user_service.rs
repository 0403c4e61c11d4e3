//! User administration service.
//!
//! Owns user lifecycle operations: listing, creation with role assignment,
//! profile and password updates, role synchronization, and deletion.

use std::sync::Arc;

use crate::{PasswordHasher, RoleRepository, UserRepository};

mod mutations;
mod retrieval;
mod validation;

/// Application service for user administration.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    roles: Arc<dyn RoleRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl UserService {
    /// Creates a user service from repository and hasher implementations.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        roles: Arc<dyn RoleRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            users,
            roles,
            password_hasher,
        }
    }
}

#[cfg(test)]
mod tests;
