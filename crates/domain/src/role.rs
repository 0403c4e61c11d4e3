use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use warden_core::{AppError, AppResult, NonEmptyString};

/// Maximum role name length.
pub const ROLE_NAME_MAX_LENGTH: usize = 255;

/// Unique identifier for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RoleId(i64);

impl RoleId {
    /// Creates a role identifier from a stored value.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying integer value.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for RoleId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated role name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleName(NonEmptyString);

impl RoleName {
    /// Creates a validated role name, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        let trimmed = value.trim();

        let name = NonEmptyString::new(trimmed)
            .map_err(|_| AppError::Validation("role name is required".to_owned()))?;

        if trimmed.chars().count() > ROLE_NAME_MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "role name must not exceed {ROLE_NAME_MAX_LENGTH} characters"
            )));
        }

        Ok(Self(name))
    }

    /// Returns the role name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0.into()
    }
}
