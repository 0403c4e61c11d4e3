use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use warden_core::{AppError, AppResult};

/// Unique identifier for a permission catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PermissionId(i64);

impl PermissionId {
    /// Creates a permission identifier from a stored value.
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

impl Display for PermissionId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated permission catalog name such as `users.view`.
///
/// Names are opaque strings matched literally; the dot carries no hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionName(pub(crate) String);

impl PermissionName {
    /// Creates a validated permission name.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(AppError::Validation(
                "permission name must not be empty".to_owned(),
            ));
        }

        if value.chars().any(|character| character.is_whitespace() || character == '|') {
            return Err(AppError::Validation(format!(
                "permission name '{value}' must not contain whitespace or '|'"
            )));
        }

        if value.chars().count() > 255 {
            return Err(AppError::Validation(
                "permission name must not exceed 255 characters".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the permission name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for PermissionName {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PermissionName> for String {
    fn from(value: PermissionName) -> Self {
        value.0
    }
}

impl Display for PermissionName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Administered resources guarded by route permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    /// User accounts.
    Users,
    /// Roles and their permission bundles.
    Roles,
}

impl Resource {
    /// Returns the stable route and permission prefix.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Roles => "roles",
        }
    }

    /// Returns all administered resources.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Resource] = &[Resource::Users, Resource::Roles];
        ALL
    }

    /// Returns the catalog name granting `ability` on this resource.
    #[must_use]
    pub fn permission(&self, ability: Ability) -> String {
        format!("{}.{}", self.as_str(), ability.as_str())
    }

    /// Returns the baseline catalog entries for every resource and ability.
    #[must_use]
    pub fn default_catalog() -> Vec<String> {
        Self::all()
            .iter()
            .flat_map(|resource| {
                Ability::all()
                    .iter()
                    .map(|ability| resource.permission(*ability))
            })
            .collect()
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "users" => Ok(Self::Users),
            "roles" => Ok(Self::Roles),
            _ => Err(AppError::Validation(format!(
                "unknown resource value '{value}'"
            ))),
        }
    }
}

/// Management abilities granted per resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    /// Read listings and details.
    View,
    /// Create new entries.
    Create,
    /// Edit entries and their associations.
    Edit,
    /// Delete entries.
    Delete,
}

impl Ability {
    /// Returns the stable permission suffix.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Edit => "edit",
            Self::Delete => "delete",
        }
    }

    /// Returns all abilities in catalog order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Ability] = &[Ability::View, Ability::Create, Ability::Edit, Ability::Delete];
        ALL
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Ability, PermissionName, Resource};

    #[test]
    fn permission_name_rejects_separator_and_whitespace() {
        assert!(PermissionName::new("users view").is_err());
        assert!(PermissionName::new("users.view|users.edit").is_err());
        assert!(PermissionName::new("").is_err());
        assert!(PermissionName::new("users.view").is_ok());
    }

    #[test]
    fn deserialized_permission_name_is_validated() -> Result<(), serde_json::Error> {
        let name: PermissionName = serde_json::from_str("\"roles.edit\"")?;
        assert_eq!(name.as_str(), "roles.edit");

        assert!(serde_json::from_str::<PermissionName>("\"roles.view|roles.edit\"").is_err());
        assert!(serde_json::from_str::<PermissionName>("\"\"").is_err());
        Ok(())
    }

    #[test]
    fn resource_permission_uses_dotted_names() {
        assert_eq!(Resource::Roles.permission(Ability::Delete), "roles.delete");
        assert_eq!(Resource::Users.permission(Ability::View), "users.view");
    }

    #[test]
    fn default_catalog_covers_every_resource_ability_pair() {
        let catalog = Resource::default_catalog();
        assert_eq!(catalog.len(), 8);
        assert!(catalog.contains(&"users.create".to_owned()));
        assert!(catalog.contains(&"roles.edit".to_owned()));
    }

    #[test]
    fn unknown_resource_is_rejected() {
        assert!(Resource::from_str("tenants").is_err());
        assert!(matches!(Resource::from_str("users"), Ok(Resource::Users)));
    }
}
