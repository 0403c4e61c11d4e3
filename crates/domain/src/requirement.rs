use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use warden_core::AppError;

use crate::{Ability, EffectivePermissions, PermissionName, Resource};

/// Permission expression guarding an operation.
///
/// The expression is a disjunction: it is satisfied when the acting user holds
/// at least one of the listed names. A single-name requirement is a disjunction
/// of one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionRequirement {
    any_of: Vec<PermissionName>,
}

impl PermissionRequirement {
    /// Requires exactly one permission.
    #[must_use]
    pub fn single(permission: PermissionName) -> Self {
        Self {
            any_of: vec![permission],
        }
    }

    /// Requires at least one of the given permissions.
    pub fn any_of(permissions: impl IntoIterator<Item = PermissionName>) -> Result<Self, AppError> {
        let mut any_of: Vec<PermissionName> = Vec::new();
        for permission in permissions {
            if !any_of.contains(&permission) {
                any_of.push(permission);
            }
        }

        if any_of.is_empty() {
            return Err(AppError::Validation(
                "permission requirement must list at least one permission".to_owned(),
            ));
        }

        Ok(Self { any_of })
    }

    /// Returns the accepted permission names in declaration order.
    #[must_use]
    pub fn permissions(&self) -> &[PermissionName] {
        self.any_of.as_slice()
    }

    /// Returns whether the effective permission set satisfies this requirement.
    #[must_use]
    pub fn is_satisfied_by(&self, permissions: &EffectivePermissions) -> bool {
        self.any_of
            .iter()
            .any(|permission| permissions.contains(permission.as_str()))
    }
}

impl FromStr for PermissionRequirement {
    type Err = AppError;

    /// Parses the `a|b|c` route notation.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let permissions = value
            .split('|')
            .map(|segment| PermissionName::new(segment.trim()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| {
                AppError::Validation(format!(
                    "invalid permission expression '{value}': {error}"
                ))
            })?;

        Self::any_of(permissions)
    }
}

impl TryFrom<String> for PermissionRequirement {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PermissionRequirement> for String {
    fn from(value: PermissionRequirement) -> Self {
        value.to_string()
    }
}

impl Display for PermissionRequirement {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .any_of
            .iter()
            .map(PermissionName::as_str)
            .collect::<Vec<_>>()
            .join("|");
        formatter.write_str(joined.as_str())
    }
}

/// CRUD-style route actions exposed for each administered resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceAction {
    /// Listing page.
    Index,
    /// Creation form.
    Create,
    /// Creation submit.
    Store,
    /// Detail page.
    Show,
    /// Edit form.
    Edit,
    /// Edit submit, including association sync.
    Update,
    /// Deletion.
    Destroy,
}

impl ResourceAction {
    /// Returns the stable action name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Index => "index",
            Self::Create => "create",
            Self::Store => "store",
            Self::Show => "show",
            Self::Edit => "edit",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }

    /// Returns the permission expression guarding this action on `resource`.
    ///
    /// Reading (index, show) is granted by `view` or by any management
    /// ability, so managers never need a separate view grant.
    #[must_use]
    pub fn required_permissions(&self, resource: Resource) -> PermissionRequirement {
        let abilities: &[Ability] = match self {
            Self::Create | Self::Store => &[Ability::Create],
            Self::Edit | Self::Update => &[Ability::Edit],
            Self::Destroy => &[Ability::Delete],
            Self::Index | Self::Show => Ability::all(),
        };

        PermissionRequirement {
            any_of: abilities
                .iter()
                .map(|ability| PermissionName(resource.permission(*ability)))
                .collect(),
        }
    }
}
