use warden_core::{AppError, AppResult, FieldErrors};
use warden_domain::{EmailAddress, SyncTarget, UserName, validate_password};

use super::UserService;
use crate::form_validation::{collect_field, name_set};
use crate::unknown_role_errors;

/// Password handling for a submitted user form.
pub(super) enum PasswordField {
    /// Creation requires a password.
    Required(String),
    /// Updates keep the current hash when absent or empty.
    Optional(Option<String>),
}

/// User form fields that passed validation.
pub(super) struct ValidatedUser {
    pub(super) name: UserName,
    pub(super) email: EmailAddress,
    pub(super) password: Option<String>,
    pub(super) roles: SyncTarget,
}

impl UserService {
    /// Validates every submitted field and reports all failures at once.
    pub(super) async fn validate_user_form(
        &self,
        name: String,
        email: String,
        password: PasswordField,
        roles: Option<Vec<String>>,
    ) -> AppResult<ValidatedUser> {
        let mut errors = FieldErrors::new();

        let name = collect_field(&mut errors, "name", UserName::new(name));
        let email = collect_field(&mut errors, "email", EmailAddress::new(email));

        let password = match password {
            PasswordField::Required(password) => {
                collect_field(&mut errors, "password", validate_password(&password))
                    .map(|()| password)
            }
            PasswordField::Optional(password) => password.filter(|value| !value.is_empty()).and_then(
                |password| {
                    collect_field(&mut errors, "password", validate_password(&password))
                        .map(|()| password)
                },
            ),
        };

        let roles = SyncTarget::from_optional(roles);
        errors.merge(self.validate_role_target(&roles).await?);

        match (name, email) {
            (Some(name), Some(email)) if errors.is_empty() => Ok(ValidatedUser {
                name,
                email,
                password,
                roles,
            }),
            _ => Err(AppError::InvalidFields(errors)),
        }
    }

    /// Reports target role names missing from the role table.
    pub(super) async fn validate_role_target(&self, target: &SyncTarget) -> AppResult<FieldErrors> {
        if target.is_empty() {
            return Ok(FieldErrors::new());
        }

        let known = name_set(self.role_names().await?);
        Ok(unknown_role_errors(&target.missing_from(&known)))
    }
}
