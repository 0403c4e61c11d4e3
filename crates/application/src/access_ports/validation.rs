use warden_core::FieldErrors;

/// Submitted field holding role permission names.
pub const PERMISSIONS_FIELD: &str = "permissions";

/// Submitted field holding user role names.
pub const ROLES_FIELD: &str = "roles";

/// Field errors for permission names missing from the catalog.
#[must_use]
pub fn unknown_permission_errors(missing: &[&str]) -> FieldErrors {
    unknown_entries(PERMISSIONS_FIELD, "permission", missing)
}

/// Field errors for role names missing from the catalog.
#[must_use]
pub fn unknown_role_errors(missing: &[&str]) -> FieldErrors {
    unknown_entries(ROLES_FIELD, "role", missing)
}

fn unknown_entries(field: &str, label: &str, missing: &[&str]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for name in missing {
        errors.add(field, format!("unknown {label} '{name}'"));
    }
    errors
}
