use std::collections::BTreeSet;

use warden_core::{AppError, AppResult, FieldErrors};

/// Records a field validation failure and returns the valid value, if any.
pub(crate) fn collect_field<T>(
    errors: &mut FieldErrors,
    field: &str,
    result: AppResult<T>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(AppError::Validation(message)) => {
            errors.add(field, message);
            None
        }
        Err(AppError::InvalidFields(nested)) => {
            errors.merge(nested);
            None
        }
        Err(other) => {
            errors.add(field, other.to_string());
            None
        }
    }
}

/// Collects catalog names into a lookup set.
pub(crate) fn name_set(names: impl IntoIterator<Item = String>) -> BTreeSet<String> {
    names.into_iter().collect()
}
