//! Input validation helpers.
//!
//! All validation runs before any mutation is attempted, so a failed
//! bulk call never partially applies.

use std::collections::HashSet;

use rd_model::{is_valid_name, name_key};

use crate::error::{DirectoryError, Result};

/// Rejects empty names and names containing the reserved delimiter.
pub(crate) fn ensure_valid_name(
    operation: &'static str,
    argument: &'static str,
    value: &str,
) -> Result<()> {
    if is_valid_name(value) {
        Ok(())
    } else {
        Err(DirectoryError::invalid_name(operation, argument, value))
    }
}

/// Validates every element of a bulk array argument.
///
/// Each element must be a valid name, and the array must not contain a
/// case-insensitive repeat.
pub(crate) fn ensure_elements(
    operation: &'static str,
    argument: &'static str,
    values: &[&str],
) -> Result<()> {
    let mut seen = HashSet::with_capacity(values.len());
    for value in values {
        ensure_valid_name(operation, argument, value)?;
        if !seen.insert(name_key(value)) {
            return Err(DirectoryError::duplicate_element(operation, argument, *value));
        }
    }
    Ok(())
}
