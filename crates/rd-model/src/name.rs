//! Name validity and normalization rules.
//!
//! Role names and user identifiers share the same rules: they must be
//! non-empty and must not contain the reserved delimiter character.
//! Comparisons are case-insensitive; the original casing is preserved
//! for display.

/// Reserved delimiter character.
///
/// Names containing this character are rejected because the external
/// cookie layer serializes role lists as delimiter-joined strings.
pub const NAME_DELIMITER: char = ',';

/// Checks whether a role name or user identifier is valid.
///
/// A name is valid when it is non-empty and contains no
/// [`NAME_DELIMITER`].
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(NAME_DELIMITER)
}

/// Returns the normalized lookup key for a name.
///
/// Names are matched case-insensitively, so every lookup and uniqueness
/// check goes through the lowercased key.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}
