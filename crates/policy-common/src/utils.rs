//! Validation helpers

use std::sync::LazyLock;

/// Application uuids are vendor-issued; letters, digits and hyphens only.
static APP_UUID_PATTERN: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new("^[A-Za-z0-9-]{1,64}$").expect("Invalid regex pattern"));

/// Validate an application's external uuid
///
/// # Examples
///
/// ```
/// use policy_common::is_valid_app_uuid;
///
/// assert!(is_valid_app_uuid("dfda5c35-700e-487e-87d2-ea4b2c572802"));
/// assert!(is_valid_app_uuid("a1b2c3"));
/// assert!(!is_valid_app_uuid(""));
/// assert!(!is_valid_app_uuid("with spaces"));
/// ```
pub fn is_valid_app_uuid(uuid: &str) -> bool {
    APP_UUID_PATTERN.is_match(uuid)
}
