//! Parameter validation utilities.
//!
//! This module provides the individual value checks used when binding
//! profile parameters. Each check returns a human-readable message on
//! failure; the caller ties the message to the offending parameter names.

use std::sync::LazyLock;

use regex::Regex;

/// Absolute POSIX path without whitespace or empty components
static MOUNT_POINT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([^/\s]+(/[^/\s]+)*)?/?$").expect("Invalid mount point regex")
});

/// Validate a temporary filesystem mount point
///
/// The blockstore is mounted by the testbed on the provisioned node, so the
/// path must be absolute and must not name the root filesystem itself.
///
/// # Examples
/// ```
/// use rspecgen::utils::validation::validate_mount_point;
///
/// assert!(validate_mount_point("/mydata").is_ok());
/// assert!(validate_mount_point("").is_err());
/// assert!(validate_mount_point("mydata").is_err());
/// assert!(validate_mount_point("/").is_err());
/// ```
pub fn validate_mount_point(mount: &str) -> Result<(), String> {
    if mount.is_empty() {
        return Err("Mount point cannot be empty".to_string());
    }
    if !mount.starts_with('/') {
        return Err(format!("Mount point '{}' must be an absolute path", mount));
    }
    if mount == "/" {
        return Err("Mount point cannot be the root filesystem".to_string());
    }
    if !MOUNT_POINT_PATTERN.is_match(mount) {
        return Err(format!(
            "Mount point '{}' must not contain whitespace or empty path components",
            mount
        ));
    }
    Ok(())
}

/// Validate that a value is one of the legal `(value, label)` choices
pub fn validate_choice(value: &str, legal_values: &[(&str, &str)]) -> Result<(), String> {
    if legal_values.iter().any(|(legal, _)| *legal == value) {
        return Ok(());
    }
    let options: Vec<&str> = legal_values.iter().map(|(legal, _)| *legal).collect();
    Err(format!(
        "'{}' is not a legal value (expected one of: {})",
        value,
        options.join(", ")
    ))
}
