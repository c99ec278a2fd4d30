//! Shared utilities: parameter value validation and XML text escaping.

pub mod validation;
pub mod xml_escape;

pub use validation::{validate_choice, validate_mount_point};
pub use xml_escape::{escape_attr, escape_text};
