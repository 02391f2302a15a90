//! Filename validation for subjects and note titles
//!
//! Subjects and note titles become path segments (`root/<subject>/<content>.md`)
//! and link targets in exports, so they must avoid the characters reserved by
//! common filesystems.

use crate::error::{EbbError, Result};

/// Characters that may not appear in a subject or note title
pub const RESERVED_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Returns true when `name` contains none of [`RESERVED_CHARS`].
pub fn is_valid_name(name: &str) -> bool {
    !name.contains(RESERVED_CHARS)
}

/// Validate a name, labelling the error with the field it came from.
pub fn validate_name(field: &str, name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(EbbError::invalid_name(field, name))
    }
}
