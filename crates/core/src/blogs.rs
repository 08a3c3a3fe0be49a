//! Blog constants and validation rules.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_SUBTITLE_LENGTH: usize = 255;
pub const MAX_EXCERPT_LENGTH: usize = 500;
pub const MAX_AUTHOR_LENGTH: usize = 255;
pub const MAX_SLUG_LENGTH: usize = 255;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate the structured body of a blog post.
///
/// The body is a JSON array of sections, each an object with string
/// `heading` and `paragraph` members.
pub fn validate_content_sections(content: &serde_json::Value) -> Result<(), CoreError> {
    let sections = content.as_array().ok_or_else(|| {
        CoreError::Validation("The content must be an array of sections.".to_string())
    })?;

    for (i, section) in sections.iter().enumerate() {
        let object = section.as_object().ok_or_else(|| {
            CoreError::Validation(format!("The content.{i} must be an object."))
        })?;
        for key in ["heading", "paragraph"] {
            match object.get(key) {
                Some(value) if value.is_string() => {}
                _ => {
                    return Err(CoreError::Validation(format!(
                        "The content.{i}.{key} field is required."
                    )))
                }
            }
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
