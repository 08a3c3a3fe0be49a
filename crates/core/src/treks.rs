//! Trek constants and validation rules.
//!
//! A trek row doubles as a generic "package" listing via its `data_type`
//! discriminator; both shapes share the same columns and rules.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// A guided trek listing.
pub const DATA_TYPE_TREK: &str = "trek";

/// A bundled package listing.
pub const DATA_TYPE_PACKAGE: &str = "package";

/// All valid `data_type` discriminators.
pub const VALID_DATA_TYPES: &[&str] = &[DATA_TYPE_TREK, DATA_TYPE_PACKAGE];

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_LOCATION_LENGTH: usize = 255;
pub const MAX_DURATION_LENGTH: usize = 100;
pub const MAX_DIFFICULTY_LENGTH: usize = 100;
pub const MAX_TYPE_LENGTH: usize = 100;
pub const MAX_CURRENCY_LENGTH: usize = 100;

/// Maximum length of a single day entry in the itinerary list.
pub const MAX_TREK_DAY_LENGTH: usize = 1_000;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a `data_type` value is one of the accepted discriminators.
pub fn validate_data_type(data_type: &str) -> Result<(), CoreError> {
    if VALID_DATA_TYPES.contains(&data_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "The selected data_type is invalid. Must be one of: {}",
            VALID_DATA_TYPES.join(", ")
        )))
    }
}

/// Validate a day-by-day itinerary list: at least one entry, each non-blank
/// and within [`MAX_TREK_DAY_LENGTH`].
pub fn validate_trek_days(days: &[String]) -> Result<(), CoreError> {
    if days.is_empty() {
        return Err(CoreError::Validation(
            "The trek_days must have at least 1 item.".to_string(),
        ));
    }
    for (i, day) in days.iter().enumerate() {
        if day.trim().is_empty() {
            return Err(CoreError::Validation(format!(
                "The trek_days.{i} field is required."
            )));
        }
        if day.chars().count() > MAX_TREK_DAY_LENGTH {
            return Err(CoreError::Validation(format!(
                "The trek_days.{i} may not be greater than {MAX_TREK_DAY_LENGTH} characters."
            )));
        }
    }
    Ok(())
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
