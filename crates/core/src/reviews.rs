//! Review constants, rating buckets, and submission-throttle parameters.

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

/// Ratings are fractional, e.g. `3.5` is a valid submission.
pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

/// Ratings at or above this count as positive.
pub const POSITIVE_RATING_MIN: f64 = 4.0;

/// Ratings strictly below this count as negative. Ratings in between fall in
/// neither bucket.
pub const NEGATIVE_RATING_MAX: f64 = 3.0;

/// One submission per email address within this window.
pub const SUBMISSION_WINDOW_SECS: i64 = 3_600;

/// Message returned when a submission is throttled.
pub const THROTTLE_MESSAGE: &str =
    "You can only submit one review per hour with this email address.";

/// Number of reviews returned by the latest-approved endpoint.
pub const LATEST_LIMIT: i64 = 4;

/// Default page size for the approved-review listing.
pub const DEFAULT_PUBLISHABLE_PER_PAGE: i64 = 8;

pub const MAX_NAME_LENGTH: usize = 255;
pub const MAX_EMAIL_LENGTH: usize = 255;

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a rating is within `1.0..=5.0`.
pub fn validate_rating(rating: f64) -> Result<(), CoreError> {
    if rating.is_finite() && (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(
            "The rating must be between 1 and 5.".to_string(),
        ))
    }
}

/// Whether a rating counts toward the positive bucket.
pub fn is_positive_rating(rating: f64) -> bool {
    rating >= POSITIVE_RATING_MIN
}

/// Whether a rating counts toward the negative bucket.
pub fn is_negative_rating(rating: f64) -> bool {
    rating < NEGATIVE_RATING_MAX
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
