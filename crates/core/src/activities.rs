//! Activity constants.
//!
//! Activities (paragliding, rafting, day hikes, ...) share the generic
//! length/number checks in [`crate::validate`]; only the bounds live here.

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_LOCATION_LENGTH: usize = 255;
pub const MAX_CURRENCY_LENGTH: usize = 10;
pub const MAX_DURATION_LENGTH: usize = 100;
pub const MAX_DIFFICULTY_LENGTH: usize = 100;
pub const MAX_CATEGORY_LENGTH: usize = 100;
pub const MAX_SEASON_LENGTH: usize = 100;

/// Minimum accepted value for the `min_age` requirement.
pub const MIN_AGE_FLOOR: i32 = 0;

/// Minimum accepted value for `max_participants`.
pub const MAX_PARTICIPANTS_FLOOR: i32 = 1;
