//! Tour constants and validation rules.

use chrono::NaiveDate;

use crate::error::CoreError;

/* --------------------------------------------------------------------------
Constants
-------------------------------------------------------------------------- */

pub const DIFFICULTY_EASY: &str = "Easy";
pub const DIFFICULTY_MODERATE: &str = "Moderate";
pub const DIFFICULTY_CHALLENGING: &str = "Challenging";
pub const DIFFICULTY_EXTREME: &str = "Extreme";

/// All valid difficulty levels.
pub const VALID_DIFFICULTY_LEVELS: &[&str] = &[
    DIFFICULTY_EASY,
    DIFFICULTY_MODERATE,
    DIFFICULTY_CHALLENGING,
    DIFFICULTY_EXTREME,
];

pub const MAX_TITLE_LENGTH: usize = 255;
pub const MAX_DESTINATION_LENGTH: usize = 255;
pub const MAX_CURRENCY_LENGTH: usize = 10;
pub const MAX_TOUR_TYPE_LENGTH: usize = 100;
pub const MAX_GUIDE_LANGUAGE_LENGTH: usize = 100;
pub const MAX_SLUG_LENGTH: usize = 255;

/// Number of tours returned by the featured and popular showcases.
pub const SHOWCASE_LIMIT: i64 = 6;

/// Columns a list request may sort by. Anything else falls back to
/// [`DEFAULT_SORT_COLUMN`]; the whitelist guards the interpolated `ORDER BY`.
pub const SORTABLE_COLUMNS: &[&str] = &[
    "created_at",
    "title",
    "price",
    "duration_days",
    "available_slots",
];

pub const DEFAULT_SORT_COLUMN: &str = "created_at";

/* --------------------------------------------------------------------------
Validation functions
-------------------------------------------------------------------------- */

/// Validate that a difficulty level is one of the accepted values.
pub fn validate_difficulty_level(level: &str) -> Result<(), CoreError> {
    if VALID_DIFFICULTY_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Difficulty level must be {}, or {}",
            VALID_DIFFICULTY_LEVELS[..VALID_DIFFICULTY_LEVELS.len() - 1].join(", "),
            VALID_DIFFICULTY_LEVELS[VALID_DIFFICULTY_LEVELS.len() - 1]
        )))
    }
}

/// Validate that the end date does not precede the start date. Either side
/// may be absent.
pub fn validate_date_range(
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start_date, end_date) {
        if end < start {
            return Err(CoreError::Validation(
                "The end_date must be a date after or equal to start_date.".to_string(),
            ));
        }
    }
    Ok(())
}

/// Resolve a requested sort column against [`SORTABLE_COLUMNS`].
pub fn sort_column(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|name| SORTABLE_COLUMNS.iter().find(|col| **col == name))
        .copied()
        .unwrap_or(DEFAULT_SORT_COLUMN)
}

/// Resolve a requested sort order to `ASC` or `DESC` (default `DESC`).
pub fn sort_direction(requested: Option<&str>) -> &'static str {
    match requested {
        Some(order) if order.eq_ignore_ascii_case("asc") => "ASC",
        _ => "DESC",
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_difficulty_levels_accepted() {
        for level in VALID_DIFFICULTY_LEVELS {
            assert!(validate_difficulty_level(level).is_ok());
        }
    }

    #[test]
    fn test_invalid_difficulty_level_rejected() {
        let result = validate_difficulty_level("easy"); // case-sensitive
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Easy, Moderate, Challenging, or Extreme"));
    }

    #[test]
    fn test_date_range_ordering() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 1);
        let end = NaiveDate::from_ymd_opt(2026, 5, 10);
        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok()); // equal allowed
        assert!(validate_date_range(end, start).is_err());
    }

    #[test]
    fn test_date_range_with_missing_sides() {
        let date = NaiveDate::from_ymd_opt(2026, 5, 1);
        assert!(validate_date_range(None, None).is_ok());
        assert!(validate_date_range(date, None).is_ok());
        assert!(validate_date_range(None, date).is_ok());
    }

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column(Some("price")), "price");
        assert_eq!(sort_column(Some("created_at")), "created_at");
        // Injection attempts and unknown columns fall back to the default.
        assert_eq!(sort_column(Some("price; DROP TABLE tours")), "created_at");
        assert_eq!(sort_column(None), "created_at");
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(sort_direction(Some("asc")), "ASC");
        assert_eq!(sort_direction(Some("ASC")), "ASC");
        assert_eq!(sort_direction(Some("desc")), "DESC");
        assert_eq!(sort_direction(Some("sideways")), "DESC");
        assert_eq!(sort_direction(None), "DESC");
    }
}
