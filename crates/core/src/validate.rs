//! Field checks that accumulate into [`FieldErrors`].
//!
//! Each `require_*` / `optional_*` helper looks a field up in a [`FieldMap`],
//! coerces it, and records every violation it finds. On failure the returned
//! value is a neutral placeholder; the recorded error guarantees callers bail
//! via [`FieldErrors::into_result`] before the placeholder can be observed.
//!
//! Blank strings are treated as absent, so an empty optional field coerces to
//! `None` rather than an empty string.

use crate::coerce;
use crate::error::{CoreError, FieldErrors};
use crate::fields::FieldMap;

/// A required, non-blank string, optionally bounded by `max` characters.
pub fn require_str(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    max: Option<usize>,
) -> String {
    match non_blank(fields, name) {
        Some(value) => {
            if let Some(max) = max {
                if value.chars().count() > max {
                    errors.push(
                        name,
                        format!("The {name} may not be greater than {max} characters."),
                    );
                }
            }
            value.to_string()
        }
        None => {
            errors.push(name, format!("The {name} field is required."));
            String::new()
        }
    }
}

/// An optional string; blank coerces to `None`.
pub fn optional_str(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    max: Option<usize>,
) -> Option<String> {
    let value = non_blank(fields, name)?;
    if let Some(max) = max {
        if value.chars().count() > max {
            errors.push(
                name,
                format!("The {name} may not be greater than {max} characters."),
            );
        }
    }
    Some(value.to_string())
}

/// A required float with an inclusive lower bound.
pub fn require_f64(errors: &mut FieldErrors, fields: &FieldMap, name: &str, min: f64) -> f64 {
    match non_blank(fields, name) {
        Some(raw) => match coerce::parse_f64(raw) {
            Some(value) => {
                if value < min {
                    errors.push(name, format!("The {name} must be at least {min}."));
                }
                value
            }
            None => {
                errors.push(name, format!("The {name} must be a number."));
                0.0
            }
        },
        None => {
            errors.push(name, format!("The {name} field is required."));
            0.0
        }
    }
}

/// An optional float with an inclusive lower bound; blank coerces to `None`.
pub fn optional_f64(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    min: f64,
) -> Option<f64> {
    let raw = non_blank(fields, name)?;
    match coerce::parse_f64(raw) {
        Some(value) => {
            if value < min {
                errors.push(name, format!("The {name} must be at least {min}."));
            }
            Some(value)
        }
        None => {
            errors.push(name, format!("The {name} must be a number."));
            None
        }
    }
}

/// A required integer with an inclusive lower bound.
pub fn require_i32(errors: &mut FieldErrors, fields: &FieldMap, name: &str, min: i32) -> i32 {
    match non_blank(fields, name) {
        Some(raw) => match coerce::parse_i64(raw).and_then(|v| i32::try_from(v).ok()) {
            Some(value) => {
                if value < min {
                    errors.push(name, format!("The {name} must be at least {min}."));
                }
                value
            }
            None => {
                errors.push(name, format!("The {name} must be an integer."));
                0
            }
        },
        None => {
            errors.push(name, format!("The {name} field is required."));
            0
        }
    }
}

/// An optional integer with an inclusive lower bound; blank coerces to `None`.
pub fn optional_i32(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    min: i32,
) -> Option<i32> {
    let raw = non_blank(fields, name)?;
    match coerce::parse_i64(raw).and_then(|v| i32::try_from(v).ok()) {
        Some(value) => {
            if value < min {
                errors.push(name, format!("The {name} must be at least {min}."));
            }
            Some(value)
        }
        None => {
            errors.push(name, format!("The {name} must be an integer."));
            None
        }
    }
}

/// A required boolean (accepts the forms recognized by [`coerce::parse_bool`]).
pub fn require_bool(errors: &mut FieldErrors, fields: &FieldMap, name: &str) -> bool {
    match non_blank(fields, name) {
        Some(raw) => match coerce::parse_bool(raw) {
            Some(value) => value,
            None => {
                errors.push(name, format!("The {name} field must be true or false."));
                false
            }
        },
        None => {
            errors.push(name, format!("The {name} field is required."));
            false
        }
    }
}

/// An optional boolean; blank coerces to `None`.
pub fn optional_bool(errors: &mut FieldErrors, fields: &FieldMap, name: &str) -> Option<bool> {
    let raw = non_blank(fields, name)?;
    match coerce::parse_bool(raw) {
        Some(value) => Some(value),
        None => {
            errors.push(name, format!("The {name} field must be true or false."));
            None
        }
    }
}

/// An optional `YYYY-MM-DD` date; blank coerces to `None`.
pub fn optional_date(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
) -> Option<chrono::NaiveDate> {
    let raw = non_blank(fields, name)?;
    match coerce::parse_date(raw) {
        Some(date) => Some(date),
        None => {
            errors.push(name, format!("The {name} is not a valid date."));
            None
        }
    }
}

/// A required list of strings.
///
/// Repeated form fields are taken as-is; a single value is coerced via
/// [`coerce::parse_string_list`] (JSON array or comma-separated).
pub fn require_string_list(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
) -> Vec<String> {
    match string_list(fields, name) {
        Some(Some(list)) => list,
        Some(None) => {
            errors.push(name, format!("The {name} must be a list of strings."));
            Vec::new()
        }
        None => {
            errors.push(name, format!("The {name} field is required."));
            Vec::new()
        }
    }
}

/// An optional list of strings; absent or blank coerces to `None`.
pub fn optional_string_list(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
) -> Option<Vec<String>> {
    match string_list(fields, name)? {
        Some(list) => Some(list),
        None => {
            errors.push(name, format!("The {name} must be a list of strings."));
            None
        }
    }
}

/// An optional JSON array field (sent as a JSON string); blank coerces to `None`.
pub fn optional_json_array(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
) -> Option<serde_json::Value> {
    let raw = non_blank(fields, name)?;
    match coerce::parse_json(raw) {
        Some(value) if value.is_array() => Some(value),
        _ => {
            errors.push(name, format!("The {name} must be an array."));
            None
        }
    }
}

/// Validate an email address: a single `@` with a non-empty local part and a
/// dotted domain, no whitespace.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let invalid = || {
        CoreError::Validation("The email must be a valid email address.".to_string())
    };

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return Err(invalid()),
    };
    if local.is_empty() || domain.is_empty() {
        return Err(invalid());
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid());
    }
    Ok(())
}

/// First non-blank value of a field, or `None` when absent/blank.
///
/// Callers with bespoke rules (custom required messages, enum sets) use this
/// directly; everything else goes through the `require_*` / `optional_*`
/// helpers above.
pub fn non_blank<'a>(fields: &'a FieldMap, name: &str) -> Option<&'a str> {
    let value = fields.get(name)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// `None` = absent; `Some(None)` = present but not coercible to a string list.
fn string_list(fields: &FieldMap, name: &str) -> Option<Option<Vec<String>>> {
    let values = fields.get_all(name);
    match values.len() {
        0 => None,
        1 => {
            let raw = values[0].trim();
            if raw.is_empty() {
                return None;
            }
            Some(coerce::parse_string_list(raw))
        }
        _ => Some(Some(values.to_vec())),
    }
}
