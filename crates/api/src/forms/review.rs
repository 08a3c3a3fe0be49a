//! Review submission parsing.
//!
//! Reviews arrive as JSON rather than multipart. The payload fields are all
//! optional at the serde level so a missing field surfaces as a per-field
//! message instead of a body rejection.

use serde::Deserialize;
use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::types::DbId;
use trailhead_core::{reviews, validate};
use trailhead_db::models::review::CreateReview;

/// Raw JSON body of a review submission.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub review: Option<String>,
    pub rating: Option<f64>,
    pub trek_id: Option<DbId>,
}

pub fn parse_submission(payload: ReviewSubmission) -> Result<CreateReview, CoreError> {
    let mut errors = FieldErrors::new();

    let name = required_text(
        &mut errors,
        "name",
        payload.name.as_deref(),
        Some(reviews::MAX_NAME_LENGTH),
    );
    let email = required_text(
        &mut errors,
        "email",
        payload.email.as_deref(),
        Some(reviews::MAX_EMAIL_LENGTH),
    );
    if !errors.contains("email") {
        errors.capture("email", validate::validate_email(&email));
    }
    let review = required_text(&mut errors, "review", payload.review.as_deref(), None);

    let rating = match payload.rating {
        Some(rating) => {
            errors.capture("rating", reviews::validate_rating(rating));
            rating
        }
        None => {
            errors.push("rating", "The rating field is required.");
            0.0
        }
    };

    errors.into_result()?;

    Ok(CreateReview {
        name,
        email,
        review,
        rating,
        trek_id: payload.trek_id,
    })
}

/// A required, non-blank text member of the JSON body.
fn required_text(
    errors: &mut FieldErrors,
    name: &str,
    value: Option<&str>,
    max: Option<usize>,
) -> String {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
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
