//! Activity form parsing.
//!
//! Unlike treks and tours, `inclusions` here is free text, and uploads run
//! under the extended image rules (GIF allowed, 10 MiB ceiling).

use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::fields::FieldMap;
use trailhead_core::{activities, validate};
use trailhead_db::models::activity::{CreateActivity, UpdateActivity};

use super::{optional_image, optional_image_list, UploadedFile};
use crate::uploads::{PendingImage, ACTIVITY_MEDIA};

/// Validated activity creation input: the insert DTO plus any uploads to stage.
#[derive(Debug)]
pub struct ActivityCreateForm {
    pub record: CreateActivity,
    pub featured: Option<PendingImage>,
    pub gallery: Option<Vec<PendingImage>>,
}

/// Validated activity update input.
#[derive(Debug)]
pub struct ActivityUpdateForm {
    pub record: UpdateActivity,
    pub featured: Option<PendingImage>,
    pub gallery: Option<Vec<PendingImage>>,
}

pub fn parse_create(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<ActivityCreateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let title = validate::require_str(&mut errors, fields, "title", Some(activities::MAX_TITLE_LENGTH));
    let location =
        validate::require_str(&mut errors, fields, "location", Some(activities::MAX_LOCATION_LENGTH));
    let price = validate::require_f64(&mut errors, fields, "price", 0.0);
    let currency =
        validate::require_str(&mut errors, fields, "currency", Some(activities::MAX_CURRENCY_LENGTH));
    let duration =
        validate::require_str(&mut errors, fields, "duration", Some(activities::MAX_DURATION_LENGTH));
    let difficulty = validate::require_str(
        &mut errors,
        fields,
        "difficulty",
        Some(activities::MAX_DIFFICULTY_LENGTH),
    );
    let category =
        validate::require_str(&mut errors, fields, "category", Some(activities::MAX_CATEGORY_LENGTH));
    let min_age = validate::optional_i32(&mut errors, fields, "min_age", activities::MIN_AGE_FLOOR);
    let max_participants = validate::optional_i32(
        &mut errors,
        fields,
        "max_participants",
        activities::MAX_PARTICIPANTS_FLOOR,
    );
    let description = validate::optional_str(&mut errors, fields, "description", None);
    let inclusions = validate::optional_str(&mut errors, fields, "inclusions", None);
    let requirements = validate::optional_str(&mut errors, fields, "requirements", None);
    let is_featured = validate::require_bool(&mut errors, fields, "is_featured");
    let is_active = validate::require_bool(&mut errors, fields, "is_active");
    let season =
        validate::optional_str(&mut errors, fields, "season", Some(activities::MAX_SEASON_LENGTH));

    let featured = optional_image(&mut errors, files, "featured_image", &ACTIVITY_MEDIA.rules);
    let gallery = optional_image_list(&mut errors, files, "gallery_images", &ACTIVITY_MEDIA.rules);

    errors.into_result()?;

    Ok(ActivityCreateForm {
        record: CreateActivity {
            title,
            location,
            price,
            currency: Some(currency),
            duration,
            difficulty,
            category,
            min_age,
            max_participants,
            description,
            inclusions,
            requirements,
            featured_image: None,
            gallery_images: None,
            is_featured: Some(is_featured),
            is_active: Some(is_active),
            season,
        },
        featured,
        gallery,
    })
}

pub fn parse_update(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<ActivityUpdateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let record = UpdateActivity {
        title: validate::optional_str(
            &mut errors,
            fields,
            "title",
            Some(activities::MAX_TITLE_LENGTH),
        ),
        location: validate::optional_str(
            &mut errors,
            fields,
            "location",
            Some(activities::MAX_LOCATION_LENGTH),
        ),
        price: validate::optional_f64(&mut errors, fields, "price", 0.0),
        currency: validate::optional_str(
            &mut errors,
            fields,
            "currency",
            Some(activities::MAX_CURRENCY_LENGTH),
        ),
        duration: validate::optional_str(
            &mut errors,
            fields,
            "duration",
            Some(activities::MAX_DURATION_LENGTH),
        ),
        difficulty: validate::optional_str(
            &mut errors,
            fields,
            "difficulty",
            Some(activities::MAX_DIFFICULTY_LENGTH),
        ),
        category: validate::optional_str(
            &mut errors,
            fields,
            "category",
            Some(activities::MAX_CATEGORY_LENGTH),
        ),
        min_age: validate::optional_i32(&mut errors, fields, "min_age", activities::MIN_AGE_FLOOR),
        max_participants: validate::optional_i32(
            &mut errors,
            fields,
            "max_participants",
            activities::MAX_PARTICIPANTS_FLOOR,
        ),
        description: validate::optional_str(&mut errors, fields, "description", None),
        inclusions: validate::optional_str(&mut errors, fields, "inclusions", None),
        requirements: validate::optional_str(&mut errors, fields, "requirements", None),
        featured_image: None,
        gallery_images: None,
        is_featured: validate::optional_bool(&mut errors, fields, "is_featured"),
        is_active: validate::optional_bool(&mut errors, fields, "is_active"),
        season: validate::optional_str(
            &mut errors,
            fields,
            "season",
            Some(activities::MAX_SEASON_LENGTH),
        ),
    };

    let featured = optional_image(&mut errors, files, "featured_image", &ACTIVITY_MEDIA.rules);
    let gallery = optional_image_list(&mut errors, files, "gallery_images", &ACTIVITY_MEDIA.rules);

    errors.into_result()?;

    Ok(ActivityUpdateForm {
        record,
        featured,
        gallery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    const GIF: &[u8] = b"GIF89a\x01\x00\x01\x00";

    fn valid_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("title", "Pokhara Paragliding");
        fields.insert("location", "Sarangkot");
        fields.insert("price", "95");
        fields.insert("currency", "USD");
        fields.insert("duration", "30 minutes");
        fields.insert("difficulty", "Easy");
        fields.insert("category", "Air");
        fields.insert("is_featured", "0");
        fields.insert("is_active", "1");
        fields
    }

    #[test]
    fn test_parse_create_valid() {
        let form = parse_create(&valid_fields(), &[]).unwrap();
        assert_eq!(form.record.title, "Pokhara Paragliding");
        assert_eq!(form.record.is_featured, Some(false));
        assert_eq!(form.record.is_active, Some(true));
        assert!(form.record.min_age.is_none());
    }

    #[test]
    fn test_parse_create_inclusions_is_free_text() {
        let mut fields = valid_fields();
        fields.insert("inclusions", "Pilot, insurance, transfers");
        let form = parse_create(&fields, &[]).unwrap();
        // Kept verbatim, not split into a list.
        assert_eq!(
            form.record.inclusions.as_deref(),
            Some("Pilot, insurance, transfers")
        );
    }

    #[test]
    fn test_parse_create_missing_fields_all_reported() {
        let err = parse_create(&FieldMap::new(), &[]).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        for field in [
            "title",
            "location",
            "price",
            "currency",
            "duration",
            "difficulty",
            "category",
            "is_featured",
            "is_active",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_parse_create_accepts_gif_under_extended_rules() {
        let files = vec![UploadedFile {
            field: "featured_image".to_string(),
            bytes: Bytes::from_static(GIF),
        }];
        let form = parse_create(&valid_fields(), &files).unwrap();
        assert_eq!(form.featured.map(|img| img.ext), Some("gif"));
    }

    #[test]
    fn test_parse_update_bounds_still_apply() {
        let mut fields = FieldMap::new();
        fields.insert("min_age", "-1");
        fields.insert("max_participants", "0");
        let err = parse_update(&fields, &[]).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.contains("min_age"));
        assert!(errors.contains("max_participants"));
    }

    #[test]
    fn test_parse_update_partial() {
        let mut fields = FieldMap::new();
        fields.insert("season", "Autumn");
        let form = parse_update(&fields, &[]).unwrap();
        assert_eq!(form.record.season.as_deref(), Some("Autumn"));
        assert!(form.record.title.is_none());
    }
}
