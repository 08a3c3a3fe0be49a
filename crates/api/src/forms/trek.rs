//! Trek form parsing.

use serde_json::json;
use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::fields::FieldMap;
use trailhead_core::{treks, validate};
use trailhead_db::models::trek::{CreateTrek, UpdateTrek};

use super::{optional_image, optional_image_list, require_enum, UploadedFile};
use crate::uploads::{PendingImage, TREK_MEDIA};

/// Validated trek creation input: the insert DTO plus any uploads to stage.
#[derive(Debug)]
pub struct TrekCreateForm {
    pub record: CreateTrek,
    pub featured: Option<PendingImage>,
    pub gallery: Option<Vec<PendingImage>>,
}

/// Validated trek update input. `gallery: Some` replaces the stored set
/// wholesale; `featured: Some` replaces the stored featured image.
#[derive(Debug)]
pub struct TrekUpdateForm {
    pub record: UpdateTrek,
    pub featured: Option<PendingImage>,
    pub gallery: Option<Vec<PendingImage>>,
}

pub fn parse_create(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<TrekCreateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let data_type = require_enum(&mut errors, fields, "data_type", treks::validate_data_type);
    let title = validate::require_str(&mut errors, fields, "title", Some(treks::MAX_TITLE_LENGTH));
    let location = validate::require_str(&mut errors, fields, "location", Some(treks::MAX_LOCATION_LENGTH));
    let price = validate::require_f64(&mut errors, fields, "price", 0.0);
    let currency = validate::require_str(&mut errors, fields, "currency", Some(treks::MAX_CURRENCY_LENGTH));
    let duration = validate::require_str(&mut errors, fields, "duration", Some(treks::MAX_DURATION_LENGTH));
    let difficulty =
        validate::require_str(&mut errors, fields, "difficulty", Some(treks::MAX_DIFFICULTY_LENGTH));
    let trek_type = validate::require_str(&mut errors, fields, "type", Some(treks::MAX_TYPE_LENGTH));
    let distance_km = validate::require_f64(&mut errors, fields, "distance_km", 0.0);
    let description = validate::optional_str(&mut errors, fields, "description", None);
    let is_featured = validate::require_bool(&mut errors, fields, "is_featured");
    let is_active = validate::require_bool(&mut errors, fields, "is_active");

    let trek_days = validate::require_string_list(&mut errors, fields, "trek_days");
    if !errors.contains("trek_days") {
        errors.capture("trek_days", treks::validate_trek_days(&trek_days));
    }

    let featured = optional_image(&mut errors, files, "featured_image", &TREK_MEDIA.rules);
    let gallery = optional_image_list(&mut errors, files, "gallery_images", &TREK_MEDIA.rules);

    errors.into_result()?;

    Ok(TrekCreateForm {
        record: CreateTrek {
            data_type,
            title,
            location,
            price,
            currency: Some(currency),
            duration,
            difficulty,
            trek_type,
            distance_km,
            description,
            featured_image: None,
            gallery_images: None,
            is_featured: Some(is_featured),
            trek_days: json!(trek_days),
            is_active: Some(is_active),
        },
        featured,
        gallery,
    })
}

pub fn parse_update(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<TrekUpdateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let data_type = validate::optional_str(&mut errors, fields, "data_type", None);
    if let Some(value) = data_type.as_deref() {
        errors.capture("data_type", treks::validate_data_type(value));
    }

    let trek_days = validate::optional_string_list(&mut errors, fields, "trek_days");
    if let Some(days) = &trek_days {
        errors.capture("trek_days", treks::validate_trek_days(days));
    }

    let record = UpdateTrek {
        data_type,
        title: validate::optional_str(&mut errors, fields, "title", Some(treks::MAX_TITLE_LENGTH)),
        location: validate::optional_str(
            &mut errors,
            fields,
            "location",
            Some(treks::MAX_LOCATION_LENGTH),
        ),
        price: validate::optional_f64(&mut errors, fields, "price", 0.0),
        currency: validate::optional_str(
            &mut errors,
            fields,
            "currency",
            Some(treks::MAX_CURRENCY_LENGTH),
        ),
        duration: validate::optional_str(
            &mut errors,
            fields,
            "duration",
            Some(treks::MAX_DURATION_LENGTH),
        ),
        difficulty: validate::optional_str(
            &mut errors,
            fields,
            "difficulty",
            Some(treks::MAX_DIFFICULTY_LENGTH),
        ),
        trek_type: validate::optional_str(&mut errors, fields, "type", Some(treks::MAX_TYPE_LENGTH)),
        distance_km: validate::optional_f64(&mut errors, fields, "distance_km", 0.0),
        description: validate::optional_str(&mut errors, fields, "description", None),
        featured_image: None,
        gallery_images: None,
        is_featured: validate::optional_bool(&mut errors, fields, "is_featured"),
        trek_days: trek_days.map(|days| json!(days)),
        is_active: validate::optional_bool(&mut errors, fields, "is_active"),
    };

    let featured = optional_image(&mut errors, files, "featured_image", &TREK_MEDIA.rules);
    let gallery = optional_image_list(&mut errors, files, "gallery_images", &TREK_MEDIA.rules);

    errors.into_result()?;

    Ok(TrekUpdateForm {
        record,
        featured,
        gallery,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("data_type", "trek");
        fields.insert("title", "Everest Base Camp");
        fields.insert("location", "Khumbu");
        fields.insert("price", "1450");
        fields.insert("currency", "USD");
        fields.insert("duration", "14 days");
        fields.insert("difficulty", "Challenging");
        fields.insert("type", "Teahouse");
        fields.insert("distance_km", "130");
        fields.insert("is_featured", "1");
        fields.insert("is_active", "true");
        fields.insert("trek_days[]", "Day 1: Fly to Lukla");
        fields.insert("trek_days[]", "Day 2: Trek to Phakding");
        fields
    }

    #[test]
    fn test_parse_create_valid() {
        let form = parse_create(&valid_fields(), &[]).unwrap();
        assert_eq!(form.record.title, "Everest Base Camp");
        assert_eq!(form.record.trek_type, "Teahouse");
        assert_eq!(form.record.price, 1450.0);
        assert_eq!(form.record.is_featured, Some(true));
        assert_eq!(form.record.trek_days, json!(["Day 1: Fly to Lukla", "Day 2: Trek to Phakding"]));
        assert!(form.featured.is_none());
        assert!(form.gallery.is_none());
    }

    #[test]
    fn test_parse_create_reports_every_missing_field() {
        let err = parse_create(&FieldMap::new(), &[]).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        for field in [
            "data_type",
            "title",
            "location",
            "price",
            "currency",
            "duration",
            "difficulty",
            "type",
            "distance_km",
            "is_featured",
            "is_active",
            "trek_days",
        ] {
            assert!(errors.contains(field), "missing error for {field}");
        }
    }

    #[test]
    fn test_parse_create_rejects_bad_values() {
        let mut fields = FieldMap::new();
        fields.insert("data_type", "expedition");
        fields.insert("price", "-5");
        fields.insert("trek_days", "[]");

        let err = parse_create(&fields, &[]).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.contains("data_type"));
        assert!(errors.contains("price"));
        // An empty list is distinct from a missing one.
        assert!(errors.contains("trek_days"));
        assert!(errors.contains("title"));
    }

    #[test]
    fn test_parse_update_only_validates_present_fields() {
        let mut fields = FieldMap::new();
        fields.insert("title", "Gokyo Lakes");
        let form = parse_update(&fields, &[]).unwrap();
        assert_eq!(form.record.title.as_deref(), Some("Gokyo Lakes"));
        assert!(form.record.location.is_none());
        assert!(form.record.price.is_none());
        assert!(form.record.trek_days.is_none());
    }

    #[test]
    fn test_parse_update_still_checks_supplied_values() {
        let mut fields = FieldMap::new();
        fields.insert("data_type", "expedition");
        fields.insert("distance_km", "-2");
        let err = parse_update(&fields, &[]).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.contains("data_type"));
        assert!(errors.contains("distance_km"));
    }

    #[test]
    fn test_parse_update_empty_form_changes_nothing() {
        let form = parse_update(&FieldMap::new(), &[]).unwrap();
        assert!(form.record.title.is_none());
        assert!(form.record.is_active.is_none());
        assert!(form.featured.is_none());
        assert!(form.gallery.is_none());
    }
}
