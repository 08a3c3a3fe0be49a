//! Tour form parsing.
//!
//! The required-field messages for title, destination, price, and duration
//! deviate from the stock phrasing; the small `*_or` helpers below carry
//! those.

use serde_json::json;
use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::fields::FieldMap;
use trailhead_core::{slug, tours, validate};
use trailhead_db::models::tour::{CreateTour, UpdateTour};

use super::{optional_image, optional_image_list, require_enum, UploadedFile};
use crate::uploads::{PendingImage, TOUR_MEDIA};

/// Validated tour creation input: the insert DTO plus any uploads to stage.
#[derive(Debug)]
pub struct TourCreateForm {
    pub record: CreateTour,
    pub featured: Option<PendingImage>,
    pub gallery: Option<Vec<PendingImage>>,
}

/// Validated tour update input.
#[derive(Debug)]
pub struct TourUpdateForm {
    pub record: UpdateTour,
    pub featured: Option<PendingImage>,
    pub gallery: Option<Vec<PendingImage>>,
}

pub fn parse_create(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<TourCreateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let title = require_str_or(
        &mut errors,
        fields,
        "title",
        tours::MAX_TITLE_LENGTH,
        "Tour title is required",
    );
    let destination = require_str_or(
        &mut errors,
        fields,
        "destination",
        tours::MAX_DESTINATION_LENGTH,
        "Destination is required",
    );
    let description = validate::optional_str(&mut errors, fields, "description", None);

    let price = require_f64_or(&mut errors, fields, "price", 0.0, "Price is required");
    let currency = validate::require_str(&mut errors, fields, "currency", Some(tours::MAX_CURRENCY_LENGTH));
    let discount_price = validate::optional_f64(&mut errors, fields, "discount_price", 0.0);

    let duration_days = require_i32_or(
        &mut errors,
        fields,
        "duration_days",
        1,
        "Duration in days is required",
    );
    let duration_nights = validate::require_i32(&mut errors, fields, "duration_nights", 0);
    let start_date = validate::optional_date(&mut errors, fields, "start_date");
    let end_date = validate::optional_date(&mut errors, fields, "end_date");
    errors.capture("end_date", tours::validate_date_range(start_date, end_date));

    let difficulty_level = require_enum(
        &mut errors,
        fields,
        "difficulty_level",
        tours::validate_difficulty_level,
    );
    let max_group_size = validate::require_i32(&mut errors, fields, "max_group_size", 1);
    let min_group_size = validate::require_i32(&mut errors, fields, "min_group_size", 1);
    let tour_type = validate::require_str(&mut errors, fields, "tour_type", Some(tours::MAX_TOUR_TYPE_LENGTH));
    let available_slots = validate::require_i32(&mut errors, fields, "available_slots", 0);

    let inclusions = validate::optional_string_list(&mut errors, fields, "inclusions");
    let exclusions = validate::optional_string_list(&mut errors, fields, "exclusions");
    let accommodation_details =
        validate::optional_json_array(&mut errors, fields, "accommodation_details");
    let meal_plan = validate::optional_json_array(&mut errors, fields, "meal_plan");
    let itinerary = validate::optional_json_array(&mut errors, fields, "itinerary");

    let guide_included = validate::optional_bool(&mut errors, fields, "guide_included");
    let guide_language = validate::optional_str(
        &mut errors,
        fields,
        "guide_language",
        Some(tours::MAX_GUIDE_LANGUAGE_LENGTH),
    );
    let porter_included = validate::optional_bool(&mut errors, fields, "porter_included");
    let requirements = validate::optional_str(&mut errors, fields, "requirements", None);
    let what_to_bring = validate::optional_str(&mut errors, fields, "what_to_bring", None);

    let is_active = validate::optional_bool(&mut errors, fields, "is_active");
    let is_featured = validate::optional_bool(&mut errors, fields, "is_featured");
    let is_popular = validate::optional_bool(&mut errors, fields, "is_popular");
    let instant_booking = validate::optional_bool(&mut errors, fields, "instant_booking");

    let slug = validate::optional_str(&mut errors, fields, "slug", Some(tours::MAX_SLUG_LENGTH));
    let meta_description = validate::optional_str(&mut errors, fields, "meta_description", None);
    let tags = validate::optional_string_list(&mut errors, fields, "tags");

    let featured = optional_image(&mut errors, files, "featured_image", &TOUR_MEDIA.rules);
    let gallery = optional_image_list(&mut errors, files, "gallery_images", &TOUR_MEDIA.rules);

    errors.into_result()?;

    // No explicit slug means one derived from the title.
    let slug = slug.unwrap_or_else(|| slug::slugify(&title));

    Ok(TourCreateForm {
        record: CreateTour {
            title,
            destination,
            description,
            featured_image: None,
            gallery_images: None,
            price,
            currency: Some(currency),
            discount_price,
            duration_days,
            duration_nights,
            start_date,
            end_date,
            difficulty_level,
            max_group_size: Some(max_group_size),
            min_group_size: Some(min_group_size),
            tour_type,
            inclusions: inclusions.map(|list| json!(list)),
            exclusions: exclusions.map(|list| json!(list)),
            accommodation_details,
            meal_plan,
            itinerary,
            guide_included,
            guide_language,
            porter_included,
            requirements,
            what_to_bring,
            is_active,
            is_featured,
            is_popular,
            available_slots: Some(available_slots),
            instant_booking,
            slug: Some(slug),
            meta_description,
            tags: tags.map(|list| json!(list)),
        },
        featured,
        gallery,
    })
}

pub fn parse_update(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<TourUpdateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let difficulty_level = validate::optional_str(&mut errors, fields, "difficulty_level", None);
    if let Some(level) = difficulty_level.as_deref() {
        errors.capture("difficulty_level", tours::validate_difficulty_level(level));
    }

    let start_date = validate::optional_date(&mut errors, fields, "start_date");
    let end_date = validate::optional_date(&mut errors, fields, "end_date");
    errors.capture("end_date", tours::validate_date_range(start_date, end_date));

    let inclusions = validate::optional_string_list(&mut errors, fields, "inclusions");
    let exclusions = validate::optional_string_list(&mut errors, fields, "exclusions");
    let tags = validate::optional_string_list(&mut errors, fields, "tags");

    let record = UpdateTour {
        title: validate::optional_str(&mut errors, fields, "title", Some(tours::MAX_TITLE_LENGTH)),
        destination: validate::optional_str(
            &mut errors,
            fields,
            "destination",
            Some(tours::MAX_DESTINATION_LENGTH),
        ),
        description: validate::optional_str(&mut errors, fields, "description", None),
        featured_image: None,
        gallery_images: None,
        price: validate::optional_f64(&mut errors, fields, "price", 0.0),
        currency: validate::optional_str(
            &mut errors,
            fields,
            "currency",
            Some(tours::MAX_CURRENCY_LENGTH),
        ),
        discount_price: validate::optional_f64(&mut errors, fields, "discount_price", 0.0),
        duration_days: validate::optional_i32(&mut errors, fields, "duration_days", 1),
        duration_nights: validate::optional_i32(&mut errors, fields, "duration_nights", 0),
        start_date,
        end_date,
        difficulty_level,
        max_group_size: validate::optional_i32(&mut errors, fields, "max_group_size", 1),
        min_group_size: validate::optional_i32(&mut errors, fields, "min_group_size", 1),
        tour_type: validate::optional_str(
            &mut errors,
            fields,
            "tour_type",
            Some(tours::MAX_TOUR_TYPE_LENGTH),
        ),
        inclusions: inclusions.map(|list| json!(list)),
        exclusions: exclusions.map(|list| json!(list)),
        accommodation_details: validate::optional_json_array(
            &mut errors,
            fields,
            "accommodation_details",
        ),
        meal_plan: validate::optional_json_array(&mut errors, fields, "meal_plan"),
        itinerary: validate::optional_json_array(&mut errors, fields, "itinerary"),
        guide_included: validate::optional_bool(&mut errors, fields, "guide_included"),
        guide_language: validate::optional_str(
            &mut errors,
            fields,
            "guide_language",
            Some(tours::MAX_GUIDE_LANGUAGE_LENGTH),
        ),
        porter_included: validate::optional_bool(&mut errors, fields, "porter_included"),
        requirements: validate::optional_str(&mut errors, fields, "requirements", None),
        what_to_bring: validate::optional_str(&mut errors, fields, "what_to_bring", None),
        is_active: validate::optional_bool(&mut errors, fields, "is_active"),
        is_featured: validate::optional_bool(&mut errors, fields, "is_featured"),
        is_popular: validate::optional_bool(&mut errors, fields, "is_popular"),
        available_slots: validate::optional_i32(&mut errors, fields, "available_slots", 0),
        instant_booking: validate::optional_bool(&mut errors, fields, "instant_booking"),
        slug: validate::optional_str(&mut errors, fields, "slug", Some(tours::MAX_SLUG_LENGTH)),
        meta_description: validate::optional_str(&mut errors, fields, "meta_description", None),
        tags: tags.map(|list| json!(list)),
    };

    let featured = optional_image(&mut errors, files, "featured_image", &TOUR_MEDIA.rules);
    let gallery = optional_image_list(&mut errors, files, "gallery_images", &TOUR_MEDIA.rules);

    errors.into_result()?;

    Ok(TourUpdateForm {
        record,
        featured,
        gallery,
    })
}

/// `require_str` with a custom required-field message.
fn require_str_or(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    max: usize,
    missing: &str,
) -> String {
    if validate::non_blank(fields, name).is_none() {
        errors.push(name, missing);
        return String::new();
    }
    validate::require_str(errors, fields, name, Some(max))
}

/// `require_f64` with a custom required-field message.
fn require_f64_or(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    min: f64,
    missing: &str,
) -> f64 {
    if validate::non_blank(fields, name).is_none() {
        errors.push(name, missing);
        return 0.0;
    }
    validate::require_f64(errors, fields, name, min)
}

/// `require_i32` with a custom required-field message.
fn require_i32_or(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    min: i32,
    missing: &str,
) -> i32 {
    if validate::non_blank(fields, name).is_none() {
        errors.push(name, missing);
        return 0;
    }
    validate::require_i32(errors, fields, name, min)
}
