//! Blog form parsing.
//!
//! The cover image is required at creation. The structured body arrives as a
//! JSON string under `content` and is checked section by section.

use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::fields::FieldMap;
use trailhead_core::{blogs, slug, validate};
use trailhead_db::models::blog::{CreateBlog, UpdateBlog};

use super::{optional_image, UploadedFile};
use crate::uploads::{PendingImage, BLOG_MEDIA};

/// Validated blog creation input. The image is always present: parsing fails
/// without one.
#[derive(Debug)]
pub struct BlogCreateForm {
    pub record: CreateBlog,
    pub image: PendingImage,
}

/// Validated blog update input. `image: Some` replaces the stored cover.
#[derive(Debug)]
pub struct BlogUpdateForm {
    pub record: UpdateBlog,
    pub image: Option<PendingImage>,
}

pub fn parse_create(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<BlogCreateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let title = validate::require_str(&mut errors, fields, "title", Some(blogs::MAX_TITLE_LENGTH));
    let subtitle =
        validate::optional_str(&mut errors, fields, "subtitle", Some(blogs::MAX_SUBTITLE_LENGTH));
    let description = validate::require_str(&mut errors, fields, "description", None);
    let excerpt =
        validate::optional_str(&mut errors, fields, "excerpt", Some(blogs::MAX_EXCERPT_LENGTH));
    let author =
        validate::optional_str(&mut errors, fields, "author", Some(blogs::MAX_AUTHOR_LENGTH));
    let content = content_sections(&mut errors, fields);
    let conclusion = validate::optional_str(&mut errors, fields, "conclusion", None);
    let slug_field = validate::optional_str(&mut errors, fields, "slug", Some(blogs::MAX_SLUG_LENGTH));
    let is_active = validate::optional_bool(&mut errors, fields, "is_active");

    let image = optional_image(&mut errors, files, "image", &BLOG_MEDIA.rules);
    if image.is_none() && !errors.contains("image") {
        errors.push("image", "The image field is required.");
    }

    errors.into_result()?;

    let image = image.ok_or_else(|| {
        CoreError::Validation("The image field is required.".to_string())
    })?;

    Ok(BlogCreateForm {
        record: CreateBlog {
            slug: slug_field.unwrap_or_else(|| slug::slugify(&title)),
            title,
            subtitle,
            description,
            excerpt,
            author,
            content,
            conclusion,
            image: None,
            is_active,
        },
        image,
    })
}

pub fn parse_update(
    fields: &FieldMap,
    files: &[UploadedFile],
) -> Result<BlogUpdateForm, CoreError> {
    let mut errors = FieldErrors::new();

    let record = UpdateBlog {
        title: validate::optional_str(&mut errors, fields, "title", Some(blogs::MAX_TITLE_LENGTH)),
        subtitle: validate::optional_str(
            &mut errors,
            fields,
            "subtitle",
            Some(blogs::MAX_SUBTITLE_LENGTH),
        ),
        description: validate::optional_str(&mut errors, fields, "description", None),
        excerpt: validate::optional_str(
            &mut errors,
            fields,
            "excerpt",
            Some(blogs::MAX_EXCERPT_LENGTH),
        ),
        author: validate::optional_str(
            &mut errors,
            fields,
            "author",
            Some(blogs::MAX_AUTHOR_LENGTH),
        ),
        content: content_sections(&mut errors, fields),
        conclusion: validate::optional_str(&mut errors, fields, "conclusion", None),
        slug: validate::optional_str(&mut errors, fields, "slug", Some(blogs::MAX_SLUG_LENGTH)),
        image: None,
        is_active: validate::optional_bool(&mut errors, fields, "is_active"),
    };

    let image = optional_image(&mut errors, files, "image", &BLOG_MEDIA.rules);

    errors.into_result()?;

    Ok(BlogUpdateForm { record, image })
}

/// Parse and validate the optional `content` sections field.
fn content_sections(errors: &mut FieldErrors, fields: &FieldMap) -> Option<serde_json::Value> {
    let content = validate::optional_json_array(errors, fields, "content")?;
    errors.capture("content", blogs::validate_content_sections(&content));
    Some(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

    fn cover() -> Vec<UploadedFile> {
        vec![UploadedFile {
            field: "image".to_string(),
            bytes: Bytes::from_static(PNG),
        }]
    }

    fn valid_fields() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("title", "Packing for the Monsoon");
        fields.insert("description", "What actually keeps your gear dry.");
        fields
    }

    #[test]
    fn test_parse_create_derives_slug() {
        let form = parse_create(&valid_fields(), &cover()).unwrap();
        assert_eq!(form.record.slug, "packing-for-the-monsoon");
        assert_eq!(form.image.ext, "png");
    }

    #[test]
    fn test_parse_create_keeps_explicit_slug() {
        let mut fields = valid_fields();
        fields.insert("slug", "monsoon-packing-2026");
        let form = parse_create(&fields, &cover()).unwrap();
        assert_eq!(form.record.slug, "monsoon-packing-2026");
    }

    #[test]
    fn test_parse_create_requires_image() {
        let err = parse_create(&valid_fields(), &[]).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.contains("image"));
    }

    #[test]
    fn test_parse_create_rejects_non_image_cover() {
        let files = vec![UploadedFile {
            field: "image".to_string(),
            bytes: Bytes::from_static(b"<html>nope</html>"),
        }];
        let err = parse_create(&valid_fields(), &files).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        // Reported as invalid, not additionally as missing.
        assert!(errors.contains("image"));
    }

    #[test]
    fn test_parse_create_validates_content_sections() {
        let mut fields = valid_fields();
        fields.insert("content", r#"[{"heading": "Intro"}]"#);
        let err = parse_create(&fields, &cover()).unwrap_err();
        let CoreError::Fields(errors) = err else {
            panic!("expected field errors");
        };
        assert!(errors.contains("content"));

        let mut fields = valid_fields();
        fields.insert(
            "content",
            r#"[{"heading": "Intro", "paragraph": "Rain, always."}]"#,
        );
        let form = parse_create(&fields, &cover()).unwrap();
        assert!(form.record.content.is_some());
    }

    #[test]
    fn test_parse_update_image_optional() {
        let mut fields = FieldMap::new();
        fields.insert("title", "Monsoon Packing, Revised");
        let form = parse_update(&fields, &[]).unwrap();
        assert_eq!(form.record.title.as_deref(), Some("Monsoon Packing, Revised"));
        assert!(form.image.is_none());
        // Slug is not re-derived on update.
        assert!(form.record.slug.is_none());
    }
}
