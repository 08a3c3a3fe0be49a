//! Multipart collection and per-resource input parsing.
//!
//! [`collect`] drains a multipart stream once into text fields and file
//! parts. The per-resource submodules then turn those into typed create or
//! update DTOs, accumulating every violation into a single
//! [`FieldErrors`](trailhead_core::error::FieldErrors) so a 422 response
//! reports all of them at once. Update parsing only validates fields that
//! actually arrived; absent fields leave the stored record untouched.

pub mod activity;
pub mod blog;
pub mod review;
pub mod tour;
pub mod trek;

use axum::body::Bytes;
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use trailhead_core::error::{CoreError, FieldErrors};
use trailhead_core::fields::FieldMap;
use trailhead_core::validate;
use trailhead_media::{validate_image, ImageRules, MediaError};

use crate::error::{AppError, AppResult};
use crate::uploads::PendingImage;

/// One file part lifted out of a multipart stream.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Form field name with any trailing `[]` stripped, so `gallery_images[]`
    /// parts group under `gallery_images`.
    pub field: String,
    pub bytes: Bytes,
}

/// Drain a multipart stream into text fields and file parts.
///
/// A part with a filename is a file; one with an empty body (a file input
/// left blank) is dropped so it does not read as a present field. Everything
/// else is collected as text.
pub async fn collect(mut multipart: Multipart) -> AppResult<(FieldMap, Vec<UploadedFile>)> {
    let mut fields = FieldMap::new();
    let mut files = Vec::new();

    while let Some(part) = multipart.next_field().await.map_err(bad_multipart)? {
        let Some(name) = part.name().map(str::to_string) else {
            continue;
        };
        if part.file_name().is_some() {
            let bytes = part.bytes().await.map_err(bad_multipart)?;
            if bytes.is_empty() {
                continue;
            }
            let field = name.strip_suffix("[]").unwrap_or(&name).to_string();
            files.push(UploadedFile { field, bytes });
        } else {
            let value = part.text().await.map_err(bad_multipart)?;
            fields.insert(name, value);
        }
    }

    Ok((fields, files))
}

fn bad_multipart(err: MultipartError) -> AppError {
    AppError::Multipart(err.to_string())
}

/// The first file uploaded under `name`, if any.
pub fn file_for<'a>(files: &'a [UploadedFile], name: &str) -> Option<&'a UploadedFile> {
    files.iter().find(|file| file.field == name)
}

/// Every file uploaded under `name`, in arrival order.
pub fn files_for<'a>(files: &'a [UploadedFile], name: &str) -> Vec<&'a UploadedFile> {
    files.iter().filter(|file| file.field == name).collect()
}

/// Validate an optional single-image field, recording violations under its
/// field name.
pub fn optional_image(
    errors: &mut FieldErrors,
    files: &[UploadedFile],
    name: &str,
    rules: &ImageRules,
) -> Option<PendingImage> {
    let file = file_for(files, name)?;
    match validate_image(&file.bytes, rules) {
        Ok(ext) => Some(PendingImage {
            ext,
            bytes: file.bytes.clone(),
        }),
        Err(err) => {
            errors.push(name, image_message(name, &err));
            None
        }
    }
}

/// Validate an optional multi-image field. Violations are keyed `{name}.{i}`
/// so each bad file reports individually.
///
/// `None` means no file arrived under `name`; `Some` means the caller is
/// replacing the stored set with these.
pub fn optional_image_list(
    errors: &mut FieldErrors,
    files: &[UploadedFile],
    name: &str,
    rules: &ImageRules,
) -> Option<Vec<PendingImage>> {
    let uploads = files_for(files, name);
    if uploads.is_empty() {
        return None;
    }

    let mut images = Vec::with_capacity(uploads.len());
    for (i, file) in uploads.iter().enumerate() {
        match validate_image(&file.bytes, rules) {
            Ok(ext) => images.push(PendingImage {
                ext,
                bytes: file.bytes.clone(),
            }),
            Err(err) => errors.push(format!("{name}.{i}"), image_message(name, &err)),
        }
    }
    Some(images)
}

/// A required field whose value must pass a fixed-set check.
pub(crate) fn require_enum(
    errors: &mut FieldErrors,
    fields: &FieldMap,
    name: &str,
    check: impl Fn(&str) -> Result<(), CoreError>,
) -> String {
    match validate::non_blank(fields, name) {
        Some(value) => {
            errors.capture(name, check(value));
            value.to_string()
        }
        None => {
            errors.push(name, format!("The {name} field is required."));
            String::new()
        }
    }
}

/// Field message for an image that failed validation.
fn image_message(name: &str, err: &MediaError) -> String {
    match err {
        MediaError::NotAnImage => format!("The {name} must be an image."),
        MediaError::UnsupportedFormat { allowed } => {
            format!("The {name} must be a file of type: {allowed}.")
        }
        MediaError::TooLarge { max_kb } => {
            format!("The {name} may not be greater than {max_kb} kilobytes.")
        }
        other => other.to_string(),
    }
}
