//! Content-based image validation.
//!
//! Client-supplied filenames and content types are untrusted; acceptance and
//! the stored extension are decided solely from the file's magic bytes.

use crate::error::MediaError;

/// Acceptance rules for one upload slot.
#[derive(Debug, Clone, Copy)]
pub struct ImageRules {
    /// Canonical extensions accepted for this slot.
    pub allowed: &'static [&'static str],
    /// Size ceiling in bytes.
    pub max_bytes: usize,
}

/// Standard photo uploads: 5 MiB, no animation formats.
pub const STANDARD_IMAGE_RULES: ImageRules = ImageRules {
    allowed: &["jpg", "png", "webp"],
    max_bytes: 5 * 1024 * 1024,
};

/// Larger media slots that also accept GIFs: 10 MiB.
pub const EXTENDED_IMAGE_RULES: ImageRules = ImageRules {
    allowed: &["jpg", "png", "gif", "webp"],
    max_bytes: 10 * 1024 * 1024,
};

/// Sniff the image format from magic bytes, returning the canonical extension.
///
/// Only formats the store accepts anywhere are reported; anything else is
/// `None`.
pub fn sniff_image(bytes: &[u8]) -> Option<&'static str> {
    match image::guess_format(bytes).ok()? {
        image::ImageFormat::Jpeg => Some("jpg"),
        image::ImageFormat::Png => Some("png"),
        image::ImageFormat::Gif => Some("gif"),
        image::ImageFormat::WebP => Some("webp"),
        _ => None,
    }
}

/// Validate an upload against `rules`, returning the canonical extension to
/// store the file under.
pub fn validate_image(bytes: &[u8], rules: &ImageRules) -> Result<&'static str, MediaError> {
    let ext = sniff_image(bytes).ok_or(MediaError::NotAnImage)?;
    if !rules.allowed.contains(&ext) {
        return Err(MediaError::UnsupportedFormat {
            allowed: rules.allowed.join(", "),
        });
    }
    if bytes.len() > rules.max_bytes {
        return Err(MediaError::TooLarge {
            max_kb: rules.max_bytes / 1024,
        });
    }
    Ok(ext)
}
