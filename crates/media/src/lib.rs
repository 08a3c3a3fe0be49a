//! Filesystem-backed media storage for uploaded images.
//!
//! Uploads are validated by content ([`sniff`]), named with generated UUIDs
//! ([`filename`]), and stored under `{namespace}/{role}/` relative to a single
//! media root ([`MediaStore`]). The store only ever hands out root-relative
//! paths; those are what the database persists and what the public
//! `/storage/*` route serves.

pub mod error;
pub mod filename;
pub mod sniff;
pub mod store;

pub use error::MediaError;
pub use sniff::{sniff_image, validate_image, ImageRules, EXTENDED_IMAGE_RULES, STANDARD_IMAGE_RULES};
pub use store::MediaStore;
