//! Media write ordering for the resource handlers.
//!
//! All mutations follow the same sequence: new files are written to the
//! store first, then the database row, and only after the row write succeeds
//! are the replaced files deleted. A stored record therefore never references
//! a path that was removed. When a failure strikes after files were written,
//! the files stay on disk and are logged as orphans for a later sweep.

use axum::body::Bytes;
use serde_json::Value;
use trailhead_media::{ImageRules, MediaStore, EXTENDED_IMAGE_RULES, STANDARD_IMAGE_RULES};

use crate::error::AppResult;

pub const ROLE_FEATURED: &str = "featured";
pub const ROLE_GALLERY: &str = "gallery";

/// Where a resource's uploads live and what they may contain.
#[derive(Debug, Clone, Copy)]
pub struct MediaProfile {
    pub namespace: &'static str,
    pub rules: ImageRules,
}

pub const TREK_MEDIA: MediaProfile = MediaProfile {
    namespace: "treks",
    rules: STANDARD_IMAGE_RULES,
};

pub const TOUR_MEDIA: MediaProfile = MediaProfile {
    namespace: "tours",
    rules: STANDARD_IMAGE_RULES,
};

/// Activities additionally accept GIFs and allow larger files.
pub const ACTIVITY_MEDIA: MediaProfile = MediaProfile {
    namespace: "activities",
    rules: EXTENDED_IMAGE_RULES,
};

pub const BLOG_MEDIA: MediaProfile = MediaProfile {
    namespace: "blogs",
    rules: STANDARD_IMAGE_RULES,
};

/// A validated upload waiting to be written: sniffed extension plus raw bytes.
#[derive(Debug, Clone)]
pub struct PendingImage {
    pub ext: &'static str,
    pub bytes: Bytes,
}

/// Files written for a single request, tracked so a later failure in the same
/// request can report exactly what was left behind.
#[derive(Debug, Default)]
pub struct StagedUploads {
    paths: Vec<String>,
}

impl StagedUploads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one image under `{namespace}/{role}/`, returning the stored path.
    pub async fn store_one(
        &mut self,
        store: &MediaStore,
        profile: &MediaProfile,
        role: &str,
        image: &PendingImage,
    ) -> AppResult<String> {
        match store.put(profile.namespace, role, image.ext, &image.bytes).await {
            Ok(path) => {
                self.paths.push(path.clone());
                Ok(path)
            }
            Err(err) => {
                self.log_orphans();
                Err(err.into())
            }
        }
    }

    /// Write a list of images in order, returning the stored paths.
    pub async fn store_batch(
        &mut self,
        store: &MediaStore,
        profile: &MediaProfile,
        role: &str,
        images: &[PendingImage],
    ) -> AppResult<Vec<String>> {
        let mut paths = Vec::with_capacity(images.len());
        for image in images {
            paths.push(self.store_one(store, profile, role, image).await?);
        }
        Ok(paths)
    }

    /// Resolve the database write that followed the staged file writes. On
    /// failure the staged files become orphans: they are logged and left on
    /// disk, and the error propagates unchanged.
    pub fn resolve<T, E>(self, result: Result<T, E>) -> Result<T, E> {
        if result.is_err() {
            self.log_orphans();
        }
        result
    }

    fn log_orphans(&self) {
        if !self.paths.is_empty() {
            tracing::warn!(
                orphaned = ?self.paths,
                "request failed after media writes; files left for sweep"
            );
        }
    }
}

/// Best-effort removal of files no longer referenced by any record. Failures
/// are logged and swallowed; cleanup never fails the enclosing operation.
pub async fn discard(store: &MediaStore, paths: &[String]) {
    for path in paths {
        if let Err(err) = store.delete(path).await {
            tracing::warn!(path = %path, error = %err, "failed to delete replaced media file");
        }
    }
}

/// The path list held in a JSONB gallery column. Null, non-arrays, and
/// non-string entries read as empty/skipped.
pub fn stored_paths(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Every media path a record references: the featured image plus the gallery.
pub fn referenced_paths(featured: Option<&str>, gallery: Option<&Value>) -> Vec<String> {
    let mut paths: Vec<String> = featured.map(str::to_string).into_iter().collect();
    paths.extend(stored_paths(gallery));
    paths
}
