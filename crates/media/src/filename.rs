//! Stored-file name generation.

use uuid::Uuid;

/// Generate a unique stored filename: `{namespace}_{role}_{uuid}.{ext}`.
///
/// The UUID makes collisions practically impossible, so writes never need an
/// existence check; the namespace/role prefix keeps files identifiable when
/// browsing the media root directly.
pub fn generate(namespace: &str, role: &str, ext: &str) -> String {
    format!("{namespace}_{role}_{}.{ext}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_shape() {
        let name = generate("treks", "featured", "jpg");
        assert!(name.starts_with("treks_featured_"));
        assert!(name.ends_with(".jpg"));

        // 32 lowercase hex chars between prefix and extension.
        let uuid_part = name
            .strip_prefix("treks_featured_")
            .and_then(|rest| rest.strip_suffix(".jpg"))
            .unwrap();
        assert_eq!(uuid_part.len(), 32);
        assert!(uuid_part.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_filenames_are_unique() {
        let a = generate("blogs", "cover", "png");
        let b = generate("blogs", "cover", "png");
        assert_ne!(a, b);
    }
}
