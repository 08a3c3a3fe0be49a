//! The filesystem media store.

use std::path::{Component, Path, PathBuf};

use crate::error::MediaError;
use crate::filename;

/// Stores uploaded files under `{root}/{namespace}/{role}/`.
///
/// All public methods speak root-relative paths (`treks/featured/trek_...jpg`);
/// absolute locations never leave this type. Cheap to clone.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the media root if it does not exist yet.
    pub async fn init(&self) -> Result<(), MediaError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|source| MediaError::Io {
                path: self.root.clone(),
                source,
            })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` as a new file under `{namespace}/{role}/`, returning the
    /// stored root-relative path.
    pub async fn put(
        &self,
        namespace: &str,
        role: &str,
        ext: &str,
        bytes: &[u8],
    ) -> Result<String, MediaError> {
        validate_segment(namespace)?;
        validate_segment(role)?;

        let rel_path = format!("{namespace}/{role}/{}", filename::generate(namespace, role, ext));
        let abs_path = self.resolve(&rel_path)?;

        if let Some(parent) = abs_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| MediaError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&abs_path, bytes)
            .await
            .map_err(|source| MediaError::Io {
                path: abs_path.clone(),
                source,
            })?;

        tracing::debug!(path = %rel_path, size = bytes.len(), "stored media file");
        Ok(rel_path)
    }

    /// Remove a stored file. Returns `true` if a file was removed, `false`
    /// if nothing existed at the path; deleting an already-deleted file is
    /// not an error.
    pub async fn delete(&self, rel_path: &str) -> Result<bool, MediaError> {
        let abs_path = self.resolve(rel_path)?;
        match tokio::fs::remove_file(&abs_path).await {
            Ok(()) => {
                tracing::debug!(path = %rel_path, "deleted media file");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(MediaError::Io {
                path: abs_path,
                source,
            }),
        }
    }

    /// Whether a stored file exists. Invalid paths report `false`.
    pub async fn exists(&self, rel_path: &str) -> bool {
        match self.resolve(rel_path) {
            Ok(abs_path) => tokio::fs::metadata(abs_path).await.is_ok(),
            Err(_) => false,
        }
    }

    /// Map a root-relative path to an absolute one, rejecting anything that
    /// could escape the root.
    fn resolve(&self, rel_path: &str) -> Result<PathBuf, MediaError> {
        if rel_path.is_empty() {
            return Err(MediaError::InvalidPath(rel_path.to_string()));
        }
        let path = Path::new(rel_path);
        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(MediaError::InvalidPath(rel_path.to_string())),
            }
        }
        Ok(self.root.join(path))
    }
}

/// A namespace or role must be a single plain path segment.
fn validate_segment(segment: &str) -> Result<(), MediaError> {
    let plain = !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if plain {
        Ok(())
    } else {
        Err(MediaError::InvalidPath(segment.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

    fn store() -> (tempfile::TempDir, MediaStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = MediaStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_put_stores_under_namespace_and_role() {
        let (_dir, store) = store();
        let rel = store.put("treks", "featured", "png", PNG).await.unwrap();

        assert!(rel.starts_with("treks/featured/treks_featured_"));
        assert!(rel.ends_with(".png"));
        assert!(store.exists(&rel).await);

        let on_disk = tokio::fs::read(store.root().join(&rel)).await.unwrap();
        assert_eq!(on_disk, PNG);
    }

    #[tokio::test]
    async fn test_puts_generate_distinct_paths() {
        let (_dir, store) = store();
        let a = store.put("tours", "gallery", "png", PNG).await.unwrap();
        let b = store.put("tours", "gallery", "png", PNG).await.unwrap();
        assert_ne!(a, b);
        assert!(store.exists(&a).await);
        assert!(store.exists(&b).await);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let (_dir, store) = store();
        let rel = store.put("blogs", "cover", "png", PNG).await.unwrap();

        assert!(store.delete(&rel).await.unwrap());
        assert!(!store.exists(&rel).await);
        // Second delete reports nothing removed, without erroring.
        assert!(!store.delete(&rel).await.unwrap());
    }

    #[tokio::test]
    async fn test_traversal_components_rejected() {
        let (_dir, store) = store();
        for bad in ["../secrets.txt", "/etc/passwd", "a/../../b", ""] {
            assert!(
                matches!(store.delete(bad).await, Err(MediaError::InvalidPath(_))),
                "path {bad:?} must be rejected"
            );
            assert!(!store.exists(bad).await);
        }
    }

    #[tokio::test]
    async fn test_put_rejects_unsafe_segments() {
        let (_dir, store) = store();
        assert!(store.put("../treks", "featured", "png", PNG).await.is_err());
        assert!(store.put("treks", "a/b", "png", PNG).await.is_err());
        assert!(store.put("", "featured", "png", PNG).await.is_err());
    }

    #[tokio::test]
    async fn test_init_creates_root() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path().join("nested").join("media");
        let store = MediaStore::new(&root);
        store.init().await.unwrap();
        assert!(root.is_dir());
    }
}
