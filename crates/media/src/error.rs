use std::path::PathBuf;

/// Error type for media validation and storage failures.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    /// Filesystem-level failure while reading or writing under the media root.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A relative path escaped the media root or contained invalid components.
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    /// The upload's content is a recognized image type that is not accepted
    /// for this resource.
    #[error("The image must be a file of type: {allowed}.")]
    UnsupportedFormat { allowed: String },

    /// The upload exceeds the per-resource size ceiling.
    #[error("The image may not be greater than {max_kb} kilobytes.")]
    TooLarge { max_kb: usize },

    /// The upload's content did not match any known image signature.
    #[error("The file must be an image.")]
    NotAnImage,
}
