use std::collections::BTreeMap;

/// Domain-level error taxonomy shared by the DB and API layers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed: {0}")]
    Fields(FieldErrors),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Build a [`CoreError::NotFound`] from any displayable lookup key
    /// (numeric id, slug, ...).
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}

/// Per-field validation messages, accumulated so a single response can report
/// every violated field at once.
///
/// Keys are form field names (`"title"`, `"gallery_images.2"`); values are the
/// messages recorded for that field in insertion order. A `BTreeMap` keeps the
/// serialized output deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against a field.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record the failure side of a single-value validation under `field`.
    ///
    /// `Validation` errors contribute their message verbatim; any other
    /// variant contributes its display form.
    pub fn capture(&mut self, field: &str, result: Result<(), CoreError>) {
        if let Err(err) = result {
            let message = match err {
                CoreError::Validation(msg) => msg,
                other => other.to_string(),
            };
            self.push(field, message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Names of all fields with at least one recorded violation.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Finish accumulation: `Ok(())` when nothing was recorded, otherwise
    /// the collected violations as a [`CoreError::Fields`].
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Fields(self))
        }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {}", messages.join(", "))?;
            first = false;
        }
        Ok(())
    }
}
