use crate::allocator::Rejection;
use pinhole_core::StorageError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    #[error("{0}")]
    Validation(FieldErrors),
    #[error("storage error: {0}")]
    Storage(String),
}

impl ShortenerError {
    /// The per-field validation errors, if the submission was rejected.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ShortenerError::Validation(errors) => Some(errors),
            ShortenerError::Storage(_) => None,
        }
    }
}

impl From<FieldErrors> for ShortenerError {
    fn from(value: FieldErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<Rejection> for ShortenerError {
    fn from(value: Rejection) -> Self {
        Self::Validation(FieldErrors {
            url: None,
            custom: Some(value),
        })
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value.to_string())
    }
}

/// Validation errors of a submission, keyed by the field they belong to.
///
/// Both fields are checked on every submission, so a bad URL does not hide a
/// bad custom code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Why the URL was refused.
    pub url: Option<String>,
    /// Why the custom short code was refused.
    pub custom: Option<Rejection>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.url.is_none() && self.custom.is_none()
    }

    /// `(field, message)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, String)> + '_ {
        let url = self.url.iter().map(|message| ("url", message.clone()));
        let custom = self
            .custom
            .iter()
            .map(|rejection| ("custom", rejection.to_string()));
        url.chain(custom)
    }
}

/// A single error prints as its message; several are prefixed by field.
impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.url, &self.custom) {
            (Some(url), None) => write!(f, "invalid url: {url}"),
            (None, Some(custom)) => write!(f, "{custom}"),
            _ => {
                let mut first = true;
                for (field, message) in self.iter() {
                    if !first {
                        f.write_str("; ")?;
                    }
                    write!(f, "{field}: {message}")?;
                    first = false;
                }
                Ok(())
            }
        }
    }
}
