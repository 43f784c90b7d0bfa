//! Alternative record validation.
//!
//! Checks the structural invariants of [`ProductAlternative`] values that come
//! from outside the text parser, such as tool-call payloads or JSON files.
//! URL checks are syntactic only: a record passes if its URL starts with
//! `http://` or `https://`.
//!
//! # Examples
//!
//! ```
//! use deal_finder_core::*;
//!
//! let good = ProductAlternative::new("Mouse", "https://example.com/m");
//! assert!(validate_alternative(&good).is_empty());
//!
//! let bad = ProductAlternative::new("Mouse", "example.com/m");
//! assert!(!validate_alternative(&bad).is_empty());
//! ```

use thiserror::Error;

use crate::ProductAlternative;

/// Alternative validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty or whitespace-only.
    #[error("alternative title cannot be empty")]
    EmptyTitle,
    /// URL is empty or whitespace-only.
    #[error("alternative url cannot be empty")]
    EmptyUrl,
    /// URL does not start with `http://` or `https://`.
    #[error("alternative url must start with http:// or https://: {0}")]
    InvalidUrlScheme(String),
    /// A record inside a batch failed validation.
    #[error("alternative #{index}: {error}")]
    AtIndex {
        index: usize,
        error: Box<ValidationError>,
    },
}

/// Validates a single alternative.
pub fn validate_alternative(alternative: &ProductAlternative) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if alternative.title.trim().is_empty() {
        errors.push(ValidationError::EmptyTitle);
    }

    let url = alternative.url.trim();
    if url.is_empty() {
        errors.push(ValidationError::EmptyUrl);
    } else if !has_http_scheme(url) {
        errors.push(ValidationError::InvalidUrlScheme(alternative.url.clone()));
    }

    errors
}

/// Validates every alternative in `alternatives`.
///
/// Errors are wrapped in [`ValidationError::AtIndex`] with the zero-based
/// position of the offending record.
///
/// # Examples
///
/// ```
/// use deal_finder_core::*;
///
/// let alts = vec![
///     ProductAlternative::new("Mouse", "https://x.com/1"),
///     ProductAlternative::new("", "https://x.com/2"),
/// ];
/// let errors = validate_alternatives(&alts);
/// assert_eq!(errors.len(), 1);
/// assert!(matches!(errors[0], ValidationError::AtIndex { index: 1, .. }));
/// ```
pub fn validate_alternatives(alternatives: &[ProductAlternative]) -> Vec<ValidationError> {
    alternatives
        .iter()
        .enumerate()
        .flat_map(|(index, alternative)| {
            validate_alternative(alternative)
                .into_iter()
                .map(move |error| ValidationError::AtIndex {
                    index,
                    error: Box::new(error),
                })
        })
        .collect()
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
