//! Content error types.
//!
//! These errors are returned at the boundary where callers name a locale,
//! category, or grammar topic. Missing or partial question content is not an
//! error: it degrades to an empty collection.

use thiserror::Error;

/// Errors that can occur when resolving study content.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContentError {
    /// The locale is not one of the supported content locales.
    #[error("unsupported locale: {0}")]
    UnsupportedLocale(String),

    /// The category key is not `gov`, `history`, `civics`, or `all`.
    #[error("unsupported category: {0}")]
    UnsupportedCategory(String),

    /// The question mode is not `trial`, `all`, or `test`.
    #[error("unsupported question mode: {0}")]
    UnsupportedMode(String),

    /// No grammar topic has the requested id.
    #[error("topic {0} not found")]
    TopicNotFound(String),

    /// A required content document is absent.
    #[error("content not found: {0}")]
    Missing(String),

    /// A required content document exists but does not have the expected shape.
    #[error("malformed content in {path}: {message}")]
    Malformed { path: String, message: String },
}

impl ContentError {
    /// Returns `true` if the error was caused by caller input rather than content.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            ContentError::UnsupportedLocale(_)
                | ContentError::UnsupportedCategory(_)
                | ContentError::UnsupportedMode(_)
        )
    }
}
