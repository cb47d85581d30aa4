//! Error types for match key derivation.
//!
//! This module provides the [`MatchKeyError`] type for all library operations
//! and the [`Result`] convenience type.

use thiserror::Error;

/// Error type for all match key operations.
///
/// Only structurally invalid input fails. Records that merely lack the fields
/// a key component reads from still produce a key with defaulted tokens.
#[derive(Error, Debug)]
pub enum MatchKeyError {
    /// The `marc` object has no `fields` member.
    #[error("MARC fields array is missing.")]
    FieldsMissing,

    /// The `marc.fields` member is present but is not a JSON array.
    #[error("MARC fields is not an array.")]
    FieldsNotArray,

    /// The envelope is not a JSON object or carries no `marc` object.
    #[error("Invalid envelope: {0}")]
    InvalidEnvelope(String),

    /// The input is not well-formed JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The match key configuration could not be interpreted.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO error while reading configuration or input.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MatchKeyError {
    /// Whether this is a validation failure of the record's field collection.
    ///
    /// Callers typically treat such records as unmatchable and move on.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::FieldsMissing | Self::FieldsNotArray)
    }
}

/// Convenience type alias for [`std::result::Result`] with [`MatchKeyError`].
pub type Result<T> = std::result::Result<T, MatchKeyError>;
