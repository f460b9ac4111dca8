//! Result and error types for probar-verify.

use thiserror::Error;

/// Result type for probar-verify operations
pub type VerifyResult<T> = Result<T, VerifyError>;

/// Errors that can occur while resolving test data or reporting verifications
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Segment lookup by name failed
    #[error("Test data segment '{segment}' not found (available: {available:?})")]
    SegmentNotFound {
        /// Requested segment name
        segment: String,
        /// Segment names present in the document, in source order
        available: Vec<String>,
    },

    /// Row index outside the segment
    #[error("Row {index} out of range for segment '{segment}' with {len} rows")]
    RowOutOfRange {
        /// Segment name
        segment: String,
        /// Requested index
        index: usize,
        /// Number of rows in the segment
        len: usize,
    },

    /// Field lookup within a row failed
    #[error("Field '{field}' not found in a row of segment '{segment}'")]
    FieldNotFound {
        /// Segment name
        segment: String,
        /// Requested field name
        field: String,
    },

    /// Two segments share a name
    #[error("Duplicate test data segment '{segment}'")]
    DuplicateSegment {
        /// Duplicated segment name
        segment: String,
    },

    /// A row uses a field the segment does not declare
    #[error("Field '{field}' is not declared by segment '{segment}'")]
    UndeclaredField {
        /// Segment name
        segment: String,
        /// Offending field name
        field: String,
    },

    /// Test data or configuration document could not be parsed
    #[error("Failed to parse document: {0}")]
    ParseError(String),

    /// Document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialization(String),

    /// File extension is not a known document format
    #[error("Unsupported test data format: {path}")]
    UnsupportedFormat {
        /// Path that was rejected
        path: String,
    },

    /// Configuration value rejected
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Error message
        message: String,
    },

    /// One or more recorded verifications failed
    #[error("{count} verification(s) failed:\n{summary}")]
    VerificationFailed {
        /// Number of failed verifications
        count: usize,
        /// One line per failure
        summary: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
