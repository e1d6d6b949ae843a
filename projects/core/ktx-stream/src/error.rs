//! Error types for stream operations.

use std::io;
use thiserror::Error;

/// Result type for stream operations
pub type StreamResult<T> = Result<T, StreamError>;

/// The medium query or seek that failed in a [`StreamError::MediumAccess`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediumOperation {
    /// Querying the total size of the medium (file status).
    QuerySize,
    /// Querying the current offset of the medium.
    QueryPosition,
    /// Moving the cursor relative to its current offset.
    RelativeSeek,
    /// Moving the cursor back after a read failed part way through.
    RestorePosition,
}

/// Errors that can occur during stream operations.
///
/// Every failure is terminal for the operation that produced it. No partial
/// transfer should be assumed by the caller.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A required argument was absent, or a numeric argument violated its precondition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Fewer bytes remain between the cursor and the end of the medium than were requested.
    #[error("Unexpected end of data: requested {requested} bytes, but only {available} remain")]
    UnexpectedEndOfData {
        /// Number of bytes the operation needed
        requested: u64,
        /// Number of bytes between the cursor and the end of the medium
        available: u64,
    },

    /// The medium did not accept the full payload.
    #[error("Failed to write {requested} bytes to the stream")]
    WriteError {
        /// Number of bytes the write attempted to transfer
        requested: u64,
        /// Underlying error reported by the medium, if any
        #[source]
        source: Option<io::Error>,
    },

    /// The requested absolute position is beyond the end of the stream, or the
    /// medium rejected the positioning request.
    #[error("Invalid operation: cannot set position to {offset} in a stream of {size} bytes")]
    InvalidOperation {
        /// The requested absolute offset
        offset: u64,
        /// The size of the stream at the time of the request
        size: u64,
        /// Underlying error reported by the medium, if the seek itself failed
        #[source]
        source: Option<io::Error>,
    },

    /// The medium failed a size or position query, or a relative seek.
    #[error("Medium access failed during {operation:?}")]
    MediumAccess {
        /// What was being attempted
        operation: MediumOperation,
        /// Underlying error reported by the medium
        #[source]
        source: io::Error,
    },
}

/// Payload-free discriminant of a [`StreamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamErrorKind {
    /// See [`StreamError::InvalidArgument`]
    InvalidArgument,
    /// See [`StreamError::UnexpectedEndOfData`]
    UnexpectedEndOfData,
    /// See [`StreamError::WriteError`]
    WriteError,
    /// See [`StreamError::InvalidOperation`]
    InvalidOperation,
    /// See [`StreamError::MediumAccess`]
    MediumAccess,
}

impl StreamError {
    /// Returns the kind of this error, for callers that only branch on the category.
    pub fn kind(&self) -> StreamErrorKind {
        match self {
            StreamError::InvalidArgument(_) => StreamErrorKind::InvalidArgument,
            StreamError::UnexpectedEndOfData { .. } => StreamErrorKind::UnexpectedEndOfData,
            StreamError::WriteError { .. } => StreamErrorKind::WriteError,
            StreamError::InvalidOperation { .. } => StreamErrorKind::InvalidOperation,
            StreamError::MediumAccess { .. } => StreamErrorKind::MediumAccess,
        }
    }
}
