//! C API error handling for stream operations.

use crate::error::{StreamError, StreamErrorKind, StreamResult};
use core::ffi::c_char;

/// C-compatible error codes for stream operations.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KtxsErrorCode {
    /// Operation succeeded
    Success = 0,
    /// A required pointer was null, or a numeric argument violated its precondition
    InvalidArgument = 1,
    /// Not enough data remained between the cursor and the end of the stream
    UnexpectedEndOfData = 2,
    /// The medium did not accept the full payload
    WriteError = 3,
    /// Position is past the end of the stream, or the medium rejected the seek
    InvalidOperation = 4,
    /// The medium failed a size or position query, or a relative seek
    MediumAccess = 5,
}

impl KtxsErrorCode {
    /// Check if the code indicates success
    pub fn is_success(&self) -> bool {
        matches!(self, KtxsErrorCode::Success)
    }
}

impl From<StreamErrorKind> for KtxsErrorCode {
    fn from(kind: StreamErrorKind) -> Self {
        match kind {
            StreamErrorKind::InvalidArgument => KtxsErrorCode::InvalidArgument,
            StreamErrorKind::UnexpectedEndOfData => KtxsErrorCode::UnexpectedEndOfData,
            StreamErrorKind::WriteError => KtxsErrorCode::WriteError,
            StreamErrorKind::InvalidOperation => KtxsErrorCode::InvalidOperation,
            StreamErrorKind::MediumAccess => KtxsErrorCode::MediumAccess,
        }
    }
}

impl From<StreamError> for KtxsErrorCode {
    fn from(error: StreamError) -> Self {
        error.kind().into()
    }
}

impl From<StreamResult<()>> for KtxsErrorCode {
    fn from(result: StreamResult<()>) -> Self {
        match result {
            Ok(()) => KtxsErrorCode::Success,
            Err(e) => e.into(),
        }
    }
}

/// Get a null-terminated string description of the error code.
///
/// The returned string is a static string literal that does not need to be freed.
///
/// # Safety
/// This function is safe to call with any error code value.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_error_message(error_code: KtxsErrorCode) -> *const c_char {
    match error_code {
        KtxsErrorCode::Success => c"Success".as_ptr(),
        KtxsErrorCode::InvalidArgument => {
            c"Invalid argument: a required pointer was null or a value was out of range".as_ptr()
        }
        KtxsErrorCode::UnexpectedEndOfData => {
            c"Unexpected end of data: not enough bytes remain in the stream".as_ptr()
        }
        KtxsErrorCode::WriteError => c"Failed to write the full payload to the stream".as_ptr(),
        KtxsErrorCode::InvalidOperation => {
            c"Invalid operation: position is past the end of the stream or the seek failed"
                .as_ptr()
        }
        KtxsErrorCode::MediumAccess => {
            c"The underlying medium could not be queried or repositioned".as_ptr()
        }
    }
}
