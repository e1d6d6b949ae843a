//! Stream construction and operations for the C API.
//!
//! A [`KtxsStream`] is an opaque handle created by one of the `ktxs_new_*` functions
//! and released with [`ktxs_free_Stream()`]. The backing store is chosen by the
//! constructor and cannot be changed afterwards.

use crate::c_api::error::KtxsErrorCode;
use crate::error::{StreamError, StreamResult};
#[cfg(feature = "file-io")]
use crate::file_stream::FileStream;
use crate::memory_stream::MemoryStream;
use crate::stream::{Stream, StreamType};
use core::slice;
#[cfg(feature = "file-io")]
use std::fs::File;
#[cfg(feature = "file-io")]
use std::mem::ManuallyDrop;

// =============================================================================
// Type Definitions
// =============================================================================

/// Opaque stream type for the C API.
///
/// The stream is NOT thread-safe and should not be shared between threads
/// without external locking.
#[repr(C)]
pub struct KtxsStream {
    // Private field to ensure it's opaque
    _private: [u8; 0],
}

/// Internal representation of a [`KtxsStream`].
pub(crate) enum KtxsStreamInner {
    /// The descriptor belongs to the caller; it must never be closed from here.
    #[cfg(feature = "file-io")]
    File(ManuallyDrop<File>),
    Memory(MemoryStream<'static>),
}

impl KtxsStreamInner {
    fn with_stream<T>(
        &mut self,
        operation: impl FnOnce(&mut dyn Stream) -> StreamResult<T>,
    ) -> StreamResult<T> {
        match self {
            #[cfg(feature = "file-io")]
            Self::File(file) => operation(&mut FileStream::new(file)),
            Self::Memory(stream) => operation(stream),
        }
    }

    fn into_raw(self) -> *mut KtxsStream {
        Box::into_raw(Box::new(self)) as *mut KtxsStream
    }
}

/// Get mutable access to the inner stream.
///
/// # Safety
/// - `stream` must be a valid pointer to a [`KtxsStream`]
unsafe fn get_stream_mut(stream: *mut KtxsStream) -> &'static mut KtxsStreamInner {
    debug_assert!(!stream.is_null());
    unsafe { &mut *(stream as *mut KtxsStreamInner) }
}

/// Runs `operation` against `stream`, mapping a null stream to [`KtxsErrorCode::InvalidArgument`].
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
unsafe fn run(
    stream: *mut KtxsStream,
    operation: impl FnOnce(&mut dyn Stream) -> StreamResult<()>,
) -> KtxsErrorCode {
    if stream.is_null() {
        return KtxsErrorCode::InvalidArgument;
    }

    let inner = unsafe { get_stream_mut(stream) };
    inner.with_stream(operation).into()
}

/// Writes `value` into `out` if the operation succeeded.
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `out` must be null or valid for writes
unsafe fn query<T>(
    stream: *mut KtxsStream,
    out: *mut T,
    operation: impl FnOnce(&dyn Stream) -> StreamResult<T>,
) -> KtxsErrorCode {
    if out.is_null() {
        return KtxsErrorCode::InvalidArgument;
    }

    unsafe {
        run(stream, |stream| {
            let value = operation(&*stream)?;
            *out = value;
            Ok(())
        })
    }
}

// =============================================================================
// Lifecycle Functions
// =============================================================================

/// Create a stream bound to an already open file descriptor.
///
/// The descriptor stays owned by the caller: [`ktxs_free_Stream()`] does not close it,
/// and the caller must keep it open for as long as the stream is used.
/// Neither the file offset nor the file size are touched.
///
/// # Parameters
/// - `fd`: An open file descriptor, positioned where reading or writing should begin
/// - `out_stream`: Receives the new stream on success
///
/// # Returns
/// [`KtxsErrorCode::InvalidArgument`] if `out_stream` is null or `fd` is negative.
///
/// # Safety
/// - `fd` must be an open descriptor referring to a regular file
/// - `out_stream` must be null or valid for writes
#[cfg(all(feature = "file-io", unix))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_new_FileStream(
    fd: core::ffi::c_int,
    out_stream: *mut *mut KtxsStream,
) -> KtxsErrorCode {
    use std::os::unix::io::FromRawFd;

    if out_stream.is_null() || fd < 0 {
        return KtxsErrorCode::InvalidArgument;
    }

    let file = ManuallyDrop::new(unsafe { File::from_raw_fd(fd) });
    unsafe { *out_stream = KtxsStreamInner::File(file).into_raw() };
    KtxsErrorCode::Success
}

/// Create a stream bound to an already open file handle.
///
/// The handle stays owned by the caller: [`ktxs_free_Stream()`] does not close it,
/// and the caller must keep it open for as long as the stream is used.
/// Neither the file offset nor the file size are touched.
///
/// # Parameters
/// - `handle`: An open file handle, positioned where reading or writing should begin
/// - `out_stream`: Receives the new stream on success
///
/// # Returns
/// [`KtxsErrorCode::InvalidArgument`] if `out_stream` is null or `handle` is null
/// or `INVALID_HANDLE_VALUE`.
///
/// # Safety
/// - `handle` must be an open handle referring to a regular file
/// - `out_stream` must be null or valid for writes
#[cfg(all(feature = "file-io", windows))]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_new_FileStream(
    handle: std::os::windows::io::RawHandle,
    out_stream: *mut *mut KtxsStream,
) -> KtxsErrorCode {
    use std::os::windows::io::FromRawHandle;

    const INVALID_HANDLE_VALUE: isize = -1;
    if out_stream.is_null() || handle.is_null() || handle as isize == INVALID_HANDLE_VALUE {
        return KtxsErrorCode::InvalidArgument;
    }

    let file = ManuallyDrop::new(unsafe { File::from_raw_handle(handle) });
    unsafe { *out_stream = KtxsStreamInner::File(file).into_raw() };
    KtxsErrorCode::Success
}

/// Create an empty, growable memory stream.
///
/// # Safety
/// - `out_stream` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_new_MemoryStream(out_stream: *mut *mut KtxsStream) -> KtxsErrorCode {
    if out_stream.is_null() {
        return KtxsErrorCode::InvalidArgument;
    }

    unsafe { *out_stream = KtxsStreamInner::Memory(MemoryStream::new()).into_raw() };
    KtxsErrorCode::Success
}

/// Create a memory stream holding a copy of `data`, with the cursor at the start.
///
/// # Parameters
/// - `data`: Bytes to copy into the stream. May be null only if `len` is 0
/// - `len`: Number of bytes at `data`
/// - `out_stream`: Receives the new stream on success
///
/// # Safety
/// - `data` must be valid for reads of `len` bytes
/// - `out_stream` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_new_MemoryStreamFromBytes(
    data: *const u8,
    len: usize,
    out_stream: *mut *mut KtxsStream,
) -> KtxsErrorCode {
    if out_stream.is_null() || (data.is_null() && len != 0) {
        return KtxsErrorCode::InvalidArgument;
    }

    let bytes = if len == 0 {
        Vec::new()
    } else {
        unsafe { slice::from_raw_parts(data, len) }.to_vec()
    };

    unsafe { *out_stream = KtxsStreamInner::Memory(MemoryStream::from_vec(bytes)).into_raw() };
    KtxsErrorCode::Success
}

/// Free a stream.
///
/// For file streams the caller's descriptor or handle is left open.
///
/// # Safety
/// - `stream` must be null or a pointer returned by a `ktxs_new_*` function
/// - `stream` must not have been freed already
/// - After calling this function, `stream` becomes invalid
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_free_Stream(stream: *mut KtxsStream) {
    if !stream.is_null() {
        unsafe {
            drop(Box::from_raw(stream as *mut KtxsStreamInner));
        }
    }
}

// =============================================================================
// Stream Operations
// =============================================================================

/// Read exactly `size` bytes from the cursor into `dst`.
///
/// On failure nothing is consumed and the cursor does not move.
///
/// # Returns
/// - [`KtxsErrorCode::InvalidArgument`] if `stream` or `dst` is null
/// - [`KtxsErrorCode::UnexpectedEndOfData`] if fewer than `size` bytes remain
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `dst` must be null or valid for writes of `size` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_Read(
    stream: *mut KtxsStream,
    dst: *mut u8,
    size: usize,
) -> KtxsErrorCode {
    if dst.is_null() {
        return KtxsErrorCode::InvalidArgument;
    }

    unsafe {
        run(stream, |stream| {
            let dst = slice::from_raw_parts_mut(dst, size);
            stream.read(dst)
        })
    }
}

/// Advance the cursor by `count` bytes.
///
/// # Returns
/// - [`KtxsErrorCode::InvalidArgument`] if `stream` is null or `count` is negative
/// - [`KtxsErrorCode::UnexpectedEndOfData`] if the cursor would pass the end of the stream
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_Skip(stream: *mut KtxsStream, count: i64) -> KtxsErrorCode {
    unsafe { run(stream, |stream| stream.skip(count)) }
}

/// Write `element_count` elements of `element_size` bytes from `src` at the cursor.
///
/// # Returns
/// - [`KtxsErrorCode::InvalidArgument`] if `stream` or `src` is null, or the payload size overflows
/// - [`KtxsErrorCode::WriteError`] if the medium did not accept the full payload
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `src` must be null or valid for reads of `element_size * element_count` bytes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_Write(
    stream: *mut KtxsStream,
    src: *const u8,
    element_size: usize,
    element_count: usize,
) -> KtxsErrorCode {
    if src.is_null() {
        return KtxsErrorCode::InvalidArgument;
    }

    unsafe {
        run(stream, |stream| {
            let len = element_size
                .checked_mul(element_count)
                .ok_or(StreamError::InvalidArgument(
                    "element size multiplied by element count overflows",
                ))?;
            let src = slice::from_raw_parts(src, len);
            stream.write(src, element_size, element_count)
        })
    }
}

/// Get the cursor as a byte offset from the start of the stream.
///
/// # Returns
/// [`KtxsErrorCode::InvalidArgument`] if `stream` or `out_position` is null.
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `out_position` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_GetPos(
    stream: *mut KtxsStream,
    out_position: *mut u64,
) -> KtxsErrorCode {
    unsafe { query(stream, out_position, |stream| stream.position()) }
}

/// Move the cursor to `offset` bytes from the start of the stream.
///
/// `offset` may equal the size of the stream, so that a following write appends.
///
/// # Returns
/// - [`KtxsErrorCode::InvalidArgument`] if `stream` is null
/// - [`KtxsErrorCode::InvalidOperation`] if `offset` is past the end, or the seek failed
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_SetPos(stream: *mut KtxsStream, offset: u64) -> KtxsErrorCode {
    unsafe { run(stream, |stream| stream.set_position(offset)) }
}

/// Get the total size of the stream in bytes.
///
/// # Returns
/// - [`KtxsErrorCode::InvalidArgument`] if `stream` or `out_size` is null
/// - [`KtxsErrorCode::MediumAccess`] if the size could not be queried
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `out_size` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_GetSize(
    stream: *mut KtxsStream,
    out_size: *mut u64,
) -> KtxsErrorCode {
    unsafe { query(stream, out_size, |stream| stream.size()) }
}

/// Get the backing store the stream is bound to.
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `out_type` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_Stream_GetType(
    stream: *mut KtxsStream,
    out_type: *mut StreamType,
) -> KtxsErrorCode {
    unsafe { query(stream, out_type, |stream| Ok(stream.stream_type())) }
}

/// Get the contents of a memory stream.
///
/// The returned pointer is valid until the next write to, or free of, the stream.
///
/// # Returns
/// [`KtxsErrorCode::InvalidArgument`] if any pointer is null or the stream is not memory backed.
///
/// # Safety
/// - `stream` must be null or a valid pointer to a [`KtxsStream`]
/// - `out_data` and `out_len` must be null or valid for writes
#[unsafe(no_mangle)]
pub unsafe extern "C" fn ktxs_MemoryStream_GetData(
    stream: *mut KtxsStream,
    out_data: *mut *const u8,
    out_len: *mut usize,
) -> KtxsErrorCode {
    if stream.is_null() || out_data.is_null() || out_len.is_null() {
        return KtxsErrorCode::InvalidArgument;
    }

    match unsafe { get_stream_mut(stream) } {
        KtxsStreamInner::Memory(memory) => {
            let data = memory.as_slice();
            unsafe {
                *out_data = data.as_ptr();
                *out_len = data.len();
            }
            KtxsErrorCode::Success
        }
        #[cfg(feature = "file-io")]
        KtxsStreamInner::File(_) => KtxsErrorCode::InvalidArgument,
    }
}
