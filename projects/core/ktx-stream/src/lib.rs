//! Byte stream abstraction for reading and writing KTX texture files.
//!
//! Texture readers and writers are written against the [`Stream`] trait and never
//! need to know whether the bytes live in a file or in memory. The crate does not
//! interpret the data it moves.
//!
//! # Features
//!
//! - [`FileStream`]: borrows an already open [`std::fs::File`] (`file-io` feature, on by default)
//! - [`MemoryStream`]: growable in-memory buffer, optionally borrowing read-only data
//! - [`AnyStream`]: either of the above, selected at runtime
//! - C API for the above (`c-exports` feature)
//!
//! # Example
//!
//! ```
//! use ktx_stream::{MemoryStream, Stream, StreamErrorKind};
//!
//! let mut stream = MemoryStream::new();
//! stream.write(b"\xABKTX 20\xBB\r\n\x1A\n", 1, 12)?;
//! stream.set_position(0)?;
//!
//! let mut identifier = [0u8; 12];
//! stream.read(&mut identifier)?;
//! assert_eq!(&identifier[1..7], b"KTX 20");
//!
//! // Reads are all-or-nothing.
//! let error = stream.read(&mut [0u8; 1]).unwrap_err();
//! assert_eq!(error.kind(), StreamErrorKind::UnexpectedEndOfData);
//! # Ok::<(), ktx_stream::StreamError>(())
//! ```
#![warn(missing_docs)]

pub mod any_stream;
pub mod error;
pub mod memory_stream;
pub mod stream;

#[cfg(feature = "file-io")]
pub mod file_stream;

#[cfg(feature = "c-exports")]
pub mod c_api;

#[cfg(test)]
pub(crate) mod test_prelude;

// Re-export key types
pub use any_stream::AnyStream;
pub use error::{MediumOperation, StreamError, StreamErrorKind, StreamResult};
#[cfg(feature = "file-io")]
pub use file_stream::FileStream;
pub use memory_stream::MemoryStream;
pub use stream::{Stream, StreamType};
