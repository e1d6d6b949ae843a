//! C API for the stream types.
//!
//! Every function returns a [`KtxsErrorCode`]; values are handed back through
//! out pointers. Use [`ktxs_error_message()`] to turn a code into text.
//!
//! # Example
//!
//! ```c
//! KtxsStream* stream = NULL;
//! if (ktxs_new_FileStream(fd, &stream) != KTXS_SUCCESS) {
//!     return;
//! }
//!
//! uint8_t identifier[12];
//! KtxsErrorCode code = ktxs_Stream_Read(stream, identifier, sizeof(identifier));
//! if (code != KTXS_SUCCESS) {
//!     fprintf(stderr, "%s\n", ktxs_error_message(code));
//! }
//!
//! // Does not close `fd`.
//! ktxs_free_Stream(stream);
//! ```
//!
//! [`ktxs_error_message()`]: error::ktxs_error_message

pub mod error;
pub mod stream;

pub use error::*;
pub use stream::*;
