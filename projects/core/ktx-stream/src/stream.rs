//! The stream interface shared by every backing store.

use crate::error::{StreamError, StreamResult};

/// Identifies which backing store a stream is bound to.
///
/// The values match the stream type constants used by the C side of the KTX
/// library, which is why `0` is not used.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamType {
    /// Stream bound to an operating system file handle.
    File = 1,
    /// Stream bound to an in-memory byte buffer.
    Memory = 2,
}

/// A byte sequence with a single read/write cursor.
///
/// Implementations differ only in the medium they move bytes to and from; the
/// semantics of every operation below are identical for all of them, so a
/// texture reader or writer can be written once against this trait.
///
/// # Cursor Invariant
///
/// After any successful operation the cursor lies in `0..=size`. Operations that
/// fail leave the cursor where it was, with the exception of [`Stream::write`],
/// after which the cursor is unspecified.
pub trait Stream {
    /// Reads exactly `dst.len()` bytes from the cursor into `dst`, advancing the
    /// cursor by the same amount.
    ///
    /// # Errors
    ///
    /// - [`StreamError::UnexpectedEndOfData`] if fewer than `dst.len()` bytes remain.
    ///   Nothing is transferred and the cursor does not move. If the medium fails
    ///   part way through, the contents of `dst` are unspecified but the cursor
    ///   is still restored.
    fn read(&mut self, dst: &mut [u8]) -> StreamResult<()>;

    /// Advances the cursor by `count` bytes without transferring any data.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidArgument`] if `count` is negative.
    /// - [`StreamError::UnexpectedEndOfData`] if the cursor would move past the end of the stream.
    /// - [`StreamError::MediumAccess`] if the medium could not be queried or moved.
    fn skip(&mut self, count: i64) -> StreamResult<()>;

    /// Writes `element_count` elements of `element_size` bytes each, taken from the
    /// start of `src`, at the cursor. The cursor advances by the number of bytes written
    /// and the stream grows if the write runs past its end.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidArgument`] if `src` holds fewer than
    ///   `element_size * element_count` bytes, or the product overflows.
    /// - [`StreamError::WriteError`] if the medium did not accept the full payload.
    ///   Short writes are failures; some bytes may still have reached the medium.
    fn write(
        &mut self,
        src: &[u8],
        element_size: usize,
        element_count: usize,
    ) -> StreamResult<()>;

    /// Returns the cursor as a byte offset from the start of the stream.
    ///
    /// # Errors
    ///
    /// - [`StreamError::MediumAccess`] if the medium could not report its offset.
    fn position(&self) -> StreamResult<u64>;

    /// Moves the cursor to `offset` bytes from the start of the stream.
    ///
    /// Seeking to exactly [`Stream::size`] is allowed so that a following write appends.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidOperation`] if `offset` is greater than the size of the
    ///   stream, or the medium rejected the seek.
    fn set_position(&mut self, offset: u64) -> StreamResult<()>;

    /// Returns the total length of the stream in bytes, independent of the cursor.
    fn size(&self) -> StreamResult<u64>;

    /// Returns the backing store this stream is bound to.
    fn stream_type(&self) -> StreamType;

    /// Returns the number of bytes between the cursor and the end of the stream.
    fn remaining(&self) -> StreamResult<u64> {
        Ok(self.size()?.saturating_sub(self.position()?))
    }
}

/// Validates the arguments of [`Stream::write`] and returns the payload length in bytes.
pub(crate) fn payload_len(
    src_len: usize,
    element_size: usize,
    element_count: usize,
) -> StreamResult<usize> {
    let len = element_size
        .checked_mul(element_count)
        .ok_or(StreamError::InvalidArgument(
            "element size multiplied by element count overflows",
        ))?;

    if len > src_len {
        return Err(StreamError::InvalidArgument(
            "source buffer is shorter than element size multiplied by element count",
        ));
    }

    Ok(len)
}

/// Validates the argument of [`Stream::skip`] against the bytes left in the stream.
pub(crate) fn skip_len(count: i64, available: u64) -> StreamResult<u64> {
    let count = u64::try_from(count)
        .map_err(|_| StreamError::InvalidArgument("skip count must not be negative"))?;

    if count > available {
        return Err(StreamError::UnexpectedEndOfData {
            requested: count,
            available,
        });
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamErrorKind;
    use crate::test_prelude::*;

    #[rstest]
    #[case(8, 1, 1, 1)]
    #[case(8, 4, 2, 8)]
    #[case(8, 0, 100, 0)]
    #[case(0, 7, 0, 0)]
    fn payload_len_accepts_payloads_within_source(
        #[case] src_len: usize,
        #[case] element_size: usize,
        #[case] element_count: usize,
        #[case] expected: usize,
    ) {
        assert_eq!(
            payload_len(src_len, element_size, element_count).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case(8, 3, 3)]
    #[case(8, usize::MAX, 2)]
    fn payload_len_rejects_bad_payloads(
        #[case] src_len: usize,
        #[case] element_size: usize,
        #[case] element_count: usize,
    ) {
        let error = payload_len(src_len, element_size, element_count).unwrap_err();
        assert_eq!(error.kind(), StreamErrorKind::InvalidArgument);
    }

    #[rstest]
    #[case(-1)]
    #[case(i64::MIN)]
    fn skip_len_rejects_negative_counts(#[case] count: i64) {
        let error = skip_len(count, u64::MAX).unwrap_err();
        assert_eq!(error.kind(), StreamErrorKind::InvalidArgument);
    }

    #[test]
    fn skip_len_rejects_counts_past_end() {
        let error = skip_len(5, 4).unwrap_err();
        assert!(matches!(
            error,
            StreamError::UnexpectedEndOfData {
                requested: 5,
                available: 4
            }
        ));
    }
}
