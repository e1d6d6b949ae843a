//! Stream backed by an in-memory byte buffer.

use crate::error::{StreamError, StreamResult};
use crate::stream::{Stream, StreamType, payload_len, skip_len};
use log::debug;
use std::borrow::Cow;
use std::io;

/// A [`Stream`] over a byte buffer held in memory.
///
/// A stream created with [`MemoryStream::from_slice`] borrows its data and only copies
/// it on the first write, so read-only access to an already loaded texture is free.
/// Writes past the end grow the buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryStream<'a> {
    data: Cow<'a, [u8]>,
    position: usize,
}

impl MemoryStream<'static> {
    /// Creates an empty, growable stream.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a stream that owns `data`, with the cursor at the start.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self {
            data: Cow::Owned(data),
            position: 0,
        }
    }
}

impl<'a> MemoryStream<'a> {
    /// Creates a stream over borrowed `data`, with the cursor at the start.
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            data: Cow::Borrowed(data),
            position: 0,
        }
    }

    /// Returns the full contents of the stream.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the stream and returns its contents.
    pub fn into_inner(self) -> Vec<u8> {
        self.data.into_owned()
    }

    fn available(&self) -> u64 {
        (self.data.len() - self.position) as u64
    }
}

impl Stream for MemoryStream<'_> {
    fn read(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        let available = self.available();
        if dst.len() as u64 > available {
            debug!(
                "Read of {} bytes at offset {} exceeds the {available} remaining",
                dst.len(),
                self.position
            );
            return Err(StreamError::UnexpectedEndOfData {
                requested: dst.len() as u64,
                available,
            });
        }

        let end = self.position + dst.len();
        dst.copy_from_slice(&self.data[self.position..end]);
        self.position = end;
        Ok(())
    }

    fn skip(&mut self, count: i64) -> StreamResult<()> {
        let count = skip_len(count, self.available())?;
        self.position += count as usize;
        Ok(())
    }

    fn write(
        &mut self,
        src: &[u8],
        element_size: usize,
        element_count: usize,
    ) -> StreamResult<()> {
        let len = payload_len(src.len(), element_size, element_count)?;
        if len == 0 {
            return Ok(());
        }

        let payload = &src[..len];
        let data = self.data.to_mut();
        let overlap = (data.len() - self.position).min(len);
        let tail = &payload[overlap..];

        // Reserve before touching any byte so a failed allocation leaves the buffer as it was.
        data.try_reserve(tail.len()).map_err(|error| {
            debug!("Failed to grow memory stream by {} bytes: {error}", tail.len());
            StreamError::WriteError {
                requested: len as u64,
                source: Some(io::Error::new(io::ErrorKind::OutOfMemory, error)),
            }
        })?;

        data[self.position..self.position + overlap].copy_from_slice(&payload[..overlap]);
        data.extend_from_slice(tail);
        self.position += len;
        Ok(())
    }

    fn position(&self) -> StreamResult<u64> {
        Ok(self.position as u64)
    }

    fn set_position(&mut self, offset: u64) -> StreamResult<()> {
        let size = self.data.len() as u64;
        if offset > size {
            debug!("Rejected seek to {offset}, buffer size is {size}");
            return Err(StreamError::InvalidOperation {
                offset,
                size,
                source: None,
            });
        }

        self.position = offset as usize;
        Ok(())
    }

    fn size(&self) -> StreamResult<u64> {
        Ok(self.data.len() as u64)
    }

    fn stream_type(&self) -> StreamType {
        StreamType::Memory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StreamErrorKind;
    use crate::test_prelude::*;

    #[test]
    fn from_slice_borrows_until_first_write() {
        let source = test_pattern(8);
        let mut stream = MemoryStream::from_slice(&source);
        assert!(matches!(stream.data, Cow::Borrowed(_)));

        let mut header = [0u8; 4];
        stream.read(&mut header).unwrap();
        assert!(matches!(stream.data, Cow::Borrowed(_)));

        stream.write(&[0xFF], 1, 1).unwrap();
        assert!(matches!(stream.data, Cow::Owned(_)));

        // The caller's buffer is never modified.
        assert_eq!(source, test_pattern(8));
        assert_eq!(stream.as_slice()[4], 0xFF);
    }

    #[test]
    fn zero_length_write_keeps_borrow() {
        let source = test_pattern(4);
        let mut stream = MemoryStream::from_slice(&source);

        stream.write(&[], 1, 0).unwrap();
        assert!(matches!(stream.data, Cow::Borrowed(_)));
    }

    #[test]
    fn write_straddling_end_overwrites_then_grows() {
        let mut stream = MemoryStream::from_vec(vec![1, 2, 3, 4]);
        stream.set_position(2).unwrap();

        stream.write(&[7, 8, 9, 10], 2, 2).unwrap();

        assert_eq!(stream.position().unwrap(), 6);
        assert_eq!(stream.into_inner(), [1, 2, 7, 8, 9, 10]);
    }

    #[rstest]
    #[case(0, 5)]
    #[case(3, 2)]
    #[case(5, 1)]
    fn read_past_end_leaves_cursor_and_buffer(#[case] start: u64, #[case] extra: usize) {
        let mut stream = MemoryStream::from_vec(test_pattern(5));
        stream.set_position(start).unwrap();

        let mut buffer = vec![0u8; 5 - start as usize + extra];
        let error = stream.read(&mut buffer).unwrap_err();

        assert_eq!(error.kind(), StreamErrorKind::UnexpectedEndOfData);
        assert_eq!(stream.position().unwrap(), start);
        assert!(buffer.iter().all(|&byte| byte == 0));
    }

    #[test]
    fn skip_and_remaining_agree() {
        let mut stream = MemoryStream::from_vec(test_pattern(10));
        stream.skip(4).unwrap();
        assert_eq!(stream.remaining().unwrap(), 6);

        stream.skip(6).unwrap();
        assert_eq!(stream.remaining().unwrap(), 0);
        assert_eq!(stream.skip(1).unwrap_err().kind(), StreamErrorKind::UnexpectedEndOfData);
        assert_eq!(stream.skip(-1).unwrap_err().kind(), StreamErrorKind::InvalidArgument);
    }

    #[test]
    fn new_stream_is_empty_memory_stream() {
        let stream = MemoryStream::new();
        assert_eq!(stream.size().unwrap(), 0);
        assert_eq!(stream.position().unwrap(), 0);
        assert_eq!(stream.stream_type(), StreamType::Memory);
    }
}
