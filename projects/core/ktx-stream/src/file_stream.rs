//! Stream backed by an operating system file handle.

use crate::error::{MediumOperation, StreamError, StreamResult};
use crate::stream::{Stream, StreamType, payload_len, skip_len};
use log::{debug, trace};
use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/// A [`Stream`] bound to an already open file.
///
/// The stream only borrows the file: opening and closing it remain the caller's job,
/// and dropping the stream has no side effect on the handle. The cursor is the file's
/// own offset, so the stream holds no state besides the borrow.
///
/// # Example
///
/// ```no_run
/// use ktx_stream::{FileStream, Stream};
/// use std::fs::OpenOptions;
///
/// let mut file = OpenOptions::new()
///     .read(true)
///     .write(true)
///     .open("texture.ktx")?;
/// let mut stream = FileStream::new(&mut file);
///
/// let mut identifier = [0u8; 12];
/// stream.read(&mut identifier)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FileStream<'a> {
    file: &'a mut File,
}

impl<'a> FileStream<'a> {
    /// Binds a stream to `file`.
    ///
    /// Neither the cursor nor the size of the file are touched.
    pub fn new(file: &'a mut File) -> Self {
        trace!("Binding file stream");
        Self { file }
    }

    /// Returns the file this stream is bound to.
    pub fn file(&self) -> &File {
        &*self.file
    }
}

impl Stream for FileStream<'_> {
    fn read(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        let requested = dst.len() as u64;
        let position = self.position()?;
        let available = self.size()?.saturating_sub(position);
        if requested > available {
            debug!("Read of {requested} bytes at offset {position} exceeds the {available} remaining");
            return Err(StreamError::UnexpectedEndOfData {
                requested,
                available,
            });
        }

        if let Err(error) = self.file.read_exact(dst) {
            debug!("Read of {requested} bytes at offset {position} failed: {error}");
            self.file
                .seek(SeekFrom::Start(position))
                .map_err(|source| StreamError::MediumAccess {
                    operation: MediumOperation::RestorePosition,
                    source,
                })?;

            return Err(StreamError::UnexpectedEndOfData {
                requested,
                available,
            });
        }

        Ok(())
    }

    fn skip(&mut self, count: i64) -> StreamResult<()> {
        let available = self.remaining()?;
        let count = skip_len(count, available)?;

        // The bound was checked above, so this fits in an i64.
        self.file
            .seek(SeekFrom::Current(count as i64))
            .map_err(|source| StreamError::MediumAccess {
                operation: MediumOperation::RelativeSeek,
                source,
            })?;

        trace!("Skipped {count} bytes");
        Ok(())
    }

    fn write(
        &mut self,
        src: &[u8],
        element_size: usize,
        element_count: usize,
    ) -> StreamResult<()> {
        let len = payload_len(src.len(), element_size, element_count)?;
        self.file.write_all(&src[..len]).map_err(|source| {
            debug!("Write of {len} bytes failed: {source}");
            StreamError::WriteError {
                requested: len as u64,
                source: Some(source),
            }
        })
    }

    fn position(&self) -> StreamResult<u64> {
        let mut handle: &File = &*self.file;
        handle
            .stream_position()
            .map_err(|source| StreamError::MediumAccess {
                operation: MediumOperation::QueryPosition,
                source,
            })
    }

    fn set_position(&mut self, offset: u64) -> StreamResult<()> {
        let size = self.size()?;
        if offset > size {
            debug!("Rejected seek to {offset}, file size is {size}");
            return Err(StreamError::InvalidOperation {
                offset,
                size,
                source: None,
            });
        }

        self.file
            .seek(SeekFrom::Start(offset))
            .map_err(|source| StreamError::InvalidOperation {
                offset,
                size,
                source: Some(source),
            })?;

        Ok(())
    }

    fn size(&self) -> StreamResult<u64> {
        // File status rather than a seek to the end, so the cursor is never disturbed.
        self.file
            .metadata()
            .map(|metadata| metadata.len())
            .map_err(|source| StreamError::MediumAccess {
                operation: MediumOperation::QuerySize,
                source,
            })
    }

    fn stream_type(&self) -> StreamType {
        StreamType::File
    }
}
