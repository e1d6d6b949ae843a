//! A stream value tagged with the backing store it is bound to.

#[cfg(feature = "file-io")]
use crate::file_stream::FileStream;
use crate::error::StreamResult;
use crate::memory_stream::MemoryStream;
use crate::stream::{Stream, StreamType};
#[cfg(feature = "file-io")]
use std::fs::File;

/// One of the supported backing stores, chosen at construction.
///
/// Use this when the backing store is only known at runtime but the caller still
/// wants a concrete type (for example, to store it in a struct). The variant cannot
/// be swapped afterwards; all [`Stream`] calls are forwarded to it.
#[derive(Debug)]
pub enum AnyStream<'a> {
    /// Bound to an operating system file.
    #[cfg(feature = "file-io")]
    File(FileStream<'a>),
    /// Bound to an in-memory buffer.
    Memory(MemoryStream<'a>),
}

impl<'a> AnyStream<'a> {
    /// Creates a file-backed stream borrowing `file`.
    #[cfg(feature = "file-io")]
    pub fn file(file: &'a mut File) -> Self {
        Self::File(FileStream::new(file))
    }

    /// Creates a memory-backed stream.
    pub fn memory(stream: MemoryStream<'a>) -> Self {
        Self::Memory(stream)
    }

    fn inner(&self) -> &dyn Stream {
        match self {
            #[cfg(feature = "file-io")]
            Self::File(stream) => stream,
            Self::Memory(stream) => stream,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Stream {
        match self {
            #[cfg(feature = "file-io")]
            Self::File(stream) => stream,
            Self::Memory(stream) => stream,
        }
    }
}

#[cfg(feature = "file-io")]
impl<'a> From<FileStream<'a>> for AnyStream<'a> {
    fn from(stream: FileStream<'a>) -> Self {
        Self::File(stream)
    }
}

impl<'a> From<MemoryStream<'a>> for AnyStream<'a> {
    fn from(stream: MemoryStream<'a>) -> Self {
        Self::Memory(stream)
    }
}

impl Stream for AnyStream<'_> {
    fn read(&mut self, dst: &mut [u8]) -> StreamResult<()> {
        self.inner_mut().read(dst)
    }

    fn skip(&mut self, count: i64) -> StreamResult<()> {
        self.inner_mut().skip(count)
    }

    fn write(
        &mut self,
        src: &[u8],
        element_size: usize,
        element_count: usize,
    ) -> StreamResult<()> {
        self.inner_mut().write(src, element_size, element_count)
    }

    fn position(&self) -> StreamResult<u64> {
        self.inner().position()
    }

    fn set_position(&mut self, offset: u64) -> StreamResult<()> {
        self.inner_mut().set_position(offset)
    }

    fn size(&self) -> StreamResult<u64> {
        self.inner().size()
    }

    fn stream_type(&self) -> StreamType {
        self.inner().stream_type()
    }
}
