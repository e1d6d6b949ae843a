//! Common test imports and utilities for stream tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]
#![allow(dead_code)]

// External crates commonly used in tests
pub use rstest::rstest;
pub use tempfile::{Builder, NamedTempFile};

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};

/// Creates a buffer of `len` bytes filled with a repeating 0..=255 pattern.
pub fn test_pattern(len: usize) -> Vec<u8> {
    (0..len).map(|x| (x % 256) as u8).collect()
}

/// Creates an anonymous, read/write temporary file with no contents.
pub fn empty_file() -> File {
    tempfile::tempfile().expect("Failed to create temp file")
}

/// Creates an anonymous, read/write temporary file holding `data`, with the
/// file offset rewound to the start.
pub fn file_with_contents(data: &[u8]) -> File {
    let mut file = empty_file();
    file.write_all(data).expect("Failed to write input data");
    file.seek(SeekFrom::Start(0))
        .expect("Failed to rewind temp file");
    file
}

/// Creates a named temporary file holding `data`, for tests that need to reopen it.
pub fn create_file_with_data(data: &[u8]) -> NamedTempFile {
    let file = Builder::new()
        .prefix("ktx_stream_")
        .suffix(".ktx")
        .tempfile()
        .expect("Failed to create temp file");

    std::fs::write(file.path(), data).expect("Failed to write input data");
    file
}

/// Reads the whole file from the start. Leaves the file offset at the end.
pub fn read_back(file: &mut File) -> Vec<u8> {
    let mut contents = Vec::new();
    file.seek(SeekFrom::Start(0))
        .expect("Failed to rewind temp file");
    file.read_to_end(&mut contents)
        .expect("Failed to read temp file");
    contents
}
