#![no_main]

// Drives a file backed and a memory backed stream with the same operations and
// checks that they agree on every result, error kind and byte.

use ktx_stream::{FileStream, MemoryStream, Stream, StreamResult};
use libfuzzer_sys::{arbitrary, fuzz_target};
use std::io::{Seek, SeekFrom, Write};

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub enum Operation {
    Read { len: u8 },
    Skip { count: i16 },
    Write { data: Vec<u8>, element_size: u8 },
    SetPosition { offset: u16 },
}

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Input {
    pub initial: Vec<u8>,
    pub operations: Vec<Operation>,
}

/// Applies `operation`, returning the bytes read (if any) alongside the outcome.
fn apply(stream: &mut dyn Stream, operation: &Operation) -> StreamResult<Vec<u8>> {
    match operation {
        Operation::Read { len } => {
            let mut buffer = vec![0u8; *len as usize];
            stream.read(&mut buffer)?;
            Ok(buffer)
        }
        Operation::Skip { count } => stream.skip(*count as i64).map(|_| Vec::new()),
        Operation::Write { data, element_size } => {
            let element_size = (*element_size as usize).max(1);
            stream
                .write(data, element_size, data.len() / element_size)
                .map(|_| Vec::new())
        }
        Operation::SetPosition { offset } => {
            stream.set_position(*offset as u64).map(|_| Vec::new())
        }
    }
}

fuzz_target!(|input: Input| {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&input.initial).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let mut file_stream = FileStream::new(&mut file);
    let mut memory_stream = MemoryStream::from_slice(&input.initial);

    for operation in &input.operations {
        let from_file = apply(&mut file_stream, operation);
        let from_memory = apply(&mut memory_stream, operation);

        match (from_file, from_memory) {
            (Ok(file_bytes), Ok(memory_bytes)) => {
                assert_eq!(file_bytes, memory_bytes, "{operation:?} read different bytes")
            }
            (Err(file_error), Err(memory_error)) => assert_eq!(
                file_error.kind(),
                memory_error.kind(),
                "{operation:?} failed differently"
            ),
            (from_file, from_memory) => {
                panic!("{operation:?} diverged: file {from_file:?}, memory {from_memory:?}")
            }
        }

        assert_eq!(file_stream.position().unwrap(), memory_stream.position().unwrap());
        assert_eq!(file_stream.size().unwrap(), memory_stream.size().unwrap());
    }

    assert_eq!(file_stream.remaining().unwrap(), memory_stream.remaining().unwrap());
});
