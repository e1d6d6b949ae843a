use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ktx_stream::{FileStream, MemoryStream, Stream};
#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
use pprof::criterion::{Output, PProfProfiler};
use std::hint::black_box;
use std::io::Write;

/// Mip level sizes of a square RGBA8 texture, from 64x64 up to 1024x1024.
const LEVEL_SIZES: [usize; 5] = [16384, 65536, 262144, 1048576, 4194304];

/// Size of the chunks a level is written in, matching a typical row batch.
const CHUNK_SIZE: usize = 4096;

fn generate_level(size: usize) -> Vec<u8> {
    (0..size).map(|x| (x % 251) as u8).collect()
}

fn read_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Read Level");

    for size in LEVEL_SIZES {
        let level = generate_level(size);
        let mut output = vec![0u8; size];
        group.throughput(Throughput::Bytes(size as u64));

        let mut file = tempfile::tempfile().expect("Failed to create temp file");
        file.write_all(&level).expect("Failed to write level");
        group.bench_with_input(BenchmarkId::new("file", size), &size, |b, _| {
            let mut stream = FileStream::new(&mut file);
            b.iter(|| {
                stream.set_position(0).unwrap();
                stream.read(black_box(&mut output)).unwrap();
            });
        });

        group.bench_with_input(BenchmarkId::new("memory", size), &size, |b, _| {
            let mut stream = MemoryStream::from_slice(&level);
            b.iter(|| {
                stream.set_position(0).unwrap();
                stream.read(black_box(&mut output)).unwrap();
            });
        });
    }

    group.finish();
}

fn write_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Write Level");

    for size in LEVEL_SIZES {
        let level = generate_level(size);
        group.throughput(Throughput::Bytes(size as u64));

        let mut file = tempfile::tempfile().expect("Failed to create temp file");
        group.bench_with_input(BenchmarkId::new("file", size), &size, |b, _| {
            let mut stream = FileStream::new(&mut file);
            b.iter(|| {
                stream.set_position(0).unwrap();
                for chunk in level.chunks(CHUNK_SIZE) {
                    stream.write(black_box(chunk), 4, chunk.len() / 4).unwrap();
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("memory", size), &size, |b, _| {
            let mut stream = MemoryStream::new();
            b.iter(|| {
                stream.set_position(0).unwrap();
                for chunk in level.chunks(CHUNK_SIZE) {
                    stream.write(black_box(chunk), 4, chunk.len() / 4).unwrap();
                }
            });
        });
    }

    group.finish();
}

#[cfg(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = read_benchmark, write_benchmark
}

#[cfg(not(all(
    any(target_os = "linux", target_os = "macos"),
    any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")
)))]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = read_benchmark, write_benchmark
}

criterion_main!(benches);
