//! Benchmarks for session open, sequential reads, and seeking.
//!
//! Run with: cargo bench
//!
//! Requires fixture files from `tests/fixtures/generate_fixtures.sh`.

use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use playhead::{FfmpegLogLevel, PlayheadError, VideoSession};

const ALLKEY_FIXTURE: &str = "tests/fixtures/sample_allkey.avi";
const WITH_AUDIO_FIXTURE: &str = "tests/fixtures/sample_with_audio.mp4";

fn benchmark_open_and_first_frame(criterion: &mut Criterion) {
    playhead::set_ffmpeg_log_level(FfmpegLogLevel::Error);

    if !Path::new(WITH_AUDIO_FIXTURE).exists() {
        eprintln!("Skipping benchmark: fixture not found");
        return;
    }

    criterion.bench_function("open session", |bencher| {
        bencher.iter(|| {
            let _session = VideoSession::open(WITH_AUDIO_FIXTURE).unwrap();
        });
    });

    criterion.bench_function("open session + first frame", |bencher| {
        bencher.iter(|| {
            let mut session = VideoSession::open(WITH_AUDIO_FIXTURE).unwrap();
            let mut pixels = vec![0u8; session.frame_buffer_size()];
            session.read_frame(&mut pixels).unwrap();
        });
    });
}

fn benchmark_sequential_reads(criterion: &mut Criterion) {
    if !Path::new(WITH_AUDIO_FIXTURE).exists() {
        return;
    }

    criterion.bench_function("read full stream", |bencher| {
        bencher.iter(|| {
            let mut session = VideoSession::open(WITH_AUDIO_FIXTURE).unwrap();
            let mut pixels = vec![0u8; session.frame_buffer_size()];
            loop {
                match session.read_frame(&mut pixels) {
                    Ok(_) => {}
                    Err(PlayheadError::EndOfStream) => break,
                    Err(error) => panic!("Decode error: {error}"),
                }
            }
        });
    });
}

fn benchmark_seek_and_read(criterion: &mut Criterion) {
    if !Path::new(ALLKEY_FIXTURE).exists() {
        return;
    }

    criterion.bench_function("seek mid-stream + read", |bencher| {
        let mut session = VideoSession::open(ALLKEY_FIXTURE).unwrap();
        let mut pixels = vec![0u8; session.frame_buffer_size()];
        bencher.iter(|| {
            session.seek(5).unwrap();
            session.read_frame(&mut pixels).unwrap();
        });
    });
}

criterion_group!(
    benches,
    benchmark_open_and_first_frame,
    benchmark_sequential_reads,
    benchmark_seek_and_read,
);
criterion_main!(benches);
