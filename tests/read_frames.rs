//! Frame-reading integration tests.
//!
//! Tests require fixture files from `tests/fixtures/generate_fixtures.sh`.

use std::path::Path;

use playhead::{PlayheadError, VideoSession};

fn allkey_path() -> &'static str {
    "tests/fixtures/sample_allkey.avi"
}

fn with_audio_path() -> &'static str {
    "tests/fixtures/sample_with_audio.mp4"
}

// ── presentation order ─────────────────────────────────────────────

#[test]
fn ten_frames_then_end_of_stream() {
    let path = allkey_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let mut pixels = vec![0u8; session.frame_buffer_size()];

    let mut timestamps = Vec::new();
    for _ in 0..10 {
        timestamps.push(session.read_frame(&mut pixels).expect("Decode error"));
    }
    assert_eq!(timestamps, (0..10).collect::<Vec<i64>>());

    let eleventh = session.read_frame(&mut pixels);
    assert!(
        matches!(eleventh, Err(PlayheadError::EndOfStream)),
        "Expected end of stream, got {eleventh:?}",
    );
}

#[test]
fn timestamps_are_non_decreasing() {
    let path = with_audio_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let mut pixels = vec![0u8; session.frame_buffer_size()];

    let mut timestamps = Vec::new();
    loop {
        match session.read_frame(&mut pixels) {
            Ok(pts) => timestamps.push(pts),
            Err(PlayheadError::EndOfStream) => break,
            Err(error) => panic!("Decode error: {error}"),
        }
    }

    assert!(timestamps.len() > 1, "Expected more than one frame");
    for window in timestamps.windows(2) {
        assert!(
            window[1] >= window[0],
            "Timestamps should be non-decreasing: {timestamps:?}",
        );
    }
}

// ── output buffer contract ─────────────────────────────────────────

#[test]
fn full_range_source_fills_every_row() {
    let path = allkey_path();
    if !Path::new(path).exists() {
        return;
    }

    // The MJPEG fixture decodes to a legacy full-range (YUVJ) format, so
    // this also exercises the pixel-format normalization path.
    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let row_bytes = session.width() as usize * 4;
    let required = session.frame_buffer_size();

    let mut pixels = vec![0xA5u8; required];
    session.read_frame(&mut pixels).expect("Decode error");

    let first_row = &pixels[..row_bytes];
    let last_row = &pixels[required - row_bytes..];
    assert!(
        first_row.iter().any(|&byte| byte != 0xA5),
        "First row was not written",
    );
    assert!(
        last_row.iter().any(|&byte| byte != 0xA5),
        "Last row was not written",
    );
}

#[test]
fn oversized_buffer_is_accepted() {
    let path = allkey_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let required = session.frame_buffer_size();

    // Only the first `required` bytes may be touched.
    let mut pixels = vec![0xA5u8; required + 64];
    session.read_frame(&mut pixels).expect("Decode error");
    assert!(
        pixels[required..].iter().all(|&byte| byte == 0xA5),
        "Bytes past the frame were modified",
    );
}

// ── iterator ───────────────────────────────────────────────────────

#[test]
fn frames_iterator_matches_read_frame() {
    let path = allkey_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let expected_len = session.frame_buffer_size();

    let mut timestamps = Vec::new();
    for frame in session.frames() {
        let frame = frame.expect("Decode error");
        assert_eq!(frame.pixels.len(), expected_len);
        timestamps.push(frame.pts);
    }
    assert_eq!(timestamps, (0..10).collect::<Vec<i64>>());
}

#[test]
fn frames_iterator_early_exit() {
    let path = allkey_path();
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let taken: Vec<_> = session.frames().take(3).collect();
    assert_eq!(taken.len(), 3);

    // The borrow is released; direct reads continue from frame 3.
    let mut pixels = vec![0u8; session.frame_buffer_size()];
    let pts = session.read_frame(&mut pixels).expect("Decode error");
    assert_eq!(pts, 3);
}
