//! Error handling integration tests.
//!
//! These tests verify that meaningful, typed errors are returned for the
//! various failure conditions.

use std::path::Path;

use playhead::{PlayheadError, VideoSession};

#[test]
fn open_nonexistent_file() {
    let result = VideoSession::open("this_file_does_not_exist.mp4");
    assert!(result.is_err());

    let error = result.unwrap_err();
    assert!(matches!(error, PlayheadError::ContainerOpen { .. }));
    let message = error.to_string();
    assert!(
        message.contains("Failed to open media file"),
        "Error message should mention file open failure: {message}",
    );
}

#[test]
fn open_invalid_file() {
    // A file with garbage content is not a recognizable container.
    let temporary_directory = tempfile::tempdir().expect("Failed to create temp dir");
    let invalid_file_path = temporary_directory.path().join("invalid.mp4");
    std::fs::write(&invalid_file_path, b"this is not a media file")
        .expect("Failed to write invalid file");

    let result = VideoSession::open(&invalid_file_path);
    assert!(
        matches!(result, Err(PlayheadError::ContainerOpen { .. })),
        "Expected container open error for garbage input",
    );
}

#[test]
fn audio_only_file_has_no_video_stream() {
    let path = "tests/fixtures/sample_audio_only.m4a";
    if !Path::new(path).exists() {
        return;
    }

    let result = VideoSession::open(path);
    assert!(matches!(result, Err(PlayheadError::NoVideoStream)));

    let message = result.unwrap_err().to_string();
    assert!(
        message.contains("video"),
        "Error should mention the missing video stream: {message}",
    );
}

#[test]
fn undersized_buffer_is_rejected() {
    let path = "tests/fixtures/sample_allkey.avi";
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let required = session.frame_buffer_size();

    let mut pixels = vec![0u8; required - 1];
    let result = session.read_frame(&mut pixels);
    match result {
        Err(PlayheadError::BufferTooSmall {
            required: reported,
            provided,
        }) => {
            assert_eq!(reported, required);
            assert_eq!(provided, required - 1);
        }
        other => panic!("Expected BufferTooSmall, got {other:?}"),
    }

    // The rejection happens before any packet is pulled, so a correctly
    // sized retry still starts at the first frame.
    let mut pixels = vec![0u8; required];
    let pts = session.read_frame(&mut pixels).expect("Decode error");
    assert_eq!(pts, 0);
}

#[test]
fn end_of_stream_is_sticky() {
    let path = "tests/fixtures/sample_allkey.avi";
    if !Path::new(path).exists() {
        return;
    }

    let mut session = VideoSession::open(path).expect("Failed to open fixture");
    let mut pixels = vec![0u8; session.frame_buffer_size()];

    while session.read_frame(&mut pixels).is_ok() {}

    // Further reads keep reporting end of stream rather than failing some
    // other way.
    for _ in 0..3 {
        assert!(matches!(
            session.read_frame(&mut pixels),
            Err(PlayheadError::EndOfStream),
        ));
    }
}
