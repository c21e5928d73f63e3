//! Error types for the `playhead` crate.
//!
//! This module defines [`PlayheadError`], the unified error type returned by
//! all fallible operations in the crate. Variants carry enough context to
//! diagnose the problem without additional logging at the call site.

use std::path::PathBuf;

use thiserror::Error;

/// The unified error type for all `playhead` operations.
///
/// Every public method that can fail returns `Result<T, PlayheadError>`.
/// External-library failures are translated into a typed variant and
/// returned immediately; nothing is retried internally except the decoder's
/// "needs more input" outcomes, which are absorbed by the packet-pull loop
/// and never surfaced.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlayheadError {
    /// The media file could not be opened by the demuxer.
    #[error("Failed to open media file at {path}: {reason}")]
    ContainerOpen {
        /// Path that was passed to [`crate::VideoSession::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream with an available decoder.
    #[error("No decodable video stream found in file")]
    NoVideoStream,

    /// A decoder context could not be built from the stream's codec
    /// parameters.
    #[error("Failed to initialize decoder from stream parameters: {0}")]
    DecoderInit(String),

    /// The video decoder could not be opened.
    #[error("Failed to open video decoder: {0}")]
    DecoderOpen(String),

    /// A packet could not be submitted to the decoder.
    #[error("Failed to submit packet to decoder: {0}")]
    DecodeSubmit(String),

    /// The decoder failed while producing a frame (distinct from the
    /// non-fatal "needs more input" outcome, which is handled internally).
    #[error("Failed to receive frame from decoder: {0}")]
    DecodeReceive(String),

    /// The container has no packets left for the selected stream.
    ///
    /// This marks the normal end of iteration, not a fault; callers should
    /// stop reading rather than retry.
    #[error("End of stream")]
    EndOfStream,

    /// The pixel conversion graph could not be created or configured.
    #[error("Failed to set up conversion filter graph: {0}")]
    FilterInit(String),

    /// A decoded frame could not be pushed into the conversion graph.
    #[error("Failed to push frame into filter graph: {0}")]
    FilterPush(String),

    /// The converted frame could not be pulled from the conversion graph.
    #[error("Failed to pull converted frame from filter graph: {0}")]
    FilterPull(String),

    /// The container rejected a request to reposition its read cursor.
    #[error("Failed to seek to timestamp {timestamp}: {reason}")]
    Seek {
        /// The requested target, in stream time-base units.
        timestamp: i64,
        /// Underlying reason the reposition failed.
        reason: String,
    },

    /// The caller-supplied output buffer cannot hold one converted frame.
    #[error("Output buffer too small: need {required} bytes, got {provided}")]
    BufferTooSmall {
        /// Minimum buffer size for this session, in bytes.
        required: usize,
        /// Size of the buffer that was passed in.
        provided: usize,
    },
}
