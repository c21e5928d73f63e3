//! FFmpeg log verbosity control.
//!
//! FFmpeg has its own logging system, separate from the Rust
//! [`log`](https://crates.io/crates/log) crate, and by default prints
//! warnings and errors straight to stderr. These helpers let users of
//! `playhead` tune or silence that output without importing `ffmpeg-next`
//! directly; Rust-side diagnostics from this crate go through the `log`
//! crate and are configured with an ordinary logger instead.
//!
//! # Example
//!
//! ```no_run
//! use playhead::{FfmpegLogLevel, VideoSession};
//!
//! // Only show FFmpeg's own errors and worse.
//! playhead::set_ffmpeg_log_level(FfmpegLogLevel::Error);
//!
//! let session = VideoSession::open("clip.mp4")?;
//! # Ok::<(), playhead::PlayheadError>(())
//! ```

/// FFmpeg internal log verbosity, from `Quiet` up to `Trace`.
pub use ffmpeg_next::util::log::Level as FfmpegLogLevel;

/// Set the FFmpeg internal log verbosity level.
///
/// Messages below the given severity are suppressed. This is global to the
/// process, like FFmpeg's log state itself.
pub fn set_ffmpeg_log_level(level: FfmpegLogLevel) {
    ffmpeg_next::util::log::set_level(level);
}

/// Get the current FFmpeg internal log verbosity level.
///
/// Returns `None` if the current level does not map to a known variant.
pub fn ffmpeg_log_level() -> Option<FfmpegLogLevel> {
    ffmpeg_next::util::log::get_level().ok()
}
