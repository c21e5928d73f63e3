//! # playhead
//!
//! Minimal video playback sessions — decode frames in presentation order
//! into packed RGBA buffers and seek by timestamp, powered by FFmpeg via
//! the [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate.
//!
//! `playhead` is the decode half of a video player: it opens a media file,
//! finds the video stream, and hands a playback loop one converted frame at
//! a time. Every frame comes out in the same fixed layout — packed RGB with
//! a padding byte, 4 bytes per pixel, row-major, stride `width * 4` — ready
//! to upload to a texture, whatever the source encoding was.
//!
//! ## Quick Start
//!
//! ### Drive a playback loop
//!
//! ```no_run
//! use playhead::VideoSession;
//!
//! let mut session = VideoSession::open("clip.mp4").unwrap();
//! let mut pixels = vec![0u8; session.frame_buffer_size()];
//!
//! while let Ok(pts) = session.read_frame(&mut pixels) {
//!     // Present `pixels` at `pts` (in session.time_base() units).
//! }
//! session.close();
//! ```
//!
//! ### Jump to a timestamp
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use playhead::VideoSession;
//!
//! let mut session = VideoSession::open("clip.mp4").unwrap();
//! let mut pixels = vec![0u8; session.frame_buffer_size()];
//!
//! session.seek(session.timestamp_for(Duration::from_secs(30))).unwrap();
//! let pts = session.read_frame(&mut pixels).unwrap();
//! ```
//!
//! ### Iterate without managing a buffer
//!
//! ```no_run
//! use playhead::VideoSession;
//!
//! let mut session = VideoSession::open("clip.mp4").unwrap();
//! for frame in session.frames() {
//!     let frame = frame.unwrap();
//!     println!("frame at pts {}", frame.pts);
//! }
//! ```
//!
//! ## Design
//!
//! - **Pull model** — one frame per call, decoded on demand; nothing is
//!   buffered ahead.
//! - **Fixed output contract** — geometry and pixel layout are fixed at
//!   open time; one `width * height * 4` byte buffer serves the whole
//!   session.
//! - **Keyframe-aware seeking** — [`VideoSession::seek`] lands on the
//!   nearest keyframe at or before the target, so the next read never
//!   shows a half-decoded frame.
//! - **End of stream is not an error to retry** —
//!   [`PlayheadError::EndOfStream`] tells the loop to stop.
//! - **RAII lifecycle** — a session that goes out of scope releases the
//!   demuxer, decoder, and conversion graph; use-after-close cannot
//!   compile.
//!
//! Audio, subtitles, and multi-stream synchronization are out of scope.
//!
//! ## Requirements
//!
//! FFmpeg development libraries (libavformat, libavcodec, libavfilter,
//! libavutil) must be installed on your system.

mod convert;
pub mod error;
pub mod ffmpeg;
pub mod iter;
pub mod session;

pub use convert::OUTPUT_BYTES_PER_PIXEL;
pub use error::PlayheadError;
pub use ffmpeg::{FfmpegLogLevel, ffmpeg_log_level, set_ffmpeg_log_level};
pub use ffmpeg_next::Rational;
pub use iter::{DecodedFrame, Frames};
pub use session::VideoSession;
