//! Lazy, pull-based iteration over decoded frames.
//!
//! [`Frames`] wraps a [`VideoSession`] and implements [`Iterator`]; each
//! call to [`next()`](Iterator::next) decodes exactly one frame into a
//! fresh buffer. End of stream ends iteration cleanly instead of surfacing
//! as an error item.
//!
//! # Example
//!
//! ```no_run
//! use playhead::VideoSession;
//!
//! let mut session = VideoSession::open("clip.mp4")?;
//! for frame in session.frames() {
//!     let frame = frame?;
//!     println!("pts {}: {} bytes", frame.pts, frame.pixels.len());
//! }
//! # Ok::<(), playhead::PlayheadError>(())
//! ```

use crate::{error::PlayheadError, session::VideoSession};

/// One decoded frame with an owned pixel buffer.
///
/// `pixels` holds packed 4-bytes-per-pixel RGB, row-major, stride
/// `width * 4` — the same layout
/// [`read_frame`](VideoSession::read_frame) writes.
#[derive(Debug, Clone)]
pub struct DecodedFrame {
    /// Presentation timestamp in the session's time base.
    pub pts: i64,
    /// Converted pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// A lazy iterator over the remaining frames of a session.
///
/// Borrows the session mutably, so nothing else can touch it while the
/// iterator is alive; dropping the iterator releases the borrow with the
/// session positioned after the last frame yielded. A decode error ends
/// iteration after being yielded once.
///
/// Created via [`VideoSession::frames`].
pub struct Frames<'a> {
    session: &'a mut VideoSession,
    finished: bool,
}

impl<'a> Frames<'a> {
    pub(crate) fn new(session: &'a mut VideoSession) -> Self {
        Self {
            session,
            finished: false,
        }
    }
}

impl Iterator for Frames<'_> {
    type Item = Result<DecodedFrame, PlayheadError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut pixels = vec![0u8; self.session.frame_buffer_size()];
        match self.session.read_frame(&mut pixels) {
            Ok(pts) => Some(Ok(DecodedFrame { pts, pixels })),
            Err(PlayheadError::EndOfStream) => {
                self.finished = true;
                None
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}
