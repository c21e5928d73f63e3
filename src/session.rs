//! Core [`VideoSession`] implementation.
//!
//! A `VideoSession` is an open media file positioned somewhere in its video
//! stream. It owns the demuxer, the decoder, the reusable decode scratch
//! objects, and the lazily-built pixel conversion graph, and exposes the
//! four operations a playback loop needs: open, read the next frame, seek,
//! and close.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::Path,
    time::Duration,
};

use ffmpeg_next::{
    Error as FfmpegError, Packet, Rational,
    codec::context::Context as CodecContext,
    decoder::Video as VideoDecoder,
    error::EAGAIN,
    filter::Graph as FilterGraph,
    format::context::Input,
    frame::Video as VideoFrame,
    media::Type,
};

use crate::{convert, error::PlayheadError, iter::Frames};

/// An open video file, positioned at a read cursor in its video stream.
///
/// Created via [`VideoSession::open`]. Each call to
/// [`read_frame`](VideoSession::read_frame) decodes the next frame in
/// presentation order and writes it into a caller-supplied buffer as packed
/// 4-bytes-per-pixel RGB; [`seek`](VideoSession::seek) jumps the cursor to
/// a timestamp. All operations take `&mut self`, so a session cannot be
/// used from two threads at once; independent sessions share nothing and
/// may run concurrently.
///
/// # Example
///
/// ```no_run
/// use playhead::VideoSession;
///
/// let mut session = VideoSession::open("clip.mp4")?;
/// let mut pixels = vec![0u8; session.frame_buffer_size()];
///
/// while let Ok(pts) = session.read_frame(&mut pixels) {
///     // Upload `pixels` to a texture and present it at `pts`
///     // (in units of session.time_base()).
/// }
/// # Ok::<(), playhead::PlayheadError>(())
/// ```
pub struct VideoSession {
    /// Source and output width in pixels; fixed at open time.
    width: u32,
    /// Source and output height in pixels; fixed at open time.
    height: u32,
    /// Unit in which presentation timestamps are expressed.
    time_base: Rational,
    /// Index of the selected video stream within the container.
    stream_index: usize,
    /// A seek's priming decode left its frame in `decoded`; the next
    /// read delivers it instead of pulling a new one.
    pending: bool,
    /// Conversion graph, built on the first decoded frame and reused for
    /// the rest of the session (source parameters never change).
    graph: Option<FilterGraph>,
    /// The opened demuxer context.
    input: Input,
    /// Reusable destination for decoded frames.
    decoded: VideoFrame,
    /// Reusable demuxed-packet scratch.
    packet: Packet,
    /// Reusable destination for converted frames.
    converted: VideoFrame,
    /// The opened video decoder.
    decoder: VideoDecoder,
}

impl Debug for VideoSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSession")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("time_base", &self.time_base)
            .field("stream_index", &self.stream_index)
            .finish_non_exhaustive()
    }
}

impl VideoSession {
    /// Open a media file and prepare its video stream for decoding.
    ///
    /// Initializes FFmpeg (idempotent), opens the container with format
    /// auto-detection, and selects the first stream in container order
    /// whose media type is video and whose codec has an available decoder;
    /// streams without a decoder are skipped rather than treated as
    /// errors. The selected stream's width, height, and time base are
    /// fixed for the session's lifetime.
    ///
    /// # Errors
    ///
    /// - [`PlayheadError::ContainerOpen`] if the file is missing or not a
    ///   recognizable container.
    /// - [`PlayheadError::NoVideoStream`] if no stream qualifies.
    /// - [`PlayheadError::DecoderInit`] / [`PlayheadError::DecoderOpen`]
    ///   if the decoder cannot be configured from the stream parameters.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use playhead::VideoSession;
    ///
    /// let session = VideoSession::open("clip.mp4")?;
    /// println!("{}x{}", session.width(), session.height());
    /// # Ok::<(), playhead::PlayheadError>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PlayheadError> {
        let path = path.as_ref();

        ffmpeg_next::init().map_err(|error| PlayheadError::ContainerOpen {
            path: path.to_path_buf(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input = ffmpeg_next::format::input(&path).map_err(|error| {
            PlayheadError::ContainerOpen {
                path: path.to_path_buf(),
                reason: error.to_string(),
            }
        })?;

        // First stream in container order that is video and decodable.
        let mut selected = None;
        for stream in input.streams() {
            let parameters = stream.parameters();
            if ffmpeg_next::decoder::find(parameters.id()).is_none() {
                continue;
            }
            if parameters.medium() == Type::Video {
                selected = Some((stream.index(), stream.time_base(), parameters));
                break;
            }
        }
        let (stream_index, time_base, parameters) =
            selected.ok_or(PlayheadError::NoVideoStream)?;

        let decoder_context = CodecContext::from_parameters(parameters)
            .map_err(|error| PlayheadError::DecoderInit(error.to_string()))?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| PlayheadError::DecoderOpen(error.to_string()))?;

        let width = decoder.width();
        let height = decoder.height();

        log::debug!(
            "Opened {} ({width}x{height}, stream {stream_index}, time base {}/{})",
            path.display(),
            time_base.numerator(),
            time_base.denominator(),
        );

        Ok(Self {
            width,
            height,
            time_base,
            stream_index,
            pending: false,
            graph: None,
            input,
            decoded: VideoFrame::empty(),
            packet: Packet::empty(),
            converted: VideoFrame::empty(),
            decoder,
        })
    }

    /// Width of the video stream (and of every output frame) in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the video stream (and of every output frame) in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The unit in which this session's timestamps are expressed.
    ///
    /// Every timestamp returned by [`read_frame`](VideoSession::read_frame)
    /// and accepted by [`seek`](VideoSession::seek) counts ticks of this
    /// rational number of seconds.
    pub fn time_base(&self) -> Rational {
        self.time_base
    }

    /// Index of the selected video stream within the container.
    pub fn video_stream_index(&self) -> usize {
        self.stream_index
    }

    /// Minimum size in bytes of a [`read_frame`](VideoSession::read_frame)
    /// output buffer: `width * height * 4`.
    pub fn frame_buffer_size(&self) -> usize {
        self.width as usize * self.height as usize * convert::OUTPUT_BYTES_PER_PIXEL
    }

    /// Container-reported duration, if the container knows it.
    pub fn duration(&self) -> Option<Duration> {
        let microseconds = self.input.duration();
        if microseconds > 0 {
            Some(Duration::from_micros(microseconds as u64))
        } else {
            None
        }
    }

    /// Convert a wall-clock position to a timestamp in this session's
    /// time base, suitable for [`seek`](VideoSession::seek).
    pub fn timestamp_for(&self, position: Duration) -> i64 {
        let seconds = position.as_secs_f64();
        let numerator = self.time_base.numerator().max(1) as f64;
        let denominator = self.time_base.denominator() as f64;
        (seconds * denominator / numerator) as i64
    }

    /// Convert a timestamp in this session's time base to a wall-clock
    /// position.
    pub fn position_for(&self, timestamp: i64) -> Duration {
        let numerator = self.time_base.numerator() as f64;
        let denominator = self.time_base.denominator().max(1) as f64;
        Duration::from_secs_f64((timestamp as f64 * numerator / denominator).max(0.0))
    }

    /// Decode the next frame of the video stream into `buffer` and return
    /// its presentation timestamp (in [`time_base`](VideoSession::time_base)
    /// units).
    ///
    /// The frame is written as packed RGB with a padding byte: 4 bytes per
    /// pixel, row-major, stride `width * 4`, no padding between rows.
    /// `buffer` must hold at least
    /// [`frame_buffer_size`](VideoSession::frame_buffer_size) bytes and is
    /// only fully written on success; on error its contents are
    /// unspecified.
    ///
    /// Packets belonging to other streams (audio, subtitles) are skipped
    /// transparently, as are packets the decoder absorbs without emitting a
    /// frame.
    ///
    /// # Errors
    ///
    /// - [`PlayheadError::EndOfStream`] when no packets remain — the
    ///   normal end of iteration.
    /// - [`PlayheadError::BufferTooSmall`] if `buffer` cannot hold a frame.
    /// - [`PlayheadError::DecodeSubmit`] / [`PlayheadError::DecodeReceive`]
    ///   on decoder failures.
    /// - [`PlayheadError::FilterInit`] / [`PlayheadError::FilterPush`] /
    ///   [`PlayheadError::FilterPull`] on conversion failures.
    pub fn read_frame(&mut self, buffer: &mut [u8]) -> Result<i64, PlayheadError> {
        let required = self.frame_buffer_size();
        if buffer.len() < required {
            return Err(PlayheadError::BufferTooSmall {
                required,
                provided: buffer.len(),
            });
        }

        // A seek leaves its priming frame in the scratch slot; deliver it
        // before pulling anything new from the container.
        if self.pending {
            self.pending = false;
        } else {
            self.decode_next()?;
        }

        let pts = self.decoded.pts().unwrap_or(0);

        convert::normalize_frame_format(&mut self.decoded);

        let graph = match &mut self.graph {
            Some(graph) => graph,
            slot @ None => slot.insert(convert::build_graph(&self.decoded, self.time_base)?),
        };
        convert::run_graph(graph, &self.decoded, &mut self.converted)?;

        convert::copy_plane(&self.converted, self.width, self.height, buffer);

        Ok(pts)
    }

    /// Jump the read cursor so the next
    /// [`read_frame`](VideoSession::read_frame) yields the latest decodable
    /// frame at or before `timestamp` (in
    /// [`time_base`](VideoSession::time_base) units).
    ///
    /// The container repositions to the nearest keyframe at or before the
    /// target; with sparse keyframes the delivered frame is that keyframe,
    /// with an all-keyframe stream it is the target frame itself. Decoder
    /// state buffered from before the jump is flushed, and one frame is
    /// decoded immediately to prime the decoder at the new position.
    ///
    /// Targets before the first frame or past the last are left to the
    /// container's own clamping; seeking past the end typically surfaces
    /// as [`PlayheadError::Seek`] here or
    /// [`PlayheadError::EndOfStream`] from the priming decode.
    ///
    /// # Errors
    ///
    /// - [`PlayheadError::Seek`] if the container rejects the reposition.
    /// - The same decode errors as
    ///   [`read_frame`](VideoSession::read_frame), from the priming decode.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::time::Duration;
    ///
    /// use playhead::VideoSession;
    ///
    /// let mut session = VideoSession::open("clip.mp4")?;
    /// let mut pixels = vec![0u8; session.frame_buffer_size()];
    ///
    /// let target = session.timestamp_for(Duration::from_secs(30));
    /// session.seek(target)?;
    /// let pts = session.read_frame(&mut pixels)?;
    /// assert!(pts <= target);
    /// # Ok::<(), playhead::PlayheadError>(())
    /// ```
    pub fn seek(&mut self, timestamp: i64) -> Result<(), PlayheadError> {
        log::debug!(
            "Seeking stream {} to timestamp {timestamp}",
            self.stream_index,
        );

        // Land on the latest keyframe at or before the target; decoding
        // forward from anywhere else produces garbage until the next
        // keyframe.
        // SAFETY: the format context is valid for the session's lifetime
        // and av_seek_frame does not retain the pointer.
        let status = unsafe {
            ffmpeg_sys_next::av_seek_frame(
                self.input.as_mut_ptr(),
                self.stream_index as i32,
                timestamp,
                ffmpeg_sys_next::AVSEEK_FLAG_BACKWARD,
            )
        };
        if status < 0 {
            return Err(PlayheadError::Seek {
                timestamp,
                reason: FfmpegError::from(status).to_string(),
            });
        }

        // Drop frames buffered from before the reposition, then decode the
        // frame at the new position so the decoder is primed. The frame
        // stays in the scratch slot for the next read to deliver.
        self.decoder.flush();
        self.pending = false;
        self.decode_next()?;
        self.pending = true;

        Ok(())
    }

    /// Iterate over the remaining frames of the stream.
    ///
    /// Each item is a freshly-allocated pixel buffer with its timestamp;
    /// iteration ends cleanly at end of stream. For allocation-free reads,
    /// call [`read_frame`](VideoSession::read_frame) with a reused buffer
    /// instead.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use playhead::VideoSession;
    ///
    /// let mut session = VideoSession::open("clip.mp4")?;
    /// for frame in session.frames() {
    ///     let frame = frame?;
    ///     println!("frame at pts {}", frame.pts);
    /// }
    /// # Ok::<(), playhead::PlayheadError>(())
    /// ```
    pub fn frames(&mut self) -> Frames<'_> {
        Frames::new(self)
    }

    /// End the session and release everything it owns.
    ///
    /// Consuming `self` makes double-close and use-after-close compile-time
    /// errors. Dropping a session without calling `close` releases the
    /// same resources; this method only makes the end of the session
    /// explicit at the call site.
    pub fn close(self) {
        log::debug!("Closing video session (stream {})", self.stream_index);
    }

    /// Pull packets for the selected stream and decode until one frame
    /// lands in the scratch slot.
    ///
    /// Packets for other streams are discarded, as are submissions the
    /// decoder absorbs without emitting a frame ("needs more input").
    fn decode_next(&mut self) -> Result<(), PlayheadError> {
        loop {
            match self.packet.read(&mut self.input) {
                Ok(()) => {}
                Err(FfmpegError::Eof) => return Err(PlayheadError::EndOfStream),
                // Transient demuxer error; try the next packet.
                Err(_) => continue,
            }

            if self.packet.stream() != self.stream_index {
                continue;
            }

            self.decoder
                .send_packet(&self.packet)
                .map_err(|error| PlayheadError::DecodeSubmit(error.to_string()))?;

            match self.decoder.receive_frame(&mut self.decoded) {
                Ok(()) => return Ok(()),
                Err(FfmpegError::Other { errno }) if errno == EAGAIN => continue,
                Err(FfmpegError::Eof) => continue,
                Err(error) => return Err(PlayheadError::DecodeReceive(error.to_string())),
            }
        }
    }
}
