//! Pixel-format normalization and the conversion filter graph.
//!
//! Decoded frames arrive in whatever pixel format the source codec
//! produces. Everything here exists to turn that into one fixed layout:
//! packed RGB with a padding byte, 4 bytes per pixel, tightly packed rows.

use ffmpeg_next::{Rational, filter, format::Pixel, frame::Video as VideoFrame};
use ffmpeg_sys_next::AVPixelFormat;

use crate::error::PlayheadError;

/// Bytes per pixel in the output layout (packed RGB plus a padding byte).
pub const OUTPUT_BYTES_PER_PIXEL: usize = 4;

/// Map the legacy full-range chroma formats to their standard counterparts.
///
/// The YUVJ formats are deprecated aliases whose memory layout is identical
/// to the corresponding YUV format; relabeling them avoids the filter
/// engine's deprecated-format warnings without changing any pixel values.
fn standard_format(format: Pixel) -> Pixel {
    match format {
        Pixel::YUVJ420P => Pixel::YUV420P,
        Pixel::YUVJ422P => Pixel::YUV422P,
        Pixel::YUVJ444P => Pixel::YUV444P,
        Pixel::YUVJ440P => Pixel::YUV440P,
        other => other,
    }
}

/// Relabel a decoded frame in place if it uses a legacy full-range format.
///
/// Must run before the frame's format is used to configure the graph's
/// source node, so the declared and actual formats agree.
pub(crate) fn normalize_frame_format(frame: &mut VideoFrame) {
    let normalized = standard_format(frame.format());
    if normalized != frame.format() {
        log::debug!(
            "Relabeling legacy pixel format {:?} as {:?}",
            frame.format(),
            normalized,
        );
        // SAFETY: the frame owns a valid AVFrame, and the normalized format
        // has the same plane count, bit depth, and subsampling as the
        // original, so the existing buffers stay valid under the new label.
        unsafe {
            (*frame.as_mut_ptr()).format = AVPixelFormat::from(normalized) as i32;
        }
    }
}

/// Build the two-ended conversion graph for a session.
///
/// The `buffer` source is configured with the decoded frame's exact
/// geometry, pixel format, time base, and aspect ratio; a `format` node
/// pins the `buffersink` output to `rgb0`. Source parameters are
/// session-invariant, so the graph is built once and reused for every
/// subsequent frame.
pub(crate) fn build_graph(
    frame: &VideoFrame,
    time_base: Rational,
) -> Result<filter::Graph, PlayheadError> {
    let mut graph = filter::Graph::new();

    let aspect = frame.aspect_ratio();
    let source_args = format!(
        "video_size={}x{}:pix_fmt={}:time_base={}/{}:pixel_aspect={}/{}",
        frame.width(),
        frame.height(),
        AVPixelFormat::from(frame.format()) as i32,
        time_base.numerator(),
        time_base.denominator(),
        aspect.numerator(),
        // An unknown aspect ratio can come through as 0/0; 0/1 is the
        // well-formed spelling of "unknown" that the filter accepts.
        aspect.denominator().max(1),
    );

    graph
        .add(
            &filter::find("buffer").ok_or_else(|| {
                PlayheadError::FilterInit("FFmpeg 'buffer' filter not found".to_string())
            })?,
            "in",
            &source_args,
        )
        .map_err(|e| PlayheadError::FilterInit(format!("Failed to create buffer source: {e}")))?;

    graph
        .add(
            &filter::find("buffersink").ok_or_else(|| {
                PlayheadError::FilterInit("FFmpeg 'buffersink' filter not found".to_string())
            })?,
            "out",
            "",
        )
        .map_err(|e| PlayheadError::FilterInit(format!("Failed to create buffer sink: {e}")))?;

    graph
        .output("in", 0)
        .map_err(|e| PlayheadError::FilterInit(format!("Filter graph output error: {e}")))?
        .input("out", 0)
        .map_err(|e| PlayheadError::FilterInit(format!("Filter graph input error: {e}")))?
        .parse("format=pix_fmts=rgb0")
        .map_err(|e| PlayheadError::FilterInit(format!("Filter graph parse error: {e}")))?;

    graph
        .validate()
        .map_err(|e| PlayheadError::FilterInit(format!("Filter graph validation: {e}")))?;

    Ok(graph)
}

/// Run one frame through the graph: push the decoded frame into the source
/// and pull the converted frame from the sink.
///
/// The push is by reference with keep-reference semantics, so `decoded`
/// (the session's reusable scratch frame) is not consumed.
pub(crate) fn run_graph(
    graph: &mut filter::Graph,
    decoded: &VideoFrame,
    converted: &mut VideoFrame,
) -> Result<(), PlayheadError> {
    graph
        .get("in")
        .ok_or_else(|| PlayheadError::FilterPush("Filter 'in' not found".to_string()))?
        .source()
        .add(decoded)
        .map_err(|e| PlayheadError::FilterPush(e.to_string()))?;

    graph
        .get("out")
        .ok_or_else(|| PlayheadError::FilterPull("Filter 'out' not found".to_string()))?
        .sink()
        .frame(converted)
        .map_err(|e| PlayheadError::FilterPull(e.to_string()))?;

    Ok(())
}

/// Copy the converted frame's single plane into the caller's buffer,
/// row-major with a stride of `width * 4` bytes and no padding between
/// rows.
///
/// The caller has already verified that `buffer` holds at least
/// `width * height * 4` bytes.
pub(crate) fn copy_plane(frame: &VideoFrame, width: u32, height: u32, buffer: &mut [u8]) {
    let row_bytes = width as usize * OUTPUT_BYTES_PER_PIXEL;
    let rows = height as usize;
    let stride = frame.stride(0);
    let data = frame.data(0);

    if stride == row_bytes {
        buffer[..row_bytes * rows].copy_from_slice(&data[..row_bytes * rows]);
    } else {
        for row in 0..rows {
            let source_start = row * stride;
            buffer[row * row_bytes..(row + 1) * row_bytes]
                .copy_from_slice(&data[source_start..source_start + row_bytes]);
        }
    }
}
