//! Decode the first frames of a video and save them as PNG files.
//!
//! Usage:
//!   cargo run --example dump_frames -- <input_file> [frame_count]

use std::error::Error;

use playhead::{PlayheadError, VideoSession};

fn main() -> Result<(), Box<dyn Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.mp4".to_string());
    let frame_count: usize = std::env::args()
        .nth(2)
        .map(|count| count.parse())
        .transpose()?
        .unwrap_or(5);

    println!("Opening {input_path}...");
    let mut session = VideoSession::open(&input_path)?;
    println!(
        "Video: {}x{}, stream {}, time base {}/{}",
        session.width(),
        session.height(),
        session.video_stream_index(),
        session.time_base().numerator(),
        session.time_base().denominator(),
    );
    if let Some(duration) = session.duration() {
        println!("Duration: {duration:?}");
    }

    let width = session.width();
    let height = session.height();
    let mut pixels = vec![0u8; session.frame_buffer_size()];

    for index in 0..frame_count {
        let pts = match session.read_frame(&mut pixels) {
            Ok(pts) => pts,
            Err(PlayheadError::EndOfStream) => {
                println!("End of stream after {index} frames");
                break;
            }
            Err(error) => return Err(error.into()),
        };

        // Drop the padding byte from each pixel for the PNG.
        let rgb: Vec<u8> = pixels
            .chunks_exact(4)
            .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
            .collect();
        let image = image::RgbImage::from_raw(width, height, rgb)
            .ok_or("Frame buffer has unexpected size")?;

        let filename = format!("frame_{index:03}_pts{pts}.png");
        image.save(&filename)?;
        println!("Saved {filename}");
    }

    session.close();
    Ok(())
}
