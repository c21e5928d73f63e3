//! Seek to a position and save the frame there as a preview image.
//!
//! Usage:
//!   cargo run --example seek_preview -- <input_file> [seconds]

use std::{error::Error, time::Duration};

use playhead::VideoSession;

fn main() -> Result<(), Box<dyn Error>> {
    let input_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "input.mp4".to_string());
    let seconds: f64 = std::env::args()
        .nth(2)
        .map(|value| value.parse())
        .transpose()?
        .unwrap_or(1.0);

    let mut session = VideoSession::open(&input_path)?;

    let target = session.timestamp_for(Duration::from_secs_f64(seconds));
    println!("Seeking to {seconds}s (timestamp {target})...");
    session.seek(target)?;

    let mut pixels = vec![0u8; session.frame_buffer_size()];
    let pts = session.read_frame(&mut pixels)?;
    println!(
        "Decoded frame at pts {pts} ({:?} into the stream)",
        session.position_for(pts),
    );

    let rgb: Vec<u8> = pixels
        .chunks_exact(4)
        .flat_map(|pixel| [pixel[0], pixel[1], pixel[2]])
        .collect();
    let image = image::RgbImage::from_raw(session.width(), session.height(), rgb)
        .ok_or("Frame buffer has unexpected size")?;
    image.save("preview.png")?;
    println!("Saved preview.png");

    Ok(())
}
