use std::fmt::Write;

use crate::frame::Frame;
use crate::gamma;

/// Plain-text `P3` encoding with a maximum value of 255.
pub fn encode_ppm(frame: &Frame) -> Vec<u8> {
    let mut out = format!("P3\n{} {}\n255\n", frame.width(), frame.height());
    for pixel in frame.pixels().chunks_exact(3) {
        let _ = write!(
            out,
            "{} {} {} ",
            gamma::from_linear(pixel[0]),
            gamma::from_linear(pixel[1]),
            gamma::from_linear(pixel[2])
        );
    }
    out.into_bytes()
}
