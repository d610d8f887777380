use crate::frame::Frame;
use crate::gamma;

const FILE_HEADER_SIZE: u32 = 14;
const INFO_HEADER_SIZE: u32 = 40;
const DATA_OFFSET: u32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
/// 75 dpi.
const PIXELS_PER_METER: u32 = 2953;

/// Uncompressed 24-bit BMP, rows bottom to top, pixels in B, G, R order.
///
/// Rows are not padded to four bytes.
pub fn encode_bmp(frame: &Frame) -> Vec<u8> {
    let width = frame.width();
    let height = frame.height();
    let image_size = (width * height * 3) as u32;

    let mut out = Vec::with_capacity((DATA_OFFSET + image_size) as usize);
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&(DATA_OFFSET + image_size).to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&DATA_OFFSET.to_le_bytes());

    out.extend_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&24u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&image_size.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&PIXELS_PER_METER.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    let row_len = width * 3;
    for row in frame.pixels().chunks_exact(row_len).rev() {
        for pixel in row.chunks_exact(3) {
            out.push(gamma::from_linear(pixel[2]));
            out.push(gamma::from_linear(pixel[1]));
            out.push(gamma::from_linear(pixel[0]));
        }
    }
    out
}
