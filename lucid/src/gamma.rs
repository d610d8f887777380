//! Fixed 2.2 gamma transfer between 8-bit encoded values and linear light.

pub const GAMMA: f64 = 2.2;

/// Decodes an 8-bit gamma-encoded value into linear light.
#[inline]
pub fn to_linear(value: u8) -> f64 {
    (value as f64 / 255.0).powf(GAMMA)
}

/// Encodes a linear-light value, rounding to the nearest 8-bit level.
#[inline]
pub fn from_linear(x: f64) -> u8 {
    let x = x.clamp(0.0, 1.0);
    // NaN survives clamp; the saturating cast maps it to 0.
    (x.powf(1.0 / GAMMA) * 255.0 + 0.5).clamp(0.0, 255.0) as u8
}
