use crate::border::clamp_index;
use crate::error::{Error, Result};

/// Number of color channels in every frame.
pub const CHANNELS: usize = 3;

/// Frame dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: usize,
    pub height: usize,
}

impl Dimensions {
    /// Total number of channel values (width * height * 3).
    pub fn sample_count(&self) -> usize {
        self.width * self.height * CHANNELS
    }
}

/// A decoded image in linear-light RGB.
///
/// Reads through [`Frame::pixel`] clamp to the nearest edge pixel; writes
/// through [`Frame::pixel_mut`] must be in range.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    dimensions: Dimensions,
    pixels: Vec<f64>,
}

impl Frame {
    /// Creates a black frame.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let dimensions = checked_dimensions(width, height)?;
        Ok(Self {
            dimensions,
            pixels: vec![0.0; dimensions.sample_count()],
        })
    }

    /// Wraps interleaved RGB values stored row by row.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<f64>) -> Result<Self> {
        let dimensions = checked_dimensions(width, height)?;
        if pixels.len() != dimensions.sample_count() {
            return Err(Error::PixelCountMismatch {
                expected: dimensions.sample_count(),
                actual: pixels.len(),
            });
        }
        Ok(Self { dimensions, pixels })
    }

    /// Dimensions must be non-null and match the buffer.
    pub(crate) fn from_parts(dimensions: Dimensions, pixels: Vec<f64>) -> Self {
        debug_assert_eq!(pixels.len(), dimensions.sample_count());
        Self { dimensions, pixels }
    }

    /// A frame where every pixel holds `rgb`.
    pub fn filled(width: usize, height: usize, rgb: [f64; 3]) -> Result<Self> {
        let mut frame = Self::new(width, height)?;
        for pixel in frame.pixels.chunks_exact_mut(CHANNELS) {
            pixel.copy_from_slice(&rgb);
        }
        Ok(frame)
    }

    /// Changes the dimensions, zero-filling new values.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<()> {
        self.dimensions = checked_dimensions(width, height)?;
        self.pixels.resize(self.dimensions.sample_count(), 0.0);
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    pub fn pixels(&self) -> &[f64] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [f64] {
        &mut self.pixels
    }

    /// Reads a pixel, clamping the coordinate to the frame border.
    #[inline]
    pub fn pixel(&self, x: isize, y: isize) -> [f64; 3] {
        let x = clamp_index(x, self.dimensions.width);
        let y = clamp_index(y, self.dimensions.height);
        self.at(x, y)
    }

    /// Reads an in-range pixel.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> [f64; 3] {
        let i = self.offset(x, y);
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Mutable access to an in-range pixel. Panics when out of range.
    #[inline]
    pub fn pixel_mut(&mut self, x: usize, y: usize) -> &mut [f64; 3] {
        let i = self.offset(x, y);
        (&mut self.pixels[i..i + CHANNELS])
            .try_into()
            .expect("slice of CHANNELS values")
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.dimensions.width && y < self.dimensions.height,
            "pixel ({x}, {y}) out of range for {}x{}",
            self.dimensions.width,
            self.dimensions.height
        );
        (y * self.dimensions.width + x) * CHANNELS
    }
}

fn checked_dimensions(width: usize, height: usize) -> Result<Dimensions> {
    if width == 0 || height == 0 {
        return Err(Error::EmptyDimensions { width, height });
    }
    Ok(Dimensions { width, height })
}
