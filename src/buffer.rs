//! Decoded pixel buffers handed to the palette core

use crate::color::Rgb;
use crate::error::SourceError;
use image::RgbImage;

/// A rectangular grid of RGB pixels in row-major order
///
/// Always holds exactly `width * height` pixels; the only ways to build one
/// check that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Build a buffer from pixels, rejecting a length that does not match the dimensions
    pub fn new(width: u32, height: u32, pixels: Vec<Rgb>) -> Result<Self, SourceError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(SourceError::Unusable(format!(
                "pixel buffer holds {} pixels, expected {}x{} = {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a buffer from packed RGB bytes (3 bytes per pixel)
    pub fn from_raw(width: u32, height: u32, data: &[u8]) -> Result<Self, SourceError> {
        if data.len() % 3 != 0 {
            return Err(SourceError::Unusable(format!(
                "raw buffer length {} is not a multiple of 3",
                data.len()
            )));
        }

        let pixels = data
            .chunks_exact(3)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();

        Self::new(width, height, pixels)
    }

    /// A buffer with no pixels
    pub fn empty() -> Self {
        Self {
            width: 0,
            height: 0,
            pixels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

impl From<&RgbImage> for PixelBuffer {
    fn from(img: &RgbImage) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            pixels: img.pixels().map(|p| Rgb::from(*p)).collect(),
        }
    }
}
