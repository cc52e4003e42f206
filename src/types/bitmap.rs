//! Rectangular pixel buffer handed to the Digitizer.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel colour image, origin top-left, row-major.
///
/// The Digitizer never mutates a `Bitmap` it is given; every pipeline stage
/// that transforms pixels produces a new `Bitmap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bitmap {
    pub width: u32,
    pub height: u32,
    /// Packed RGB triples, length `width * height * 3`.
    pub pixels: Vec<u8>,
}

impl Bitmap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 3],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 3;
        self.pixels[idx] = rgb[0];
        self.pixels[idx + 1] = rgb[1];
        self.pixels[idx + 2] = rgb[2];
    }

    /// Decode a PNG/JPEG byte buffer. PDF rasterization is the caller's
    /// responsibility (out of scope); this only handles already-rasterized
    /// image bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, crate::digitizer::DigitizerError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| crate::digitizer::DigitizerError::UnreadableImage(e.to_string()))?
            .to_rgb8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }
}

/// A single-channel (grayscale) intensity buffer, same geometry as a source
/// `Bitmap`, produced by normalization and consumed by every downstream
/// digitizer stage.
#[derive(Debug, Clone, PartialEq)]
pub struct GrayImage {
    pub width: u32,
    pub height: u32,
    pub values: Vec<u8>,
}

impl GrayImage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0u8; (width as usize) * (height as usize)],
        }
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.values[(y as usize) * (self.width as usize) + (x as usize)]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        self.values[(y as usize) * (self.width as usize) + (x as usize)] = v;
    }

    /// A rectangular sub-region, row-major, bounds-clamped.
    pub fn crop(&self, x: u32, y: u32, w: u32, h: u32) -> GrayImage {
        let mut out = GrayImage::new(w, h);
        for row in 0..h {
            for col in 0..w {
                let sx = (x + col).min(self.width.saturating_sub(1));
                let sy = (y + row).min(self.height.saturating_sub(1));
                out.set(col, row, self.get(sx, sy));
            }
        }
        out
    }
}
