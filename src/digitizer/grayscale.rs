//! Step 2: grayscale conversion + full-range intensity normalization.

use crate::types::{Bitmap, GrayImage};

/// ITU-R BT.601 luma weights, the conventional grayscale conversion.
fn luma(rgb: [u8; 3]) -> f64 {
    0.299 * rgb[0] as f64 + 0.587 * rgb[1] as f64 + 0.114 * rgb[2] as f64
}

pub fn to_normalized_gray(bitmap: &Bitmap) -> GrayImage {
    let mut raw = vec![0.0f64; (bitmap.width as usize) * (bitmap.height as usize)];
    for y in 0..bitmap.height {
        for x in 0..bitmap.width {
            raw[(y as usize) * (bitmap.width as usize) + (x as usize)] = luma(bitmap.pixel(x, y));
        }
    }
    let (min, max) = raw.iter().fold((f64::MAX, f64::MIN), |(mn, mx), &v| {
        (mn.min(v), mx.max(v))
    });
    let range = (max - min).max(1e-9);

    let mut out = GrayImage::new(bitmap.width, bitmap.height);
    for (i, v) in raw.into_iter().enumerate() {
        let normalized = ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8;
        out.values[i] = normalized;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_to_full_range() {
        let mut bitmap = Bitmap::new(2, 2);
        bitmap.set_pixel(0, 0, [0, 0, 0]);
        bitmap.set_pixel(1, 0, [100, 100, 100]);
        bitmap.set_pixel(0, 1, [150, 150, 150]);
        bitmap.set_pixel(1, 1, [255, 255, 255]);
        let gray = to_normalized_gray(&bitmap);
        assert_eq!(gray.get(0, 0), 0);
        assert_eq!(gray.get(1, 1), 255);
    }
}
