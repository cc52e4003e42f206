//! Step 6: per-lead grid removal, with the strict 4-stage fallback chain
//! from spec §4.1: each stage is accepted only if enough ink survives.

use num_complex::Complex64;
use rustfft::FftPlanner;

use crate::config::PipelineConfig;
use crate::types::{Bitmap, GrayImage};

pub fn remove_grid(
    color_crop: &Bitmap,
    gray_crop: &GrayImage,
    small_square_px: f64,
    config: &PipelineConfig,
) -> (GrayImage, Option<String>) {
    if gray_crop.width == 0 || gray_crop.height == 0 {
        return (gray_crop.clone(), Some("empty lead crop".to_string()));
    }

    if let Some(cleaned) = color_aware(color_crop, gray_crop, config) {
        if ink_survives(&cleaned, config) {
            return (cleaned, None);
        }
    }

    let morph = morphological(gray_crop, small_square_px, config);
    if ink_survives(&morph, config) {
        return (morph, Some("fell back to morphological grid removal".to_string()));
    }

    let freq = frequency_notch(&morph, small_square_px, config);
    if ink_survives(&freq, config) {
        return (freq, Some("fell back to frequency-domain grid removal".to_string()));
    }

    (
        gray_crop.clone(),
        Some("all grid-removal stages failed; using raw crop".to_string()),
    )
}

fn ink_survives(img: &GrayImage, config: &PipelineConfig) -> bool {
    let ink_threshold = 128u8;
    let ink_count = img.values.iter().filter(|&&v| v < ink_threshold).count();
    let fraction = ink_count as f64 / img.values.len().max(1) as f64;
    fraction >= config.digitizer.grid_removal_ink_survival_fraction
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum GridColor {
    Red,
    Green,
    Blue,
    Black,
}

/// Stage a: HSV color-range grid detection and masked whitening.
fn color_aware(color_crop: &Bitmap, gray_crop: &GrayImage, config: &PipelineConfig) -> Option<GrayImage> {
    let total = (color_crop.width as usize) * (color_crop.height as usize);
    if total == 0 {
        return None;
    }
    let mut counts = [0usize; 3]; // red, green, blue
    let mut masks = [vec![false; total], vec![false; total], vec![false; total]];

    for y in 0..color_crop.height {
        for x in 0..color_crop.width {
            let rgb = color_crop.pixel(x, y);
            let (h, s, v) = rgb_to_hsv(rgb);
            let idx = (y as usize) * (color_crop.width as usize) + (x as usize);
            if s >= 50.0 && v >= 50.0 {
                if (0.0..=10.0).contains(&h) || (170.0..=180.0).contains(&h) {
                    counts[0] += 1;
                    masks[0][idx] = true;
                } else if (35.0..=85.0).contains(&h) {
                    counts[1] += 1;
                    masks[1][idx] = true;
                } else if (100.0..=130.0).contains(&h) {
                    counts[2] += 1;
                    masks[2][idx] = true;
                }
            }
        }
    }

    let dominance_threshold = (total as f64 * config.digitizer.grid_removal_color_dominance_fraction) as usize;
    let (color, mask) = if counts[0] >= dominance_threshold && counts[0] >= counts[1] && counts[0] >= counts[2] {
        (GridColor::Red, &masks[0])
    } else if counts[1] >= dominance_threshold && counts[1] >= counts[2] {
        (GridColor::Green, &masks[1])
    } else if counts[2] >= dominance_threshold {
        (GridColor::Blue, &masks[2])
    } else {
        (GridColor::Black, &masks[0])
    };

    if color == GridColor::Black {
        return None;
    }

    let dilated = dilate_mask(mask, color_crop.width, color_crop.height, 2);
    let mut cleaned = gray_crop.clone();
    for (idx, &masked) in dilated.iter().enumerate() {
        if masked {
            cleaned.values[idx] = 255;
        }
    }
    Some(median_blur3(&cleaned))
}

fn rgb_to_hsv(rgb: [u8; 3]) -> (f64, f64, f64) {
    let (r, g, b) = (rgb[0] as f64 / 255.0, rgb[1] as f64 / 255.0, rgb[2] as f64 / 255.0);
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let h = if delta < 1e-9 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta) % 6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let h = if h < 0.0 { h + 360.0 } else { h } / 2.0; // OpenCV-style H in [0,180]
    let s = if max < 1e-9 { 0.0 } else { delta / max } * 255.0;
    let v = max * 255.0;
    (h, s, v)
}

fn dilate_mask(mask: &[bool], width: u32, height: u32, radius: i64) -> Vec<bool> {
    let mut out = vec![false; mask.len()];
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let idx = (y * width as i64 + x) as usize;
            if mask[idx] {
                for dy in -radius..=radius {
                    for dx in -radius..=radius {
                        let nx = x + dx;
                        let ny = y + dy;
                        if nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64 {
                            out[(ny * width as i64 + nx) as usize] = true;
                        }
                    }
                }
            }
        }
    }
    out
}

fn median_blur3(img: &GrayImage) -> GrayImage {
    let mut out = img.clone();
    for y in 0..img.height {
        for x in 0..img.width {
            let mut window = [0u8; 9];
            let mut n = 0;
            for dy in -1i64..=1 {
                for dx in -1i64..=1 {
                    let nx = x as i64 + dx;
                    let ny = y as i64 + dy;
                    if nx >= 0 && ny >= 0 && nx < img.width as i64 && ny < img.height as i64 {
                        window[n] = img.get(nx as u32, ny as u32);
                        n += 1;
                    }
                }
            }
            let mut slice = window[..n].to_vec();
            slice.sort_unstable();
            out.set(x, y, slice[slice.len() / 2]);
        }
    }
    out
}

/// Stage b: morphological opening with axis-aligned structuring elements.
fn morphological(gray: &GrayImage, small_square_px: f64, config: &PipelineConfig) -> GrayImage {
    let inverted = invert(gray);
    let kernel_size = ((small_square_px * config.digitizer.grid_removal_morph_kernel_scale)
        .max(config.digitizer.grid_removal_morph_kernel_min_px)) as u32;

    let horizontal = open(&inverted, kernel_size.max(1), 1);
    let vertical = open(&inverted, 1, kernel_size.max(1));

    let mut grid_mask = GrayImage::new(gray.width, gray.height);
    for i in 0..grid_mask.values.len() {
        grid_mask.values[i] = horizontal.values[i].saturating_add(vertical.values[i]);
    }
    let grid_mask = dilate_gray(&grid_mask, 1);

    let mut cleaned = inverted.clone();
    for i in 0..cleaned.values.len() {
        cleaned.values[i] = cleaned.values[i].saturating_sub(grid_mask.values[i]);
    }
    invert(&cleaned)
}

fn invert(img: &GrayImage) -> GrayImage {
    let mut out = img.clone();
    for v in out.values.iter_mut() {
        *v = 255 - *v;
    }
    out
}

/// Morphological opening (erosion followed by dilation) with a `kw x kh`
/// rectangular structuring element.
fn open(img: &GrayImage, kw: u32, kh: u32) -> GrayImage {
    let eroded = erode_gray(img, kw, kh);
    dilate_rect(&eroded, kw, kh)
}

fn erode_gray(img: &GrayImage, kw: u32, kh: u32) -> GrayImage {
    let mut out = img.clone();
    let (hw, hh) = (kw as i64 / 2, kh as i64 / 2);
    for y in 0..img.height as i64 {
        for x in 0..img.width as i64 {
            let mut min_v = 255u8;
            for dy in -hh..=hh {
                for dx in -hw..=hw {
                    let nx = (x + dx).clamp(0, img.width as i64 - 1);
                    let ny = (y + dy).clamp(0, img.height as i64 - 1);
                    min_v = min_v.min(img.get(nx as u32, ny as u32));
                }
            }
            out.set(x as u32, y as u32, min_v);
        }
    }
    out
}

fn dilate_rect(img: &GrayImage, kw: u32, kh: u32) -> GrayImage {
    let mut out = img.clone();
    let (hw, hh) = (kw as i64 / 2, kh as i64 / 2);
    for y in 0..img.height as i64 {
        for x in 0..img.width as i64 {
            let mut max_v = 0u8;
            for dy in -hh..=hh {
                for dx in -hw..=hw {
                    let nx = (x + dx).clamp(0, img.width as i64 - 1);
                    let ny = (y + dy).clamp(0, img.height as i64 - 1);
                    max_v = max_v.max(img.get(nx as u32, ny as u32));
                }
            }
            out.set(x as u32, y as u32, max_v);
        }
    }
    out
}

fn dilate_gray(img: &GrayImage, radius: u32) -> GrayImage {
    dilate_rect(img, radius * 2 + 1, radius * 2 + 1)
}

/// Stage c: frequency-domain notch filtering of the grid fundamental and
/// its first few harmonics.
fn frequency_notch(gray: &GrayImage, small_square_px: f64, config: &PipelineConfig) -> GrayImage {
    if small_square_px <= 0.0 || gray.width == 0 || gray.height == 0 {
        return gray.clone();
    }
    let rows = gray.height as usize;
    let cols = gray.width as usize;

    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft_forward(cols);
    let row_ifft = planner.plan_fft_inverse(cols);
    let col_fft = planner.plan_fft_forward(rows);
    let col_ifft = planner.plan_fft_inverse(rows);

    let mut data: Vec<Complex64> = gray.values.iter().map(|&v| Complex64::new(v as f64, 0.0)).collect();

    // Row-wise FFT.
    for r in 0..rows {
        let mut row = data[r * cols..(r + 1) * cols].to_vec();
        row_fft.process(&mut row);
        data[r * cols..(r + 1) * cols].copy_from_slice(&row);
    }
    // Column-wise FFT (transpose-free strided pass).
    let mut col_buf = vec![Complex64::new(0.0, 0.0); rows];
    for c in 0..cols {
        for r in 0..rows {
            col_buf[r] = data[r * cols + c];
        }
        col_fft.process(&mut col_buf);
        for r in 0..rows {
            data[r * cols + c] = col_buf[r];
        }
    }

    let freq_h = cols as f64 / small_square_px;
    let freq_v = rows as f64 / small_square_px;
    let notch = config.digitizer.grid_removal_notch_halfwidth_bins as i64;
    for harmonic in 1..=config.digitizer.grid_removal_notch_harmonics as i64 {
        let fh = (harmonic as f64 * freq_h).round() as i64;
        let fv = (harmonic as f64 * freq_v).round() as i64;
        zero_band_cols(&mut data, cols, rows, fh, notch);
        zero_band_rows(&mut data, cols, rows, fv, notch);
    }

    // Inverse column FFT.
    for c in 0..cols {
        for r in 0..rows {
            col_buf[r] = data[r * cols + c];
        }
        col_ifft.process(&mut col_buf);
        for r in 0..rows {
            data[r * cols + c] = col_buf[r] / rows as f64;
        }
    }
    // Inverse row FFT.
    for r in 0..rows {
        let mut row = data[r * cols..(r + 1) * cols].to_vec();
        row_ifft.process(&mut row);
        for v in row.iter_mut() {
            *v /= cols as f64;
        }
        data[r * cols..(r + 1) * cols].copy_from_slice(&row);
    }

    let (min, max) = data.iter().fold((f64::MAX, f64::MIN), |(mn, mx), c| {
        (mn.min(c.re), mx.max(c.re))
    });
    let range = (max - min).max(1e-9);
    let mut out = GrayImage::new(gray.width, gray.height);
    for (i, c) in data.iter().enumerate() {
        out.values[i] = (((c.re - min) / range) * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn zero_band_cols(data: &mut [Complex64], cols: usize, rows: usize, center: i64, halfwidth: i64) {
    for r in 0..rows {
        for offset in -halfwidth..=halfwidth {
            let c = center + offset;
            if c >= 0 && (c as usize) < cols {
                data[r * cols + c as usize] = Complex64::new(0.0, 0.0);
            }
            let c2 = -center + offset;
            if c2 >= 0 && (c2 as usize) < cols {
                data[r * cols + c2 as usize] = Complex64::new(0.0, 0.0);
            }
        }
    }
}

fn zero_band_rows(data: &mut [Complex64], cols: usize, rows: usize, center: i64, halfwidth: i64) {
    for c in 0..cols {
        for offset in -halfwidth..=halfwidth {
            let r = center + offset;
            if r >= 0 && (r as usize) < rows {
                data[r as usize * cols + c] = Complex64::new(0.0, 0.0);
            }
            let r2 = -center + offset;
            if r2 >= 0 && (r2 as usize) < rows {
                data[r2 as usize * cols + c] = Complex64::new(0.0, 0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_crop_fallback_preserves_dimensions() {
        let config = PipelineConfig::default();
        let color = Bitmap::new(30, 30);
        let gray = GrayImage::new(30, 30);
        let (cleaned, warning) = remove_grid(&color, &gray, 10.0, &config);
        assert_eq!(cleaned.width, 30);
        assert_eq!(cleaned.height, 30);
        assert!(warning.is_some());
    }
}
