//! Step 4: calibration-pulse detection in the leftmost/rightmost strips.

use crate::config::PipelineConfig;
use crate::types::{GrayImage, GridModel};

pub fn detect_pulse(
    gray: &GrayImage,
    grid: &GridModel,
    config: &PipelineConfig,
) -> (Option<f64>, Option<String>) {
    let strip_w = ((gray.width as f64) * config.digitizer.calibration_strip_fraction).round() as u32;
    if strip_w == 0 {
        return (None, Some("calibration strip too narrow; skipped".to_string()));
    }

    let left = gray.crop(0, 0, strip_w, gray.height);
    let right = gray.crop(gray.width.saturating_sub(strip_w), 0, strip_w, gray.height);

    // A 1.0 mV standard pulse's expected pixel height follows directly from
    // the amplitude scale and grid pitch.
    let expected_height_px = grid.amplitude_scale_mm_mv * grid.small_square_px;

    for strip in [&left, &right] {
        if let Some(measured_mv) = find_pulse_in_strip(strip, expected_height_px, config) {
            let warning = if (measured_mv - 1.0).abs() > config.digitizer.calibration_warn_deviation_mv {
                Some(format!(
                    "calibration pulse deviates from 1.0 mV standard: measured {measured_mv:.3} mV"
                ))
            } else {
                None
            };
            return (Some(measured_mv), warning);
        }
    }

    (
        None,
        Some("no calibration pulse detected; assuming 10 mm/mV standard".to_string()),
    )
}

/// Otsu-threshold the strip, find the tallest run of "ink" columns, and
/// accept it as the calibration pulse when its aspect ratio and height fall
/// within the configured tolerances.
fn find_pulse_in_strip(strip: &GrayImage, expected_height_px: f64, config: &PipelineConfig) -> Option<f64> {
    if strip.width == 0 || strip.height == 0 {
        return None;
    }
    let threshold = otsu(&strip.values);

    let mut best: Option<(u32, u32)> = None; // (width, height) of the best "ink" run
    let mut col = 0u32;
    while col < strip.width {
        let mut run_cols = 0u32;
        let mut max_run_height = 0u32;
        while col < strip.width {
            let mut run_height = 0u32;
            let mut in_run = false;
            let mut longest = 0u32;
            for y in 0..strip.height {
                if strip.get(col, y) < threshold {
                    run_height += 1;
                    in_run = true;
                } else if in_run {
                    longest = longest.max(run_height);
                    run_height = 0;
                    in_run = false;
                }
            }
            longest = longest.max(run_height);
            if longest == 0 {
                break;
            }
            max_run_height = max_run_height.max(longest);
            run_cols += 1;
            col += 1;
        }
        if run_cols > 0 {
            best = match best {
                Some((_, h)) if h >= max_run_height => best,
                _ => Some((run_cols, max_run_height)),
            };
        }
        col += 1;
    }

    let (width, height) = best?;
    if width == 0 || height == 0 {
        return None;
    }
    let aspect = width as f64 / height as f64;
    if aspect < config.digitizer.calibration_aspect_min || aspect > config.digitizer.calibration_aspect_max {
        return None;
    }
    let tolerance = config.digitizer.calibration_height_tolerance_fraction;
    if (height as f64 - expected_height_px).abs() > tolerance * expected_height_px {
        return None;
    }
    Some(height as f64 / expected_height_px)
}

fn otsu(values: &[u8]) -> u8 {
    let mut hist = [0usize; 256];
    for &v in values {
        hist[v as usize] += 1;
    }
    let total = values.len() as f64;
    let sum_all: f64 = hist.iter().enumerate().map(|(i, &c)| i as f64 * c as f64).sum();
    let mut sum_b = 0.0;
    let mut weight_b = 0.0;
    let mut best_t = 0u8;
    let mut best_var = 0.0;
    for (t, &count) in hist.iter().enumerate() {
        weight_b += count as f64;
        if weight_b == 0.0 {
            continue;
        }
        let weight_f = total - weight_b;
        if weight_f <= 0.0 {
            break;
        }
        sum_b += t as f64 * count as f64;
        let mean_b = sum_b / weight_b;
        let mean_f = (sum_all - sum_b) / weight_f;
        let var = weight_b * weight_f * (mean_b - mean_f).powi(2);
        if var > best_var {
            best_var = var;
            best_t = t as u8;
        }
    }
    best_t
}
