//! Step 5: lead segmentation — grid-based (default) with an adaptive
//! projection-profile fallback, plus rhythm-strip detection.

use crate::config::PipelineConfig;
use crate::types::{GrayImage, LeadLabel, LeadRegion};

pub fn segment(gray: &GrayImage, config: &PipelineConfig) -> Vec<LeadRegion> {
    let mut regions = grid_based(gray, config);
    if regions.is_empty() {
        regions = adaptive(gray, config);
    }
    if let Some(strip) = detect_rhythm_strip(gray, &regions, config) {
        regions.push(strip);
    }
    regions
}

fn grid_based(gray: &GrayImage, config: &PipelineConfig) -> Vec<LeadRegion> {
    let margin_tb = (gray.height as f64 * config.digitizer.segmentation_margin_top_bottom_fraction) as u32;
    let margin_lr = (gray.width as f64 * config.digitizer.segmentation_margin_left_right_fraction) as u32;

    let usable_w = gray.width.saturating_sub(margin_lr * 2);
    let usable_h = gray.height.saturating_sub(margin_tb * 2);
    if usable_w == 0 || usable_h == 0 {
        return Vec::new();
    }

    let layout = LeadLabel::grid_3x4();
    let rows = layout.len() as u32;
    let cols = layout[0].len() as u32;
    let cell_w = usable_w / cols;
    let cell_h = usable_h / rows;
    if cell_w == 0 || cell_h == 0 {
        return Vec::new();
    }

    let mut regions = Vec::with_capacity((rows * cols) as usize);
    for (r, row) in layout.iter().enumerate() {
        for (c, label) in row.iter().enumerate() {
            regions.push(LeadRegion {
                label: *label,
                x: margin_lr + c as u32 * cell_w,
                y: margin_tb + r as u32 * cell_h,
                width: cell_w,
                height: cell_h,
            });
        }
    }
    regions
}

/// Smoothed horizontal/vertical intensity-projection profiles, thresholded
/// at `mean + k*stddev`; runs above threshold become separator midpoints.
/// Accepted only when pruning leaves exactly 3 or 6 row boundaries and 4 or
/// 2 column boundaries.
fn adaptive(gray: &GrayImage, config: &PipelineConfig) -> Vec<LeadRegion> {
    let row_profile = projection_profile(gray, true);
    let col_profile = projection_profile(gray, false);

    let row_boundaries = separator_midpoints(&row_profile, config);
    let col_boundaries = separator_midpoints(&col_profile, config);

    let row_ok = row_boundaries.len() == 2 || row_boundaries.len() == 5;
    let col_ok = col_boundaries.len() == 3 || col_boundaries.len() == 1;
    if !row_ok || !col_ok {
        return Vec::new();
    }

    let mut row_edges = vec![0u32];
    row_edges.extend(row_boundaries.iter().copied());
    row_edges.push(gray.height);
    let mut col_edges = vec![0u32];
    col_edges.extend(col_boundaries.iter().copied());
    col_edges.push(gray.width);

    let n_rows = row_edges.len() - 1;
    let n_cols = col_edges.len() - 1;
    let labels: Vec<Vec<LeadLabel>> = if n_rows == 3 && n_cols == 4 {
        LeadLabel::grid_3x4().iter().map(|r| r.to_vec()).collect()
    } else if n_rows == 6 && n_cols == 2 {
        LeadLabel::grid_6x2().iter().map(|r| r.to_vec()).collect()
    } else {
        return Vec::new();
    };

    let mut regions = Vec::new();
    for r in 0..n_rows {
        for c in 0..n_cols {
            regions.push(LeadRegion {
                label: labels[r][c],
                x: col_edges[c],
                y: row_edges[r],
                width: col_edges[c + 1].saturating_sub(col_edges[c]),
                height: row_edges[r + 1].saturating_sub(row_edges[r]),
            });
        }
    }
    regions
}

fn projection_profile(gray: &GrayImage, horizontal: bool) -> Vec<f64> {
    if horizontal {
        (0..gray.height)
            .map(|y| (0..gray.width).map(|x| 255 - gray.get(x, y) as u32).sum::<u32>() as f64)
            .collect()
    } else {
        (0..gray.width)
            .map(|x| (0..gray.height).map(|y| 255 - gray.get(x, y) as u32).sum::<u32>() as f64)
            .collect()
    }
}

fn separator_midpoints(profile: &[f64], config: &PipelineConfig) -> Vec<u32> {
    if profile.is_empty() {
        return Vec::new();
    }
    let mean = profile.iter().sum::<f64>() / profile.len() as f64;
    let variance = profile.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / profile.len() as f64;
    let stddev = variance.sqrt();
    let threshold = mean + config.digitizer.adaptive_projection_threshold_stddev * stddev;

    let mut midpoints = Vec::new();
    let mut run_start: Option<usize> = None;
    for (i, &v) in profile.iter().enumerate() {
        if v > threshold {
            run_start.get_or_insert(i);
        } else if let Some(start) = run_start.take() {
            midpoints.push(((start + i - 1) / 2) as u32);
        }
    }
    if let Some(start) = run_start {
        midpoints.push(((start + profile.len() - 1) / 2) as u32);
    }
    midpoints
}

/// If the detected grid ends above `rhythm_strip_height_fraction` of image
/// height and the strip below shows high pixel-value variance, treat it as
/// a full-width rhythm strip.
fn detect_rhythm_strip(
    gray: &GrayImage,
    regions: &[LeadRegion],
    config: &PipelineConfig,
) -> Option<LeadRegion> {
    let grid_bottom = regions.iter().map(|r| r.y + r.height).max()?;
    let threshold_y = (gray.height as f64 * config.digitizer.rhythm_strip_height_fraction) as u32;
    if grid_bottom >= threshold_y {
        return None;
    }
    let strip_height = gray.height.saturating_sub(grid_bottom);
    if strip_height == 0 {
        return None;
    }
    let strip = gray.crop(0, grid_bottom, gray.width, strip_height);
    let mean = strip.values.iter().map(|&v| v as f64).sum::<f64>() / strip.values.len().max(1) as f64;
    let variance = strip.values.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>()
        / strip.values.len().max(1) as f64;
    if variance > config.digitizer.rhythm_strip_variance_threshold {
        Some(LeadRegion {
            label: LeadLabel::IIRhythm,
            x: 0,
            y: grid_bottom,
            width: gray.width,
            height: strip_height,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_based_produces_twelve_regions() {
        let gray = GrayImage::new(400, 300);
        let config = PipelineConfig::default();
        let regions = segment(&gray, &config);
        assert_eq!(regions.iter().filter(|r| r.label != LeadLabel::IIRhythm).count(), 12);
    }
}
