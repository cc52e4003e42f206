//! Debug overlay produced alongside the cleaned output: the corrected image
//! with the detected grid drawn, a calibration annotation, and each lead
//! region outlined and labeled.

use crate::types::{Bitmap, GrayImage, GridModel, LeadRegion};

#[derive(Debug, Clone)]
pub struct DebugOverlay {
    pub image: Bitmap,
    pub calibration_annotated: bool,
    pub region_labels: Vec<String>,
}

impl DebugOverlay {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            image: Bitmap::new(width, height),
            calibration_annotated: false,
            region_labels: Vec::new(),
        }
    }
}

pub fn build(
    gray: &GrayImage,
    grid: &GridModel,
    regions: &[LeadRegion],
    calibration_detected: bool,
) -> DebugOverlay {
    let mut image = Bitmap::new(gray.width, gray.height);
    for y in 0..gray.height {
        for x in 0..gray.width {
            let v = gray.get(x, y);
            image.set_pixel(x, y, [v, v, v]);
        }
    }

    draw_grid_lines(&mut image, grid.small_square_px, [200, 200, 220]);
    draw_grid_lines(&mut image, grid.large_square_px, [150, 150, 220]);

    for region in regions {
        outline_region(&mut image, region, [255, 60, 60]);
    }

    DebugOverlay {
        image,
        calibration_annotated: calibration_detected,
        region_labels: regions.iter().map(|r| r.label.as_str().to_string()).collect(),
    }
}

fn draw_grid_lines(image: &mut Bitmap, pitch: f64, color: [u8; 3]) {
    if pitch <= 0.0 {
        return;
    }
    let mut x = 0.0;
    while (x as u32) < image.width {
        for y in 0..image.height {
            image.set_pixel(x as u32, y, color);
        }
        x += pitch;
    }
    let mut y = 0.0;
    while (y as u32) < image.height {
        for x in 0..image.width {
            image.set_pixel(x, y as u32, color);
        }
        y += pitch;
    }
}

fn outline_region(image: &mut Bitmap, region: &LeadRegion, color: [u8; 3]) {
    let x0 = region.x;
    let y0 = region.y;
    let x1 = (region.x + region.width).min(image.width.saturating_sub(1));
    let y1 = (region.y + region.height).min(image.height.saturating_sub(1));
    for x in x0..=x1 {
        if x < image.width {
            image.set_pixel(x, y0.min(image.height - 1), color);
            image.set_pixel(x, y1.min(image.height - 1), color);
        }
    }
    for y in y0..=y1 {
        if y < image.height {
            image.set_pixel(x0.min(image.width - 1), y, color);
            image.set_pixel(x1.min(image.width - 1), y, color);
        }
    }
}
