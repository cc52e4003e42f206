//! Bitmap → calibrated per-lead signals.
//!
//! `Digitizer::run` is a pure function over `(Bitmap, &PipelineConfig)` that
//! always returns some `LeadSignal`s (possibly marked failed) and a
//! `GridModel` (possibly the fallback pitch). It never panics and never
//! propagates an error past its own boundary — failures degrade into
//! `failure_reason`s and warnings, per spec §7.

mod calibration;
mod centerline;
mod grayscale;
mod grid_characterize;
mod grid_removal;
mod overlay;
mod perspective;
mod resample;
mod segmentation;

pub use overlay::DebugOverlay;

use thiserror::Error;

use crate::config::PipelineConfig;
use crate::types::{AcquisitionType, Bitmap, GridModel, LeadSignal};

#[derive(Debug, Error)]
pub enum DigitizerError {
    #[error("unreadable image: {0}")]
    UnreadableImage(String),
    #[error("empty bitmap")]
    EmptyBitmap,
}

/// Everything the Digitizer hands to the rest of the pipeline.
#[derive(Debug, Clone)]
pub struct DigitizerOutput {
    pub leads: Vec<LeadSignal>,
    pub grid: GridModel,
    pub overlay: DebugOverlay,
    pub acquisition_type: AcquisitionType,
    pub ready_for_interpretation: bool,
    pub warnings: Vec<String>,
}

pub struct Digitizer;

impl Digitizer {
    /// Run the full digitization pipeline. Fails soft: on a genuinely empty
    /// bitmap this still returns a `DigitizerOutput` with zero-confidence
    /// leads and a fallback grid, with `ready_for_interpretation = false`.
    pub fn run(bitmap: &Bitmap, config: &PipelineConfig) -> DigitizerOutput {
        let mut warnings = Vec::new();

        if bitmap.is_empty() {
            warnings.push("empty bitmap supplied; digitization skipped".to_string());
            return DigitizerOutput {
                leads: Vec::new(),
                grid: GridModel::fallback(0, 0),
                overlay: DebugOverlay::blank(0, 0),
                acquisition_type: AcquisitionType::Simultaneous,
                ready_for_interpretation: false,
                warnings,
            };
        }

        // Step 1: perspective correction.
        let corrected = match perspective::correct(bitmap, config) {
            Ok(img) => img,
            Err(w) => {
                warnings.push(w);
                bitmap.clone()
            }
        };

        // Step 2: grayscale + normalization.
        let gray = grayscale::to_normalized_gray(&corrected);

        // Step 3: grid characterization.
        let (small_square_px, grid_warning) = grid_characterize::characterize(&gray, config);
        if let Some(w) = grid_warning {
            warnings.push(w);
        }
        let mut grid = GridModel::new(small_square_px, gray.width, gray.height);

        // Step 4: calibration pulse detection.
        let (pulse_mv, cal_warning) = calibration::detect_pulse(&gray, &grid, config);
        if let Some(mv) = pulse_mv {
            grid.calibration_pulse_mv = Some(mv);
            grid.calibration_detected = true;
        }
        if let Some(w) = cal_warning {
            warnings.push(w);
        }

        // Step 5: lead segmentation (+ rhythm strip).
        let regions = segmentation::segment(&gray, config);
        if regions.is_empty() {
            warnings.push("lead segmentation failed; no leads recovered".to_string());
        }

        // Steps 6-9: per-lead grid removal, centerline extraction, resampling.
        let mut leads = Vec::with_capacity(regions.len());
        for region in &regions {
            let gray_crop = gray.crop(region.x, region.y, region.width, region.height);
            let color_crop = crop_bitmap(&corrected, region.x, region.y, region.width, region.height);
            let (cleaned, removal_warning) =
                grid_removal::remove_grid(&color_crop, &gray_crop, small_square_px, config);
            if let Some(w) = removal_warning {
                warnings.push(format!("{}: {}", region.label.as_str(), w));
            }
            let trace = centerline::extract(&cleaned, config);
            let signal = match trace {
                Some(trace) => resample::calibrate_and_resample(region.label, &trace, &grid, config),
                None => {
                    warnings.push(format!(
                        "{}: waveform tracing failed; lead marked unusable",
                        region.label.as_str()
                    ));
                    LeadSignal::failed(region.label, "tracing_failed")
                }
            };
            leads.push(signal);
        }

        // Step 10: stitching detection.
        let acquisition_type = detect_acquisition_type(&leads, config);

        // Readiness rule.
        let usable_count = leads.iter().filter(|l| l.is_usable()).count();
        if usable_count < config.digitizer.readiness_min_usable_leads_warning {
            warnings.push(format!(
                "only {usable_count} of {} leads reached usable confidence",
                leads.len()
            ));
        }
        let ready_for_interpretation = leads.iter().any(|l| {
            l.failure_reason.is_none() || l.confidence > config.digitizer.readiness_confidence_floor
        });

        let overlay = overlay::build(&gray, &grid, &regions, grid.calibration_detected);

        DigitizerOutput {
            leads,
            grid,
            overlay,
            acquisition_type,
            ready_for_interpretation,
            warnings,
        }
    }
}

fn crop_bitmap(bitmap: &Bitmap, x: u32, y: u32, w: u32, h: u32) -> Bitmap {
    let mut out = Bitmap::new(w, h);
    for row in 0..h {
        for col in 0..w {
            let sx = (x + col).min(bitmap.width.saturating_sub(1));
            let sy = (y + row).min(bitmap.height.saturating_sub(1));
            out.set_pixel(col, row, bitmap.pixel(sx, sy));
        }
    }
    out
}

fn detect_acquisition_type(leads: &[LeadSignal], config: &PipelineConfig) -> AcquisitionType {
    let mut durations: Vec<f64> = leads.iter().map(LeadSignal::duration_ms).collect();
    if durations.is_empty() {
        return AcquisitionType::Simultaneous;
    }
    durations.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median = durations[durations.len() / 2];
    if median < config.digitizer.stitched_duration_threshold_ms {
        AcquisitionType::Stitched
    } else {
        AcquisitionType::Simultaneous
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bitmap_yields_not_ready_but_non_null_output() {
        let config = PipelineConfig::default();
        let bitmap = Bitmap::new(0, 0);
        let out = Digitizer::run(&bitmap, &config);
        assert!(!out.ready_for_interpretation);
        assert!(out.leads.is_empty());
        assert!(!out.warnings.is_empty());
    }

    #[test]
    fn pure_white_bitmap_does_not_panic() {
        let config = PipelineConfig::default();
        let mut bitmap = Bitmap::new(200, 200);
        for b in bitmap.pixels.iter_mut() {
            *b = 255;
        }
        let out = Digitizer::run(&bitmap, &config);
        // A blank image carries no trace signal; every lead confidence is low.
        assert!(out.leads.iter().all(|l| l.confidence < 0.2));
    }
}
