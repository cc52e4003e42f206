//! QRS onset/offset detection, shared by PR, QRS-duration, and QT
//! measurement.

use super::filters::derivative;
use crate::config::MeasurementThresholds;

/// Backward from the R peak: the first sample (scanning backward) where the
/// derivative magnitude crosses below `qrs_onset_derivative_fraction` of the
/// local max derivative magnitude found in the backward search window.
pub fn find_qrs_onset(
    amplitude: &[f64],
    fs: f64,
    r_peak: usize,
    config: &MeasurementThresholds,
) -> usize {
    let search_samples = (100.0 / 1000.0 * fs).round().max(1.0) as usize;
    let lo = r_peak.saturating_sub(search_samples);
    let window = &amplitude[lo..=r_peak.min(amplitude.len() - 1)];
    let deriv = derivative(window, fs);
    let local_max = deriv.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if local_max <= 0.0 {
        return lo;
    }
    let threshold = local_max * config.qrs_onset_derivative_fraction;

    for i in (0..deriv.len()).rev() {
        if deriv[i].abs() < threshold {
            return lo + i;
        }
    }
    lo
}

/// Forward from the R peak: the first sample where derivative magnitude
/// drops below `qrs_offset_derivative_fraction` of the local max.
pub fn find_qrs_offset(
    amplitude: &[f64],
    fs: f64,
    r_peak: usize,
    config: &MeasurementThresholds,
) -> usize {
    let search_samples = (120.0 / 1000.0 * fs).round().max(1.0) as usize;
    let hi = (r_peak + search_samples).min(amplitude.len() - 1);
    if r_peak >= hi {
        return hi;
    }
    let window = &amplitude[r_peak..=hi];
    let deriv = derivative(window, fs);
    let local_max = deriv.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    if local_max <= 0.0 {
        return hi;
    }
    let threshold = local_max * config.qrs_offset_derivative_fraction;

    for (i, d) in deriv.iter().enumerate() {
        if d.abs() < threshold {
            return r_peak + i;
        }
    }
    hi
}
