//! ST-segment deviation per lead, measured at J+60ms (spec §4.2).

use super::filters::{mean, median};
use super::qrs_boundaries::find_qrs_offset;
use crate::config::MeasurementThresholds;
use crate::types::{LeadSignal, STDeviation};

pub fn measure_st_deviation(lead: &LeadSignal, r_peaks: &[usize], config: &MeasurementThresholds) -> STDeviation {
    let fs = lead.sample_rate_hz;
    let amplitude = &lead.amplitude_mv;
    let offset_samples = (config.st_measurement_offset_ms / 1000.0 * fs).round().max(0.0) as usize;
    let baseline_start_samples = (config.st_baseline_window_start_ms / 1000.0 * fs).round().max(0.0) as usize;
    let baseline_end_samples = (config.st_baseline_window_end_ms / 1000.0 * fs).round().max(0.0) as usize;

    let mut deviations = Vec::new();
    for &r in r_peaks {
        let j_point = find_qrs_offset(amplitude, fs, r, config);
        let st_point = j_point + offset_samples;
        if st_point >= amplitude.len() {
            continue;
        }

        let baseline_lo = r.saturating_sub(baseline_start_samples);
        let baseline_hi = r.saturating_sub(baseline_end_samples);
        if baseline_lo >= baseline_hi {
            continue;
        }
        let baseline = median(&amplitude[baseline_lo..baseline_hi]);
        deviations.push(amplitude[st_point] - baseline);
    }

    STDeviation {
        lead_name: lead.label.as_str().to_string(),
        deviation_mv: if deviations.is_empty() { 0.0 } else { mean(&deviations) },
    }
}
