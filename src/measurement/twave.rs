//! T-wave morphology per lead (spec §4.2, biphasic dual-crossing resolution
//! per the expanded measurement spec). Each beat's window is baseline
//! subtracted against the median of the 300ms segment preceding its R peak,
//! then deviations are averaged across every detected beat, the same
//! pre-QRS-median-baseline and multi-beat-average pattern used for PR/QT.

use super::filters::{mean, median};
use crate::config::MeasurementThresholds;
use crate::types::{LeadSignal, TWaveDetail, TWavePolarity};

const BASELINE_WINDOW_MS: f64 = 300.0;

fn ms_to_samples(ms: f64, fs: f64) -> usize {
    (ms / 1000.0 * fs).round().max(0.0) as usize
}

pub fn measure_t_wave(lead: &LeadSignal, r_peaks: &[usize], config: &MeasurementThresholds) -> TWaveDetail {
    let fs = lead.sample_rate_hz;
    let amplitude = &lead.amplitude_mv;
    let start_samples = ms_to_samples(config.t_wave_window_start_ms, fs);
    let end_samples = ms_to_samples(config.t_wave_window_end_ms, fs);
    let baseline_samples = ms_to_samples(BASELINE_WINDOW_MS, fs);

    let mut dominant_values = Vec::new();
    let mut biphasic_values = Vec::new();

    for &r in r_peaks {
        let lo = (r + start_samples).min(amplitude.len().saturating_sub(1));
        let hi = (r + end_samples).min(amplitude.len().saturating_sub(1));
        if lo >= hi {
            continue;
        }

        let baseline_start = r.saturating_sub(baseline_samples);
        let baseline = if baseline_start < r { median(&amplitude[baseline_start..r]) } else { 0.0 };

        let window: Vec<f64> = amplitude[lo..=hi].iter().map(|&v| v - baseline).collect();
        let has_upright = window.iter().any(|&v| v >= config.t_wave_upright_threshold_mv);
        let has_inverted = window.iter().any(|&v| v <= config.t_wave_inverted_threshold_mv);

        if has_upright && has_inverted {
            let max = window.iter().cloned().fold(f64::MIN, f64::max);
            let min = window.iter().cloned().fold(f64::MAX, f64::min);
            biphasic_values.push(if max.abs() >= min.abs() { max } else { min });
        } else if let Some(dominant) = window.iter().cloned().max_by(|a, b| a.abs().partial_cmp(&b.abs()).unwrap_or(std::cmp::Ordering::Equal)) {
            dominant_values.push(dominant);
        }
    }

    let (polarity, amplitude_mv) = if !biphasic_values.is_empty() {
        (TWavePolarity::Biphasic, Some(mean(&biphasic_values)))
    } else if !dominant_values.is_empty() {
        let amp = mean(&dominant_values);
        if amp >= config.t_wave_upright_threshold_mv {
            (TWavePolarity::Upright, Some(amp))
        } else if amp <= config.t_wave_inverted_threshold_mv {
            (TWavePolarity::Inverted, Some(amp))
        } else {
            (TWavePolarity::Flat, Some(amp))
        }
    } else {
        (TWavePolarity::Flat, None)
    };

    TWaveDetail {
        lead_name: lead.label.as_str().to_string(),
        polarity,
        amplitude_mv,
    }
}
