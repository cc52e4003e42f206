//! Canonical R-peak detection (spec §4.2).

use super::filters::{bandpass_filter, derivative, mean, moving_average, stddev};
use crate::config::MeasurementThresholds;
use crate::types::LeadSignal;

/// Sample index of each detected R peak, refined to the local amplitude
/// maximum on the raw (unfiltered) lead.
pub fn detect_r_peaks(lead: &LeadSignal, config: &MeasurementThresholds) -> Vec<usize> {
    let fs = lead.sample_rate_hz;
    let amplitude = &lead.amplitude_mv;
    if amplitude.len() < 10 {
        return Vec::new();
    }

    let filtered = bandpass_filter(
        amplitude,
        fs,
        config.bandpass_low_hz,
        config.bandpass_high_hz,
        config.bandpass_order,
    );
    let diff = derivative(&filtered, fs);
    let squared: Vec<f64> = diff.iter().map(|v| v * v).collect();
    let window_samples = (config.smoothing_window_ms / 1000.0 * fs).round().max(1.0) as usize;
    let energy = moving_average(&squared, window_samples);

    let threshold = mean(&energy) + config.r_peak_threshold_stddev * stddev(&energy);
    let min_spacing = (config.r_peak_min_spacing_ms / 1000.0 * fs).round().max(1.0) as usize;

    let mut candidates = Vec::new();
    let mut last_peak: Option<usize> = None;
    for i in 1..energy.len() - 1 {
        if energy[i] <= threshold {
            continue;
        }
        if energy[i] < energy[i - 1] || energy[i] < energy[i + 1] {
            continue;
        }
        if let Some(last) = last_peak {
            if i - last < min_spacing {
                continue;
            }
        }
        candidates.push(i);
        last_peak = Some(i);
    }

    let refine_window = (config.r_peak_refine_window_ms / 1000.0 * fs).round().max(1.0) as usize;
    candidates
        .into_iter()
        .map(|i| refine_to_local_max(amplitude, i, refine_window))
        .collect()
}

fn refine_to_local_max(signal: &[f64], center: usize, window: usize) -> usize {
    let lo = center.saturating_sub(window);
    let hi = (center + window).min(signal.len() - 1);
    let mut best = center;
    let mut best_val = signal[center].abs();
    for i in lo..=hi {
        if signal[i].abs() > best_val {
            best_val = signal[i].abs();
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadLabel;

    fn synthetic_lead(bpm: f64, duration_s: f64) -> LeadSignal {
        let fs = 500.0;
        let n = (duration_s * fs) as usize;
        let rr_s = 60.0 / bpm;
        let mut amplitude_mv = vec![0.0; n];
        for i in 0..n {
            let t = i as f64 / fs;
            let phase = (t % rr_s) / rr_s;
            // Narrow synthetic QRS spike near the start of each beat.
            amplitude_mv[i] = if phase < 0.02 {
                1.0 * (1.0 - (phase / 0.02 - 0.5).abs() * 2.0)
            } else {
                0.0
            };
        }
        let time_ms: Vec<f64> = (0..n).map(|i| i as f64 / fs * 1000.0).collect();
        LeadSignal {
            label: LeadLabel::II,
            time_ms,
            amplitude_mv,
            sample_rate_hz: fs,
            confidence: 1.0,
            failure_reason: None,
        }
    }

    #[test]
    fn detects_approximately_correct_beat_count() {
        let lead = synthetic_lead(72.0, 10.0);
        let config = MeasurementThresholds::default();
        let peaks = detect_r_peaks(&lead, &config);
        // 72 bpm over 10s -> ~12 beats; allow generous tolerance since this
        // is a from-scratch detector against a non-Pan-Tompkins pipeline.
        assert!(peaks.len() >= 6 && peaks.len() <= 18, "peaks={}", peaks.len());
    }
}
