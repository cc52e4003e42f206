//! P-wave detection per lead (spec §4.2).

use crate::config::MeasurementThresholds;
use crate::types::{LeadSignal, PWaveDetail, PWaveMorphology};

pub fn detect_p_waves(lead: &LeadSignal, r_peaks: &[usize], config: &MeasurementThresholds) -> PWaveDetail {
    let fs = lead.sample_rate_hz;
    let amplitude = &lead.amplitude_mv;
    let ms_to_samples = |ms: f64| (ms / 1000.0 * fs).round().max(0.0) as usize;

    let mut durations = Vec::new();
    let mut amplitudes = Vec::new();

    for &r in r_peaks {
        let lo = r.saturating_sub(ms_to_samples(config.p_wave_search_start_ms));
        let hi = r.saturating_sub(ms_to_samples(config.p_wave_search_end_ms));
        if lo >= hi || hi >= amplitude.len() {
            continue;
        }
        let window = &amplitude[lo..hi];
        if let Some((peak_idx, peak_val, prominence)) = find_prominent_peak(window, config.p_wave_min_prominence_mv) {
            let width = half_prominence_width(window, peak_idx, prominence);
            durations.push(width as f64 / fs * 1000.0);
            amplitudes.push(peak_val);
        }
    }

    if durations.is_empty() {
        return PWaveDetail {
            lead_name: lead.label.as_str().to_string(),
            present: false,
            duration_ms: None,
            amplitude_mv: None,
            morphology: None,
        };
    }

    let mean_duration = durations.iter().sum::<f64>() / durations.len() as f64;
    let mean_amplitude = amplitudes.iter().sum::<f64>() / amplitudes.len() as f64;

    let morphology = if mean_amplitude > config.p_wave_peaked_threshold_mv {
        PWaveMorphology::Peaked
    } else if lead.label.as_str() == "aVR" && mean_amplitude < 0.0 {
        PWaveMorphology::Retrograde
    } else {
        PWaveMorphology::Normal
    };

    PWaveDetail {
        lead_name: lead.label.as_str().to_string(),
        present: true,
        duration_ms: Some(mean_duration),
        amplitude_mv: Some(mean_amplitude),
        morphology: Some(morphology),
    }
}

/// The most prominent local maximum in `window` whose prominence (height
/// above the lower of its two bounding valleys) meets `min_prominence`.
fn find_prominent_peak(window: &[f64], min_prominence: f64) -> Option<(usize, f64, f64)> {
    let mut best: Option<(usize, f64, f64)> = None;
    for i in 1..window.len().saturating_sub(1) {
        if window[i] <= window[i - 1] || window[i] < window[i + 1] {
            continue;
        }
        let left_min = window[..=i].iter().cloned().fold(f64::MAX, f64::min);
        let right_min = window[i..].iter().cloned().fold(f64::MAX, f64::min);
        let prominence = window[i] - left_min.max(right_min);
        if prominence < min_prominence {
            continue;
        }
        if best.map(|(_, _, p)| prominence > p).unwrap_or(true) {
            best = Some((i, window[i], prominence));
        }
    }
    best
}

fn half_prominence_width(window: &[f64], peak_idx: usize, prominence: f64) -> usize {
    let half = window[peak_idx] - prominence / 2.0;
    let mut left = peak_idx;
    while left > 0 && window[left] > half {
        left -= 1;
    }
    let mut right = peak_idx;
    while right < window.len() - 1 && window[right] > half {
        right += 1;
    }
    right.saturating_sub(left).max(1)
}
