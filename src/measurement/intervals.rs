//! PR interval, QRS duration, and QT/QTc measurement (spec §4.2).

use super::filters::{mean, median, stddev};
use super::qrs_boundaries::{find_qrs_offset, find_qrs_onset};
use crate::config::MeasurementThresholds;
use crate::types::MeasurementScalar;

fn ms_to_samples(ms: f64, fs: f64) -> usize {
    (ms / 1000.0 * fs).round().max(0.0) as usize
}

pub fn measure_pr_interval(
    amplitude: &[f64],
    fs: f64,
    r_peaks: &[usize],
    config: &MeasurementThresholds,
) -> Option<MeasurementScalar> {
    let mut values = Vec::new();
    for &r in r_peaks {
        let onset = find_qrs_onset(amplitude, fs, r, config);
        let search_start = onset.saturating_sub(ms_to_samples(config.pr_search_start_ms, fs));
        let search_end = onset.saturating_sub(ms_to_samples(config.pr_search_end_ms, fs));
        if search_start >= search_end || search_end >= amplitude.len() {
            continue;
        }
        let segment = &amplitude[search_start..search_end];
        if segment.is_empty() {
            continue;
        }
        let baseline_median = median(segment);
        let noise_std = stddev(segment).max(1e-6);
        let deviation_threshold = config.pr_deviation_fraction_of_noise * noise_std;

        let mut p_start = None;
        for (i, &v) in segment.iter().enumerate() {
            if (v - baseline_median).abs() >= deviation_threshold {
                p_start = Some(search_start + i);
                break;
            }
        }
        let Some(p_start) = p_start else { continue };
        let pr_ms = (onset - p_start) as f64 / fs * 1000.0;
        if pr_ms > config.pr_min_ms && pr_ms < config.pr_max_ms {
            values.push(pr_ms);
        }
    }

    if values.is_empty() {
        return None;
    }
    let confidence = (values.len() as f64 / r_peaks.len().max(1) as f64).min(1.0);
    Some(MeasurementScalar::new(mean(&values), "ms", "derivative_onset_to_p_deviation", confidence))
}

pub fn measure_qrs_duration(
    amplitude: &[f64],
    fs: f64,
    r_peaks: &[usize],
    config: &MeasurementThresholds,
) -> MeasurementScalar {
    let mut values = Vec::new();
    for &r in r_peaks {
        let onset = find_qrs_onset(amplitude, fs, r, config);
        let offset = find_qrs_offset(amplitude, fs, r, config);
        if offset <= onset {
            continue;
        }
        let qrs_ms = (offset - onset) as f64 / fs * 1000.0;
        if qrs_ms > config.qrs_min_ms && qrs_ms < config.qrs_max_ms {
            values.push(qrs_ms);
        }
    }
    if values.is_empty() {
        return MeasurementScalar::unmeasured("ms", "derivative_onset_offset");
    }
    let confidence = (values.len() as f64 / config.qrs_confidence_beats_for_full).min(1.0);
    MeasurementScalar::new(mean(&values), "ms", "derivative_onset_offset", confidence)
}

pub struct QtResult {
    pub qt: MeasurementScalar,
    pub qtc_bazett: MeasurementScalar,
    pub qtc_fridericia: MeasurementScalar,
}

pub fn measure_qt_interval(
    amplitude: &[f64],
    fs: f64,
    r_peaks: &[usize],
    mean_rr_ms: f64,
    config: &MeasurementThresholds,
) -> QtResult {
    let mut qt_values = Vec::new();
    for &r in r_peaks {
        let onset = find_qrs_onset(amplitude, fs, r, config);
        let t_search_start = onset + ms_to_samples(config.t_peak_search_start_ms, fs);
        let t_search_end = (onset + ms_to_samples(config.t_peak_search_end_ms, fs)).min(amplitude.len() - 1);
        if t_search_start >= t_search_end {
            continue;
        }
        let segment = &amplitude[t_search_start..=t_search_end];
        let (t_peak_offset, _) = segment
            .iter()
            .enumerate()
            .map(|(i, &v)| (i, v.abs()))
            .fold((0usize, f64::MIN), |acc, cur| if cur.1 > acc.1 { cur } else { acc });
        let t_peak_idx = t_search_start + t_peak_offset;

        let baseline_window_start = onset.saturating_sub(ms_to_samples(200.0, fs));
        let baseline = if baseline_window_start < onset {
            median(&amplitude[baseline_window_start..onset])
        } else {
            0.0
        };

        let mut t_end = None;
        for i in t_peak_idx..amplitude.len() {
            if (amplitude[i] - baseline).abs() < config.t_end_deviation_threshold_mv {
                t_end = Some(i);
                break;
            }
        }
        let Some(t_end) = t_end else { continue };
        let qt_ms = (t_end - onset) as f64 / fs * 1000.0;
        if qt_ms > 0.0 {
            qt_values.push(qt_ms);
        }
    }

    if qt_values.is_empty() {
        return QtResult {
            qt: MeasurementScalar::unmeasured("ms", "tangent_t_end"),
            qtc_bazett: MeasurementScalar::unmeasured("ms", "bazett"),
            qtc_fridericia: MeasurementScalar::unmeasured("ms", "fridericia"),
        };
    }

    let qt_mean = mean(&qt_values);
    let confidence = (qt_values.len() as f64 / r_peaks.len().max(1) as f64).min(1.0);
    let rr_s = (mean_rr_ms / 1000.0).max(1e-6);

    QtResult {
        qt: MeasurementScalar::new(qt_mean, "ms", "tangent_t_end", confidence),
        qtc_bazett: MeasurementScalar::new(qt_mean / rr_s.sqrt(), "ms", "bazett", confidence),
        qtc_fridericia: MeasurementScalar::new(qt_mean / rr_s.cbrt(), "ms", "fridericia", confidence),
    }
}
