//! Step 8-9: calibrated resampling to the canonical 500 Hz rate and overall
//! lead confidence.

use num_complex::Complex64;
use rustfft::FftPlanner;

use super::centerline::RawTrace;
use crate::config::PipelineConfig;
use crate::types::{GridModel, LeadLabel, LeadSignal};

pub fn calibrate_and_resample(
    label: LeadLabel,
    trace: &RawTrace,
    grid: &GridModel,
    config: &PipelineConfig,
) -> LeadSignal {
    let px_per_s = grid.pixels_per_second();
    let px_per_mv = grid.pixels_per_mv().max(1e-9);

    let mut ys: Vec<f64> = trace.points.iter().map(|p| p.y).collect();
    let baseline = median(&mut ys);

    let n = trace.points.len();
    let raw_time_ms: Vec<f64> = (0..n).map(|col| (col as f64) / px_per_s * 1000.0).collect();
    let raw_amplitude_mv: Vec<f64> = trace
        .points
        .iter()
        .map(|p| (baseline - p.y) / px_per_mv)
        .collect();

    let confident_fraction = trace.points.iter().filter(|p| p.confidence > 0.1).count() as f64
        / trace.points.len().max(1) as f64;
    let confidence = confident_fraction.clamp(0.0, 1.0);

    if n < 2 {
        return LeadSignal::failed(label, "insufficient_trace_points");
    }

    let duration_s = raw_time_ms.last().copied().unwrap_or(0.0) / 1000.0;
    let target_n = (duration_s * config.digitizer.target_sample_rate_hz).round().max(1.0) as usize;

    let resampled_amplitude = band_limited_resample(&raw_amplitude_mv, target_n);
    let time_ms: Vec<f64> = (0..target_n)
        .map(|i| i as f64 / config.digitizer.target_sample_rate_hz * 1000.0)
        .collect();

    LeadSignal {
        label,
        time_ms,
        amplitude_mv: resampled_amplitude,
        sample_rate_hz: config.digitizer.target_sample_rate_hz,
        confidence,
        failure_reason: None,
    }
}

fn median(values: &mut [f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    values[values.len() / 2]
}

/// FFT-based band-limited resampling: zero-pad/truncate the spectrum to the
/// target length and inverse-transform. Output length always equals
/// `target_n` exactly, matching spec §9's `round(duration_s * 500)` rule.
fn band_limited_resample(signal: &[f64], target_n: usize) -> Vec<f64> {
    let n = signal.len();
    if n == 0 || target_n == 0 {
        return vec![0.0; target_n];
    }
    if n == target_n {
        return signal.to_vec();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut spectrum: Vec<Complex64> = signal.iter().map(|&v| Complex64::new(v, 0.0)).collect();
    fft.process(&mut spectrum);

    let mut resized = vec![Complex64::new(0.0, 0.0); target_n];
    let copy_half = (n / 2).min(target_n / 2);

    for i in 0..=copy_half {
        resized[i] = spectrum[i];
        if i > 0 && i != target_n - i {
            resized[target_n - i] = spectrum[n - i];
        }
    }

    let ifft = planner.plan_fft_inverse(target_n);
    ifft.process(&mut resized);

    // rustfft's inverse transform is unnormalized: dividing by the forward
    // transform's length `n` restores the original amplitude scale.
    resized.iter().map(|c| c.re / n as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digitizer::centerline::TracePoint;

    #[test]
    fn output_length_matches_round_duration_times_500() {
        let config = PipelineConfig::default();
        let grid = GridModel::new(10.0, 500, 200);
        let points: Vec<TracePoint> = (0..500)
            .map(|i| TracePoint { y: 100.0 + (i as f64 * 0.01).sin(), confidence: 1.0 })
            .collect();
        let trace = RawTrace { points, crop_height: 200 };
        let signal = calibrate_and_resample(LeadLabel::II, &trace, &grid, &config);
        let px_per_s = grid.pixels_per_second();
        let duration_s = (trace.points.len() as f64 - 1.0) / px_per_s;
        let expected = (duration_s * 500.0).round().max(1.0) as usize;
        assert_eq!(signal.amplitude_mv.len(), expected);
        assert_eq!(signal.time_ms.len(), expected);
    }
}
