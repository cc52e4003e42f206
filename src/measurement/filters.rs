//! Zero-phase Butterworth-equivalent bandpass filtering.
//!
//! Implemented as cascaded first-order high-pass/low-pass RC sections run
//! forward then backward (matching `scipy.signal.filtfilt`'s zero-phase
//! property), repeated to approximate the requested filter order — a
//! from-scratch substitute for the reference implementation's direct
//! `scipy.signal.butter` + `filtfilt` call, per spec §9's license to
//! replace DSP library calls with equivalent routines.

/// Band-pass filter a signal sampled at `fs` Hz between `low_hz` and
/// `high_hz`, applying the first-order section `order` times in each
/// direction for steeper roll-off.
pub fn bandpass_filter(signal: &[f64], fs: f64, low_hz: f64, high_hz: f64, order: usize) -> Vec<f64> {
    if signal.len() < 3 {
        return signal.to_vec();
    }
    let mut out = signal.to_vec();
    for _ in 0..order.max(1) {
        out = high_pass_forward_backward(&out, fs, low_hz);
        out = low_pass_forward_backward(&out, fs, high_hz);
    }
    out
}

fn high_pass_forward_backward(signal: &[f64], fs: f64, cutoff_hz: f64) -> Vec<f64> {
    let alpha = rc_high_pass_alpha(fs, cutoff_hz);
    let forward = high_pass_pass(signal, alpha);
    let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
    reversed = high_pass_pass(&reversed, alpha);
    reversed.into_iter().rev().collect()
}

fn low_pass_forward_backward(signal: &[f64], fs: f64, cutoff_hz: f64) -> Vec<f64> {
    let alpha = rc_low_pass_alpha(fs, cutoff_hz);
    let forward = low_pass_pass(signal, alpha);
    let mut reversed: Vec<f64> = forward.into_iter().rev().collect();
    reversed = low_pass_pass(&reversed, alpha);
    reversed.into_iter().rev().collect()
}

fn rc_low_pass_alpha(fs: f64, cutoff_hz: f64) -> f64 {
    let dt = 1.0 / fs;
    let rc = 1.0 / (2.0 * std::f64::consts::PI * cutoff_hz.max(1e-6));
    dt / (rc + dt)
}

fn rc_high_pass_alpha(fs: f64, cutoff_hz: f64) -> f64 {
    let dt = 1.0 / fs;
    let rc = 1.0 / (2.0 * std::f64::consts::PI * cutoff_hz.max(1e-6));
    rc / (rc + dt)
}

fn low_pass_pass(signal: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = vec![0.0; signal.len()];
    out[0] = signal[0];
    for i in 1..signal.len() {
        out[i] = out[i - 1] + alpha * (signal[i] - out[i - 1]);
    }
    out
}

fn high_pass_pass(signal: &[f64], alpha: f64) -> Vec<f64> {
    let mut out = vec![0.0; signal.len()];
    out[0] = signal[0];
    for i in 1..signal.len() {
        out[i] = alpha * (out[i - 1] + signal[i] - signal[i - 1]);
    }
    out
}

/// First-difference derivative, same length as input (forward difference
/// for the first sample).
pub fn derivative(signal: &[f64], fs: f64) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }
    let dt = 1.0 / fs;
    let mut out = vec![0.0; signal.len()];
    out[0] = (signal.get(1).copied().unwrap_or(signal[0]) - signal[0]) / dt;
    for i in 1..signal.len() {
        out[i] = (signal[i] - signal[i - 1]) / dt;
    }
    out
}

pub fn moving_average(signal: &[f64], window_samples: usize) -> Vec<f64> {
    let w = window_samples.max(1);
    let mut out = vec![0.0; signal.len()];
    let mut sum = 0.0;
    for i in 0..signal.len() {
        sum += signal[i];
        if i >= w {
            sum -= signal[i - w];
        }
        let count = (i + 1).min(w) as f64;
        out[i] = sum / count;
    }
    out
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    (values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64).sqrt()
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted[sorted.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandpass_attenuates_dc_offset() {
        let fs = 500.0;
        let n = 2000;
        let signal: Vec<f64> = (0..n).map(|_| 5.0).collect();
        let filtered = bandpass_filter(&signal, fs, 5.0, 30.0, 3);
        let tail_mean = mean(&filtered[n - 200..]);
        assert!(tail_mean.abs() < 1.0, "tail_mean={tail_mean}");
    }
}
