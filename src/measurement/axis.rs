//! Electrical axis and precordial R/S transition (spec §4.2).

use super::filters::mean;
use crate::config::MeasurementThresholds;
use crate::types::{AxisQuadrant, LeadLabel, LeadSignal, MeasurementScalar};

/// Net signed QRS amplitude for one lead: `max - min` across the window
/// around each R peak, signed by the polarity of the sample at the R peak.
fn net_qrs_amplitude(lead: &LeadSignal, r_peaks: &[usize], config: &MeasurementThresholds) -> Option<f64> {
    let fs = lead.sample_rate_hz;
    let half_window = (config.axis_window_ms / 1000.0 * fs).round().max(1.0) as usize;
    let amplitude = &lead.amplitude_mv;

    let mut nets = Vec::new();
    for &r in r_peaks {
        if r >= amplitude.len() {
            continue;
        }
        let lo = r.saturating_sub(half_window);
        let hi = (r + half_window).min(amplitude.len() - 1);
        if lo >= hi {
            continue;
        }
        let window = &amplitude[lo..=hi];
        let max = window.iter().cloned().fold(f64::MIN, f64::max);
        let min = window.iter().cloned().fold(f64::MAX, f64::min);
        let sign = if amplitude[r] >= 0.0 { 1.0 } else { -1.0 };
        nets.push(sign * (max - min));
    }
    if nets.is_empty() {
        None
    } else {
        Some(mean(&nets))
    }
}

pub fn measure_axis(
    lead_i: Option<(&LeadSignal, &[usize])>,
    lead_avf: Option<(&LeadSignal, &[usize])>,
    config: &MeasurementThresholds,
) -> (MeasurementScalar, AxisQuadrant) {
    let net_i = lead_i.and_then(|(lead, peaks)| net_qrs_amplitude(lead, peaks, config));
    let net_avf = lead_avf.and_then(|(lead, peaks)| net_qrs_amplitude(lead, peaks, config));

    let (Some(net_i), Some(net_avf)) = (net_i, net_avf) else {
        return (MeasurementScalar::unmeasured("deg", "unavailable"), AxisQuadrant::Normal);
    };

    let mut axis_deg = net_avf.atan2(net_i).to_degrees();
    if axis_deg <= -180.0 {
        axis_deg += 360.0;
    } else if axis_deg > 180.0 {
        axis_deg -= 360.0;
    }

    let quadrant = if (-30.0..=90.0).contains(&axis_deg) {
        AxisQuadrant::Normal
    } else if (-90.0..-30.0).contains(&axis_deg) {
        AxisQuadrant::Left
    } else if axis_deg > 90.0 && axis_deg <= 180.0 {
        AxisQuadrant::Right
    } else {
        AxisQuadrant::Extreme
    };

    let confidence = if lead_i.is_some() && lead_avf.is_some() { 0.8 } else { 0.0 };
    (MeasurementScalar::new(axis_deg, "deg", "net_qrs_amplitude_atan2", confidence), quadrant)
}

/// The first precordial lead (V1..V6) where R-height / |S-depth| >= the
/// configured transition ratio.
pub fn precordial_transition(
    precordial_leads: &[(LeadLabel, &LeadSignal, &[usize])],
    config: &MeasurementThresholds,
) -> Option<String> {
    for (label, lead, r_peaks) in precordial_leads {
        let fs = lead.sample_rate_hz;
        let half_window = (config.axis_window_ms / 1000.0 * fs).round().max(1.0) as usize;
        let amplitude = &lead.amplitude_mv;

        let mut r_heights = Vec::new();
        let mut s_depths = Vec::new();
        for &r in *r_peaks {
            if r >= amplitude.len() {
                continue;
            }
            let lo = r.saturating_sub(half_window);
            let hi = (r + half_window).min(amplitude.len() - 1);
            if lo >= hi {
                continue;
            }
            let window = &amplitude[lo..=hi];
            r_heights.push(window.iter().cloned().fold(f64::MIN, f64::max).max(0.0));
            s_depths.push(window.iter().cloned().fold(f64::MAX, f64::min).min(0.0).abs());
        }
        if r_heights.is_empty() {
            continue;
        }
        let r_height = mean(&r_heights);
        let s_depth = mean(&s_depths).max(1e-6);
        if r_height / s_depth >= config.precordial_transition_ratio {
            return Some(label.as_str().to_string());
        }
    }
    None
}
