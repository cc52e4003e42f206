//! LVH/RVH voltage criteria (spec §4.2).

use super::filters::mean;
use crate::config::MeasurementThresholds;
use crate::types::LeadSignal;

/// Maximum absolute deflection across the R-peak windows of `lead`, signed
/// positive (R) or negative (S) by which extreme is larger in magnitude.
fn peak_r_and_s(lead: &LeadSignal, r_peaks: &[usize], config: &MeasurementThresholds) -> (f64, f64) {
    let fs = lead.sample_rate_hz;
    let half_window = (config.axis_window_ms / 1000.0 * fs).round().max(1.0) as usize;
    let amplitude = &lead.amplitude_mv;

    let mut r_heights = Vec::new();
    let mut s_depths = Vec::new();
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
        r_heights.push(window.iter().cloned().fold(f64::MIN, f64::max).max(0.0));
        s_depths.push(window.iter().cloned().fold(f64::MAX, f64::min).min(0.0).abs());
    }
    (mean(&r_heights), mean(&s_depths))
}

pub struct VoltageCriteria {
    pub lvh_sokolow_lyon: bool,
    pub lvh_cornell: bool,
    pub rvh_present: bool,
    pub explanation: String,
}

/// `leads` maps a subset of {V1, V3, V5, V6, aVL} to (signal, r_peaks); any
/// lead missing from the map is treated as zero-amplitude (criterion simply
/// cannot be met from it).
pub fn evaluate_voltage_criteria(
    v1: Option<(&LeadSignal, &[usize])>,
    v3: Option<(&LeadSignal, &[usize])>,
    v5: Option<(&LeadSignal, &[usize])>,
    v6: Option<(&LeadSignal, &[usize])>,
    avl: Option<(&LeadSignal, &[usize])>,
    config: &MeasurementThresholds,
) -> VoltageCriteria {
    let (r_v1, s_v1) = v1.map(|(l, p)| peak_r_and_s(l, p, config)).unwrap_or((0.0, 0.0));
    let (_, s_v3) = v3.map(|(l, p)| peak_r_and_s(l, p, config)).unwrap_or((0.0, 0.0));
    let (r_v5, _) = v5.map(|(l, p)| peak_r_and_s(l, p, config)).unwrap_or((0.0, 0.0));
    let (r_v6, _) = v6.map(|(l, p)| peak_r_and_s(l, p, config)).unwrap_or((0.0, 0.0));
    let (r_avl, _) = avl.map(|(l, p)| peak_r_and_s(l, p, config)).unwrap_or((0.0, 0.0));

    let sokolow_lyon_sum = s_v1 + r_v5.max(r_v6);
    let cornell_sum = r_avl + s_v3;

    let lvh_sokolow_lyon = sokolow_lyon_sum >= config.sokolow_lyon_threshold_mv;
    let lvh_cornell = cornell_sum >= config.cornell_threshold_mv;
    let rvh_present = r_v1 >= config.rvh_threshold_mv;

    let mut notes = Vec::new();
    notes.push(format!(
        "Sokolow-Lyon |S_V1|+max(R_V5,R_V6)={sokolow_lyon_sum:.2}mV ({} {:.2}mV)",
        if lvh_sokolow_lyon { ">=" } else { "<" },
        config.sokolow_lyon_threshold_mv
    ));
    notes.push(format!(
        "Cornell R_aVL+|S_V3|={cornell_sum:.2}mV ({} {:.2}mV)",
        if lvh_cornell { ">=" } else { "<" },
        config.cornell_threshold_mv
    ));
    notes.push(format!(
        "RVH R_V1={r_v1:.2}mV ({} {:.2}mV)",
        if rvh_present { ">=" } else { "<" },
        config.rvh_threshold_mv
    ));

    VoltageCriteria {
        lvh_sokolow_lyon,
        lvh_cornell,
        rvh_present,
        explanation: notes.join("; "),
    }
}
