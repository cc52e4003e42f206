//! `LeadSignal[]` → `Measurements` (spec §4.2).
//!
//! Each scalar measurement is derived independently so a failure in one
//! (missing lead, too few beats) degrades only that field rather than the
//! whole record, matching the Digitizer's fail-soft posture.

mod axis;
mod filters;
mod intervals;
mod pwave;
mod qrs_boundaries;
mod rate_rhythm;
mod rpeaks;
mod st;
mod twave;
mod voltage;

use thiserror::Error;

use crate::config::PipelineConfig;
use crate::types::{LeadLabel, LeadSignal, Measurements};

#[derive(Debug, Error)]
pub enum MeasurementError {
    #[error("no usable leads supplied")]
    NoUsableLeads,
}

pub struct MeasurementEngine;

impl MeasurementEngine {
    /// Compute the full `Measurements` record from the Digitizer's leads.
    /// Returns `Err` only when there is no usable lead at all, in which case
    /// the orchestrator substitutes `Measurements::degraded_fallback()`.
    pub fn run(leads: &[LeadSignal], config: &PipelineConfig) -> Result<Measurements, MeasurementError> {
        if !leads.iter().any(LeadSignal::is_usable) {
            return Err(MeasurementError::NoUsableLeads);
        }
        let mt = &config.measurement;

        let rhythm_lead = select_rhythm_lead(leads);
        let r_peaks = rhythm_lead.map(|l| rpeaks::detect_r_peaks(l, mt)).unwrap_or_default();

        let rate_rhythm = rhythm_lead
            .map(|l| rate_rhythm::measure_rate_and_rhythm(&r_peaks, l.sample_rate_hz, mt))
            .unwrap_or_else(|| rate_rhythm::measure_rate_and_rhythm(&[], 500.0, mt));

        let (amplitude, fs) = rhythm_lead
            .map(|l| (l.amplitude_mv.as_slice(), l.sample_rate_hz))
            .unwrap_or((&[], 500.0));

        let pr_interval = intervals::measure_pr_interval(amplitude, fs, &r_peaks, mt);
        let qrs_duration = intervals::measure_qrs_duration(amplitude, fs, &r_peaks, mt);
        let qt = intervals::measure_qt_interval(amplitude, fs, &r_peaks, mean_rr_ms(&rate_rhythm), mt);

        let lead_i = find_lead(leads, LeadLabel::I).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let lead_avf = find_lead(leads, LeadLabel::AVF).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let (axis_degrees, axis_quadrant) = axis::measure_axis(
            lead_i.as_ref().map(|(l, p)| (*l, p.as_slice())),
            lead_avf.as_ref().map(|(l, p)| (*l, p.as_slice())),
            mt,
        );

        let precordial_labels = [
            LeadLabel::V1,
            LeadLabel::V2,
            LeadLabel::V3,
            LeadLabel::V4,
            LeadLabel::V5,
            LeadLabel::V6,
        ];
        let precordial_with_peaks: Vec<(LeadLabel, &LeadSignal, Vec<usize>)> = precordial_labels
            .iter()
            .filter_map(|&label| find_lead(leads, label).map(|l| (label, l, rpeaks::detect_r_peaks(l, mt))))
            .collect();
        let precordial_refs: Vec<(LeadLabel, &LeadSignal, &[usize])> = precordial_with_peaks
            .iter()
            .map(|(label, lead, peaks)| (*label, *lead, peaks.as_slice()))
            .collect();
        let precordial_transition_lead = axis::precordial_transition(&precordial_refs, mt);

        let v1 = find_lead(leads, LeadLabel::V1).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let v3 = find_lead(leads, LeadLabel::V3).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let v5 = find_lead(leads, LeadLabel::V5).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let v6 = find_lead(leads, LeadLabel::V6).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let avl = find_lead(leads, LeadLabel::AVL).map(|l| (l, rpeaks::detect_r_peaks(l, mt)));
        let voltage = voltage::evaluate_voltage_criteria(
            v1.as_ref().map(|(l, p)| (*l, p.as_slice())),
            v3.as_ref().map(|(l, p)| (*l, p.as_slice())),
            v5.as_ref().map(|(l, p)| (*l, p.as_slice())),
            v6.as_ref().map(|(l, p)| (*l, p.as_slice())),
            avl.as_ref().map(|(l, p)| (*l, p.as_slice())),
            mt,
        );

        let mut p_waves = Vec::new();
        let mut st_deviations = Vec::new();
        let mut t_wave_details = Vec::new();
        for lead in leads.iter().filter(|l| l.is_usable()) {
            let peaks = rpeaks::detect_r_peaks(lead, mt);
            if peaks.is_empty() {
                continue;
            }
            p_waves.push(pwave::detect_p_waves(lead, &peaks, mt));
            st_deviations.push(st::measure_st_deviation(lead, &peaks, mt));
            t_wave_details.push(twave::measure_t_wave(lead, &peaks, mt));
        }

        Ok(Measurements {
            rate: rate_rhythm.rate,
            rhythm_regularity: rate_rhythm.regularity,
            rhythm_description: rate_rhythm.description,
            n_beats: rate_rhythm.n_beats,
            pr_interval,
            qrs_duration,
            qt_interval: qt.qt,
            qtc_bazett: qt.qtc_bazett,
            qtc_fridericia: qt.qtc_fridericia,
            axis_degrees,
            axis_quadrant,
            precordial_transition_lead,
            lvh_sokolow_lyon: voltage.lvh_sokolow_lyon,
            lvh_cornell: voltage.lvh_cornell,
            rvh_present: voltage.rvh_present,
            voltage_criteria_explanation: voltage.explanation,
            p_waves,
            st_deviations,
            t_wave_details,
        })
    }
}

fn mean_rr_ms(rate_rhythm: &rate_rhythm::RateAndRhythm) -> f64 {
    if rate_rhythm.rr_intervals_ms.is_empty() {
        800.0
    } else {
        rate_rhythm.rr_intervals_ms.iter().sum::<f64>() / rate_rhythm.rr_intervals_ms.len() as f64
    }
}

fn find_lead(leads: &[LeadSignal], label: LeadLabel) -> Option<&LeadSignal> {
    leads.iter().find(|l| l.label == label && l.is_usable())
}

/// Preferred rhythm-reference lead: II, then the dedicated rhythm strip,
/// then the longest usable lead of any kind.
fn select_rhythm_lead(leads: &[LeadSignal]) -> Option<&LeadSignal> {
    find_lead(leads, LeadLabel::II)
        .or_else(|| find_lead(leads, LeadLabel::IIRhythm))
        .or_else(|| {
            leads
                .iter()
                .filter(|l| l.is_usable())
                .max_by(|a, b| a.duration_ms().partial_cmp(&b.duration_ms()).unwrap_or(std::cmp::Ordering::Equal))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadLabel;

    fn synthetic_lead(label: LeadLabel, bpm: f64, duration_s: f64) -> LeadSignal {
        let fs = 500.0;
        let n = (duration_s * fs) as usize;
        let rr_s = 60.0 / bpm;
        let mut amplitude_mv = vec![0.0; n];
        for i in 0..n {
            let t = i as f64 / fs;
            let phase = (t % rr_s) / rr_s;
            amplitude_mv[i] = if phase < 0.02 {
                1.2 * (1.0 - (phase / 0.02 - 0.5).abs() * 2.0)
            } else if (0.1..0.15).contains(&phase) {
                0.15
            } else {
                0.0
            };
        }
        let time_ms: Vec<f64> = (0..n).map(|i| i as f64 / fs * 1000.0).collect();
        LeadSignal {
            label,
            time_ms,
            amplitude_mv,
            sample_rate_hz: fs,
            confidence: 1.0,
            failure_reason: None,
        }
    }

    #[test]
    fn full_run_produces_plausible_rate_from_synthetic_lead_ii() {
        let leads = vec![synthetic_lead(LeadLabel::II, 75.0, 10.0)];
        let config = PipelineConfig::default();
        let measurements = MeasurementEngine::run(&leads, &config).expect("usable lead present");
        assert!(measurements.rate.value > 40.0 && measurements.rate.value < 150.0);
    }

    #[test]
    fn no_usable_leads_is_an_error() {
        let leads = vec![LeadSignal::failed(LeadLabel::II, "tracing_failed")];
        let config = PipelineConfig::default();
        assert!(MeasurementEngine::run(&leads, &config).is_err());
    }
}
