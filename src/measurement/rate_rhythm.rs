//! Rate and rhythm-regularity classification from R-R intervals.

use super::filters::{mean, stddev};
use crate::config::MeasurementThresholds;
use crate::types::{MeasurementScalar, RhythmRegularity};

pub struct RateAndRhythm {
    pub rate: MeasurementScalar,
    pub regularity: RhythmRegularity,
    pub description: String,
    pub n_beats: usize,
    pub rr_intervals_ms: Vec<f64>,
}

pub fn compute_rr_intervals(r_peak_samples: &[usize], fs: f64) -> Vec<f64> {
    r_peak_samples
        .windows(2)
        .map(|w| (w[1] - w[0]) as f64 / fs * 1000.0)
        .collect()
}

pub fn measure_rate_and_rhythm(r_peak_samples: &[usize], fs: f64, config: &MeasurementThresholds) -> RateAndRhythm {
    let rr = compute_rr_intervals(r_peak_samples, fs);
    let n_beats = r_peak_samples.len();

    if rr.is_empty() {
        return RateAndRhythm {
            rate: MeasurementScalar::unmeasured("bpm", "rr_interval_mean"),
            regularity: RhythmRegularity::IrregularlyIrregular,
            description: "no beats detected".to_string(),
            n_beats,
            rr_intervals_ms: rr,
        };
    }

    let mean_rr = mean(&rr);
    let rate_value = if mean_rr > 0.0 { 60_000.0 / mean_rr } else { 0.0 };
    let confidence = (n_beats as f64 / config.rate_confidence_beats_for_full).min(1.0);

    let cv = if mean_rr > 0.0 { stddev(&rr) / mean_rr } else { 0.0 };
    let regularity = if cv < config.rr_cv_regular_max {
        RhythmRegularity::Regular
    } else if cv < config.rr_cv_mildly_irregular_max {
        RhythmRegularity::MildlyIrregular
    } else {
        RhythmRegularity::IrregularlyIrregular
    };

    let description = match regularity {
        RhythmRegularity::Regular => format!("regular rhythm at {rate_value:.0} bpm"),
        RhythmRegularity::MildlyIrregular => format!("mildly irregular rhythm at {rate_value:.0} bpm"),
        RhythmRegularity::IrregularlyIrregular => "irregularly irregular rhythm".to_string(),
    };

    RateAndRhythm {
        rate: MeasurementScalar::new(rate_value, "bpm", "rr_interval_mean", confidence),
        regularity,
        description,
        n_beats,
        rr_intervals_ms: rr,
    }
}
