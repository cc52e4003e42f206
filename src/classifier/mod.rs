//! `Measurements` → ranked `Differential[]` (spec §4.3).
//!
//! Runs all checkers in `checkers::ALL_CHECKERS` independently; a panicking
//! checker is caught and dropped rather than aborting the whole classifier,
//! mirroring the teacher's per-specialist failure isolation.

mod checkers;
mod icd10;

use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::types::{ClassifierOutput, Criterion, Differential, Measurements, ProbabilityTier, RhythmRegularity};

use checkers::{FindingCandidate, CONDUCTION_FINDING_NAMES, RHYTHM_FINDING_NAMES};

pub struct Classifier;

impl Classifier {
    pub fn run(measurements: &Measurements, drop_below_probability: f64) -> ClassifierOutput {
        let mut candidates: Vec<FindingCandidate> = Vec::new();
        for checker in checkers::ALL_CHECKERS {
            match catch_unwind(AssertUnwindSafe(|| checker(measurements))) {
                Ok(candidate) => candidates.push(candidate),
                Err(_) => {
                    tracing::warn!("a classifier checker panicked; dropping its candidate");
                }
            }
        }

        candidates.sort_by(|a, b| b.base_probability.partial_cmp(&a.base_probability).unwrap_or(std::cmp::Ordering::Equal));

        let differentials: Vec<Differential> = candidates
            .iter()
            .filter(|c| c.base_probability >= drop_below_probability)
            .map(|c| Differential {
                name: c.display_name.clone(),
                icd10: c.icd10.map(str::to_string),
                probability: (c.base_probability * 1000.0).round() / 1000.0,
                tier: ProbabilityTier::from_probability(c.base_probability),
                criteria: c
                    .criteria
                    .iter()
                    .map(|cr| Criterion {
                        text: cr.name.to_string(),
                        met: cr.met,
                        detail: cr.detail.clone(),
                    })
                    .collect(),
                absent_criteria: c.criteria.iter().filter(|cr| !cr.met).map(|cr| cr.name.to_string()).collect(),
                recommended_tests: c.tests.iter().map(|t| t.to_string()).collect(),
            })
            .collect();

        let primary_finding = differentials
            .first()
            .map(|d| d.name.clone())
            .unwrap_or_else(|| ClassifierOutput::FALLBACK_PRIMARY.to_string());

        let rhythm = classify_rhythm(measurements, &candidates);
        let conduction_abnormalities = classify_conduction(&candidates);

        ClassifierOutput {
            primary_finding,
            differentials,
            rhythm,
            conduction_abnormalities,
        }
    }
}

fn classify_rhythm(m: &Measurements, candidates: &[FindingCandidate]) -> String {
    for candidate in candidates {
        if RHYTHM_FINDING_NAMES.contains(&candidate.name) && candidate.base_probability >= 0.5 {
            return candidate.display_name.clone();
        }
    }
    if m.rate.value == 0.0 {
        return "Rhythm indeterminate — rate could not be measured".to_string();
    }
    if m.rhythm_description.is_empty() {
        return "Rhythm not classified".to_string();
    }
    m.rhythm_description.clone()
}

fn classify_conduction(candidates: &[FindingCandidate]) -> Vec<String> {
    candidates
        .iter()
        .filter(|c| CONDUCTION_FINDING_NAMES.contains(&c.name) && c.base_probability >= 0.4)
        .map(|c| c.display_name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Measurements;

    #[test]
    fn normal_measurements_yield_normal_sinus_primary() {
        let mut m = Measurements::degraded_fallback();
        m.rate = crate::types::MeasurementScalar::new(72.0, "bpm", "test", 1.0);
        m.rhythm_regularity = RhythmRegularity::Regular;
        m.pr_interval = Some(crate::types::MeasurementScalar::new(160.0, "ms", "test", 1.0));
        m.qrs_duration = crate::types::MeasurementScalar::new(90.0, "ms", "test", 1.0);
        m.axis_degrees = crate::types::MeasurementScalar::new(30.0, "deg", "test", 1.0);
        m.p_waves = vec![crate::types::PWaveDetail {
            lead_name: "II".to_string(),
            present: true,
            duration_ms: Some(90.0),
            amplitude_mv: Some(0.1),
            morphology: Some(crate::types::PWaveMorphology::Normal),
        }];

        let output = Classifier::run(&m, 0.05);
        assert_eq!(output.primary_finding, "Normal sinus rhythm");
    }

    #[test]
    fn degraded_fallback_still_produces_a_primary_finding() {
        let m = Measurements::degraded_fallback();
        let output = Classifier::run(&m, 0.05);
        assert!(!output.primary_finding.is_empty());
    }
}
