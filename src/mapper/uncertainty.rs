//! Uncertainty assessment (spec §4.4).
//!
//! Reconciles two overlapping mechanisms: measurement-confidence flags are
//! table-driven per parameter, and alternate-model suggestions combine a
//! static ambiguity-pair table with a generic second-ranked-differential
//! rule. Both ambiguity sources require *both* members of a pair to clear
//! `ambiguity_pair_min_probability` — stricter than a single-sided OR, so an
//! alternate model is only surfaced when the data genuinely supports two
//! competing readings rather than one weak aside.

use crate::config::UncertaintyThresholds;
use crate::types::{AlternateModel, ClassifierOutput, Measurements, Uncertainty};

const INHERENT_LIMITATIONS: &[&str] = &[
    "Surface ECG cannot resolve activation at single-cell resolution; the reconstruction is a textbook approximation.",
    "Coronary anatomy cannot be determined from the surface ECG alone; injury-current localization is not vessel-specific.",
    "Regional wall motion cannot be assessed from electrical activity; echocardiography is required for mechanical correlation.",
    "Distinguishing acute from chronic ST-T changes requires a prior tracing for comparison.",
];

struct AmbiguityPair {
    key_a: &'static str,
    key_b: &'static str,
    description: &'static str,
    discriminating_tests: &'static [&'static str],
}

const AMBIGUITY_PATTERNS: &[AmbiguityPair] = &[
    AmbiguityPair {
        key_a: "inferior_stemi",
        key_b: "early_repolarization",
        description: "ST elevation in the inferior leads can reflect either acute inferior injury or a benign early repolarization variant.",
        discriminating_tests: &["Serial troponin", "Comparison with prior ECG"],
    },
    AmbiguityPair {
        key_a: "anterior_stemi",
        key_b: "early_repolarization",
        description: "ST elevation in the anterior precordial leads can reflect either acute anterior injury or a benign early repolarization variant.",
        discriminating_tests: &["Serial troponin", "Comparison with prior ECG"],
    },
    AmbiguityPair {
        key_a: "pericarditis",
        key_b: "inferior_stemi",
        description: "Diffuse ST elevation with PR depression can mimic, or coexist with, acute inferior injury.",
        discriminating_tests: &["Echocardiogram for pericardial effusion", "Serial troponin"],
    },
    AmbiguityPair {
        key_a: "lbbb",
        key_b: "lvh",
        description: "Left bundle branch block and left ventricular hypertrophy can each produce similar voltage and repolarization patterns.",
        discriminating_tests: &["Echocardiogram for chamber size and wall thickness"],
    },
    AmbiguityPair {
        key_a: "rbbb",
        key_b: "rvh",
        description: "Right bundle branch block and right ventricular hypertrophy can each produce a dominant R wave in V1.",
        discriminating_tests: &["Echocardiogram for right heart size"],
    },
    AmbiguityPair {
        key_a: "wpw",
        key_b: "lbbb",
        description: "Pre-excitation via an accessory pathway can mimic a bundle branch block pattern on surface ECG.",
        discriminating_tests: &["Electrophysiology study"],
    },
    AmbiguityPair {
        key_a: "hyperkalemia",
        key_b: "third_degree_av_block",
        description: "Severe hyperkalemia can slow or block AV conduction, mimicking an intrinsic conduction system disease.",
        discriminating_tests: &["Serum potassium", "Response to calcium/bicarbonate/insulin-glucose treatment"],
    },
];

pub fn assess_uncertainty(
    classifier_output: &ClassifierOutput,
    measurements: &Measurements,
    config: &UncertaintyThresholds,
) -> Uncertainty {
    let mut underdetermined = measurement_uncertainty(measurements, config);

    underdetermined.push(
        "Internal activation sequence — reconstructed from surface ECG; intracardiac mapping would provide direct measurement.".to_string(),
    );
    underdetermined.extend(INHERENT_LIMITATIONS.iter().take(2).map(|s| s.to_string()));

    let finding_keys = extract_finding_keys(classifier_output, config.ambiguity_pair_min_probability);
    let mut alternate_models = diagnostic_ambiguity(&finding_keys);

    if alternate_models.is_empty() {
        if let Some(second) = classifier_output.differentials.get(1) {
            if second.probability >= config.second_rank_alternate_min_probability {
                alternate_models.push(AlternateModel {
                    description: format!("An alternate reading consistent with the data: {}.", second.name),
                    discriminating_test: second
                        .recommended_tests
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "Clinical correlation required".to_string()),
                });
            }
        }
    }

    Uncertainty {
        underdetermined_parameters: underdetermined,
        alternate_models,
    }
}

fn measurement_uncertainty(m: &Measurements, config: &UncertaintyThresholds) -> Vec<String> {
    let floor = config.low_confidence_floor;
    let mut out = Vec::new();

    if m.rate.confidence < floor {
        out.push(format!("Heart rate — low confidence ({:.0}%) in R peak detection.", m.rate.confidence * 100.0));
    }
    match &m.pr_interval {
        Some(pr) if pr.confidence < floor => {
            out.push(format!("PR interval — low confidence ({:.0}%) in P wave detection.", pr.confidence * 100.0));
        }
        None => out.push("PR interval — could not be measured.".to_string()),
        _ => {}
    }
    if m.qrs_duration.confidence < floor {
        out.push(format!("QRS duration — low confidence ({:.0}%) in onset/offset detection.", m.qrs_duration.confidence * 100.0));
    }
    if m.qt_interval.confidence < floor {
        out.push(format!("QT interval — low confidence ({:.0}%) in T wave end detection.", m.qt_interval.confidence * 100.0));
    }
    if m.qtc_bazett.confidence < floor {
        out.push(format!("QTc (Bazett) — low confidence ({:.0}%), derived from QT and rate.", m.qtc_bazett.confidence * 100.0));
    }
    if m.qtc_fridericia.confidence < floor {
        out.push(format!("QTc (Fridericia) — low confidence ({:.0}%), derived from QT and rate.", m.qtc_fridericia.confidence * 100.0));
    }
    if m.axis_degrees.confidence < floor {
        out.push(format!("Electrical axis — low confidence ({:.0}%) measurement.", m.axis_degrees.confidence * 100.0));
    }

    out
}

fn extract_finding_keys(classifier_output: &ClassifierOutput, min_probability: f64) -> Vec<&'static str> {
    classifier_output
        .differentials
        .iter()
        .filter(|d| d.probability >= min_probability)
        .map(|d| super::archetype_library::finding_key_from_display_name(&d.name))
        .collect()
}

fn diagnostic_ambiguity(finding_keys: &[&'static str]) -> Vec<AlternateModel> {
    let mut out = Vec::new();
    for pair in AMBIGUITY_PATTERNS {
        if finding_keys.contains(&pair.key_a) && finding_keys.contains(&pair.key_b) {
            out.push(AlternateModel {
                description: pair.description.to_string(),
                discriminating_test: pair.discriminating_tests.join("; "),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Differential, ProbabilityTier};

    fn differential(name: &str, probability: f64) -> Differential {
        Differential {
            name: name.to_string(),
            icd10: None,
            probability,
            tier: ProbabilityTier::from_probability(probability),
            criteria: vec![],
            absent_criteria: vec![],
            recommended_tests: vec!["Serial troponin".to_string()],
        }
    }

    #[test]
    fn ambiguity_pair_requires_both_members_above_threshold() {
        let config = UncertaintyThresholds::default();
        let output = ClassifierOutput {
            primary_finding: "Pattern consistent with acute inferior ST-elevation myocardial injury".to_string(),
            differentials: vec![
                differential("Pattern consistent with acute inferior ST-elevation myocardial injury", 0.6),
                differential("Pattern consistent with early repolarization", 0.1),
            ],
            rhythm: "Normal sinus rhythm".to_string(),
            conduction_abnormalities: vec![],
        };
        let m = Measurements::degraded_fallback();
        let result = assess_uncertainty(&output, &m, &config);
        assert!(result.alternate_models.is_empty(), "one member below threshold must not trigger the pair");
    }

    #[test]
    fn ambiguity_pair_triggers_when_both_members_clear_threshold() {
        let config = UncertaintyThresholds::default();
        let output = ClassifierOutput {
            primary_finding: "Pattern consistent with acute inferior ST-elevation myocardial injury".to_string(),
            differentials: vec![
                differential("Pattern consistent with acute inferior ST-elevation myocardial injury", 0.6),
                differential("Pattern consistent with early repolarization", 0.25),
            ],
            rhythm: "Normal sinus rhythm".to_string(),
            conduction_abnormalities: vec![],
        };
        let m = Measurements::degraded_fallback();
        let result = assess_uncertainty(&output, &m, &config);
        assert_eq!(result.alternate_models.len(), 1);
    }
}
