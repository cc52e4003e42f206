//! Quantified invariants over arbitrary `Measurements` (probability
//! monotonicity, tier/probability correspondence, activation-event
//! ordering, confidence bounds, JSON round-trip). These construct
//! `Measurements` directly with `proptest`-driven scalars rather than
//! synthesizing waveforms, since the invariants are properties of the
//! Classifier/ArchetypeMapper stages, not of signal detection.

use proptest::prelude::*;

use cardiolens_core::classifier::Classifier;
use cardiolens_core::config::PipelineConfig;
use cardiolens_core::mapper::ArchetypeMapper;
use cardiolens_core::types::{AxisQuadrant, Measurements, MeasurementScalar, RhythmRegularity};

fn arbitrary_measurements(
    rate: f64,
    rate_confidence: f64,
    pr_present: bool,
    pr_value: f64,
    qrs_value: f64,
    axis_value: f64,
    axis_confidence: f64,
) -> Measurements {
    let mut m = Measurements::degraded_fallback();
    m.rate = MeasurementScalar::new(rate, "bpm", "proptest", rate_confidence);
    m.rhythm_regularity = RhythmRegularity::Regular;
    m.pr_interval = if pr_present { Some(MeasurementScalar::new(pr_value, "ms", "proptest", 0.8)) } else { None };
    m.qrs_duration = MeasurementScalar::new(qrs_value, "ms", "proptest", 0.8);
    m.axis_degrees = MeasurementScalar::new(axis_value, "deg", "proptest", axis_confidence);
    m.axis_quadrant = if (-30.0..=90.0).contains(&axis_value) {
        AxisQuadrant::Normal
    } else if axis_value < -30.0 {
        AxisQuadrant::Left
    } else {
        AxisQuadrant::Right
    };
    m
}

proptest! {
    #[test]
    fn differentials_are_sorted_by_descending_probability(
        rate in 20.0f64..220.0,
        rate_confidence in 0.0f64..1.0,
        pr_present in any::<bool>(),
        pr_value in 80.0f64..400.0,
        qrs_value in 40.0f64..220.0,
        axis_value in -170.0f64..170.0,
        axis_confidence in 0.0f64..1.0,
    ) {
        let config = PipelineConfig::default();
        let m = arbitrary_measurements(rate, rate_confidence, pr_present, pr_value, qrs_value, axis_value, axis_confidence);
        let output = Classifier::run(&m, config.classifier.drop_below_probability);
        for pair in output.differentials.windows(2) {
            prop_assert!(pair[0].probability >= pair[1].probability);
        }
    }

    #[test]
    fn differential_tier_always_matches_its_probability(
        rate in 20.0f64..220.0,
        rate_confidence in 0.0f64..1.0,
        pr_present in any::<bool>(),
        pr_value in 80.0f64..400.0,
        qrs_value in 40.0f64..220.0,
        axis_value in -170.0f64..170.0,
        axis_confidence in 0.0f64..1.0,
    ) {
        let config = PipelineConfig::default();
        let m = arbitrary_measurements(rate, rate_confidence, pr_present, pr_value, qrs_value, axis_value, axis_confidence);
        let output = Classifier::run(&m, config.classifier.drop_below_probability);
        for d in &output.differentials {
            let expected = cardiolens_core::types::ProbabilityTier::from_probability(d.probability);
            prop_assert_eq!(d.tier, expected);
        }
    }

    #[test]
    fn activation_events_are_ordered_by_non_decreasing_onset(
        rate in 20.0f64..220.0,
        rate_confidence in 0.0f64..1.0,
        pr_present in any::<bool>(),
        pr_value in 80.0f64..400.0,
        qrs_value in 40.0f64..220.0,
        axis_value in -170.0f64..170.0,
        axis_confidence in 0.0f64..1.0,
    ) {
        let config = PipelineConfig::default();
        let m = arbitrary_measurements(rate, rate_confidence, pr_present, pr_value, qrs_value, axis_value, axis_confidence);
        let classifier_output = Classifier::run(&m, config.classifier.drop_below_probability);
        let mapper_output = ArchetypeMapper::run(&classifier_output, &m, &config);
        for pair in mapper_output.activation_sequence.windows(2) {
            prop_assert!(pair[0].onset_ms <= pair[1].onset_ms);
        }
    }

    #[test]
    fn confidence_values_always_stay_within_unit_range(
        rate in 20.0f64..220.0,
        rate_confidence in -0.5f64..1.5,
        pr_present in any::<bool>(),
        pr_value in 80.0f64..400.0,
        qrs_value in 40.0f64..220.0,
        axis_value in -170.0f64..170.0,
        axis_confidence in -0.5f64..1.5,
    ) {
        let m = arbitrary_measurements(rate, rate_confidence, pr_present, pr_value, qrs_value, axis_value, axis_confidence);
        prop_assert!((0.0..=1.0).contains(&m.rate.confidence));
        prop_assert!((0.0..=1.0).contains(&m.axis_degrees.confidence));
    }

    #[test]
    fn primary_finding_never_contains_the_word_diagnose(
        rate in 20.0f64..220.0,
        rate_confidence in 0.0f64..1.0,
        pr_present in any::<bool>(),
        pr_value in 80.0f64..400.0,
        qrs_value in 40.0f64..220.0,
        axis_value in -170.0f64..170.0,
        axis_confidence in 0.0f64..1.0,
    ) {
        let config = PipelineConfig::default();
        let m = arbitrary_measurements(rate, rate_confidence, pr_present, pr_value, qrs_value, axis_value, axis_confidence);
        let output = Classifier::run(&m, config.classifier.drop_below_probability);
        prop_assert!(!output.primary_finding.to_lowercase().contains("diagnose"));
    }
}
