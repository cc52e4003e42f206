//! Thin stage sequencer: Digitizer → MeasurementEngine → Classifier →
//! ArchetypeMapper/UncertaintyEngine/ContractBuilder (spec §4.5).
//!
//! Each stage's failure is isolated and converted into a warning string
//! plus `pipeline_degraded = true` rather than propagated; the contract
//! produced here is never null.

use std::time::Instant;

use crate::classifier::Classifier;
use crate::config::PipelineConfig;
use crate::digitizer::Digitizer;
use crate::mapper::ArchetypeMapper;
use crate::measurement::MeasurementEngine;
use crate::types::{
    Bitmap, ClassifierOutput, DigitizationConfidence, EcgMetadata, Interpretation, Measurements, VisualizationContract,
};

pub struct Orchestrator;

impl Orchestrator {
    pub fn run(bitmap: &Bitmap, session_id: impl Into<String>, config: &PipelineConfig) -> VisualizationContract {
        let session_id = session_id.into();
        let mut warnings = Vec::new();
        let mut pipeline_degraded = false;

        let stage_start = Instant::now();
        let digitized = Digitizer::run(bitmap, config);
        tracing::debug!(elapsed_ms = stage_start.elapsed().as_secs_f64() * 1000.0, "digitizer stage complete");
        warnings.extend(digitized.warnings.iter().cloned());
        if !digitized.ready_for_interpretation {
            pipeline_degraded = true;
        }

        let stage_start = Instant::now();
        let measurements = match MeasurementEngine::run(&digitized.leads, config) {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(error = %e, "measurement stage failed; substituting degraded fallback");
                warnings.push(format!("measurement stage degraded: {e}"));
                pipeline_degraded = true;
                Measurements::degraded_fallback()
            }
        };
        tracing::debug!(elapsed_ms = stage_start.elapsed().as_secs_f64() * 1000.0, "measurement stage complete");

        let stage_start = Instant::now();
        let classifier_output = Classifier::run(&measurements, config.classifier.drop_below_probability);
        tracing::debug!(elapsed_ms = stage_start.elapsed().as_secs_f64() * 1000.0, "classifier stage complete");

        let stage_start = Instant::now();
        let mapper_output = ArchetypeMapper::run(&classifier_output, &measurements, config);
        tracing::debug!(elapsed_ms = stage_start.elapsed().as_secs_f64() * 1000.0, "mapper stage complete");

        let digitization_confidence: Vec<DigitizationConfidence> = digitized
            .leads
            .iter()
            .map(|lead| DigitizationConfidence {
                lead_name: lead.label.as_str().to_string(),
                confidence: lead.confidence,
                failure_reason: lead.failure_reason.clone(),
            })
            .collect();

        let ecg_metadata = EcgMetadata {
            paper_speed: digitized.grid.paper_speed_mm_s,
            amplitude_scale: digitized.grid.amplitude_scale_mm_mv,
            lead_count: digitized.leads.len(),
            acquisition_type: digitized.acquisition_type,
            digitization_confidence,
        };

        let interpretation = interpretation_from(&classifier_output);

        VisualizationContract {
            session_id,
            ecg_metadata,
            measurements,
            interpretation,
            activation_sequence: mapper_output.activation_sequence,
            conduction_system: mapper_output.conduction_system,
            repolarization: mapper_output.repolarization,
            mechanical_archetype: mapper_output.archetype.id.clone(),
            uncertainty: mapper_output.uncertainty,
            display_contract: mapper_output.display_contract,
            pipeline_degraded,
            pipeline_warnings: warnings,
        }
    }
}

fn interpretation_from(classifier_output: &ClassifierOutput) -> Interpretation {
    Interpretation {
        primary_diagnosis: classifier_output.primary_finding.clone(),
        differentials: classifier_output.differentials.clone(),
        rhythm: classifier_output.rhythm.clone(),
        conduction_abnormalities: classifier_output.conduction_abnormalities.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bitmap_produces_a_non_null_degraded_contract() {
        let config = PipelineConfig::default();
        let bitmap = Bitmap::new(0, 0);
        let contract = Orchestrator::run(&bitmap, "session-1", &config);
        assert!(contract.pipeline_degraded);
        assert_eq!(contract.mechanical_archetype, "normal_sinus");
        assert!(!contract.pipeline_warnings.is_empty());
    }

    #[test]
    fn small_blank_bitmap_still_yields_a_contract() {
        let config = PipelineConfig::default();
        let bitmap = Bitmap::new(200, 200);
        let contract = Orchestrator::run(&bitmap, "session-2", &config);
        assert_eq!(contract.session_id, "session-2");
        assert!(!contract.interpretation.primary_diagnosis.is_empty());
    }
}
