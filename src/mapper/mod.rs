//! `ClassifierOutput` + `Measurements` → archetype, conduction system,
//! repolarization, uncertainty, and display contract (spec §4.4).
//!
//! Unlike the Digitizer, MeasurementEngine, and Classifier, this stage does
//! not own a single scalar-producing algorithm; it assembles several
//! independent sub-builders into the pieces of the final
//! `VisualizationContract` that the orchestrator stitches together.

pub mod archetype_library;
mod contract_builder;
pub mod frontend_adapter;
mod uncertainty;

use crate::config::PipelineConfig;
use crate::types::{Archetype, ClassifierOutput, ConductionSystem, DisplayContract, Measurements, Repolarization, Uncertainty};

pub struct MapperOutput {
    pub archetype: &'static Archetype,
    pub activation_sequence: Vec<crate::types::ActivationEvent>,
    pub conduction_system: ConductionSystem,
    pub repolarization: Repolarization,
    pub uncertainty: Uncertainty,
    pub display_contract: DisplayContract,
}

pub struct ArchetypeMapper;

impl ArchetypeMapper {
    pub fn run(classifier_output: &ClassifierOutput, measurements: &Measurements, config: &PipelineConfig) -> MapperOutput {
        let finding_key = archetype_library::finding_key_from_display_name(&classifier_output.primary_finding);
        let archetype_id = archetype_library::find_best_archetype(finding_key);
        let archetype = archetype_library::get_archetype(archetype_id)
            .unwrap_or_else(|| archetype_library::get_archetype("normal_sinus").expect("normal_sinus archetype always present"));

        let activation_sequence = contract_builder::build_activation_sequence(archetype);
        let conduction_system = contract_builder::build_conduction_system(archetype, classifier_output, measurements);
        let repolarization = contract_builder::build_repolarization(measurements);
        let display_contract = contract_builder::build_display_contract(measurements, classifier_output, &repolarization);
        let uncertainty = uncertainty::assess_uncertainty(classifier_output, measurements, &config.uncertainty);

        MapperOutput {
            archetype,
            activation_sequence,
            conduction_system,
            repolarization,
            uncertainty,
            display_contract,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassifierOutput, Measurements};

    #[test]
    fn normal_sinus_primary_maps_to_normal_sinus_archetype() {
        let config = PipelineConfig::default();
        let classifier_output = ClassifierOutput {
            primary_finding: "Normal sinus rhythm".to_string(),
            differentials: vec![],
            rhythm: "Normal sinus rhythm".to_string(),
            conduction_abnormalities: vec![],
        };
        let measurements = Measurements::degraded_fallback();
        let output = ArchetypeMapper::run(&classifier_output, &measurements, &config);
        assert_eq!(output.archetype.id, "normal_sinus");
        assert!(!output.activation_sequence.is_empty());
    }

    #[test]
    fn unrecognized_primary_falls_back_to_normal_sinus() {
        let config = PipelineConfig::default();
        let classifier_output = ClassifierOutput {
            primary_finding: "Indeterminate — insufficient data".to_string(),
            differentials: vec![],
            rhythm: "undetermined".to_string(),
            conduction_abnormalities: vec![],
        };
        let measurements = Measurements::degraded_fallback();
        let output = ArchetypeMapper::run(&classifier_output, &measurements, &config);
        assert_eq!(output.archetype.id, "normal_sinus");
    }
}
