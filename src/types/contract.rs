//! The classifier's `Differential` list and the final `VisualizationContract`
//! emitted by the orchestrator.

use serde::{Deserialize, Serialize};

use super::archetype::Vec3;
use super::grid::AcquisitionType;
use super::measurement::Measurements;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbabilityTier {
    High,
    Moderate,
    Possible,
}

impl ProbabilityTier {
    /// Tier is a pure function of probability (spec §3 invariant).
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.7 {
            ProbabilityTier::High
        } else if p >= 0.4 {
            ProbabilityTier::Moderate
        } else {
            ProbabilityTier::Possible
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub text: String,
    pub met: bool,
    pub detail: Option<String>,
}

/// A ranked candidate finding. `name` never contains the substring
/// "diagnose" (system-wide invariant, enforced at emit time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Differential {
    pub name: String,
    pub icd10: Option<String>,
    pub probability: f64,
    pub tier: ProbabilityTier,
    pub criteria: Vec<Criterion>,
    pub absent_criteria: Vec<String>,
    pub recommended_tests: Vec<String>,
}

/// Classifier output (spec §4.3 contract).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub primary_finding: String,
    pub differentials: Vec<Differential>,
    pub rhythm: String,
    pub conduction_abnormalities: Vec<String>,
}

impl ClassifierOutput {
    pub const FALLBACK_PRIMARY: &'static str = "Indeterminate — insufficient data";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationEvent {
    pub structure_name: String,
    pub onset_ms: f64,
    pub offset_ms: f64,
    pub propagation_direction_vector: Vec3,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConductionSystem {
    pub sa_node_rate: Option<f64>,
    pub internodal_tracts_intact: bool,
    pub av_node_delay_ms: f64,
    pub his_bundle_intact: bool,
    pub lbbb: bool,
    pub rbbb: bool,
    pub wpw: bool,
    pub accessory_pathway_vector: Option<Vec3>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InjuryCurrentRegion {
    pub location: String,
    pub magnitude_mv: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repolarization {
    pub st_deviation_by_lead: std::collections::BTreeMap<String, f64>,
    pub t_wave_axis: Option<f64>,
    pub repolarization_gradient_map: std::collections::BTreeMap<String, f64>,
    pub injury_current_regions: Vec<InjuryCurrentRegion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternateModel {
    pub description: String,
    pub discriminating_test: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Uncertainty {
    pub underdetermined_parameters: Vec<String>,
    pub alternate_models: Vec<AlternateModel>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayContract {
    pub evidence_supported: Vec<String>,
    pub modeled_assumption: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigitizationConfidence {
    pub lead_name: String,
    pub confidence: f64,
    pub failure_reason: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcgMetadata {
    pub paper_speed: f64,
    pub amplitude_scale: f64,
    pub lead_count: usize,
    pub acquisition_type: AcquisitionType,
    pub digitization_confidence: Vec<DigitizationConfidence>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub primary_diagnosis: String,
    pub differentials: Vec<Differential>,
    pub rhythm: String,
    pub conduction_abnormalities: Vec<String>,
}

/// The canonical JSON contract (spec §6). Always well-formed; a degraded
/// run still produces one with `pipeline_degraded = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationContract {
    pub session_id: String,
    pub ecg_metadata: EcgMetadata,
    pub measurements: Measurements,
    pub interpretation: Interpretation,
    pub activation_sequence: Vec<ActivationEvent>,
    pub conduction_system: ConductionSystem,
    pub repolarization: Repolarization,
    pub mechanical_archetype: String,
    pub uncertainty: Uncertainty,
    pub display_contract: DisplayContract,
    pub pipeline_degraded: bool,
    pub pipeline_warnings: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start_ms: f64,
    pub end_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendActivationEvent {
    pub structure_id: String,
    pub onset_ms: f64,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendIntervals {
    pub pr_ms: Option<f64>,
    pub qrs_ms: f64,
    pub qt_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBoundaries {
    pub p_wave: Option<TimeRange>,
    pub pr_segment: Option<TimeRange>,
    pub qrs: TimeRange,
    pub st_segment: Option<TimeRange>,
    pub t_wave: Option<TimeRange>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    pub time_ms: Vec<f64>,
    pub amplitude_mv: Vec<f64>,
}

/// A thinner, frontend-oriented rendering of the same result (spec §6), with
/// internal fine-grained structures folded into the coarser union the
/// visualization layer understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendAdapterView {
    pub session_id: String,
    pub cardiac_cycle_duration_ms: Option<f64>,
    pub activation_sequence: Vec<FrontendActivationEvent>,
    pub intervals: FrontendIntervals,
    pub waveforms: Option<std::collections::BTreeMap<String, Waveform>>,
    pub phase_boundaries: Option<PhaseBoundaries>,
}
