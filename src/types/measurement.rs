//! The `Measurements` record and its constituent per-beat / per-lead detail
//! types, produced by the MeasurementEngine and consumed by the Classifier.

use serde::{Deserialize, Serialize};

/// A single scalar clinical measurement with full provenance.
///
/// Invariant: `confidence == 0.0` iff the measurement could not be produced
/// at all (a sentinel `value` of 0 is permitted in that case).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementScalar {
    pub value: f64,
    pub unit: String,
    pub method: String,
    pub confidence: f64,
}

impl MeasurementScalar {
    pub fn new(value: f64, unit: &str, method: &str, confidence: f64) -> Self {
        Self {
            value,
            unit: unit.to_string(),
            method: method.to_string(),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    pub fn unmeasured(unit: &str, method: &str) -> Self {
        Self {
            value: 0.0,
            unit: unit.to_string(),
            method: method.to_string(),
            confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhythmRegularity {
    Regular,
    MildlyIrregular,
    IrregularlyIrregular,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisQuadrant {
    Normal,
    Left,
    Right,
    Extreme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PWaveMorphology {
    Normal,
    Peaked,
    Retrograde,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TWavePolarity {
    Upright,
    Inverted,
    Flat,
    Biphasic,
}

/// P-wave detail for one lead, averaged across detected beats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PWaveDetail {
    pub lead_name: String,
    pub present: bool,
    pub duration_ms: Option<f64>,
    pub amplitude_mv: Option<f64>,
    pub morphology: Option<PWaveMorphology>,
}

/// ST-segment deviation for one lead, measured at J+60ms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct STDeviation {
    pub lead_name: String,
    pub deviation_mv: f64,
}

/// T-wave morphology and amplitude for one lead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TWaveDetail {
    pub lead_name: String,
    pub polarity: TWavePolarity,
    pub amplitude_mv: Option<f64>,
}

/// The full set of clinical measurements extracted from the reconstructed
/// leads. Every scalar field has a confidence and a method name; a `None`
/// for `pr_interval` means PR could not be measured on any beat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub rate: MeasurementScalar,
    pub rhythm_regularity: RhythmRegularity,
    pub rhythm_description: String,
    pub n_beats: usize,

    pub pr_interval: Option<MeasurementScalar>,
    pub qrs_duration: MeasurementScalar,
    pub qt_interval: MeasurementScalar,
    pub qtc_bazett: MeasurementScalar,
    pub qtc_fridericia: MeasurementScalar,
    pub axis_degrees: MeasurementScalar,
    pub axis_quadrant: AxisQuadrant,
    pub precordial_transition_lead: Option<String>,

    pub lvh_sokolow_lyon: bool,
    pub lvh_cornell: bool,
    pub rvh_present: bool,
    pub voltage_criteria_explanation: String,

    pub p_waves: Vec<PWaveDetail>,
    pub st_deviations: Vec<STDeviation>,
    pub t_wave_details: Vec<TWaveDetail>,
}

impl Measurements {
    /// An all-unmeasured record used by the orchestrator's fallback path
    /// (spec §4.5): every scalar present but zero-valued with confidence 0.
    pub fn degraded_fallback() -> Self {
        Self {
            rate: MeasurementScalar::unmeasured("bpm", "unavailable"),
            rhythm_regularity: RhythmRegularity::IrregularlyIrregular,
            rhythm_description: "undetermined".to_string(),
            n_beats: 0,
            pr_interval: None,
            qrs_duration: MeasurementScalar::unmeasured("ms", "unavailable"),
            qt_interval: MeasurementScalar::unmeasured("ms", "unavailable"),
            qtc_bazett: MeasurementScalar::unmeasured("ms", "unavailable"),
            qtc_fridericia: MeasurementScalar::unmeasured("ms", "unavailable"),
            axis_degrees: MeasurementScalar::unmeasured("deg", "unavailable"),
            axis_quadrant: AxisQuadrant::Normal,
            precordial_transition_lead: None,
            lvh_sokolow_lyon: false,
            lvh_cornell: false,
            rvh_present: false,
            voltage_criteria_explanation: "insufficient data".to_string(),
            p_waves: Vec::new(),
            st_deviations: Vec::new(),
            t_wave_details: Vec::new(),
        }
    }
}
