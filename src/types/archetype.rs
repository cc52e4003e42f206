//! Electromechanical archetype library types: teaching reconstructions of
//! the cardiac activation sequence for a given finding, never a claim about
//! the individual patient's true internal state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// One step of a modeled activation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationStep {
    pub structure: String,
    pub onset_ms: f64,
    pub offset_ms: f64,
    pub propagation_direction: Vec3,
    pub label: String,
}

/// A named textbook reconstruction of an electrical activation sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    pub activation_sequence: Vec<ActivationStep>,
    /// Named conduction delays in ms; -1 denotes "blocked".
    pub conduction_delays: HashMap<String, f64>,
    pub mechanical_label: String,
    pub teaching_note: String,
    pub tags: Vec<String>,
    /// Always true: every archetype is a teaching reconstruction, never a
    /// measured quantity.
    pub is_explanatory_reconstruction: bool,
}
