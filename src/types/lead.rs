//! Per-lead reconstructed signal, the Digitizer's primary output.

use serde::{Deserialize, Serialize};

use super::grid::LeadLabel;

/// A reconstructed voltage-vs-time trace for one lead.
///
/// `time_ms` and `amplitude_mv` are parallel, equal-length, time-ordered.
/// If `failure_reason` is set the signal may be a single sentinel sample
/// and `confidence` is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadSignal {
    pub label: LeadLabel,
    pub time_ms: Vec<f64>,
    pub amplitude_mv: Vec<f64>,
    pub sample_rate_hz: f64,
    pub confidence: f64,
    pub failure_reason: Option<String>,
}

impl LeadSignal {
    pub fn failed(label: LeadLabel, reason: impl Into<String>) -> Self {
        Self {
            label,
            time_ms: vec![0.0],
            amplitude_mv: vec![0.0],
            sample_rate_hz: 500.0,
            confidence: 0.0,
            failure_reason: Some(reason.into()),
        }
    }

    pub fn duration_ms(&self) -> f64 {
        match (self.time_ms.first(), self.time_ms.last()) {
            (Some(first), Some(last)) => (last - first).max(0.0),
            _ => 0.0,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.failure_reason.is_none() && self.confidence > 0.0 && self.amplitude_mv.len() > 1
    }
}
