//! Grid calibration model produced by the Digitizer's grid-characterization
//! and calibration-pulse stages.

use serde::{Deserialize, Serialize};

/// Geometry and calibration of the ECG paper grid, immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    /// Small-square pixel pitch `s` (> 0).
    pub small_square_px: f64,
    /// Large-square pixel pitch, always `5 * small_square_px`.
    pub large_square_px: f64,
    /// Paper speed in mm/s (default 25).
    pub paper_speed_mm_s: f64,
    /// Amplitude scale in mm/mV (default 10).
    pub amplitude_scale_mm_mv: f64,
    pub image_width: u32,
    pub image_height: u32,
    /// Measured calibration-pulse amplitude in mV, if a pulse was found.
    pub calibration_pulse_mv: Option<f64>,
    pub calibration_detected: bool,
}

impl GridModel {
    /// The pipeline-wide fallback used when grid characterization fails
    /// entirely (spec step 3, final fallback).
    pub fn fallback(image_width: u32, image_height: u32) -> Self {
        Self {
            small_square_px: 4.0,
            large_square_px: 20.0,
            paper_speed_mm_s: 25.0,
            amplitude_scale_mm_mv: 10.0,
            image_width,
            image_height,
            calibration_pulse_mv: None,
            calibration_detected: false,
        }
    }

    pub fn new(small_square_px: f64, image_width: u32, image_height: u32) -> Self {
        Self {
            small_square_px,
            large_square_px: small_square_px * 5.0,
            paper_speed_mm_s: 25.0,
            amplitude_scale_mm_mv: 10.0,
            image_width,
            image_height,
            calibration_pulse_mv: None,
            calibration_detected: false,
        }
    }

    pub fn pixels_per_second(&self) -> f64 {
        self.small_square_px * self.paper_speed_mm_s
    }

    pub fn pixels_per_mv(&self) -> f64 {
        self.small_square_px * self.amplitude_scale_mm_mv
    }
}

/// The standard 12-lead label set plus the optional rhythm strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadLabel {
    I,
    II,
    III,
    #[serde(rename = "aVR")]
    AVR,
    #[serde(rename = "aVL")]
    AVL,
    #[serde(rename = "aVF")]
    AVF,
    V1,
    V2,
    V3,
    V4,
    V5,
    V6,
    #[serde(rename = "II_rhythm")]
    IIRhythm,
}

impl LeadLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadLabel::I => "I",
            LeadLabel::II => "II",
            LeadLabel::III => "III",
            LeadLabel::AVR => "aVR",
            LeadLabel::AVL => "aVL",
            LeadLabel::AVF => "aVF",
            LeadLabel::V1 => "V1",
            LeadLabel::V2 => "V2",
            LeadLabel::V3 => "V3",
            LeadLabel::V4 => "V4",
            LeadLabel::V5 => "V5",
            LeadLabel::V6 => "V6",
            LeadLabel::IIRhythm => "II_rhythm",
        }
    }

    /// The standard 3x4 grid layout (spec §4.1 step 5).
    pub fn grid_3x4() -> [[LeadLabel; 4]; 3] {
        use LeadLabel::*;
        [[I, AVR, V1, V4], [II, AVL, V2, V5], [III, AVF, V3, V6]]
    }

    /// The alternative 6x2 grid layout.
    pub fn grid_6x2() -> [[LeadLabel; 2]; 6] {
        use LeadLabel::*;
        [
            [I, V1],
            [II, V2],
            [III, V3],
            [AVR, V4],
            [AVL, V5],
            [AVF, V6],
        ]
    }
}

/// Axis-aligned pixel region identified during lead segmentation. Discarded
/// after waveform extraction; never serialized to the output contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadRegion {
    pub label: LeadLabel,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Whether the 12/13 leads were captured at the same instant or stitched
/// together from sequential strips (spec §4.1 step 10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcquisitionType {
    Simultaneous,
    Stitched,
}
