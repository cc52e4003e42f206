//! Process-wide pipeline configuration.
//!
//! Mirrors the teacher's `WellConfig` pattern: a single `OnceLock`, set once
//! at process start, read by every stage thereafter with no locking.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

static PIPELINE_CONFIG: OnceLock<PipelineConfig> = OnceLock::new();

/// Initialize the process-wide config. Calling this twice is a logic error
/// in the caller (it is warned, not panicked, to match the teacher's
/// tolerance of double-init during test setup).
pub fn init(config: PipelineConfig) {
    if PIPELINE_CONFIG.set(config).is_err() {
        tracing::warn!("PipelineConfig::init called more than once; ignoring second call");
    }
}

/// Fetch the process-wide config.
///
/// # Panics
/// Panics if called before `init`. This is a startup bug: every binary
/// entry point must call `config::init` before touching the pipeline.
pub fn get() -> &'static PipelineConfig {
    PIPELINE_CONFIG
        .get()
        .expect("PipelineConfig::get called before init — startup bug")
}

pub fn is_initialized() -> bool {
    PIPELINE_CONFIG.get().is_some()
}

/// Ensure the config is initialized with defaults; used by tests and by
/// library entry points that don't care about customization.
pub fn ensure_default() {
    if !is_initialized() {
        init(PipelineConfig::default());
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigitizerThresholds {
    pub perspective_min_contour_area_fraction: f64,
    pub grid_fft_ignore_bins: usize,
    pub grid_pitch_min_px: f64,
    pub grid_pitch_max_px: f64,
    pub grid_hough_angle_tolerance_deg: f64,
    pub grid_hough_spacing_min_px: f64,
    pub grid_hough_spacing_max_px: f64,
    pub grid_fallback_pitch_px: f64,
    pub calibration_strip_fraction: f64,
    pub calibration_aspect_min: f64,
    pub calibration_aspect_max: f64,
    pub calibration_height_tolerance_fraction: f64,
    pub calibration_warn_deviation_mv: f64,
    pub segmentation_margin_top_bottom_fraction: f64,
    pub segmentation_margin_left_right_fraction: f64,
    pub adaptive_projection_threshold_stddev: f64,
    pub rhythm_strip_height_fraction: f64,
    pub rhythm_strip_variance_threshold: f64,
    pub grid_removal_ink_survival_fraction: f64,
    pub grid_removal_color_dominance_fraction: f64,
    pub grid_removal_morph_kernel_scale: f64,
    pub grid_removal_morph_kernel_min_px: f64,
    pub grid_removal_notch_harmonics: usize,
    pub grid_removal_notch_halfwidth_bins: usize,
    pub centerline_ink_threshold_fraction: f64,
    pub centerline_min_confident_columns_fraction: f64,
    pub centerline_continuity_fraction_of_height: f64,
    pub centerline_median_filter_width: usize,
    pub target_sample_rate_hz: f64,
    pub stitched_duration_threshold_ms: f64,
    pub readiness_confidence_floor: f64,
    pub readiness_min_usable_leads_warning: usize,
}

impl Default for DigitizerThresholds {
    fn default() -> Self {
        Self {
            perspective_min_contour_area_fraction: 0.20,
            grid_fft_ignore_bins: 3,
            grid_pitch_min_px: 2.0,
            grid_pitch_max_px: 30.0,
            grid_hough_angle_tolerance_deg: 5.0,
            grid_hough_spacing_min_px: 2.0,
            grid_hough_spacing_max_px: 50.0,
            grid_fallback_pitch_px: 4.0,
            calibration_strip_fraction: 0.15,
            calibration_aspect_min: 0.05,
            calibration_aspect_max: 0.5,
            calibration_height_tolerance_fraction: 0.30,
            calibration_warn_deviation_mv: 0.15,
            segmentation_margin_top_bottom_fraction: 0.05,
            segmentation_margin_left_right_fraction: 0.03,
            adaptive_projection_threshold_stddev: 0.3,
            rhythm_strip_height_fraction: 0.90,
            rhythm_strip_variance_threshold: 500.0,
            grid_removal_ink_survival_fraction: 0.005,
            grid_removal_color_dominance_fraction: 0.03,
            grid_removal_morph_kernel_scale: 1.5,
            grid_removal_morph_kernel_min_px: 12.0,
            grid_removal_notch_harmonics: 3,
            grid_removal_notch_halfwidth_bins: 2,
            centerline_ink_threshold_fraction: 0.20,
            centerline_min_confident_columns_fraction: 0.05,
            centerline_continuity_fraction_of_height: 0.20,
            centerline_median_filter_width: 3,
            target_sample_rate_hz: 500.0,
            stitched_duration_threshold_ms: 4000.0,
            readiness_confidence_floor: 0.05,
            readiness_min_usable_leads_warning: 6,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementThresholds {
    pub bandpass_low_hz: f64,
    pub bandpass_high_hz: f64,
    pub bandpass_order: usize,
    pub smoothing_window_ms: f64,
    pub r_peak_threshold_stddev: f64,
    pub r_peak_min_spacing_ms: f64,
    pub r_peak_refine_window_ms: f64,
    pub rr_cv_regular_max: f64,
    pub rr_cv_mildly_irregular_max: f64,
    pub rate_confidence_beats_for_full: f64,
    pub p_wave_search_start_ms: f64,
    pub p_wave_search_end_ms: f64,
    pub p_wave_min_prominence_mv: f64,
    pub p_wave_peaked_threshold_mv: f64,
    pub qrs_onset_derivative_fraction: f64,
    pub qrs_offset_derivative_fraction: f64,
    pub pr_search_start_ms: f64,
    pub pr_search_end_ms: f64,
    pub pr_deviation_fraction_of_noise: f64,
    pub pr_min_ms: f64,
    pub pr_max_ms: f64,
    pub qrs_min_ms: f64,
    pub qrs_max_ms: f64,
    pub qrs_confidence_beats_for_full: f64,
    pub t_peak_search_start_ms: f64,
    pub t_peak_search_end_ms: f64,
    pub t_end_deviation_threshold_mv: f64,
    pub axis_window_ms: f64,
    pub precordial_transition_ratio: f64,
    pub sokolow_lyon_threshold_mv: f64,
    pub cornell_threshold_mv: f64,
    pub rvh_threshold_mv: f64,
    pub st_measurement_offset_ms: f64,
    pub st_baseline_window_start_ms: f64,
    pub st_baseline_window_end_ms: f64,
    pub t_wave_window_start_ms: f64,
    pub t_wave_window_end_ms: f64,
    pub t_wave_upright_threshold_mv: f64,
    pub t_wave_inverted_threshold_mv: f64,
}

impl Default for MeasurementThresholds {
    fn default() -> Self {
        Self {
            bandpass_low_hz: 5.0,
            bandpass_high_hz: 30.0,
            bandpass_order: 3,
            smoothing_window_ms: 150.0,
            r_peak_threshold_stddev: 0.5,
            r_peak_min_spacing_ms: 200.0,
            r_peak_refine_window_ms: 50.0,
            rr_cv_regular_max: 0.15,
            rr_cv_mildly_irregular_max: 0.30,
            rate_confidence_beats_for_full: 5.0,
            p_wave_search_start_ms: 280.0,
            p_wave_search_end_ms: 80.0,
            p_wave_min_prominence_mv: 0.02,
            p_wave_peaked_threshold_mv: 0.25,
            qrs_onset_derivative_fraction: 0.20,
            qrs_offset_derivative_fraction: 0.15,
            pr_search_start_ms: 200.0,
            pr_search_end_ms: 40.0,
            pr_deviation_fraction_of_noise: 0.50,
            pr_min_ms: 80.0,
            pr_max_ms: 400.0,
            qrs_min_ms: 40.0,
            qrs_max_ms: 250.0,
            qrs_confidence_beats_for_full: 3.0,
            t_peak_search_start_ms: 200.0,
            t_peak_search_end_ms: 600.0,
            t_end_deviation_threshold_mv: 0.03,
            axis_window_ms: 60.0,
            precordial_transition_ratio: 1.0,
            sokolow_lyon_threshold_mv: 3.5,
            cornell_threshold_mv: 2.4,
            rvh_threshold_mv: 0.7,
            st_measurement_offset_ms: 60.0,
            st_baseline_window_start_ms: 300.0,
            st_baseline_window_end_ms: 200.0,
            t_wave_window_start_ms: 150.0,
            t_wave_window_end_ms: 400.0,
            t_wave_upright_threshold_mv: 0.05,
            t_wave_inverted_threshold_mv: -0.05,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierThresholds {
    pub drop_below_probability: f64,
    pub rhythm_label_min_probability: f64,
    pub conduction_label_min_probability: f64,
}

impl Default for ClassifierThresholds {
    fn default() -> Self {
        Self {
            drop_below_probability: 0.05,
            rhythm_label_min_probability: 0.5,
            conduction_label_min_probability: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UncertaintyThresholds {
    pub low_confidence_floor: f64,
    pub ambiguity_pair_min_probability: f64,
    pub second_rank_alternate_min_probability: f64,
}

impl Default for UncertaintyThresholds {
    fn default() -> Self {
        Self {
            low_confidence_floor: 0.5,
            ambiguity_pair_min_probability: 0.2,
            second_rank_alternate_min_probability: 0.3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStoreConfig {
    pub default_ttl_secs: u64,
    pub default_capacity: usize,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self {
            default_ttl_secs: 3600,
            default_capacity: 100,
        }
    }
}

/// Every numeric threshold named by the specification, grouped by stage.
/// Resolves the spec's open question about permissive-vs-strict grid
/// removal thresholds by taking the permissive set as the only default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub digitizer: DigitizerThresholds,
    pub measurement: MeasurementThresholds,
    pub classifier: ClassifierThresholds,
    pub uncertainty: UncertaintyThresholds,
    pub session_store: SessionStoreConfig,
}

impl PipelineConfig {
    /// Load order: explicit struct (handled by the caller) → the
    /// `CARDIOLENS_CONFIG` env var naming a TOML file → built-in defaults.
    pub fn load() -> Self {
        if let Ok(path) = std::env::var("CARDIOLENS_CONFIG") {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        tracing::warn!(path, error = %e, "failed to parse CARDIOLENS_CONFIG; using defaults");
                    }
                },
                Err(e) => {
                    tracing::warn!(path, error = %e, "failed to read CARDIOLENS_CONFIG; using defaults");
                }
            }
        }
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_permissive_grid_thresholds() {
        let cfg = PipelineConfig::default();
        assert_eq!(cfg.digitizer.grid_removal_color_dominance_fraction, 0.03);
        assert_eq!(cfg.digitizer.grid_removal_morph_kernel_min_px, 12.0);
    }

    #[test]
    fn load_falls_back_to_defaults_without_env(){
        std::env::remove_var("CARDIOLENS_CONFIG");
        let cfg = PipelineConfig::load();
        assert_eq!(cfg.classifier.drop_below_probability, 0.05);
    }
}
