//! Builds the `VisualizationContract`'s archetype-dependent sections:
//! activation sequence, conduction system state, repolarization summary,
//! and the evidence/modeled display-contract split (spec §4.4).

use std::collections::BTreeMap;

use crate::types::{
    ActivationEvent, Archetype, ClassifierOutput, ConductionSystem, DisplayContract, InjuryCurrentRegion, Measurements,
    Repolarization,
};

/// Archetype-based confidence is fixed at 0.7: these are modeled
/// reconstructions, not direct measurements, but not arbitrary guesses
/// either.
const ARCHETYPE_CONFIDENCE: f64 = 0.7;

pub fn build_activation_sequence(archetype: &Archetype) -> Vec<ActivationEvent> {
    archetype
        .activation_sequence
        .iter()
        .map(|step| ActivationEvent {
            structure_name: step.structure.clone(),
            onset_ms: step.onset_ms,
            offset_ms: step.offset_ms,
            propagation_direction_vector: step.propagation_direction,
            confidence: ARCHETYPE_CONFIDENCE,
        })
        .collect()
}

pub fn build_conduction_system(archetype: &Archetype, classifier_output: &ClassifierOutput, measurements: &Measurements) -> ConductionSystem {
    let sa_node_rate = if measurements.rate.value > 0.0 { Some(measurements.rate.value) } else { None };

    let av_node_delay_ms = measurements
        .pr_interval
        .as_ref()
        .filter(|pr| pr.value > 0.0)
        .map(|pr| pr.value)
        .unwrap_or_else(|| *archetype.conduction_delays.get("av_node").unwrap_or(&120.0));

    let conduction_lower: Vec<String> = classifier_output.conduction_abnormalities.iter().map(|s| s.to_lowercase()).collect();
    let lbbb = conduction_lower.iter().any(|s| s.contains("left bundle branch"));
    let rbbb = conduction_lower.iter().any(|s| s.contains("right bundle branch"));
    let wpw = conduction_lower.iter().any(|s| s.contains("wolff-parkinson-white"));

    ConductionSystem {
        sa_node_rate,
        internodal_tracts_intact: !lbbb && !rbbb,
        av_node_delay_ms,
        his_bundle_intact: !(lbbb && rbbb),
        lbbb,
        rbbb,
        wpw,
        accessory_pathway_vector: if wpw { Some(crate::types::Vec3::new(-1.0, 0.0, 0.0)) } else { None },
    }
}

const INFERIOR_LEADS: &[&str] = &["II", "III", "aVF"];
const ANTERIOR_LEADS: &[&str] = &["V1", "V2", "V3", "V4"];
const LATERAL_LEADS: &[&str] = &["I", "aVL", "V5", "V6"];

pub fn build_repolarization(measurements: &Measurements) -> Repolarization {
    let st_deviation_by_lead: BTreeMap<String, f64> = measurements
        .st_deviations
        .iter()
        .map(|st| (st.lead_name.clone(), st.deviation_mv))
        .collect();

    let t_wave_axis = estimate_t_wave_axis(measurements);

    let repolarization_gradient_map: BTreeMap<String, f64> = measurements
        .t_wave_details
        .iter()
        .filter_map(|t| t.amplitude_mv.map(|amp| (t.lead_name.clone(), amp.abs())))
        .collect();

    let mut injury_current_regions = Vec::new();
    for (location, leads) in [("inferior", INFERIOR_LEADS), ("anterior", ANTERIOR_LEADS), ("lateral", LATERAL_LEADS)] {
        let deviations: Vec<f64> = leads
            .iter()
            .filter_map(|lead| st_deviation_by_lead.get(*lead))
            .copied()
            .filter(|&d| d > 0.1)
            .collect();
        if deviations.len() >= 2 {
            let magnitude = deviations.iter().cloned().fold(f64::MIN, f64::max);
            injury_current_regions.push(InjuryCurrentRegion {
                location: location.to_string(),
                magnitude_mv: (magnitude * 1000.0).round() / 1000.0,
            });
        }
    }

    Repolarization {
        st_deviation_by_lead,
        t_wave_axis,
        repolarization_gradient_map,
        injury_current_regions,
    }
}

fn estimate_t_wave_axis(measurements: &Measurements) -> Option<f64> {
    let t_i = measurements.t_wave_details.iter().find(|t| t.lead_name == "I").and_then(|t| t.amplitude_mv);
    let t_avf = measurements.t_wave_details.iter().find(|t| t.lead_name == "aVF").and_then(|t| t.amplitude_mv);
    match (t_i, t_avf) {
        (Some(i), Some(avf)) => Some((avf.atan2(i).to_degrees() * 10.0).round() / 10.0),
        _ => None,
    }
}

pub fn build_display_contract(measurements: &Measurements, classifier_output: &ClassifierOutput, repolarization: &Repolarization) -> DisplayContract {
    let mut evidence_supported = Vec::new();

    if measurements.rate.confidence > 0.3 {
        evidence_supported.push(format!("Heart rate: {:.0} bpm", measurements.rate.value));
    }
    if !measurements.rhythm_description.is_empty() {
        evidence_supported.push(format!("Rhythm: {}", measurements.rhythm_description));
    }
    if let Some(pr) = &measurements.pr_interval {
        if pr.confidence > 0.3 {
            evidence_supported.push(format!("PR interval: {:.0} ms", pr.value));
        }
    }
    if measurements.qrs_duration.confidence > 0.3 {
        evidence_supported.push(format!("QRS duration: {:.0} ms", measurements.qrs_duration.value));
    }
    if measurements.qt_interval.confidence > 0.3 {
        evidence_supported.push(format!(
            "QT interval: {:.0} ms (QTc Bazett: {:.0} ms)",
            measurements.qt_interval.value, measurements.qtc_bazett.value
        ));
    }
    if measurements.axis_degrees.confidence > 0.3 {
        evidence_supported.push(format!("Electrical axis: {:.0} degrees ({:?})", measurements.axis_degrees.value, measurements.axis_quadrant));
    }

    let notable_st: Vec<String> = measurements
        .st_deviations
        .iter()
        .filter(|st| st.deviation_mv.abs() > 0.05)
        .take(6)
        .map(|st| format!("{}: {:+.2} mV", st.lead_name, st.deviation_mv))
        .collect();
    if !notable_st.is_empty() {
        evidence_supported.push(format!("ST deviation — {}", notable_st.join(", ")));
    }

    if measurements.lvh_sokolow_lyon || measurements.lvh_cornell {
        evidence_supported.push(format!("LVH voltage criteria met — {}", measurements.voltage_criteria_explanation));
    }
    if measurements.rvh_present {
        evidence_supported.push(format!("RVH voltage criteria met — {}", measurements.voltage_criteria_explanation));
    }
    evidence_supported.push(format!("Primary finding: {}", classifier_output.primary_finding));

    let mut modeled_assumption = vec![
        "Activation sequence is drawn from a named archetype id, not measured directly from the tracing.".to_string(),
        "Conduction system timing (AV, His-Purkinje) is inferred from interval measurements where available, otherwise from archetype defaults.".to_string(),
        "Propagation direction vectors are anatomically approximate, not patient-specific.".to_string(),
    ];
    if repolarization.st_deviation_by_lead.values().any(|v| v.abs() > 0.1) {
        modeled_assumption.push("Injury current localization is a coarse regional approximation, not vessel-specific.".to_string());
    }

    DisplayContract {
        evidence_supported,
        modeled_assumption,
    }
}
