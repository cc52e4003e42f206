//! Thinner rendering of a `VisualizationContract` for the 3-D visualization
//! layer (spec §6). Folds internal fine-grained activation structures into
//! the frontend's coarser structure-id union.

use std::collections::BTreeMap;

use crate::types::{
    FrontendActivationEvent, FrontendAdapterView, FrontendIntervals, PhaseBoundaries, TimeRange, VisualizationContract, Waveform,
};

fn fold_structure_id(structure: &str) -> &'static str {
    match structure {
        "sa_node" => "sa_node",
        "right_atrium" | "left_atrium" => "internodal",
        "av_node" => "av_node",
        "his_bundle" => "his_bundle",
        "left_bundle" | "left_anterior_fascicle" | "left_posterior_fascicle" => "left_bundle",
        "right_bundle" => "right_bundle",
        _ => "purkinje",
    }
}

pub fn build_frontend_view(contract: &VisualizationContract, waveforms: Option<BTreeMap<String, Waveform>>) -> FrontendAdapterView {
    let cardiac_cycle_duration_ms = if contract.measurements.rate.value > 0.0 {
        Some((60_000.0 / contract.measurements.rate.value).round())
    } else {
        None
    };

    let activation_sequence = contract
        .activation_sequence
        .iter()
        .map(|event| FrontendActivationEvent {
            structure_id: fold_structure_id(&event.structure_name).to_string(),
            onset_ms: event.onset_ms,
            duration_ms: (event.offset_ms - event.onset_ms).max(0.0),
        })
        .collect();

    let intervals = FrontendIntervals {
        pr_ms: contract.measurements.pr_interval.as_ref().map(|pr| pr.value),
        qrs_ms: contract.measurements.qrs_duration.value,
        qt_ms: contract.measurements.qt_interval.value,
    };

    let phase_boundaries = build_phase_boundaries(contract);

    FrontendAdapterView {
        session_id: contract.session_id.clone(),
        cardiac_cycle_duration_ms,
        activation_sequence,
        intervals,
        waveforms,
        phase_boundaries,
    }
}

fn build_phase_boundaries(contract: &VisualizationContract) -> Option<PhaseBoundaries> {
    let m = &contract.measurements;
    let qrs_start = m.pr_interval.as_ref().map(|pr| pr.value).unwrap_or(0.0);
    let qrs_end = qrs_start + m.qrs_duration.value;

    let p_wave = m.pr_interval.as_ref().map(|pr| TimeRange {
        start_ms: (pr.value - 80.0).max(0.0),
        end_ms: pr.value,
    });
    let pr_segment = m.pr_interval.as_ref().map(|_| TimeRange {
        start_ms: 0.0,
        end_ms: qrs_start,
    });
    let st_segment = Some(TimeRange {
        start_ms: qrs_end,
        end_ms: qrs_end + 80.0,
    });
    let t_wave = Some(TimeRange {
        start_ms: qrs_end + 80.0,
        end_ms: m.qt_interval.value.max(qrs_end + 80.0),
    });

    Some(PhaseBoundaries {
        p_wave,
        pr_segment,
        qrs: TimeRange { start_ms: qrs_start, end_ms: qrs_end },
        st_segment,
        t_wave,
    })
}
