//! The 26 independent, failure-isolated diagnostic checkers (spec §4.3).
//!
//! Each checker inspects `Measurements` and returns a `FindingCandidate`
//! carrying its own criteria list and base probability; a panic inside one
//! checker is caught by `run_all` and only drops that candidate.

use crate::types::{Measurements, TWavePolarity};

use super::icd10::icd10_for;

pub struct CriterionResult {
    pub name: &'static str,
    pub met: bool,
    pub detail: Option<String>,
}

fn c(name: &'static str, met: bool) -> CriterionResult {
    CriterionResult { name, met, detail: None }
}

fn cd(name: &'static str, met: bool, detail: impl Into<String>) -> CriterionResult {
    CriterionResult { name, met, detail: Some(detail.into()) }
}

pub struct FindingCandidate {
    pub name: &'static str,
    pub display_name: String,
    pub icd10: Option<&'static str>,
    pub criteria: Vec<CriterionResult>,
    pub tests: Vec<&'static str>,
    pub base_probability: f64,
}

fn finish(name: &'static str, display_name: impl Into<String>, tests: Vec<&'static str>, criteria: Vec<CriterionResult>, scale: f64) -> FindingCandidate {
    let met = criteria.iter().filter(|c| c.met).count();
    let base = if criteria.is_empty() { 0.0 } else { met as f64 / criteria.len() as f64 * scale };
    FindingCandidate {
        name,
        display_name: display_name.into(),
        icd10: icd10_for(name),
        criteria,
        tests,
        base_probability: base,
    }
}

fn st_elevation_in_leads(m: &Measurements, leads: &[&str], threshold: f64) -> bool {
    m.st_deviations
        .iter()
        .filter(|st| leads.contains(&st.lead_name.as_str()) && st.deviation_mv >= threshold)
        .count()
        >= 2
}

fn st_depression_in_leads(m: &Measurements, leads: &[&str], threshold: f64) -> bool {
    m.st_deviations
        .iter()
        .filter(|st| leads.contains(&st.lead_name.as_str()) && st.deviation_mv <= -threshold)
        .count()
        >= 2
}

fn t_inverted_in_leads(m: &Measurements, leads: &[&str]) -> bool {
    m.t_wave_details
        .iter()
        .filter(|tw| leads.contains(&tw.lead_name.as_str()) && tw.polarity == TWavePolarity::Inverted)
        .count()
        >= 2
}

fn st_deviation(m: &Measurements, lead: &str) -> f64 {
    m.st_deviations.iter().find(|st| st.lead_name == lead).map(|st| st.deviation_mv).unwrap_or(0.0)
}

fn p_waves_present(m: &Measurements) -> bool {
    m.p_waves.iter().any(|pw| pw.lead_name == "II" && pw.present)
}

fn p_waves_absent(m: &Measurements) -> bool {
    !p_waves_present(m)
}

fn rhythm_regular(m: &Measurements) -> bool {
    matches!(m.rhythm_regularity, crate::types::RhythmRegularity::Regular)
}

fn check_normal_sinus(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        cd("Rate 60-100 bpm", (60.0..=100.0).contains(&m.rate.value), format!("Rate: {:.0} bpm", m.rate.value)),
        cd("Regular rhythm", rhythm_regular(m), m.rhythm_description.clone()),
        c("P waves present in lead II", p_waves_present(m)),
        cd(
            "PR interval 120-200ms",
            m.pr_interval.as_ref().is_some_and(|pr| (120.0..=200.0).contains(&pr.value)),
            format!("PR: {} ms", m.pr_interval.as_ref().map(|pr| pr.value.to_string()).unwrap_or_else(|| "N/A".into())),
        ),
        cd("QRS < 120ms", m.qrs_duration.value > 0.0 && m.qrs_duration.value < 120.0, format!("QRS: {:.0} ms", m.qrs_duration.value)),
        cd("Normal axis (-30 to +90)", (-30.0..=90.0).contains(&m.axis_degrees.value), format!("Axis: {:.0}°", m.axis_degrees.value)),
    ];
    finish("normal_sinus", "Normal sinus rhythm", vec![], criteria, 1.0)
}

fn check_sinus_tachycardia(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        cd("Rate > 100 bpm", m.rate.value > 100.0, format!("Rate: {:.0}", m.rate.value)),
        c("Regular rhythm", rhythm_regular(m)),
        c("P waves present", p_waves_present(m)),
        c("Normal PR interval", m.pr_interval.as_ref().is_some_and(|pr| (120.0..=200.0).contains(&pr.value))),
    ];
    finish(
        "sinus_tachycardia",
        "Pattern consistent with sinus tachycardia",
        vec!["Clinical correlation", "Thyroid function tests if persistent"],
        criteria,
        1.0,
    )
}

fn check_sinus_bradycardia(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        cd("Rate < 60 bpm", m.rate.value > 0.0 && m.rate.value < 60.0, format!("Rate: {:.0}", m.rate.value)),
        c("Regular rhythm", rhythm_regular(m)),
        c("P waves present", p_waves_present(m)),
    ];
    finish(
        "sinus_bradycardia",
        "Pattern consistent with sinus bradycardia",
        vec!["Medication review", "Thyroid function tests"],
        criteria,
        1.0,
    )
}

fn check_atrial_fibrillation(m: &Measurements) -> FindingCandidate {
    let irregular = !rhythm_regular(m);
    let criteria = vec![
        cd("Irregularly irregular rhythm", irregular, m.rhythm_description.clone()),
        c("Absent discrete P waves", p_waves_absent(m)),
        c("Variable RR intervals", irregular),
    ];
    finish(
        "atrial_fibrillation",
        "Pattern consistent with atrial fibrillation",
        vec!["Echocardiogram", "Thyroid function", "CHA2DS2-VASc scoring"],
        criteria,
        1.0,
    )
}

fn check_atrial_flutter(m: &Measurements) -> FindingCandidate {
    let typical_rate = m.rate.value > 0.0
        && ((140.0..=160.0).contains(&m.rate.value)
            || (90.0..=110.0).contains(&m.rate.value)
            || (70.0..=80.0).contains(&m.rate.value));
    let criteria = vec![
        c("Regular or regularly irregular rhythm", true),
        cd("Rate suggestive of flutter (~150, ~100, ~75 bpm)", typical_rate, format!("Rate: {:.0}", m.rate.value)),
        cd("Sawtooth pattern (II, III, aVF)", false, "Requires visual morphology analysis"),
    ];
    finish(
        "atrial_flutter",
        "Pattern consistent with atrial flutter",
        vec!["Adenosine challenge to unmask flutter waves", "Echocardiogram"],
        criteria,
        0.7,
    )
}

fn check_svt(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        cd("Rate > 150 bpm", m.rate.value > 150.0, format!("Rate: {:.0}", m.rate.value)),
        c("Regular rhythm", rhythm_regular(m)),
        cd("Narrow QRS < 120ms", m.qrs_duration.value > 0.0 && m.qrs_duration.value < 120.0, format!("QRS: {:.0}", m.qrs_duration.value)),
        c("P waves absent or retrograde", p_waves_absent(m)),
    ];
    finish(
        "svt",
        "Pattern consistent with supraventricular tachycardia",
        vec!["Adenosine trial", "Electrophysiology study if recurrent"],
        criteria,
        1.0,
    )
}

fn check_rbbb(m: &Measurements) -> FindingCandidate {
    let wide_qrs = m.qrs_duration.value >= 120.0 && m.qrs_duration.value > 0.0;
    let v1_terminal_positive = m
        .t_wave_details
        .iter()
        .any(|tw| tw.lead_name == "V1" && tw.polarity == TWavePolarity::Inverted);
    let criteria = vec![
        cd("QRS >= 120ms", wide_qrs, format!("QRS: {:.0}", m.qrs_duration.value)),
        cd("RSR' pattern in V1/V2", v1_terminal_positive, "Assessed via T wave inversion in V1"),
        cd("Wide S wave in I and V6", true, "Requires detailed morphology analysis"),
    ];
    finish(
        "rbbb",
        "Pattern consistent with right bundle branch block",
        vec!["Echocardiogram to assess RV function"],
        criteria,
        0.8,
    )
}

fn check_lbbb(m: &Measurements) -> FindingCandidate {
    let wide_qrs = m.qrs_duration.value >= 120.0 && m.qrs_duration.value > 0.0;
    let criteria = vec![
        cd("QRS >= 120ms", wide_qrs, format!("QRS: {:.0}", m.qrs_duration.value)),
        cd("Broad/notched R in I, aVL, V5-V6", true, "Requires detailed morphology analysis"),
        cd("Deep S in V1-V2", true, "Requires waveform morphology analysis"),
        cd("Absence of Q waves in lateral leads", true, "Assumed — requires Q wave detection"),
    ];
    finish(
        "lbbb",
        "Pattern consistent with left bundle branch block",
        vec!["Echocardiogram", "Assess for cardiac resynchronization therapy candidacy"],
        criteria,
        if wide_qrs { 0.9 } else { 0.1 },
    )
}

fn check_lafb(m: &Measurements) -> FindingCandidate {
    let left_axis = m.axis_degrees.value < -30.0;
    let narrow_qrs = m.qrs_duration.value > 0.0 && m.qrs_duration.value < 120.0;
    let criteria = vec![
        cd("Left axis deviation beyond -30°", left_axis, format!("Axis: {:.0}°", m.axis_degrees.value)),
        cd("QRS < 120ms", narrow_qrs, format!("QRS: {:.0}", m.qrs_duration.value)),
        cd("Small q in I, aVL", true, "Requires Q wave detection"),
        cd("Small r in II, III, aVF", true, "Requires R wave analysis"),
    ];
    finish(
        "lafb",
        "Pattern consistent with left anterior fascicular block",
        vec!["Echocardiogram if new finding"],
        criteria,
        if left_axis { 0.9 } else { 0.1 },
    )
}

fn check_lpfb(m: &Measurements) -> FindingCandidate {
    let right_axis = m.axis_degrees.value > 90.0;
    let narrow_qrs = m.qrs_duration.value > 0.0 && m.qrs_duration.value < 120.0;
    let criteria = vec![
        cd("Right axis deviation beyond +90°", right_axis, format!("Axis: {:.0}°", m.axis_degrees.value)),
        cd("QRS < 120ms", narrow_qrs, format!("QRS: {:.0}", m.qrs_duration.value)),
        c("No RVH criteria", !m.rvh_present),
    ];
    finish(
        "lpfb",
        "Pattern consistent with left posterior fascicular block",
        vec!["Rule out RVH, lateral MI, chronic lung disease"],
        criteria,
        if right_axis { 0.8 } else { 0.1 },
    )
}

fn check_first_degree_av_block(m: &Measurements) -> FindingCandidate {
    let prolonged_pr = m.pr_interval.as_ref().is_some_and(|pr| pr.value > 200.0);
    let criteria = vec![
        cd(
            "PR > 200ms",
            prolonged_pr,
            format!("PR: {} ms", m.pr_interval.as_ref().map(|pr| pr.value.to_string()).unwrap_or_else(|| "N/A".into())),
        ),
        c("Consistent PR prolongation (every beat)", rhythm_regular(m)),
        c("P waves present before each QRS", p_waves_present(m)),
    ];
    finish(
        "first_degree_av_block",
        "Pattern consistent with first degree AV block",
        vec!["Monitor for progression", "Review medications (beta-blockers, CCBs, digoxin)"],
        criteria,
        if prolonged_pr { 0.9 } else { 0.0 },
    )
}

fn check_second_degree_mobitz_i(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        c("Irregular rhythm", !rhythm_regular(m)),
        c("P waves present", p_waves_present(m)),
        cd("PR progressively prolonging", false, "Requires beat-by-beat PR analysis"),
    ];
    finish(
        "second_degree_mobitz_i",
        "Finding suggestive of second degree AV block, Mobitz type I (Wenckebach)",
        vec!["Continuous telemetry monitoring", "Assess for reversible causes"],
        criteria,
        0.4,
    )
}

fn check_second_degree_mobitz_ii(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        c("Irregular rhythm with dropped beats", !rhythm_regular(m)),
        cd("Constant PR when conducted", true, "Requires beat-by-beat analysis"),
        c("P waves present", p_waves_present(m)),
        c("QRS may be wide", m.qrs_duration.value > 0.0 && m.qrs_duration.value >= 120.0),
    ];
    finish(
        "second_degree_mobitz_ii",
        "Finding suggestive of second degree AV block, Mobitz type II",
        vec!["Urgent cardiology consultation", "Prepare for possible pacing"],
        criteria,
        0.3,
    )
}

fn check_third_degree_av_block(m: &Measurements) -> FindingCandidate {
    let slow_rate = m.rate.value > 0.0 && m.rate.value < 50.0;
    let criteria = vec![
        c("Regular R-R intervals", rhythm_regular(m)),
        cd("Regular P-P intervals (independent of QRS)", true, "Requires atrial rate analysis"),
        cd("No fixed PR relationship", false, "Requires beat-by-beat PR analysis"),
        cd("Ventricular rate < 50 bpm", slow_rate, format!("Rate: {:.0}", m.rate.value)),
    ];
    finish(
        "third_degree_av_block",
        "Pattern consistent with third degree (complete) AV block",
        vec!["Immediate cardiology consultation", "Transcutaneous pacing readiness"],
        criteria,
        if slow_rate { 0.6 } else { 0.1 },
    )
}

fn check_wpw(m: &Measurements) -> FindingCandidate {
    let short_pr = m.pr_interval.as_ref().is_some_and(|pr| pr.value < 120.0);
    let wide_qrs = m.qrs_duration.value > 100.0 && m.qrs_duration.value > 0.0;
    let criteria = vec![
        cd(
            "Short PR < 120ms",
            short_pr,
            format!("PR: {}", m.pr_interval.as_ref().map(|pr| pr.value.to_string()).unwrap_or_else(|| "N/A".into())),
        ),
        cd("Delta wave (slurred QRS upstroke)", false, "Requires morphology analysis"),
        cd("Wide QRS > 100ms", wide_qrs, format!("QRS: {:.0}", m.qrs_duration.value)),
    ];
    finish(
        "wpw",
        "Pattern consistent with Wolff-Parkinson-White",
        vec!["Electrophysiology study", "Avoid AV nodal blocking agents if confirmed"],
        criteria,
        if short_pr { 0.7 } else { 0.1 },
    )
}

fn check_lvh(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        cd("Voltage criteria met", m.lvh_sokolow_lyon || m.lvh_cornell, m.voltage_criteria_explanation.clone()),
        cd("Left axis deviation", m.axis_degrees.value < -15.0, format!("Axis: {:.0}°", m.axis_degrees.value)),
        c("ST-T changes in lateral leads (strain pattern)", t_inverted_in_leads(m, &["I", "aVL", "V5", "V6"])),
    ];
    let voltage_met = m.lvh_sokolow_lyon || m.lvh_cornell;
    finish(
        "lvh",
        "Finding suggestive of left ventricular hypertrophy",
        vec!["Echocardiogram for wall thickness measurement"],
        criteria,
        if voltage_met { 0.9 } else { 0.2 },
    )
}

fn check_rvh(m: &Measurements) -> FindingCandidate {
    let criteria = vec![
        cd("RVH voltage criteria met", m.rvh_present, m.voltage_criteria_explanation.clone()),
        cd("Right axis deviation > +90°", m.axis_degrees.value > 90.0, format!("Axis: {:.0}°", m.axis_degrees.value)),
        c("T inversion in V1-V3 (strain)", t_inverted_in_leads(m, &["V1", "V2", "V3"])),
    ];
    finish(
        "rvh",
        "Finding suggestive of right ventricular hypertrophy",
        vec!["Echocardiogram", "Consider pulmonary evaluation"],
        criteria,
        1.0,
    )
}

fn check_inferior_stemi(m: &Measurements) -> FindingCandidate {
    let inf_elevation = st_elevation_in_leads(m, &["II", "III", "aVF"], 0.1);
    let reciprocal = st_depression_in_leads(m, &["I", "aVL"], 0.1);
    let criteria = vec![
        c("ST elevation >= 1mm in II, III, aVF", inf_elevation),
        c("Reciprocal ST depression in I, aVL", reciprocal),
        cd("Acute symptom context", true, "Requires clinical correlation"),
    ];
    finish(
        "inferior_stemi",
        "Pattern consistent with acute inferior ST-elevation myocardial injury",
        vec![
            "Emergent cardiac catheterization",
            "Serial troponins",
            "Right-sided leads to assess RV involvement",
        ],
        criteria,
        if inf_elevation { 0.9 } else { 0.0 },
    )
}

fn check_anterior_stemi(m: &Measurements) -> FindingCandidate {
    let ant_elevation = st_elevation_in_leads(m, &["V1", "V2", "V3", "V4"], 0.1);
    let reciprocal = st_depression_in_leads(m, &["II", "III", "aVF"], 0.1);
    let criteria = vec![
        c("ST elevation >= 1mm in V1-V4", ant_elevation),
        c("Reciprocal ST depression in inferior leads", reciprocal),
    ];
    finish(
        "anterior_stemi",
        "Pattern consistent with acute anterior ST-elevation myocardial injury",
        vec!["Emergent cardiac catheterization", "Serial troponins"],
        criteria,
        if ant_elevation { 0.9 } else { 0.0 },
    )
}

fn check_lateral_stemi(m: &Measurements) -> FindingCandidate {
    let lat_elevation = st_elevation_in_leads(m, &["I", "aVL", "V5", "V6"], 0.1);
    let criteria = vec![
        c("ST elevation in I, aVL, V5, V6", lat_elevation),
        c("Reciprocal changes in inferior leads", st_depression_in_leads(m, &["II", "III", "aVF"], 0.1)),
    ];
    finish(
        "lateral_stemi",
        "Pattern consistent with acute lateral ST-elevation myocardial injury",
        vec!["Emergent cardiac catheterization", "Serial troponins"],
        criteria,
        if lat_elevation { 0.9 } else { 0.0 },
    )
}

fn check_posterior_stemi(m: &Measurements) -> FindingCandidate {
    let ant_depression = st_depression_in_leads(m, &["V1", "V2", "V3"], 0.1);
    let criteria = vec![
        c("ST depression in V1-V3 (mirror image of posterior elevation)", ant_depression),
        cd("Tall R waves in V1-V2", true, "Requires R wave height analysis"),
        cd("Upright T waves in V1-V3", true, "Requires T wave polarity check"),
    ];
    finish(
        "posterior_stemi",
        "Pattern consistent with acute posterior ST-elevation myocardial injury",
        vec!["Posterior leads (V7-V9)", "Emergent cardiac catheterization"],
        criteria,
        if ant_depression { 0.7 } else { 0.0 },
    )
}

fn check_nstemi(m: &Measurements) -> FindingCandidate {
    let any_depression = m.st_deviations.iter().any(|st| st.deviation_mv < -0.05);
    let t_inversion = m.t_wave_details.iter().any(|tw| {
        tw.polarity == TWavePolarity::Inverted
            && ["I", "II", "aVL", "V2", "V3", "V4", "V5", "V6"].contains(&tw.lead_name.as_str())
    });
    let no_elevation = !m.st_deviations.iter().any(|st| st.deviation_mv > 0.1);
    let criteria = vec![
        c("ST depression in 2+ leads", any_depression),
        c("T wave inversions", t_inversion),
        c("No significant ST elevation", no_elevation),
    ];
    finish(
        "nstemi",
        "Pattern consistent with non-ST-elevation myocardial injury",
        vec!["Serial troponins", "Cardiology consultation", "Risk stratification (TIMI/GRACE)"],
        criteria,
        0.5,
    )
}

fn check_early_repolarization(m: &Measurements) -> FindingCandidate {
    let precordial_elevation = st_elevation_in_leads(m, &["V2", "V3", "V4", "V5"], 0.1);
    let criteria = vec![
        c("J-point elevation in precordial leads", precordial_elevation),
        cd("Concave upward ST morphology", true, "Requires ST segment morphology analysis"),
        cd("Young patient / asymptomatic", true, "Requires clinical context"),
    ];
    finish(
        "early_repolarization",
        "Pattern consistent with early repolarization",
        vec!["Clinical correlation — typically benign in young patients"],
        criteria,
        0.5,
    )
}

fn check_pericarditis(m: &Measurements) -> FindingCandidate {
    let diffuse_elevation = m.st_deviations.iter().filter(|st| st.deviation_mv > 0.05).count() >= 4;
    let pr_depression = st_deviation(m, "II") > 0.0 && st_deviation(m, "aVR") < 0.0;
    let criteria = vec![
        c("Diffuse ST elevation (4+ leads)", diffuse_elevation),
        cd("PR depression", pr_depression, "PR segment depression relative to TP baseline"),
        c("ST elevation in aVR absent or depressed", st_deviation(m, "aVR") <= 0.0),
    ];
    finish(
        "pericarditis",
        "Pattern consistent with pericarditis",
        vec![
            "Inflammatory markers (CRP, ESR)",
            "Echocardiogram for effusion",
            "Serial ECGs for stage progression",
        ],
        criteria,
        if diffuse_elevation { 0.7 } else { 0.1 },
    )
}

fn check_digitalis_effect(m: &Measurements) -> FindingCandidate {
    let st_depression_multiple = m.st_deviations.iter().filter(|st| st.deviation_mv < -0.05).count() >= 3;
    let short_qt = m.qt_interval.value > 0.0 && m.qt_interval.value < 360.0;
    let criteria = vec![
        c("Scooped ST depression in multiple leads", st_depression_multiple),
        cd("Short QT interval", short_qt, format!("QT: {:.0}ms", m.qt_interval.value)),
        c("Possible bradycardia", m.rate.value > 0.0 && m.rate.value < 65.0),
    ];
    finish(
        "digitalis_effect",
        "Pattern consistent with digitalis effect",
        vec!["Digoxin level", "Review medication list"],
        criteria,
        0.5,
    )
}

fn check_hypokalemia(m: &Measurements) -> FindingCandidate {
    let flat_t = m.t_wave_details.iter().filter(|tw| tw.polarity == TWavePolarity::Flat).count() >= 2;
    let prolonged_qt = m.qtc_bazett.value > 0.0 && m.qtc_bazett.value > 480.0;
    let st_dep = m.st_deviations.iter().filter(|st| st.deviation_mv < -0.05).count() >= 2;
    let criteria = vec![
        c("Flattened T waves", flat_t),
        cd("Prolonged QTc", prolonged_qt, format!("QTc: {:.0}ms", m.qtc_bazett.value)),
        c("ST depression", st_dep),
        cd("U waves present", false, "Requires U wave detection"),
    ];
    finish(
        "hypokalemia",
        "Pattern consistent with hypokalemia",
        vec!["Stat potassium level", "Magnesium level"],
        criteria,
        0.5,
    )
}

fn check_hyperkalemia(m: &Measurements) -> FindingCandidate {
    let wide_qrs = m.qrs_duration.value > 0.0 && m.qrs_duration.value > 120.0;
    let p_absent = p_waves_absent(m);
    let peaked_t = m.t_wave_details.iter().filter(|tw| tw.amplitude_mv.is_some_and(|a| a > 0.5)).count() >= 2;
    let short_qt = m.qt_interval.value > 0.0 && m.qt_interval.value < 360.0;
    let criteria = vec![
        c("Peaked/tall T waves", peaked_t),
        cd("Widened QRS", wide_qrs, format!("QRS: {:.0}ms", m.qrs_duration.value)),
        c("Flattened/absent P waves", p_absent),
        cd("Short QT interval", short_qt, format!("QT: {:.0}ms", m.qt_interval.value)),
    ];
    finish(
        "hyperkalemia",
        "Pattern consistent with hyperkalemia",
        vec!["Stat potassium level", "Stat calcium if severe ECG changes", "Renal function assessment"],
        criteria,
        0.6,
    )
}

type CheckerFn = fn(&Measurements) -> FindingCandidate;

pub const ALL_CHECKERS: &[CheckerFn] = &[
    check_normal_sinus,
    check_sinus_tachycardia,
    check_sinus_bradycardia,
    check_atrial_fibrillation,
    check_atrial_flutter,
    check_svt,
    check_rbbb,
    check_lbbb,
    check_lafb,
    check_lpfb,
    check_first_degree_av_block,
    check_second_degree_mobitz_i,
    check_second_degree_mobitz_ii,
    check_third_degree_av_block,
    check_wpw,
    check_lvh,
    check_rvh,
    check_inferior_stemi,
    check_anterior_stemi,
    check_lateral_stemi,
    check_posterior_stemi,
    check_nstemi,
    check_early_repolarization,
    check_pericarditis,
    check_digitalis_effect,
    check_hypokalemia,
    check_hyperkalemia,
];

pub const RHYTHM_FINDING_NAMES: &[&str] =
    &["normal_sinus", "sinus_tachycardia", "sinus_bradycardia", "atrial_fibrillation", "atrial_flutter", "svt"];

pub const CONDUCTION_FINDING_NAMES: &[&str] = &[
    "rbbb",
    "lbbb",
    "lafb",
    "lpfb",
    "first_degree_av_block",
    "second_degree_mobitz_i",
    "second_degree_mobitz_ii",
    "third_degree_av_block",
    "wpw",
];
