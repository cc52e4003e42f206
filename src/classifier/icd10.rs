//! Static ICD-10 lookup for classifier findings.

pub fn icd10_for(name: &str) -> Option<&'static str> {
    match name {
        "sinus_tachycardia" => Some("R00.0"),
        "sinus_bradycardia" => Some("R00.1"),
        "atrial_fibrillation" => Some("I48.91"),
        "atrial_flutter" => Some("I48.92"),
        "svt" => Some("I47.1"),
        "rbbb" => Some("I45.10"),
        "lbbb" => Some("I44.7"),
        "lafb" => Some("I44.4"),
        "lpfb" => Some("I44.5"),
        "first_degree_av_block" => Some("I44.0"),
        "second_degree_mobitz_i" => Some("I44.1"),
        "second_degree_mobitz_ii" => Some("I44.1"),
        "third_degree_av_block" => Some("I44.2"),
        "wpw" => Some("I45.6"),
        "lvh" => Some("I51.7"),
        "rvh" => Some("I51.7"),
        "inferior_stemi" => Some("I21.19"),
        "anterior_stemi" => Some("I21.09"),
        "lateral_stemi" => Some("I21.29"),
        "posterior_stemi" => Some("I21.29"),
        "nstemi" => Some("I21.4"),
        "pericarditis" => Some("I30.9"),
        "digitalis_effect" => Some("T46.0X5A"),
        "hypokalemia" => Some("E87.6"),
        "hyperkalemia" => Some("E87.5"),
        // normal_sinus and early_repolarization carry no code.
        _ => None,
    }
}
