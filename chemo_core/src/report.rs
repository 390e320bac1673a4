//! Human-readable text built from a finished calculation.
//!
//! - Provider summary (inputs, derived values, rounding mix, totals)
//! - Plain-language patient introduction
//! - ASCII sanitizing for documents that must stay symbol-safe

use crate::calendar::format_mg;
use crate::Calculation;

/// Multi-line summary for the prescribing clinician
pub fn provider_summary(calc: &Calculation) -> String {
    let inputs = &calc.inputs;
    let rounded = &calc.resolution.schedule;

    let mut lines = Vec::with_capacity(5);
    lines.push(format!(
        "INPUTS -> BSA {:.2} m^2 | mg/m^2/day {} | Days {} | Tablet {} mg | Mode {}",
        inputs.bsa(),
        format_mg(inputs.dose_per_m2_per_day()),
        inputs.days(),
        format_mg(inputs.tablet_strength_mg()),
        calc.mode
    ));
    lines.push(format!(
        "DERIVED -> Total mg/m^2: {}",
        format_mg(calc.total_mg_per_m2)
    ));
    lines.push(format!(
        "DAILY DOSE -> Exact {:.1} mg  ({:.3} tab/day)",
        inputs.exact_daily_mg(),
        calc.resolution.exact_daily_tablets
    ));
    lines.push(if rounded.is_uniform() {
        let count = if rounded.high_days > 0 {
            rounded.high_count
        } else {
            rounded.low_count
        };
        format!("ROUNDING MIX -> {} tab(s) on all {} day(s)", count, inputs.days())
    } else {
        format!(
            "ROUNDING MIX -> {} tab(s) on {} day(s); {} tab(s) on {} day(s)",
            rounded.high_count, rounded.high_days, rounded.low_count, rounded.low_days
        )
    });
    lines.push(format!(
        "TOTALS -> Exact {:.0} mg | Mixed {:.0} mg | Tablets {}",
        calc.exact_total_mg(),
        calc.mixed_total_mg(),
        calc.total_tablets
    ));

    lines.join("\n")
}

/// Plain-language introduction for the patient handout
pub fn patient_intro(calc: &Calculation) -> String {
    let mut intro = format!(
        "This plan lasts {} days. Each tablet is {} mg.",
        calc.inputs.days(),
        format_mg(calc.inputs.tablet_strength_mg())
    );
    if calc.resolution.schedule.is_uniform() {
        intro.push_str(" You take the same number of tablets every day.");
    } else {
        intro.push_str(
            " On some days you will take more tablets than others to match your dose.",
        );
    }
    intro
}

/// Replace common typographic symbols with ASCII and drop anything else
/// outside the ASCII range
pub fn ascii_sanitize(text: &str) -> String {
    const REPLACEMENTS: &[(&str, &str)] = &[
        ("m²", "m^2"),
        ("²", "^2"),
        ("µ", "u"),
        ("×", "x"),
        ("–", "-"),
        ("—", "-"),
        ("→", "->"),
        ("≤", "<="),
        ("≥", ">="),
        ("…", "..."),
        ("“", "\""),
        ("”", "\""),
        ("‘", "'"),
        ("’", "'"),
        ("•", "-"),
        ("°", " deg "),
        ("™", "(TM)"),
        ("®", "(R)"),
        ("©", "(C)"),
    ];

    let mut out = text.to_string();
    for (from, to) in REPLACEMENTS {
        out = out.replace(from, to);
    }
    out.retain(|c| c.is_ascii());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calculate, DoseInputs, ScheduleMode};

    fn default_calc() -> Calculation {
        let inputs = DoseInputs::new(1.7, 50.0, 21, 50.0).unwrap();
        calculate(&inputs, ScheduleMode::FrontLoadOverall).unwrap()
    }

    #[test]
    fn test_provider_summary() {
        crate::logging::init_test();
        let summary = provider_summary(&default_calc());
        let lines: Vec<&str> = summary.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[0],
            "INPUTS -> BSA 1.70 m^2 | mg/m^2/day 50 | Days 21 | Tablet 50 mg | Mode Front-load overall"
        );
        assert_eq!(lines[1], "DERIVED -> Total mg/m^2: 1050");
        assert_eq!(lines[2], "DAILY DOSE -> Exact 85.0 mg  (1.700 tab/day)");
        assert_eq!(
            lines[3],
            "ROUNDING MIX -> 2 tab(s) on 15 day(s); 1 tab(s) on 6 day(s)"
        );
        assert_eq!(lines[4], "TOTALS -> Exact 1785 mg | Mixed 1800 mg | Tablets 36");
    }

    #[test]
    fn test_uniform_rounding_mix() {
        let inputs = DoseInputs::new(1.0, 50.0, 5, 25.0).unwrap();
        let calc = calculate(&inputs, ScheduleMode::Alternating).unwrap();
        assert!(provider_summary(&calc).contains("ROUNDING MIX -> 2 tab(s) on all 5 day(s)"));
        assert!(patient_intro(&calc).contains("same number of tablets every day"));
    }

    #[test]
    fn test_patient_intro_has_no_sig_jargon() {
        let intro = patient_intro(&default_calc());
        assert!(intro.starts_with("This plan lasts 21 days. Each tablet is 50 mg."));
        assert!(intro.contains("more tablets than others"));
        assert!(!intro.contains("PO"));
        assert!(!intro.contains("tab(s)"));
    }

    #[test]
    fn test_ascii_sanitize() {
        assert_eq!(
            ascii_sanitize("Repeat weekly ×3: Days 1–4 → 2 mg/m²"),
            "Repeat weekly x3: Days 1-4 -> 2 mg/m^2"
        );
        assert_eq!(ascii_sanitize("“quoted” ≤ 5…"), "\"quoted\" <= 5...");
        assert_eq!(ascii_sanitize("naïve"), "nave");
        assert!(ascii_sanitize(&default_calc().sig).is_ascii());
    }
}
