//! Calculation pipeline: dose resolver, schedule orderer, Sig composer.
//!
//! Each request runs start to finish on the caller's thread and shares no
//! state with any other request.

use crate::{
    compose_sig, order_schedule, resolve_dose, Calculation, DoseInputs, Error, Result,
    ScheduleMode,
};

/// Run the full pipeline for one set of inputs
///
/// Either every output is produced or an error is returned; there are no
/// partial results.
pub fn calculate(inputs: &DoseInputs, mode: ScheduleMode) -> Result<Calculation> {
    tracing::info!(
        "Calculating {}-day course: BSA {:.2} m^2, {} mg/m^2/day, {} mg tablets, {}",
        inputs.days(),
        inputs.bsa(),
        inputs.dose_per_m2_per_day(),
        inputs.tablet_strength_mg(),
        mode
    );

    let resolution = resolve_dose(inputs)?;
    let schedule = order_schedule(&resolution, mode);

    let total_tablets = schedule.total_tablets();
    if total_tablets != resolution.total_target_tablets {
        return Err(Error::RoundingInconsistency {
            high_days: i64::from(resolution.schedule.high_days),
            days: inputs.days(),
        });
    }

    let sig = compose_sig(&schedule, mode);
    let total_mg_per_m2 =
        resolution.total_exact_tablets * inputs.tablet_strength_mg() / inputs.bsa();

    tracing::info!("Total tablets to dispense: {}", total_tablets);

    Ok(Calculation {
        inputs: *inputs,
        mode,
        resolution,
        schedule,
        sig,
        total_tablets,
        total_mg_per_m2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(bsa: f64, dose: f64, days: u32, strength: f64) -> DoseInputs {
        DoseInputs::new(bsa, dose, days, strength).unwrap()
    }

    #[test]
    fn test_uniform_course() {
        crate::logging::init_test();
        let calc = calculate(&inputs(1.0, 50.0, 5, 25.0), ScheduleMode::FrontLoadOverall).unwrap();

        assert_eq!(calc.schedule.as_slice(), &[2, 2, 2, 2, 2]);
        assert_eq!(calc.sig, "Take 2 tab(s) PO once daily for 5 days.");
        assert_eq!(calc.total_tablets, 10);
    }

    #[test]
    fn test_two_block_course() {
        // 1.5 tab/day: 60 mg/m^2 at 1.0 m^2 with 40 mg tablets
        let calc = calculate(&inputs(1.0, 60.0, 4, 40.0), ScheduleMode::FrontLoadOverall).unwrap();

        assert_eq!(calc.schedule.as_slice(), &[2, 2, 1, 1]);
        assert_eq!(
            calc.sig,
            "Days 1–2: 2 tab(s) PO daily; then Days 3–4: 1 tab(s) PO daily. Total 4 days."
        );
    }

    #[test]
    fn test_alternating_course() {
        let calc = calculate(&inputs(1.0, 60.0, 4, 40.0), ScheduleMode::Alternating).unwrap();

        assert_eq!(calc.schedule.as_slice(), &[2, 1, 2, 1]);
        assert_eq!(
            calc.sig,
            "Alternate 2 and 1 tab(s) PO daily, starting with 2, for 4 days."
        );
    }

    #[test]
    fn test_weekly_course() {
        // 1.5 tab/day over 14 days: 21 tablets, 7 high days, split 4/3 by week
        let calc = calculate(&inputs(1.0, 60.0, 14, 40.0), ScheduleMode::WeeklyFrontLoad).unwrap();

        assert_eq!(calc.total_tablets, 21);
        assert_eq!(
            calc.schedule.as_slice(),
            &[2, 2, 2, 2, 1, 1, 1, 2, 2, 2, 1, 1, 1, 1]
        );
    }

    #[test]
    fn test_weekly_repeating_course() {
        // 1.4 tab/day over 14 days: 3 high days per week
        let calc = calculate(&inputs(1.4, 50.0, 14, 50.0), ScheduleMode::WeeklyFrontLoad).unwrap();

        assert_eq!(
            calc.sig,
            "Repeat weekly ×2: Days 1–3: 2 tab(s) PO daily; Days 4–7: 1 tab(s) PO daily. Total 14 days."
        );
    }

    #[test]
    fn test_weekly_nine_day_course() {
        // 1.3 tab/day over 9 days: 12 tablets, blocks of 7 and 2 take 2 and 1 highs
        let calc = calculate(&inputs(1.3, 50.0, 9, 50.0), ScheduleMode::WeeklyFrontLoad).unwrap();

        assert_eq!(calc.total_tablets, 12);
        assert_eq!(calc.schedule.as_slice(), &[2, 2, 1, 1, 1, 1, 1, 2, 1]);
    }

    #[test]
    fn test_weekly_ten_day_course_keeps_second_block_high() {
        let calc = calculate(&inputs(1.3, 50.0, 10, 50.0), ScheduleMode::WeeklyFrontLoad).unwrap();

        assert_eq!(calc.total_tablets, 13);
        assert_eq!(
            calc.schedule.as_slice(),
            &[2, 2, 1, 1, 1, 1, 1, 2, 1, 1]
        );
        assert_eq!(
            calc.sig,
            "Repeat weekly ×1: Days 1–2: 2 tab(s) PO daily; Days 3–7: 1 tab(s) PO daily. Total 10 days."
        );
    }

    #[test]
    fn test_weekly_ten_day_course_differs_from_front_load() {
        let weekly = calculate(&inputs(1.9, 50.0, 10, 50.0), ScheduleMode::WeeklyFrontLoad).unwrap();
        let front = calculate(&inputs(1.9, 50.0, 10, 50.0), ScheduleMode::FrontLoadOverall).unwrap();

        assert_eq!(
            weekly.schedule.as_slice(),
            &[2, 2, 2, 2, 2, 2, 1, 2, 2, 2]
        );
        assert_eq!(front.schedule.as_slice(), &[2, 2, 2, 2, 2, 2, 2, 2, 2, 1]);
        assert_eq!(weekly.total_tablets, front.total_tablets);
    }

    #[test]
    fn test_weekly_seventeen_day_course_repeats() {
        let calc = calculate(&inputs(1.6, 50.0, 17, 50.0), ScheduleMode::WeeklyFrontLoad).unwrap();

        assert_eq!(calc.total_tablets, 27);
        assert_eq!(
            calc.schedule.as_slice(),
            &[2, 2, 2, 2, 1, 1, 1, 2, 2, 2, 2, 1, 1, 1, 2, 2, 1]
        );
        assert_eq!(
            calc.sig,
            "Repeat weekly ×2: Days 1–4: 2 tab(s) PO daily; Days 5–7: 1 tab(s) PO daily. Total 17 days."
        );
    }

    #[test]
    fn test_derived_total_mg_per_m2() {
        let calc = calculate(&inputs(1.7, 50.0, 21, 50.0), ScheduleMode::FrontLoadOverall).unwrap();

        assert!((calc.total_mg_per_m2 - 1050.0).abs() < 1e-9);
        assert_eq!(calc.total_tablets, 36);
        assert!((calc.mixed_total_mg() - 1800.0).abs() < 1e-9);
        assert!((calc.exact_total_mg() - 1785.0).abs() < 1e-9);
    }

    #[test]
    fn test_total_preserved_across_modes() {
        for days in [1u32, 2, 5, 7, 10, 14, 21, 28, 30] {
            for dose in [20.0, 37.5, 50.0, 62.5, 75.0, 83.0] {
                for bsa in [0.9, 1.37, 1.7, 2.05] {
                    let inputs = inputs(bsa, dose, days, 25.0);
                    let mut multisets = Vec::new();
                    for mode in ScheduleMode::ALL {
                        let calc = calculate(&inputs, mode).unwrap();
                        assert_eq!(calc.total_tablets, calc.resolution.total_target_tablets);
                        assert_eq!(
                            calc.total_tablets,
                            calc.resolution.schedule.total_tablets()
                        );
                        let mut sorted = calc.schedule.into_inner();
                        sorted.sort_unstable();
                        multisets.push(sorted);
                    }
                    assert!(multisets.windows(2).all(|pair| pair[0] == pair[1]));
                }
            }
        }
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let inputs = inputs(1.83, 47.5, 19, 50.0);
        for mode in ScheduleMode::ALL {
            let first = calculate(&inputs, mode).unwrap();
            let second = calculate(&inputs, mode).unwrap();
            assert_eq!(first.schedule, second.schedule);
            assert_eq!(first.sig, second.sig);
        }
    }
}
