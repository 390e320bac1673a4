//! Dose resolver: BSA-scaled daily dose to a whole-tablet high/low split.
//!
//! The course total is rounded half-up to a whole number of tablets, then
//! split between `ceil(exact)` and `floor(exact)` tablet days so the split
//! reproduces that total exactly.

use crate::{DoseInputs, DoseResolution, Error, Result, RoundedSchedule};

/// Tolerance for treating the exact daily count as a whole number
const INTEGRAL_EPSILON: f64 = 1e-12;

/// Nudge applied before half-up rounding so that totals such as 10.4999999999
/// (binary noise around an exact .5) still round up
const HALF_UP_EPSILON: f64 = 1e-9;

/// Largest course total the rounding arithmetic accepts
const MAX_COURSE_TABLETS: f64 = i64::MAX as f64;

/// Resolve validated inputs into a rounded schedule
pub fn resolve_dose(inputs: &DoseInputs) -> Result<DoseResolution> {
    let exact = inputs.exact_daily_tablets();
    tracing::debug!(
        "Exact daily dose {:.3} mg = {:.4} tab/day over {} day(s)",
        inputs.exact_daily_mg(),
        exact,
        inputs.days()
    );
    resolve_exact(exact, inputs.days())
}

/// Resolve an exact daily tablet count into a rounded schedule
///
/// Works on the raw tablet count so the degenerate zero-dose course is
/// handled here even though [`DoseInputs`] never produces one.
pub fn resolve_exact(exact: f64, days: u32) -> Result<DoseResolution> {
    if !exact.is_finite() || exact < 0.0 {
        return Err(Error::InvalidInput(format!(
            "exact daily tablet count must be finite and non-negative (got {})",
            exact
        )));
    }
    if days == 0 {
        return Err(Error::InvalidInput(
            "course length must be at least 1 day".into(),
        ));
    }

    let floor = exact.floor();
    let total_exact = exact * f64::from(days);
    // ceil(exact) must fit a u32 and the course total an i64
    if floor >= f64::from(u32::MAX) || total_exact >= MAX_COURSE_TABLETS {
        return Err(Error::InvalidInput(format!(
            "{} tablets/day over {} day(s) is too large to schedule",
            exact, days
        )));
    }
    let total_target = round_half_up(total_exact);

    let integral = (exact - floor).abs() < INTEGRAL_EPSILON;
    let low_count = floor as u32;

    let schedule = if integral {
        RoundedSchedule {
            high_count: low_count,
            low_count,
            high_days: days,
            low_days: 0,
        }
    } else {
        let high_count = low_count + 1;
        let high_days = total_target as i64 - i64::from(low_count) * i64::from(days);
        if high_days < 0 || high_days > i64::from(days) {
            tracing::warn!(
                "Target of {} tablets is unreachable with {}/{} tablet days",
                total_target,
                high_count,
                low_count
            );
            return Err(Error::RoundingInconsistency { high_days, days });
        }
        let high_days = high_days as u32;
        RoundedSchedule {
            high_count,
            low_count,
            high_days,
            low_days: days - high_days,
        }
    };

    tracing::debug!(
        "Rounding mix: {} tab(s) on {} day(s), {} tab(s) on {} day(s); target {} tablets",
        schedule.high_count,
        schedule.high_days,
        schedule.low_count,
        schedule.low_days,
        total_target
    );

    Ok(DoseResolution {
        exact_daily_tablets: exact,
        total_exact_tablets: total_exact,
        total_target_tablets: total_target,
        schedule,
    })
}

/// Round to the nearest integer with exact halves going up
pub fn round_half_up(value: f64) -> u64 {
    (value + 0.5 + HALF_UP_EPSILON).floor() as u64
}
