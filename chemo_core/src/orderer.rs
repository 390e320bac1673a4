//! Schedule orderer: places high and low tablet days across the course.
//!
//! Every mode consumes the same [`DoseResolution`] and emits exactly
//! `high_days` high entries and `low_days` low entries; only their
//! positions differ.

use crate::{DoseResolution, OrderedSchedule, RoundedSchedule, ScheduleMode};

/// Length of a weekly block
pub const WEEK_LEN: usize = 7;

/// Arrange a resolved schedule according to the selected mode
pub fn order_schedule(resolution: &DoseResolution, mode: ScheduleMode) -> OrderedSchedule {
    let days = match mode {
        ScheduleMode::FrontLoadOverall => front_load_overall(&resolution.schedule),
        ScheduleMode::WeeklyFrontLoad => weekly_front_load(resolution),
        ScheduleMode::Alternating => alternating(&resolution.schedule),
    };

    tracing::debug!("Ordered {} day(s) using {:?}", days.len(), mode);
    OrderedSchedule::from_days(days)
}

/// All high days first, then all low days
fn front_load_overall(rounded: &RoundedSchedule) -> Vec<u32> {
    let mut days = Vec::with_capacity(rounded.days() as usize);
    days.extend(std::iter::repeat(rounded.high_count).take(rounded.high_days as usize));
    days.extend(std::iter::repeat(rounded.low_count).take(rounded.low_days as usize));
    days
}

/// High days first within each 7-day block
fn weekly_front_load(resolution: &DoseResolution) -> Vec<u32> {
    let rounded = &resolution.schedule;
    let total_days = rounded.days() as usize;
    let quotas = weekly_high_quotas(resolution);

    let mut days = Vec::with_capacity(total_days);
    for (block, &high) in quotas.iter().enumerate() {
        let len = block_len(block, total_days);
        days.extend(std::iter::repeat(rounded.high_count).take(high));
        days.extend(std::iter::repeat(rounded.low_count).take(len - high));
    }
    days
}

/// Number of high days placed in each 7-day block.
///
/// A block of length `len` first gets its own rounded share of the daily
/// fraction, `round(len * exact - len * low_count)` with ties to even,
/// capped by its length and by the high days still unplaced. Whatever is
/// left after the last block tops up the earliest blocks' low slots.
fn weekly_high_quotas(resolution: &DoseResolution) -> Vec<usize> {
    let rounded = &resolution.schedule;
    let total_days = rounded.days() as usize;
    let blocks = total_days.div_ceil(WEEK_LEN);
    let mut remaining = rounded.high_days as usize;

    let mut quotas = Vec::with_capacity(blocks);
    for block in 0..blocks {
        let len = block_len(block, total_days);
        let quota = block_share(len, resolution.exact_daily_tablets, rounded.low_count)
            .min(len)
            .min(remaining);
        remaining -= quota;
        quotas.push(quota);
    }

    for (block, quota) in quotas.iter_mut().enumerate() {
        if remaining == 0 {
            break;
        }
        let extra = (block_len(block, total_days) - *quota).min(remaining);
        *quota += extra;
        remaining -= extra;
    }

    tracing::trace!("Weekly high-day quotas: {:?}", quotas);
    quotas
}

/// High days a block of `len` days would take on its own
fn block_share(len: usize, exact: f64, low_count: u32) -> usize {
    let len = len as f64;
    let share = (len * exact - len * f64::from(low_count)).round_ties_even();
    if share > 0.0 {
        share as usize
    } else {
        0
    }
}

fn block_len(block: usize, total_days: usize) -> usize {
    WEEK_LEN.min(total_days - block * WEEK_LEN)
}

/// High and low days interleaved as evenly as possible, day 1 high.
///
/// The k-th high day lands on day index `ceil(k * days / high_days)`.
fn alternating(rounded: &RoundedSchedule) -> Vec<u32> {
    let total_days = rounded.days() as usize;
    let high_days = rounded.high_days as usize;
    let mut days = vec![rounded.low_count; total_days];

    for k in 0..high_days {
        let index = (k * total_days).div_ceil(high_days);
        days[index] = rounded.high_count;
    }
    days
}
