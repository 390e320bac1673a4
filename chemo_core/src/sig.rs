//! Sig composer: the one-line pharmacy instruction for an ordered schedule.
//!
//! Patterns are tried from simplest to most general against the literal
//! per-day sequence:
//! 1. Uniform
//! 2. Two contiguous blocks
//! 3. Weekly repeating pattern (weekly front-load mode only)
//! 4. Strict alternation (alternating mode only)
//! 5. Compressed day ranges, which always applies
//!
//! The text never mentions tablet strength or the quantity to dispense.

use crate::orderer::WEEK_LEN;
use crate::{DayRun, OrderedSchedule, ScheduleMode};

/// Compose the Sig for an ordered schedule
pub fn compose_sig(schedule: &OrderedSchedule, mode: ScheduleMode) -> String {
    let tablets = schedule.as_slice();
    let days = tablets.len();
    let runs = compress_runs(tablets);

    let sig = match runs.as_slice() {
        [] => String::new(),
        [only] => format!(
            "Take {} tab(s) PO once daily for {} days.",
            only.tablets, days
        ),
        [first, second] => format!(
            "{}: {} tab(s) PO daily; then {}: {} tab(s) PO daily. Total {} days.",
            range_label(first.start, first.end),
            first.tablets,
            range_label(second.start, second.end),
            second.tablets,
            days
        ),
        _ => {
            let patterned = match mode {
                ScheduleMode::WeeklyFrontLoad => weekly_sig(tablets),
                ScheduleMode::Alternating => alternating_sig(tablets),
                ScheduleMode::FrontLoadOverall => None,
            };
            patterned.unwrap_or_else(|| ranges_sig(&runs, days))
        }
    };

    tracing::debug!("Composed sig: {}", sig);
    sig
}

/// Split a per-day sequence into maximal constant runs (1-based days)
pub fn compress_runs(tablets: &[u32]) -> Vec<DayRun> {
    let mut runs: Vec<DayRun> = Vec::new();
    for (index, &count) in tablets.iter().enumerate() {
        let day = index + 1;
        match runs.last_mut() {
            Some(run) if run.tablets == count => run.end = day,
            _ => runs.push(DayRun {
                start: day,
                end: day,
                tablets: count,
            }),
        }
    }
    runs
}

/// Expand runs back into a per-day sequence
pub fn expand_runs(runs: &[DayRun]) -> Vec<u32> {
    runs.iter()
        .flat_map(|run| std::iter::repeat(run.tablets).take(run.len()))
        .collect()
}

/// "Day 3" for a single day, "Days 3–9" for a range
pub fn range_label(start: usize, end: usize) -> String {
    if start == end {
        format!("Day {}", start)
    } else {
        format!("Days {}–{}", start, end)
    }
}

/// Weekly repeat: every full week is `x` for `k` days then `y`; a short
/// final week holds only `x` then `y` in that order
fn weekly_sig(tablets: &[u32]) -> Option<String> {
    let full_weeks = tablets.len() / WEEK_LEN;
    if full_weeks == 0 {
        return None;
    }

    let week = &tablets[..WEEK_LEN];
    let week_runs = compress_runs(week);
    let [high, low] = week_runs.as_slice() else {
        return None;
    };

    let (full, tail) = tablets.split_at(full_weeks * WEEK_LEN);
    if !full.chunks(WEEK_LEN).all(|block| block == week) {
        return None;
    }

    // A short final block may split differently but stays high-then-low
    let tail_highs = tail.iter().take_while(|&&t| t == high.tablets).count();
    if !tail[tail_highs..].iter().all(|&t| t == low.tablets) {
        return None;
    }

    Some(format!(
        "Repeat weekly ×{}: {}: {} tab(s) PO daily; {}: {} tab(s) PO daily. Total {} days.",
        full_weeks,
        range_label(high.start, high.end),
        high.tablets,
        range_label(low.start, low.end),
        low.tablets,
        tablets.len()
    ))
}

/// Strict alternation x, y, x, y, ... with x != y
fn alternating_sig(tablets: &[u32]) -> Option<String> {
    let &[x, y, ..] = tablets else {
        return None;
    };
    if x == y {
        return None;
    }

    let strict = tablets
        .iter()
        .enumerate()
        .all(|(index, &count)| count == if index % 2 == 0 { x } else { y });
    if !strict {
        return None;
    }

    Some(format!(
        "Alternate {} and {} tab(s) PO daily, starting with {}, for {} days.",
        x,
        y,
        x,
        tablets.len()
    ))
}

/// Fallback: every run spelled out
fn ranges_sig(runs: &[DayRun], days: usize) -> String {
    tracing::debug!("No simple pattern matched, listing {} day ranges", runs.len());
    let ranges: Vec<String> = runs
        .iter()
        .map(|run| format!("{}: {} tab(s)", range_label(run.start, run.end), run.tablets))
        .collect();
    format!("{}. Total {} days.", ranges.join("; "), days)
}
