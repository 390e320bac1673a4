//! Core domain types for the chemotherapy tablet calculator.
//!
//! This module defines the values that flow through the pipeline:
//! - Validated dose inputs
//! - Schedule ordering modes
//! - The rounded high/low split and the ordered per-day schedule
//! - The bundled calculation result handed to renderers and exporters

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Inputs
// ============================================================================

/// Validated inputs for one calculation request.
///
/// Fields are private so that every `DoseInputs` in circulation has passed
/// [`DoseInputs::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DoseInputs {
    bsa: f64,
    dose_per_m2_per_day: f64,
    days: u32,
    tablet_strength_mg: f64,
}

impl DoseInputs {
    /// Validate and build a set of dose inputs
    ///
    /// All real-valued fields must be finite and strictly positive; `days`
    /// must be at least 1.
    pub fn new(
        bsa: f64,
        dose_per_m2_per_day: f64,
        days: u32,
        tablet_strength_mg: f64,
    ) -> Result<Self> {
        check_positive("BSA", bsa)?;
        check_positive("dose per m^2 per day", dose_per_m2_per_day)?;
        check_positive("tablet strength", tablet_strength_mg)?;
        if days == 0 {
            return Err(Error::InvalidInput(
                "course length must be at least 1 day".into(),
            ));
        }

        Ok(Self {
            bsa,
            dose_per_m2_per_day,
            days,
            tablet_strength_mg,
        })
    }

    pub fn bsa(&self) -> f64 {
        self.bsa
    }

    pub fn dose_per_m2_per_day(&self) -> f64 {
        self.dose_per_m2_per_day
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    pub fn tablet_strength_mg(&self) -> f64 {
        self.tablet_strength_mg
    }

    /// Exact daily dose in mg (dose per m² × BSA)
    pub fn exact_daily_mg(&self) -> f64 {
        self.dose_per_m2_per_day * self.bsa
    }

    /// Exact, unrounded tablets per day
    pub fn exact_daily_tablets(&self) -> f64 {
        self.exact_daily_mg() / self.tablet_strength_mg
    }
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidInput(format!(
            "{} must be a finite number (got {})",
            name, value
        )));
    }
    if value <= 0.0 {
        return Err(Error::InvalidInput(format!(
            "{} must be greater than zero (got {})",
            name, value
        )));
    }
    Ok(())
}

// ============================================================================
// Schedule Mode
// ============================================================================

/// How high and low tablet-count days are placed across the course
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleMode {
    /// All high days first, then all low days
    #[default]
    FrontLoadOverall,
    /// High days first within each 7-day block
    WeeklyFrontLoad,
    /// High and low days interleaved, starting high
    Alternating,
}

impl ScheduleMode {
    pub const ALL: [ScheduleMode; 3] = [
        ScheduleMode::FrontLoadOverall,
        ScheduleMode::WeeklyFrontLoad,
        ScheduleMode::Alternating,
    ];

    /// Human-readable label used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            ScheduleMode::FrontLoadOverall => "Front-load overall",
            ScheduleMode::WeeklyFrontLoad => "Weekly front-load",
            ScheduleMode::Alternating => "Alternating high/low",
        }
    }
}

impl fmt::Display for ScheduleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScheduleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' ', '/'], "_");
        match normalized.as_str() {
            "front_load_overall" | "front_load" | "frontload" | "overall" => {
                Ok(ScheduleMode::FrontLoadOverall)
            }
            "weekly_front_load" | "weekly" => Ok(ScheduleMode::WeeklyFrontLoad),
            "alternating" | "alternating_high_low" | "alternate" => {
                Ok(ScheduleMode::Alternating)
            }
            _ => Err(Error::InvalidInput(format!(
                "unknown schedule mode '{}' (expected front-load-overall, weekly-front-load or alternating)",
                s
            ))),
        }
    }
}

// ============================================================================
// Rounding Results
// ============================================================================

/// Whole-tablet split of a course into high and low days
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundedSchedule {
    pub high_count: u32,
    pub low_count: u32,
    pub high_days: u32,
    pub low_days: u32,
}

impl RoundedSchedule {
    pub fn days(&self) -> u32 {
        self.high_days + self.low_days
    }

    /// True when every day takes the same number of tablets
    pub fn is_uniform(&self) -> bool {
        self.high_count == self.low_count || self.high_days == 0 || self.low_days == 0
    }

    /// Total tablets across the course
    pub fn total_tablets(&self) -> u64 {
        u64::from(self.high_days) * u64::from(self.high_count)
            + u64::from(self.low_days) * u64::from(self.low_count)
    }
}

/// Output of the dose resolver: the rounded split plus the exact values it
/// was derived from (kept for display only)
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct DoseResolution {
    pub exact_daily_tablets: f64,
    pub total_exact_tablets: f64,
    pub total_target_tablets: u64,
    pub schedule: RoundedSchedule,
}

// ============================================================================
// Ordered Schedule
// ============================================================================

/// Per-day tablet counts for the whole course, day 1 first
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct OrderedSchedule(Vec<u32>);

impl OrderedSchedule {
    pub fn from_days(tablets: Vec<u32>) -> Self {
        Self(tablets)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total tablets to dispense
    pub fn total_tablets(&self) -> u64 {
        self.0.iter().map(|&t| u64::from(t)).sum()
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }
}

/// A maximal run of consecutive days with the same tablet count.
/// Days are 1-based and inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayRun {
    pub start: usize,
    pub end: usize,
    pub tablets: u32,
}

impl DayRun {
    pub fn len(&self) -> usize {
        self.end + 1 - self.start
    }
}

// ============================================================================
// Calculation
// ============================================================================

/// Everything downstream consumers need from one calculation request
#[derive(Clone, Debug, Serialize)]
pub struct Calculation {
    pub inputs: DoseInputs,
    pub mode: ScheduleMode,
    pub resolution: DoseResolution,
    pub schedule: OrderedSchedule,
    pub sig: String,
    pub total_tablets: u64,
    pub total_mg_per_m2: f64,
}

impl Calculation {
    /// Exact course dose in mg before rounding
    pub fn exact_total_mg(&self) -> f64 {
        self.inputs.exact_daily_mg() * f64::from(self.inputs.days())
    }

    /// Course dose in mg actually delivered by the whole-tablet schedule
    pub fn mixed_total_mg(&self) -> f64 {
        self.total_tablets as f64 * self.inputs.tablet_strength_mg()
    }
}
