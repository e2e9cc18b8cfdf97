//! Optimization run summary.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Scheduled | Employees with a baseline row |
//! | Coverage | Employees on shift per day |
//! | Total hours | Sum of assigned hours |
//! | Trimmed | Preferred days dropped to respect `max_hours` |
//! | Underfilled | Employees whose kept hours are below `min_hours` |
//! | Gaps | Employees with a preference xor a limit |

use serde::{Deserialize, Serialize};

use crate::models::{EmployeeId, Weekday, WeeklySchedule};

/// Which input an employee is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissingInput {
    Preference,
    Limit,
}

/// An employee left out of the baseline because one input is missing.
///
/// Not an error: the rest of the batch is optimized normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationGap {
    pub employee: EmployeeId,
    pub missing: MissingInput,
}

impl ConfigurationGap {
    pub fn missing_limit(employee: EmployeeId) -> Self {
        Self {
            employee,
            missing: MissingInput::Limit,
        }
    }

    pub fn missing_preference(employee: EmployeeId) -> Self {
        Self {
            employee,
            missing: MissingInput::Preference,
        }
    }
}

/// Preferred days removed for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimmedDays {
    pub employee: EmployeeId,
    /// Removal order (latest weekday first).
    pub dropped: Vec<Weekday>,
}

/// An employee scheduled below their soft minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Underfill {
    pub employee: EmployeeId,
    pub hours: u32,
    pub min_hours: u32,
}

/// Summary of one optimizer run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationReport {
    /// Employees with a baseline row.
    pub scheduled: usize,
    /// Headcount per day, Monday first.
    pub coverage: [usize; 7],
    /// Sum of assigned hours.
    pub total_hours: u32,
    pub trimmed: Vec<TrimmedDays>,
    pub underfilled: Vec<Underfill>,
    pub gaps: Vec<ConfigurationGap>,
}

impl OptimizationReport {
    /// Builds the report for a computed schedule.
    pub fn summarize(
        schedule: &WeeklySchedule,
        hours_per_day: u32,
        trimmed: Vec<TrimmedDays>,
        underfilled: Vec<Underfill>,
        gaps: Vec<ConfigurationGap>,
    ) -> Self {
        Self {
            scheduled: schedule.len(),
            coverage: schedule.coverage(),
            total_hours: schedule.total_hours(hours_per_day),
            trimmed,
            underfilled,
            gaps,
        }
    }

    /// Headcount on `day`.
    pub fn headcount(&self, day: Weekday) -> usize {
        self.coverage[day.index()]
    }

    /// Days nobody works, Monday first.
    pub fn uncovered_days(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|&d| self.headcount(d) == 0)
            .collect()
    }

    /// Whether every employee had both a preference and a limit.
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }
}
