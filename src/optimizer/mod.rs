//! Baseline schedule construction.
//!
//! Turns stated day preferences and hour limits into a weekly schedule
//! that never exceeds anyone's maximum hours.
//!
//! # Algorithm
//!
//! `ScheduleOptimizer` keeps each employee's preferred days and, while the
//! total exceeds `max_hours`, drops the latest remaining day in week order.
//! Days are never added to reach `min_hours`; shortfalls are reported.
//!
//! Dropping from the end of the week means Sunday and Saturday go first.
//! This is a business policy choice and may need revisiting per site.
//!
//! # Report
//!
//! `OptimizationReport` summarizes a run: coverage per day, trimmed days,
//! under-filled employees, and configuration gaps (employees with a
//! preference but no limit, or the reverse).

mod report;
mod trim;

pub use report::{ConfigurationGap, MissingInput, OptimizationReport, TrimmedDays, Underfill};
pub use trim::{EmployeePlan, OptimizationPlan, ScheduleOptimizer};
