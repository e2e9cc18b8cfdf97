//! Leave and swap handling on the live schedule.
//!
//! Candidates are ranked by their rating for the requester's role:
//! the most skilled free employee fills a vacated day, and the least
//! skilled employee on a requested day gives up their shift.
//!
//! Every request is computed in full against one snapshot before anything
//! is written, then committed with a single all-or-nothing
//! [`ScheduleStore::apply`](crate::store::ScheduleStore::apply).
//!
//! # Usage
//!
//! ```
//! use u_shift::models::{Employee, EmployeeId, Weekday, WeeklyBitmap, WeeklySchedule};
//! use u_shift::reallocation::ReallocationEngine;
//! use u_shift::store::{InMemoryDirectory, InMemorySchedule};
//!
//! let directory: InMemoryDirectory = vec![
//!     Employee::new(1, "Maria", "Server").with_rating("Server", 6),
//!     Employee::new(2, "Ana", "Server").with_rating("Server", 9),
//! ]
//! .into_iter()
//! .collect();
//! let mut live = InMemorySchedule::from_schedule(
//!     WeeklySchedule::new()
//!         .with_row(EmployeeId(1), WeeklyBitmap::from_days([Weekday::Wed]))
//!         .with_row(EmployeeId(2), WeeklyBitmap::empty()),
//! );
//!
//! let engine = ReallocationEngine::new();
//! let outcome = engine
//!     .request_leave(&directory, &mut live, "Maria", Weekday::Wed)
//!     .unwrap();
//! assert_eq!(outcome.replacement.name, "Ana");
//! ```

mod candidate;
mod engine;
mod outcome;
pub mod rules;

pub use candidate::{scan_candidates, select_best, Candidate};
pub use engine::ReallocationEngine;
pub use outcome::{LeaveOutcome, SwapOutcome};

use std::fmt::Debug;

/// Score returned by a candidate rule.
///
/// Lower scores = preferred candidate.
pub type RuleScore = i64;

/// Ranks replacement or displacement candidates.
///
/// # Score Convention
/// **Lower score = preferred.** Ties are broken by ascending employee id
/// in [`select_best`].
pub trait CandidateRule: Send + Sync + Debug {
    /// Rule name (e.g., "MOST_SKILLED").
    fn name(&self) -> &'static str;

    /// Scores a candidate; lower is preferred.
    fn evaluate(&self, candidate: &Candidate) -> RuleScore;
}
