//! Reallocation engine.
//!
//! # Algorithm
//!
//! **Leave** (`employee`, `day`):
//! 1. Resolve the requester in the directory and the live schedule.
//! 2. Require a shift on `day`.
//! 3. Among employees free on `day`, pick the best under the fill rule.
//! 4. Commit: requester off, replacement on.
//!
//! **Swap** (`employee`, `from`, `to`):
//! 1. Resolve the requester; require a shift on `from` and none on `to`.
//! 2. Among employees free on `from`, pick the best under the fill rule.
//! 3. Among employees working `to`, pick the best under the displace rule.
//! 4. Commit all four edits together.
//!
//! Nothing is written until every step has succeeded.

use std::sync::Arc;

use super::rules::{LeastSkilled, MostSkilled};
use super::{scan_candidates, select_best, Candidate, CandidateRule, LeaveOutcome, SwapOutcome};
use crate::error::{Registry, ShiftError, SwapRejection};
use crate::models::{Employee, ShiftChange, Weekday, WeeklyBitmap, WeeklySchedule};
use crate::store::{EmployeeDirectory, ScheduleStore};

/// Applies leave and swap requests to a live schedule.
///
/// Holds the two ranking rules; stores are passed into each call.
#[derive(Clone)]
pub struct ReallocationEngine {
    fill_rule: Arc<dyn CandidateRule>,
    displace_rule: Arc<dyn CandidateRule>,
}

impl ReallocationEngine {
    /// Creates an engine that fills with [`MostSkilled`] and displaces
    /// with [`LeastSkilled`].
    pub fn new() -> Self {
        Self {
            fill_rule: Arc::new(MostSkilled),
            displace_rule: Arc::new(LeastSkilled),
        }
    }

    /// Sets the rule choosing who covers a vacated shift.
    pub fn with_fill_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.fill_rule = Arc::new(rule);
        self
    }

    /// Sets the rule choosing whose shift a swap takes over.
    pub fn with_displace_rule<R: CandidateRule + 'static>(mut self, rule: R) -> Self {
        self.displace_rule = Arc::new(rule);
        self
    }

    /// Hands `employee`'s shift on `day` to the best free replacement.
    ///
    /// # Errors
    /// - `NotFound` if the employee is missing from the directory or the
    ///   live schedule.
    /// - `NoActiveShift` if they are not working `day`.
    /// - `NoReplacement` if nobody else is free on `day`.
    pub fn request_leave<D, S>(
        &self,
        directory: &D,
        live: &mut S,
        employee: &str,
        day: Weekday,
    ) -> Result<LeaveOutcome, ShiftError>
    where
        D: EmployeeDirectory + ?Sized,
        S: ScheduleStore + ?Sized,
    {
        let (requester, snapshot, row) = resolve(directory, &*live, employee)?;
        if !row.get(day) {
            tracing::debug!(employee, %day, "Leave rejected: no shift");
            return Err(ShiftError::NoActiveShift {
                employee: employee.to_string(),
                day,
            });
        }

        let replacement = self.find_replacement(directory, &snapshot, &requester, day)?;
        let changes = vec![
            ShiftChange::release(requester.id, day),
            ShiftChange::assign(replacement.id, day),
        ];
        live.apply(&changes)?;

        tracing::info!(
            employee,
            %day,
            replacement = %replacement.name,
            rating = replacement.rating,
            "Leave granted"
        );
        Ok(LeaveOutcome {
            requester: requester.id,
            requester_name: requester.name,
            role: requester.role,
            day,
            replacement,
            changes,
        })
    }

    /// Moves `employee`'s shift from `from` to `to`.
    ///
    /// The best free employee covers `from`; the least preferred employee
    /// working `to` gives up that day.
    ///
    /// # Errors
    /// - `NotFound` if the employee is missing from the directory or the
    ///   live schedule.
    /// - `InvalidSwap` if they have no shift on `from` or already work `to`.
    /// - `NoReplacement` if nobody else is free on `from`.
    /// - `NoDisplacement` if nobody else works `to`.
    pub fn request_swap<D, S>(
        &self,
        directory: &D,
        live: &mut S,
        employee: &str,
        from: Weekday,
        to: Weekday,
    ) -> Result<SwapOutcome, ShiftError>
    where
        D: EmployeeDirectory + ?Sized,
        S: ScheduleStore + ?Sized,
    {
        let (requester, snapshot, row) = resolve(directory, &*live, employee)?;
        let rejection = if !row.get(from) {
            Some(SwapRejection::NothingToSwapFrom(from))
        } else if row.get(to) {
            Some(SwapRejection::AlreadyScheduled(to))
        } else {
            None
        };
        if let Some(rejection) = rejection {
            tracing::debug!(employee, %rejection, "Swap rejected");
            return Err(ShiftError::InvalidSwap {
                employee: employee.to_string(),
                rejection,
            });
        }

        let replacement = self.find_replacement(directory, &snapshot, &requester, from)?;

        let working = scan_candidates(directory, &snapshot, to, true, requester.id, &requester.role)?;
        tracing::debug!(employee, day = %to, candidates = working.len(), "Displacement scan");
        let displaced = select_best(self.displace_rule.as_ref(), &working)
            .cloned()
            .ok_or(ShiftError::NoDisplacement { day: to })?;

        let changes = vec![
            ShiftChange::release(requester.id, from),
            ShiftChange::assign(replacement.id, from),
            ShiftChange::release(displaced.id, to),
            ShiftChange::assign(requester.id, to),
        ];
        live.apply(&changes)?;

        tracing::info!(
            employee,
            %from,
            %to,
            replacement = %replacement.name,
            displaced = %displaced.name,
            "Swap granted"
        );
        Ok(SwapOutcome {
            requester: requester.id,
            requester_name: requester.name,
            role: requester.role,
            from,
            to,
            replacement,
            displaced,
            changes,
        })
    }

    fn find_replacement<D>(
        &self,
        directory: &D,
        snapshot: &WeeklySchedule,
        requester: &Employee,
        day: Weekday,
    ) -> Result<Candidate, ShiftError>
    where
        D: EmployeeDirectory + ?Sized,
    {
        let free = scan_candidates(directory, snapshot, day, false, requester.id, &requester.role)?;
        tracing::debug!(
            employee = %requester.name,
            %day,
            candidates = free.len(),
            rule = self.fill_rule.name(),
            "Replacement scan"
        );
        select_best(self.fill_rule.as_ref(), &free)
            .cloned()
            .ok_or(ShiftError::NoReplacement { day })
    }
}

/// Looks the requester up and reads the live snapshot used for the request.
fn resolve<D, S>(
    directory: &D,
    live: &S,
    employee: &str,
) -> Result<(Employee, WeeklySchedule, WeeklyBitmap), ShiftError>
where
    D: EmployeeDirectory + ?Sized,
    S: ScheduleStore + ?Sized,
{
    let requester = directory
        .lookup(employee)?
        .ok_or_else(|| ShiftError::not_found(employee, Registry::Directory))?;
    let snapshot = live.read_all()?;
    let row = snapshot
        .get(requester.id)
        .ok_or_else(|| ShiftError::not_found(employee, Registry::Schedule))?;
    Ok((requester, snapshot, row))
}

impl Default for ReallocationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReallocationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReallocationEngine")
            .field("fill_rule", &self.fill_rule.name())
            .field("displace_rule", &self.displace_rule.name())
            .finish()
    }
}
