//! Candidate discovery and selection.

use serde::{Deserialize, Serialize};

use super::CandidateRule;
use crate::models::{EmployeeId, Role, Weekday, WeeklySchedule, MISSING_RATING};
use crate::store::{EmployeeDirectory, StoreResult};

/// An employee considered for a reallocation, scored under one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: EmployeeId,
    pub name: String,
    /// Rating under the requester's role ([`MISSING_RATING`] if unrated).
    pub rating: i32,
}

impl Candidate {
    /// Whether the candidate has a rating for the role they were scored under.
    pub fn is_rated(&self) -> bool {
        self.rating != MISSING_RATING
    }
}

/// Employees whose `day` flag equals `on_shift`, excluding `requester`.
///
/// Only employees present in both the schedule snapshot and the directory
/// are returned, in ascending id order.
pub fn scan_candidates<D>(
    directory: &D,
    schedule: &WeeklySchedule,
    day: Weekday,
    on_shift: bool,
    requester: EmployeeId,
    role: &Role,
) -> StoreResult<Vec<Candidate>>
where
    D: EmployeeDirectory + ?Sized,
{
    let mut candidates = Vec::new();
    for (id, days) in schedule.iter() {
        if id == requester || days.get(day) != on_shift {
            continue;
        }
        if let Some(employee) = directory.get(id)? {
            candidates.push(Candidate {
                id,
                name: employee.name.clone(),
                rating: employee.rating_for(role),
            });
        }
    }
    Ok(candidates)
}

/// The preferred candidate under `rule`; equal scores go to the lower id.
pub fn select_best<'a, R>(rule: &R, candidates: &'a [Candidate]) -> Option<&'a Candidate>
where
    R: CandidateRule + ?Sized,
{
    candidates
        .iter()
        .min_by_key(|c| (rule.evaluate(c), c.id))
}
