//! Committed reallocation results.

use serde::{Deserialize, Serialize};

use super::Candidate;
use crate::models::{EmployeeId, Role, ShiftChange, Weekday};

/// A granted leave request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveOutcome {
    pub requester: EmployeeId,
    pub requester_name: String,
    /// Role the replacement was ranked under.
    pub role: Role,
    pub day: Weekday,
    /// Employee who takes over the shift.
    pub replacement: Candidate,
    /// The committed edits (requester off, replacement on).
    pub changes: Vec<ShiftChange>,
}

/// A granted swap request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOutcome {
    pub requester: EmployeeId,
    pub requester_name: String,
    pub role: Role,
    /// Day the requester gives up.
    pub from: Weekday,
    /// Day the requester takes.
    pub to: Weekday,
    /// Employee who covers `from`.
    pub replacement: Candidate,
    /// Employee who loses their shift on `to`.
    pub displaced: Candidate,
    /// The four committed edits.
    pub changes: Vec<ShiftChange>,
}
