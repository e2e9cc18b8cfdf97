//! Error types.
//!
//! Every failure in this crate is a recoverable, caller-visible outcome.
//! The variants are kept distinct on purpose: callers phrase
//! `NotFound` differently from `NoActiveShift`, and `NoReplacement`
//! differently from `NoDisplacement`.

use std::fmt;

use thiserror::Error;

use crate::models::{EmployeeId, Weekday};

/// Which collaborator failed to resolve an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registry {
    /// The employee directory (identity, role, ratings).
    Directory,
    /// The live schedule.
    Schedule,
}

impl fmt::Display for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Registry::Directory => f.write_str("employee directory"),
            Registry::Schedule => f.write_str("live schedule"),
        }
    }
}

/// Why a swap request was refused before any candidate search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapRejection {
    /// The requester has no shift on the day they want to give away.
    NothingToSwapFrom(Weekday),
    /// The requester already works the day they want to take.
    AlreadyScheduled(Weekday),
}

impl fmt::Display for SwapRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapRejection::NothingToSwapFrom(day) => write!(f, "no shift on {day} to swap from"),
            SwapRejection::AlreadyScheduled(day) => write!(f, "already scheduled on {day}"),
        }
    }
}

/// Failure of a scheduling operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShiftError {
    #[error("employee '{employee}' not found in {registry}")]
    NotFound { employee: String, registry: Registry },

    #[error("employee '{employee}' has no shift on {day}")]
    NoActiveShift { employee: String, day: Weekday },

    #[error("invalid swap for '{employee}': {rejection}")]
    InvalidSwap {
        employee: String,
        rejection: SwapRejection,
    },

    #[error("no employee is free on {day} to take over the shift")]
    NoReplacement { day: Weekday },

    #[error("no employee works on {day} whose shift could be taken")]
    NoDisplacement { day: Weekday },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ShiftError {
    pub(crate) fn not_found(employee: impl Into<String>, registry: Registry) -> Self {
        Self::NotFound {
            employee: employee.into(),
            registry,
        }
    }
}

/// Failure reported by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("no schedule row for employee {0}")]
    MissingRow(EmployeeId),

    #[error("lock on {0} was poisoned")]
    LockPoisoned(&'static str),

    #[error("store backend error: {0}")]
    Backend(String),
}
