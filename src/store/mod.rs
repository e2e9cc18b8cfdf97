//! Collaborator interfaces.
//!
//! The crate never talks to a storage technology directly. Employee data,
//! preferences, limits and schedules reach it through the traits below,
//! and tests substitute the in-memory implementations from [`memory`].
//!
//! | Trait | Read by | Written by |
//! |-------|---------|-----------|
//! | `EmployeeDirectory` | reallocation, service | external |
//! | `PreferenceStore` | optimizer | service (`PreferenceUpdate`), external |
//! | `LimitStore` | optimizer | external |
//! | `ScheduleStore` | everything | optimizer (bulk), reallocation (point) |

pub mod memory;

pub use memory::{InMemoryDirectory, InMemoryLimits, InMemoryPreferences, InMemorySchedule};

use std::collections::BTreeMap;

use crate::error::StoreError;
use crate::models::{Employee, EmployeeId, HourLimit, ShiftChange, WeeklyBitmap, WeeklySchedule};

/// Result type for store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Identity, role and ratings of employees.
pub trait EmployeeDirectory {
    /// Finds an employee by their unique name.
    fn lookup(&self, name: &str) -> StoreResult<Option<Employee>>;

    /// Finds an employee by id.
    fn get(&self, id: EmployeeId) -> StoreResult<Option<Employee>>;

    /// All employees, ascending id.
    fn employees(&self) -> StoreResult<Vec<Employee>>;
}

/// Preferred working days per employee.
pub trait PreferenceStore {
    fn read(&self, id: EmployeeId) -> StoreResult<Option<WeeklyBitmap>>;

    /// Replaces the employee's preference wholesale.
    fn write(&mut self, id: EmployeeId, days: WeeklyBitmap) -> StoreResult<()>;

    fn read_all(&self) -> StoreResult<BTreeMap<EmployeeId, WeeklyBitmap>>;
}

/// Hour bounds per employee.
pub trait LimitStore {
    fn read(&self, id: EmployeeId) -> StoreResult<Option<HourLimit>>;

    fn read_all(&self) -> StoreResult<BTreeMap<EmployeeId, HourLimit>>;
}

/// A weekly schedule table (baseline or live).
pub trait ScheduleStore {
    fn read_all(&self) -> StoreResult<WeeklySchedule>;

    fn read(&self, id: EmployeeId) -> StoreResult<Option<WeeklyBitmap>>;

    /// Drops every existing row and stores `schedule` in its place.
    fn bulk_replace_all(&mut self, schedule: WeeklySchedule) -> StoreResult<()>;

    /// Sets one bit of one existing row.
    fn point_update(&mut self, change: ShiftChange) -> StoreResult<()>;

    /// Applies every change or none of them.
    ///
    /// The default implementation checks that all rows exist, then issues
    /// point updates in order. If one of them fails, the updates already
    /// issued are reverted before the error is returned. Backends with
    /// native transactions should override this.
    fn apply(&mut self, changes: &[ShiftChange]) -> StoreResult<()> {
        let mut previous = Vec::with_capacity(changes.len());
        for change in changes {
            let row = self
                .read(change.employee)?
                .ok_or(StoreError::MissingRow(change.employee))?;
            previous.push(ShiftChange {
                on_shift: row.get(change.day),
                ..*change
            });
        }

        for (applied, change) in changes.iter().enumerate() {
            if let Err(err) = self.point_update(*change) {
                for undo in previous[..applied].iter().rev() {
                    if let Err(undo_err) = self.point_update(*undo) {
                        tracing::error!(
                            employee = %undo.employee,
                            day = %undo.day,
                            error = %undo_err,
                            "Failed to revert schedule change"
                        );
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}
