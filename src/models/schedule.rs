//! Weekly schedule model.
//!
//! A schedule maps each employee to the days they are assigned. The same
//! type serves as the optimizer's baseline and as the live schedule that
//! reallocation events mutate one bit at a time.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{EmployeeId, Weekday, WeeklyBitmap};
use crate::error::StoreError;

/// A single-bit edit of a schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftChange {
    pub employee: EmployeeId,
    pub day: Weekday,
    /// New value: `true` = on shift.
    pub on_shift: bool,
}

impl ShiftChange {
    /// Puts `employee` on shift for `day`.
    pub fn assign(employee: EmployeeId, day: Weekday) -> Self {
        Self {
            employee,
            day,
            on_shift: true,
        }
    }

    /// Takes `employee` off shift for `day`.
    pub fn release(employee: EmployeeId, day: Weekday) -> Self {
        Self {
            employee,
            day,
            on_shift: false,
        }
    }
}

/// Assigned days per employee, ordered by employee id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule {
    rows: BTreeMap<EmployeeId, WeeklyBitmap>,
}

impl WeeklySchedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee's row.
    pub fn insert(&mut self, employee: EmployeeId, days: WeeklyBitmap) {
        self.rows.insert(employee, days);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_row(mut self, employee: EmployeeId, days: WeeklyBitmap) -> Self {
        self.insert(employee, days);
        self
    }

    pub fn get(&self, employee: EmployeeId) -> Option<WeeklyBitmap> {
        self.rows.get(&employee).copied()
    }

    pub fn contains(&self, employee: EmployeeId) -> bool {
        self.rows.contains_key(&employee)
    }

    /// Rows in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (EmployeeId, WeeklyBitmap)> + '_ {
        self.rows.iter().map(|(&id, &days)| (id, days))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Employees on shift for `day`, ascending id.
    pub fn employees_on(&self, day: Weekday) -> Vec<EmployeeId> {
        self.iter()
            .filter(|(_, days)| days.get(day))
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of employees on shift for `day`.
    pub fn headcount(&self, day: Weekday) -> usize {
        self.rows.values().filter(|days| days.get(day)).count()
    }

    /// Headcount for every day, Monday first.
    pub fn coverage(&self) -> [usize; 7] {
        Weekday::ALL.map(|d| self.headcount(d))
    }

    /// Total scheduled hours across all rows.
    pub fn total_hours(&self, hours_per_day: u32) -> u32 {
        self.rows.values().map(|d| d.hours(hours_per_day)).sum()
    }

    /// Bits that must change to turn `self` into `other`.
    ///
    /// Rows present on only one side are compared against an empty week.
    pub fn diff(&self, other: &WeeklySchedule) -> Vec<ShiftChange> {
        let mut ids: Vec<EmployeeId> = self.rows.keys().chain(other.rows.keys()).copied().collect();
        ids.sort_unstable();
        ids.dedup();

        let mut changes = Vec::new();
        for id in ids {
            let before = self.get(id).unwrap_or_default();
            let after = other.get(id).unwrap_or_default();
            for day in before.differing_days(&after) {
                changes.push(ShiftChange {
                    employee: id,
                    day,
                    on_shift: after.get(day),
                });
            }
        }
        changes
    }

    /// Applies a single change. The row must exist.
    pub fn apply_change(&mut self, change: ShiftChange) -> Result<(), StoreError> {
        let row = self
            .rows
            .get_mut(&change.employee)
            .ok_or(StoreError::MissingRow(change.employee))?;
        row.set(change.day, change.on_shift);
        Ok(())
    }

    /// Applies all changes or none.
    ///
    /// Every referenced row is checked before the first write.
    pub fn apply(&mut self, changes: &[ShiftChange]) -> Result<(), StoreError> {
        if let Some(missing) = changes.iter().find(|c| !self.contains(c.employee)) {
            return Err(StoreError::MissingRow(missing.employee));
        }
        for &change in changes {
            self.apply_change(change)?;
        }
        Ok(())
    }
}

impl FromIterator<(EmployeeId, WeeklyBitmap)> for WeeklySchedule {
    fn from_iter<I: IntoIterator<Item = (EmployeeId, WeeklyBitmap)>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}
