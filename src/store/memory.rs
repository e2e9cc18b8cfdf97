//! In-memory store implementations.
//!
//! Back the service in tests and in embedders that keep the roster in
//! process. None of them do their own locking; `ShiftService` serializes
//! access.

use std::collections::BTreeMap;

use super::{EmployeeDirectory, LimitStore, PreferenceStore, ScheduleStore, StoreResult};
use crate::models::{Employee, EmployeeId, HourLimit, ShiftChange, WeeklyBitmap, WeeklySchedule};

/// Employee directory keyed by id.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    employees: BTreeMap<EmployeeId, Employee>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an employee.
    pub fn insert(&mut self, employee: Employee) {
        self.employees.insert(employee.id, employee);
    }

    pub fn with_employee(mut self, employee: Employee) -> Self {
        self.insert(employee);
        self
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }
}

impl FromIterator<Employee> for InMemoryDirectory {
    fn from_iter<I: IntoIterator<Item = Employee>>(iter: I) -> Self {
        Self {
            employees: iter.into_iter().map(|e| (e.id, e)).collect(),
        }
    }
}

impl EmployeeDirectory for InMemoryDirectory {
    fn lookup(&self, name: &str) -> StoreResult<Option<Employee>> {
        Ok(self.employees.values().find(|e| e.name == name).cloned())
    }

    fn get(&self, id: EmployeeId) -> StoreResult<Option<Employee>> {
        Ok(self.employees.get(&id).cloned())
    }

    fn employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.employees.values().cloned().collect())
    }
}

/// Preference table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreferences {
    rows: BTreeMap<EmployeeId, WeeklyBitmap>,
}

impl InMemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_row(mut self, id: EmployeeId, days: WeeklyBitmap) -> Self {
        self.rows.insert(id, days);
        self
    }
}

impl PreferenceStore for InMemoryPreferences {
    fn read(&self, id: EmployeeId) -> StoreResult<Option<WeeklyBitmap>> {
        Ok(self.rows.get(&id).copied())
    }

    fn write(&mut self, id: EmployeeId, days: WeeklyBitmap) -> StoreResult<()> {
        self.rows.insert(id, days);
        Ok(())
    }

    fn read_all(&self) -> StoreResult<BTreeMap<EmployeeId, WeeklyBitmap>> {
        Ok(self.rows.clone())
    }
}

/// Limit table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLimits {
    rows: BTreeMap<EmployeeId, HourLimit>,
}

impl InMemoryLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: EmployeeId, limit: HourLimit) {
        self.rows.insert(id, limit);
    }

    pub fn with_row(mut self, id: EmployeeId, limit: HourLimit) -> Self {
        self.insert(id, limit);
        self
    }
}

impl LimitStore for InMemoryLimits {
    fn read(&self, id: EmployeeId) -> StoreResult<Option<HourLimit>> {
        Ok(self.rows.get(&id).copied())
    }

    fn read_all(&self) -> StoreResult<BTreeMap<EmployeeId, HourLimit>> {
        Ok(self.rows.clone())
    }
}

/// Schedule table. Multi-row updates are applied to a copy and swapped in.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchedule {
    schedule: WeeklySchedule,
}

impl InMemorySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_schedule(schedule: WeeklySchedule) -> Self {
        Self { schedule }
    }

    /// Current contents.
    pub fn snapshot(&self) -> &WeeklySchedule {
        &self.schedule
    }
}

impl ScheduleStore for InMemorySchedule {
    fn read_all(&self) -> StoreResult<WeeklySchedule> {
        Ok(self.schedule.clone())
    }

    fn read(&self, id: EmployeeId) -> StoreResult<Option<WeeklyBitmap>> {
        Ok(self.schedule.get(id))
    }

    fn bulk_replace_all(&mut self, schedule: WeeklySchedule) -> StoreResult<()> {
        self.schedule = schedule;
        Ok(())
    }

    fn point_update(&mut self, change: ShiftChange) -> StoreResult<()> {
        self.schedule.apply_change(change)
    }

    fn apply(&mut self, changes: &[ShiftChange]) -> StoreResult<()> {
        let mut next = self.schedule.clone();
        next.apply(changes)?;
        self.schedule = next;
        Ok(())
    }
}
