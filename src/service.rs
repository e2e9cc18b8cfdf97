//! Shift service: the crate's entry points.
//!
//! `ShiftService` owns the stores and serializes every operation on the
//! live schedule:
//!
//! - `optimize` holds the live schedule exclusively while it rebuilds the
//!   baseline and resets the live copy, so it never interleaves with a
//!   reallocation.
//! - `request_leave` / `request_swap` hold the live schedule exclusively
//!   from the first read to the commit.
//! - `query` takes a shared lock.
//!
//! Lock order is live schedule, then preferences, then baseline.

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::{RoleCatalog, ShiftConfig};
use crate::error::{Registry, ShiftError, StoreError};
use crate::models::{Command, EmployeeId, Weekday, WeeklyBitmap, WeeklySchedule};
use crate::optimizer::{OptimizationReport, ScheduleOptimizer};
use crate::reallocation::{LeaveOutcome, ReallocationEngine, SwapOutcome};
use crate::store::{EmployeeDirectory, LimitStore, PreferenceStore, ScheduleStore};
use crate::validation::{self, ValidationResult};

/// Answer to a schedule query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryAnswer {
    /// The employee's whole live week.
    Week {
        employee: EmployeeId,
        name: String,
        days: WeeklyBitmap,
    },
    /// Whether the employee works one day.
    Day {
        employee: EmployeeId,
        name: String,
        day: Weekday,
        on_shift: bool,
    },
}

/// Successful result of a dispatched command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Leave(LeaveOutcome),
    Swap(SwapOutcome),
    Schedule(QueryAnswer),
    PreferencesUpdated {
        employee: EmployeeId,
        days: WeeklyBitmap,
    },
    Unrecognized,
}

/// Serialized access to the shift planning operations.
pub struct ShiftService<D, P, L, S> {
    roles: RoleCatalog,
    optimizer: ScheduleOptimizer,
    engine: ReallocationEngine,
    directory: D,
    limits: L,
    preferences: RwLock<P>,
    baseline: Mutex<S>,
    live: RwLock<S>,
}

impl<D, P, L, S> ShiftService<D, P, L, S>
where
    D: EmployeeDirectory,
    P: PreferenceStore,
    L: LimitStore,
    S: ScheduleStore,
{
    /// Creates a service over the given stores.
    pub fn new(
        config: &ShiftConfig,
        directory: D,
        preferences: P,
        limits: L,
        baseline: S,
        live: S,
    ) -> Self {
        Self {
            roles: config.roles.clone(),
            optimizer: ScheduleOptimizer::from_config(config),
            engine: ReallocationEngine::new(),
            directory,
            limits,
            preferences: RwLock::new(preferences),
            baseline: Mutex::new(baseline),
            live: RwLock::new(live),
        }
    }

    /// Replaces the reallocation engine.
    pub fn with_engine(mut self, engine: ReallocationEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Checks directory and limit data against the configured role catalog.
    pub fn validate_roster(&self) -> Result<ValidationResult, ShiftError> {
        let employees = self.directory.employees()?;
        let limits = self.limits.read_all()?;
        Ok(validation::validate_roster(&employees, &limits, &self.roles))
    }

    /// Rebuilds the baseline and resets the live schedule to it.
    pub fn optimize(&self) -> Result<OptimizationReport, ShiftError> {
        let mut live = write(&self.live, "live schedule")?;
        let preferences = read(&self.preferences, "preferences")?;
        let mut baseline = lock(&self.baseline, "baseline schedule")?;
        self.optimizer
            .optimize(&*preferences, &self.limits, &mut *baseline, &mut *live)
    }

    /// Hands `employee`'s shift on `day` to the best free replacement.
    pub fn request_leave(&self, employee: &str, day: Weekday) -> Result<LeaveOutcome, ShiftError> {
        let mut live = write(&self.live, "live schedule")?;
        self.engine
            .request_leave(&self.directory, &mut *live, employee, day)
    }

    /// Moves `employee`'s shift from `from` to `to`.
    pub fn request_swap(
        &self,
        employee: &str,
        from: Weekday,
        to: Weekday,
    ) -> Result<SwapOutcome, ShiftError> {
        let mut live = write(&self.live, "live schedule")?;
        self.engine
            .request_swap(&self.directory, &mut *live, employee, from, to)
    }

    /// Reads `employee`'s live week, or one day of it.
    pub fn query(&self, employee: &str, day: Option<Weekday>) -> Result<QueryAnswer, ShiftError> {
        let found = self
            .directory
            .lookup(employee)?
            .ok_or_else(|| ShiftError::not_found(employee, Registry::Directory))?;
        let days = read(&self.live, "live schedule")?
            .read(found.id)?
            .ok_or_else(|| ShiftError::not_found(employee, Registry::Schedule))?;

        Ok(match day {
            Some(day) => QueryAnswer::Day {
                employee: found.id,
                name: found.name,
                day,
                on_shift: days.get(day),
            },
            None => QueryAnswer::Week {
                employee: found.id,
                name: found.name,
                days,
            },
        })
    }

    /// Replaces `employee`'s preferred days with exactly `days`.
    ///
    /// Takes effect at the next [`optimize`](Self::optimize).
    pub fn update_preferences(
        &self,
        employee: &str,
        days: &[Weekday],
    ) -> Result<WeeklyBitmap, ShiftError> {
        self.replace_preferences(employee, days).map(|(_, bitmap)| bitmap)
    }

    /// Runs a structured command.
    pub fn dispatch(&self, command: Command) -> Result<Outcome, ShiftError> {
        match command {
            Command::Leave { employee, day } => self.request_leave(&employee, day).map(Outcome::Leave),
            Command::Swap { employee, from, to } => {
                self.request_swap(&employee, from, to).map(Outcome::Swap)
            }
            Command::ScheduleQuery { employee, day } => {
                self.query(&employee, day).map(Outcome::Schedule)
            }
            Command::PreferenceUpdate { employee, days } => self
                .replace_preferences(&employee, &days)
                .map(|(id, days)| Outcome::PreferencesUpdated { employee: id, days }),
            Command::Unrecognized => {
                tracing::debug!("Unrecognized command ignored");
                Ok(Outcome::Unrecognized)
            }
        }
    }

    fn replace_preferences(
        &self,
        employee: &str,
        days: &[Weekday],
    ) -> Result<(EmployeeId, WeeklyBitmap), ShiftError> {
        let found = self
            .directory
            .lookup(employee)?
            .ok_or_else(|| ShiftError::not_found(employee, Registry::Directory))?;
        let bitmap = WeeklyBitmap::from_days(days.iter().copied());
        write(&self.preferences, "preferences")?.write(found.id, bitmap)?;
        tracing::info!(employee, days = %bitmap, "Preferences replaced");
        Ok((found.id, bitmap))
    }

    /// Copy of the live schedule.
    pub fn live_schedule(&self) -> Result<WeeklySchedule, ShiftError> {
        Ok(read(&self.live, "live schedule")?.read_all()?)
    }

    /// Copy of the baseline schedule.
    pub fn baseline_schedule(&self) -> Result<WeeklySchedule, ShiftError> {
        Ok(lock(&self.baseline, "baseline schedule")?.read_all()?)
    }
}

fn read<'a, T>(lock: &'a RwLock<T>, name: &'static str) -> Result<RwLockReadGuard<'a, T>, StoreError> {
    lock.read().map_err(|_| StoreError::LockPoisoned(name))
}

fn write<'a, T>(lock: &'a RwLock<T>, name: &'static str) -> Result<RwLockWriteGuard<'a, T>, StoreError> {
    lock.write().map_err(|_| StoreError::LockPoisoned(name))
}

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &'static str) -> Result<MutexGuard<'a, T>, StoreError> {
    mutex.lock().map_err(|_| StoreError::LockPoisoned(name))
}
