//! Preference trimming optimizer.
//!
//! # Algorithm
//!
//! For every employee present in both the preference and limit tables:
//! 1. Candidate days = preferred days, Monday first.
//! 2. While `|candidates| * hours_per_day > max_hours`, drop the last
//!    candidate.
//! 3. The surviving candidates are the employee's schedule.
//!
//! Employees present in only one table are skipped and reported as
//! configuration gaps.
//!
//! # Complexity
//! O(n) in the number of employees (seven days each).

use std::collections::BTreeMap;

use super::report::{ConfigurationGap, OptimizationReport, TrimmedDays, Underfill};
use crate::config::ShiftConfig;
use crate::error::ShiftError;
use crate::models::{EmployeeId, HourLimit, Weekday, WeeklyBitmap, WeeklySchedule, HOURS_PER_DAY};
use crate::store::{LimitStore, PreferenceStore, ScheduleStore};

/// Outcome of trimming one employee's preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePlan {
    /// Days kept.
    pub days: WeeklyBitmap,
    /// Preferred days removed to respect `max_hours`, in removal order.
    pub dropped: Vec<Weekday>,
    /// Whether the kept hours fall short of `min_hours`.
    pub under_min: bool,
}

/// A computed, not yet committed, baseline.
#[derive(Debug, Clone)]
pub struct OptimizationPlan {
    pub schedule: WeeklySchedule,
    pub report: OptimizationReport,
}

/// Builds baseline schedules from preferences and hour limits.
///
/// # Example
///
/// ```
/// use u_shift::models::{HourLimit, Weekday, WeeklyBitmap};
/// use u_shift::optimizer::ScheduleOptimizer;
///
/// let optimizer = ScheduleOptimizer::new();
/// let plan = optimizer.trim(WeeklyBitmap::full(), HourLimit::at_most(50));
/// assert_eq!(plan.days.count(), 5);
/// assert_eq!(plan.dropped, vec![Weekday::Sun, Weekday::Sat]);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleOptimizer {
    hours_per_day: u32,
}

impl ScheduleOptimizer {
    /// Creates an optimizer crediting [`HOURS_PER_DAY`] per day.
    pub fn new() -> Self {
        Self {
            hours_per_day: HOURS_PER_DAY,
        }
    }

    /// Creates an optimizer from service configuration.
    pub fn from_config(config: &ShiftConfig) -> Self {
        Self::new().with_hours_per_day(config.hours_per_day)
    }

    /// Sets the hours credited per day.
    pub fn with_hours_per_day(mut self, hours: u32) -> Self {
        self.hours_per_day = hours;
        self
    }

    pub fn hours_per_day(&self) -> u32 {
        self.hours_per_day
    }

    /// Trims one preference to fit a limit.
    pub fn trim(&self, preference: WeeklyBitmap, limit: HourLimit) -> EmployeePlan {
        let mut candidates: Vec<Weekday> = preference.days().collect();
        let mut dropped = Vec::new();

        while !limit.allows(self.hours_for(candidates.len())) {
            match candidates.pop() {
                Some(day) => dropped.push(day),
                None => break,
            }
        }

        let days = WeeklyBitmap::from_days(candidates);
        EmployeePlan {
            under_min: limit.is_under(days.hours(self.hours_per_day)),
            days,
            dropped,
        }
    }

    /// Computes a baseline from in-memory tables.
    ///
    /// Employees are visited in ascending id order, so the result is
    /// identical for identical input.
    pub fn plan(
        &self,
        preferences: &BTreeMap<EmployeeId, WeeklyBitmap>,
        limits: &BTreeMap<EmployeeId, HourLimit>,
    ) -> OptimizationPlan {
        let mut schedule = WeeklySchedule::new();
        let mut trimmed = Vec::new();
        let mut underfilled = Vec::new();
        let mut gaps = Vec::new();

        for (&employee, &preference) in preferences {
            let Some(&limit) = limits.get(&employee) else {
                tracing::warn!(%employee, "Preference without hour limit; skipping");
                gaps.push(ConfigurationGap::missing_limit(employee));
                continue;
            };

            let plan = self.trim(preference, limit);
            if !plan.dropped.is_empty() {
                tracing::debug!(
                    %employee,
                    dropped = ?plan.dropped,
                    max_hours = limit.max_hours,
                    "Trimmed preferred days"
                );
                trimmed.push(TrimmedDays {
                    employee,
                    dropped: plan.dropped,
                });
            }
            if plan.under_min {
                underfilled.push(Underfill {
                    employee,
                    hours: plan.days.hours(self.hours_per_day),
                    min_hours: limit.min_hours,
                });
            }
            schedule.insert(employee, plan.days);
        }

        for &employee in limits.keys() {
            if !preferences.contains_key(&employee) {
                tracing::warn!(%employee, "Hour limit without preference; skipping");
                gaps.push(ConfigurationGap::missing_preference(employee));
            }
        }
        gaps.sort_by_key(|g| g.employee);

        let report = OptimizationReport::summarize(
            &schedule,
            self.hours_per_day,
            trimmed,
            underfilled,
            gaps,
        );
        OptimizationPlan { schedule, report }
    }

    /// Rebuilds the baseline and resets the live schedule to it.
    ///
    /// Both tables are replaced wholesale. Any reallocation applied to the
    /// live schedule since the previous run is discarded, so callers must
    /// hold exclusive access to `live` for the duration of this call.
    ///
    /// If the live write fails, the previous baseline is written back.
    pub fn optimize<P, L, B, S>(
        &self,
        preferences: &P,
        limits: &L,
        baseline: &mut B,
        live: &mut S,
    ) -> Result<OptimizationReport, ShiftError>
    where
        P: PreferenceStore + ?Sized,
        L: LimitStore + ?Sized,
        B: ScheduleStore + ?Sized,
        S: ScheduleStore + ?Sized,
    {
        let preference_rows = preferences.read_all()?;
        let limit_rows = limits.read_all()?;
        let OptimizationPlan { schedule, report } = self.plan(&preference_rows, &limit_rows);

        let previous = baseline.read_all()?;
        baseline.bulk_replace_all(schedule.clone())?;
        if let Err(err) = live.bulk_replace_all(schedule) {
            if let Err(restore_err) = baseline.bulk_replace_all(previous) {
                tracing::error!(error = %restore_err, "Failed to restore baseline schedule");
            }
            return Err(err.into());
        }

        tracing::info!(
            scheduled = report.scheduled,
            trimmed = report.trimmed.len(),
            underfilled = report.underfilled.len(),
            gaps = report.gaps.len(),
            "Baseline rebuilt and live schedule reset"
        );
        Ok(report)
    }

    #[inline]
    fn hours_for(&self, days: usize) -> u32 {
        (days as u32).saturating_mul(self.hours_per_day)
    }
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::models::ShiftChange;
    use crate::optimizer::MissingInput;
    use crate::store::{InMemoryLimits, InMemoryPreferences, InMemorySchedule, StoreResult};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn id(n: u32) -> EmployeeId {
        EmployeeId(n)
    }

    #[test]
    fn test_full_week_trimmed_from_the_end() {
        let optimizer = ScheduleOptimizer::new();
        let plan = optimizer.trim(WeeklyBitmap::full(), HourLimit::at_most(50));

        assert_eq!(
            plan.days.days().collect::<Vec<_>>(),
            vec![Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri]
        );
        // Sunday goes first, then Saturday
        assert_eq!(plan.dropped, vec![Weekday::Sun, Weekday::Sat]);
        assert!(!plan.under_min);
    }

    #[test]
    fn test_preference_within_limit_untouched() {
        let optimizer = ScheduleOptimizer::new();
        let pref = WeeklyBitmap::from_days([Weekday::Tue, Weekday::Sat]);
        let plan = optimizer.trim(pref, HourLimit::new(0, 40));
        assert_eq!(plan.days, pref);
        assert!(plan.dropped.is_empty());
    }

    #[test]
    fn test_under_min_is_not_filled() {
        let optimizer = ScheduleOptimizer::new();
        let pref = WeeklyBitmap::from_days([Weekday::Mon]);
        let plan = optimizer.trim(pref, HourLimit::new(40, 60));
        assert_eq!(plan.days, pref);
        assert!(plan.under_min);
    }

    #[test]
    fn test_zero_limit_clears_everything() {
        let optimizer = ScheduleOptimizer::new();
        let plan = optimizer.trim(WeeklyBitmap::full(), HourLimit::default());
        assert!(plan.days.is_empty());
        assert_eq!(plan.dropped.len(), 7);
    }

    #[test]
    fn test_non_multiple_limit_rounds_down() {
        let optimizer = ScheduleOptimizer::new();
        let plan = optimizer.trim(WeeklyBitmap::full(), HourLimit::at_most(35));
        assert_eq!(plan.days.count(), 3);
    }

    #[test]
    fn test_custom_hours_per_day() {
        let optimizer = ScheduleOptimizer::new().with_hours_per_day(8);
        let plan = optimizer.trim(WeeklyBitmap::full(), HourLimit::at_most(40));
        assert_eq!(plan.days.count(), 5);
    }

    #[test]
    fn test_oversized_hours_per_day_saturates() {
        let optimizer = ScheduleOptimizer::new().with_hours_per_day(1_000_000_000);
        let plan = optimizer.trim(WeeklyBitmap::full(), HourLimit::at_most(3_000_000_000));

        assert_eq!(plan.days.count(), 3);
        assert_eq!(WeeklyBitmap::full().hours(1_000_000_000), u32::MAX);
    }

    #[test]
    fn test_plan_reports_gaps() {
        let optimizer = ScheduleOptimizer::new();
        let preferences = BTreeMap::from([
            (id(1), WeeklyBitmap::full()),
            (id(2), WeeklyBitmap::full()),
        ]);
        let limits = BTreeMap::from([
            (id(1), HourLimit::at_most(30)),
            (id(3), HourLimit::at_most(30)),
        ]);

        let plan = optimizer.plan(&preferences, &limits);
        assert_eq!(plan.schedule.len(), 1);
        assert!(plan.schedule.contains(id(1)));

        let gaps = &plan.report.gaps;
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].employee, id(2));
        assert_eq!(gaps[0].missing, MissingInput::Limit);
        assert_eq!(gaps[1].employee, id(3));
        assert_eq!(gaps[1].missing, MissingInput::Preference);
    }

    #[test]
    fn test_optimize_replaces_and_resets() {
        let optimizer = ScheduleOptimizer::new();
        let prefs = InMemoryPreferences::new().with_row(id(1), WeeklyBitmap::full());
        let limits = InMemoryLimits::new().with_row(id(1), HourLimit::at_most(50));
        let stale = WeeklySchedule::new().with_row(id(42), WeeklyBitmap::full());
        let mut baseline = InMemorySchedule::from_schedule(stale.clone());
        let mut live = InMemorySchedule::from_schedule(stale);

        let report = optimizer
            .optimize(&prefs, &limits, &mut baseline, &mut live)
            .unwrap();

        assert_eq!(report.scheduled, 1);
        assert!(!baseline.snapshot().contains(id(42)));
        assert_eq!(baseline.snapshot(), live.snapshot());

        // reallocation drift is wiped by the next run
        live.apply(&[ShiftChange::release(id(1), Weekday::Mon)]).unwrap();
        assert_ne!(baseline.snapshot(), live.snapshot());
        optimizer
            .optimize(&prefs, &limits, &mut baseline, &mut live)
            .unwrap();
        assert_eq!(baseline.snapshot(), live.snapshot());
    }

    /// Schedule store that rejects every bulk replacement.
    struct UnavailableSchedule;

    impl ScheduleStore for UnavailableSchedule {
        fn read_all(&self) -> StoreResult<WeeklySchedule> {
            Ok(WeeklySchedule::new())
        }

        fn read(&self, _id: EmployeeId) -> StoreResult<Option<WeeklyBitmap>> {
            Ok(None)
        }

        fn bulk_replace_all(&mut self, _schedule: WeeklySchedule) -> StoreResult<()> {
            Err(StoreError::Backend("down".into()))
        }

        fn point_update(&mut self, _change: ShiftChange) -> StoreResult<()> {
            Err(StoreError::Backend("down".into()))
        }
    }

    #[test]
    fn test_optimize_restores_baseline_when_live_write_fails() {
        let optimizer = ScheduleOptimizer::new();
        let prefs = InMemoryPreferences::new().with_row(id(1), WeeklyBitmap::full());
        let limits = InMemoryLimits::new().with_row(id(1), HourLimit::at_most(50));
        let original = WeeklySchedule::new().with_row(id(9), WeeklyBitmap::full());
        let mut baseline = InMemorySchedule::from_schedule(original.clone());

        let err = optimizer
            .optimize(&prefs, &limits, &mut baseline, &mut UnavailableSchedule)
            .unwrap_err();

        assert_eq!(err, ShiftError::Store(StoreError::Backend("down".into())));
        assert_eq!(baseline.snapshot(), &original);
    }

    fn random_tables(
        rng: &mut StdRng,
        employees: u32,
    ) -> (
        BTreeMap<EmployeeId, WeeklyBitmap>,
        BTreeMap<EmployeeId, HourLimit>,
    ) {
        let mut preferences = BTreeMap::new();
        let mut limits = BTreeMap::new();
        for n in 0..employees {
            let mut flags = [false; 7];
            for flag in flags.iter_mut() {
                *flag = rng.random_bool(0.6);
            }
            if rng.random_bool(0.9) {
                preferences.insert(id(n), WeeklyBitmap::from(flags));
            }
            if rng.random_bool(0.9) {
                let min = rng.random_range(0..=40);
                let max = rng.random_range(0..=75);
                limits.insert(id(n), HourLimit::new(min, max));
            }
        }
        (preferences, limits)
    }

    #[test]
    fn test_random_tables_respect_max_hours() {
        let optimizer = ScheduleOptimizer::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let (preferences, limits) = random_tables(&mut rng, 20);
            let plan = optimizer.plan(&preferences, &limits);
            for (employee, days) in plan.schedule.iter() {
                let limit = limits[&employee];
                assert!(days.hours(HOURS_PER_DAY) <= limit.max_hours);
                // kept days are always a prefix of the preferred days
                let preferred: Vec<Weekday> = preferences[&employee].days().collect();
                let kept: Vec<Weekday> = days.days().collect();
                assert_eq!(&preferred[..kept.len()], kept.as_slice());
            }
        }
    }

    #[test]
    fn test_plan_is_idempotent() {
        let optimizer = ScheduleOptimizer::new();
        let mut rng = StdRng::seed_from_u64(7);
        let (preferences, limits) = random_tables(&mut rng, 30);

        let first = optimizer.plan(&preferences, &limits);
        let second = optimizer.plan(&preferences, &limits);
        assert_eq!(first.schedule, second.schedule);
        assert_eq!(first.report, second.report);
    }
}
