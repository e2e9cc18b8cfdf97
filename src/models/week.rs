//! Weekdays and the seven-day bitmap.
//!
//! A `WeeklyBitmap` is an ordered set of flags, Monday first. The order
//! matters beyond presentation: the optimizer trims candidate days from
//! the end of this order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Day of the rolling week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Weekday {
    /// All days in week order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Position in the week (Monday = 0).
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Day at the given position, if in range.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Three-letter lowercase code ("mon").
    pub fn short_name(self) -> &'static str {
        match self {
            Weekday::Mon => "mon",
            Weekday::Tue => "tue",
            Weekday::Wed => "wed",
            Weekday::Thu => "thu",
            Weekday::Fri => "fri",
            Weekday::Sat => "sat",
            Weekday::Sun => "sun",
        }
    }

    /// Full English name ("Monday").
    pub fn full_name(self) -> &'static str {
        match self {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}

/// A day name that is neither a short code nor a full weekday name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized weekday: '{0}'")]
pub struct ParseWeekdayError(pub String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    /// Accepts "mon" or "monday" in any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|d| lowered == d.short_name() || lowered == d.full_name().to_ascii_lowercase())
            .ok_or_else(|| ParseWeekdayError(s.to_string()))
    }
}

/// Seven ordered flags, one per weekday.
///
/// Used both for preferences (desired days) and schedules (assigned days).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyBitmap([bool; 7]);

impl WeeklyBitmap {
    /// No days set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Every day set.
    pub fn full() -> Self {
        Self([true; 7])
    }

    /// Builds a bitmap with exactly the given days set. Duplicates collapse.
    pub fn from_days<I: IntoIterator<Item = Weekday>>(days: I) -> Self {
        let mut bitmap = Self::empty();
        for day in days {
            bitmap.set(day, true);
        }
        bitmap
    }

    /// Whether `day` is set.
    #[inline]
    pub fn get(&self, day: Weekday) -> bool {
        self.0[day.index()]
    }

    /// Sets or clears `day`.
    #[inline]
    pub fn set(&mut self, day: Weekday, value: bool) {
        self.0[day.index()] = value;
    }

    /// Returns a copy with `day` set to `value`.
    pub fn with(mut self, day: Weekday, value: bool) -> Self {
        self.set(day, value);
        self
    }

    /// Number of days set.
    pub fn count(&self) -> usize {
        self.0.iter().filter(|&&b| b).count()
    }

    /// Hours represented, at `hours_per_day` per set day.
    pub fn hours(&self, hours_per_day: u32) -> u32 {
        (self.count() as u32).saturating_mul(hours_per_day)
    }

    /// Whether no day is set.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Set days, Monday first.
    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(move |&d| self.get(d))
    }

    /// Cleared days, Monday first.
    pub fn off_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(move |&d| !self.get(d))
    }

    /// Days whose flag differs between `self` and `other`.
    pub fn differing_days(&self, other: &WeeklyBitmap) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|&d| self.get(d) != other.get(d))
            .collect()
    }

    /// Raw flags, Monday first.
    pub fn as_array(&self) -> [bool; 7] {
        self.0
    }
}

impl From<[bool; 7]> for WeeklyBitmap {
    fn from(flags: [bool; 7]) -> Self {
        Self(flags)
    }
}

impl FromIterator<Weekday> for WeeklyBitmap {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self::from_days(iter)
    }
}

impl fmt::Display for WeeklyBitmap {
    /// Renders as `1111100` (Monday first).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for flag in self.0 {
            f.write_str(if flag { "1" } else { "0" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_parsing() {
        assert_eq!("wed".parse::<Weekday>().unwrap(), Weekday::Wed);
        assert_eq!("Wednesday".parse::<Weekday>().unwrap(), Weekday::Wed);
        assert_eq!(" SUN ".parse::<Weekday>().unwrap(), Weekday::Sun);
        assert!("wedn".parse::<Weekday>().is_err());
        assert!("".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_weekday_order_and_index() {
        assert!(Weekday::Mon < Weekday::Sun);
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
            assert_eq!(Weekday::from_index(i), Some(*day));
        }
        assert_eq!(Weekday::from_index(7), None);
    }

    #[test]
    fn test_weekday_serde() {
        let json = serde_json::to_string(&Weekday::Thu).unwrap();
        assert_eq!(json, "\"thu\"");
        let back: Weekday = serde_json::from_str("\"sat\"").unwrap();
        assert_eq!(back, Weekday::Sat);
    }

    #[test]
    fn test_bitmap_basics() {
        let mut b = WeeklyBitmap::from_days([Weekday::Mon, Weekday::Wed, Weekday::Mon]);
        assert_eq!(b.count(), 2);
        assert!(b.get(Weekday::Wed));
        assert!(!b.get(Weekday::Tue));
        assert_eq!(b.hours(10), 20);

        b.set(Weekday::Wed, false);
        assert_eq!(b.days().collect::<Vec<_>>(), vec![Weekday::Mon]);
        assert_eq!(b.off_days().count(), 6);
        assert_eq!(b.to_string(), "1000000");
    }

    #[test]
    fn test_bitmap_differing_days() {
        let a = WeeklyBitmap::full();
        let b = a.with(Weekday::Sat, false).with(Weekday::Sun, false);
        assert_eq!(a.differing_days(&b), vec![Weekday::Sat, Weekday::Sun]);
        assert!(a.differing_days(&a).is_empty());
    }

    #[test]
    fn test_bitmap_serializes_as_flags() {
        let b = WeeklyBitmap::from_days([Weekday::Tue]);
        let json = serde_json::to_string(&b).unwrap();
        assert_eq!(json, "[false,true,false,false,false,false,false]");
    }
}
