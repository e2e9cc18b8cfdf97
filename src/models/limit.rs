//! Weekly hour bounds.

use serde::{Deserialize, Serialize};

/// Per-employee weekly hour bounds.
///
/// `max_hours` is enforced by the optimizer. `min_hours` is a soft target:
/// falling short of it is reported, never corrected by adding days.
/// Both default to 0 until set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourLimit {
    #[serde(default)]
    pub min_hours: u32,
    #[serde(default)]
    pub max_hours: u32,
}

impl HourLimit {
    pub fn new(min_hours: u32, max_hours: u32) -> Self {
        Self {
            min_hours,
            max_hours,
        }
    }

    /// Only an upper bound.
    pub fn at_most(max_hours: u32) -> Self {
        Self::new(0, max_hours)
    }

    /// Whether `hours` stays within the upper bound.
    #[inline]
    pub fn allows(&self, hours: u32) -> bool {
        hours <= self.max_hours
    }

    /// Whether `hours` falls short of the soft lower bound.
    #[inline]
    pub fn is_under(&self, hours: u32) -> bool {
        hours < self.min_hours
    }

    /// Whether the bounds are ordered (`min <= max`).
    pub fn is_consistent(&self) -> bool {
        self.min_hours <= self.max_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let l = HourLimit::default();
        assert_eq!(l, HourLimit::new(0, 0));
        assert!(l.allows(0));
        assert!(!l.allows(10));
    }

    #[test]
    fn test_bounds() {
        let l = HourLimit::new(30, 50);
        assert!(l.allows(50));
        assert!(!l.allows(60));
        assert!(l.is_under(20));
        assert!(!l.is_under(30));
        assert!(l.is_consistent());
        assert!(!HourLimit::new(40, 20).is_consistent());
    }
}
