//! Shift planning domain models.
//!
//! Provides the data types shared by the optimizer, the reallocation
//! engine and the store interfaces.
//!
//! # Domain Mappings
//!
//! | u-shift | Restaurant | Retail | Clinic |
//! |---------|-----------|--------|--------|
//! | Employee | Server/Cook | Cashier | Nurse |
//! | Role | Station | Department | Ward duty |
//! | WeeklyBitmap | Shift days | Rota | Duty roster |
//! | WeeklySchedule | Weekly rota | Store roster | Ward roster |

mod command;
mod employee;
mod limit;
mod schedule;
mod week;

pub use command::Command;
pub use employee::{Employee, EmployeeId, Role, SkillRatings, MISSING_RATING};
pub use limit::HourLimit;
pub use schedule::{ShiftChange, WeeklySchedule};
pub use week::{ParseWeekdayError, Weekday, WeeklyBitmap};

/// Hours credited for each assigned day.
pub const HOURS_PER_DAY: u32 = 10;
