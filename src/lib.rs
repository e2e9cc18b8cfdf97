//! Weekly shift planning for the U-Engine ecosystem.
//!
//! Turns per-employee day preferences and hour limits into a baseline
//! weekly schedule, then keeps a live copy of that schedule up to date as
//! leave and shift-swap requests arrive, picking replacements by their
//! skill rating for the requester's role.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Weekday`, `WeeklyBitmap`, `Employee`,
//!   `Role`, `HourLimit`, `WeeklySchedule`, `ShiftChange`, `Command`
//! - **`store`**: Collaborator interfaces (directory, preferences, limits,
//!   schedules) and in-memory implementations
//! - **`optimizer`**: Baseline construction under max-hour bounds
//! - **`reallocation`**: Skill-ranked leave and swap handling
//! - **`service`**: Serialized entry points and `Command` dispatch
//! - **`validation`**: Roster integrity checks
//!
//! # Architecture
//!
//! The crate owns no storage technology and never parses free text.
//! Everything enters through the `store` traits or a structured `Command`;
//! everything leaves as a typed outcome or a typed `ShiftError`.

pub mod config;
pub mod error;
pub mod models;
pub mod optimizer;
pub mod reallocation;
pub mod service;
pub mod store;
pub mod validation;

pub use config::{ConfigError, RoleCatalog, ShiftConfig};
pub use error::{Registry, ShiftError, StoreError, SwapRejection};
pub use service::{Outcome, QueryAnswer, ShiftService};
