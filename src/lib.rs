//! Lesson-group rostering engine.
//!
//! Assigns a roster of members to groups on dated sessions. Members are
//! never placed on a day they excluded, groups respect size bounds, and
//! later candidate plans steer members toward partners they have not met.
//! The engine is pure: no I/O, no async, no global state.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `CalendarDate`, `Member`, `Constraints`,
//!   `Group`, `SchedulePlan`, `InteractionHistory`
//! - **`grouping`**: Per-date pipeline: availability filter, seeded
//!   shuffle, naive and variety groupers, leftover reconciliation
//! - **`scheduler`**: `ScheduleGenerator` (multi-variant assembly) and
//!   `PlanMetrics`
//! - **`input`**: Loosely-typed JSON member records and their repair
//! - **`validation`**: Advisory input checks
//!
//! # Quick Start
//!
//! ```
//! use roster_groups::models::{CalendarDate, Constraints, Member};
//! use roster_groups::scheduler::generate_schedules;
//!
//! let dates: Vec<CalendarDate> = ["2025-04-05", "04/12/2025"]
//!     .iter()
//!     .map(|s| CalendarDate::parse(s).unwrap())
//!     .collect();
//! let members = vec![
//!     Member::new(1, "Alice").with_unavailable(dates[0]),
//!     Member::new(2, "Bob"),
//!     Member::new(3, "Charlie"),
//! ];
//!
//! let plans = generate_schedules(&members, &dates, &Constraints::new(1, 2));
//! assert_eq!(plans.len(), 3);
//! assert!(plans[0].groups_on(&dates[0]).all(|g| !g.contains(1)));
//! ```
//!
//! # Logging
//!
//! Input repairs and constraint normalisation are reported through
//! `tracing` at `warn`; per-date progress at `debug`. No subscriber is
//! installed by this crate.

pub mod grouping;
pub mod input;
pub mod models;
pub mod scheduler;
pub mod validation;
