//! Rostering domain models.
//!
//! Provides the value types the engine consumes and produces.
//!
//! # Domain Mappings
//!
//! | roster-groups | Music lessons | Clinics | Workshops |
//! |---------------|---------------|---------|-----------|
//! | Member | Student | Resident | Participant |
//! | CalendarDate | Lesson day | Clinic day | Session day |
//! | Group | Ensemble | Rotation team | Breakout table |
//! | SchedulePlan | Term roster | Rotation plan | Seating plan |

mod constraints;
mod date;
mod history;
mod member;
mod plan;

pub use constraints::Constraints;
pub use date::{CalendarDate, DateParseError};
pub use history::InteractionHistory;
pub use member::{Member, MemberId};
pub use plan::{AttendanceMatrix, AttendanceStatus, Group, SchedulePlan};
