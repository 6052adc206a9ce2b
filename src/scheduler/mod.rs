//! Schedule generation and plan evaluation.
//!
//! # Algorithm
//!
//! `ScheduleGenerator` runs the per-date grouping pipeline over every
//! session date, once per variant. The first variant is a plain seeded
//! shuffle-and-chunk baseline; later variants (with mixing enabled)
//! steer members toward partners they have not met yet.
//!
//! # KPI
//!
//! `PlanMetrics` summarises a plan: repeat pairings, group sizes, and
//! sessions per member.

mod generator;
mod kpi;

pub use generator::{
    generate_schedules, DateOutcome, DateSlot, GeneratorConfig, ScheduleGenerator,
    DEFAULT_VARIANT_COUNT,
};
pub use kpi::PlanMetrics;
