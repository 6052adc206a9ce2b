//! Per-date grouping pipeline.
//!
//! Each session date passes through the same stages:
//!
//! 1. [`split_by_availability`] drops members excluded from the date.
//! 2. [`seeded_shuffle`] orders the remaining members reproducibly.
//! 3. [`naive_groups`] or [`variety_groups`] partitions them.
//! 4. [`reconcile`] applies the strict/lenient policy to the leftovers.
//!
//! Stages operate on plain member lists; the scheduler attaches dates and
//! threads the interaction history between dates.

mod availability;
mod naive;
mod reconcile;
mod shuffle;
mod variety;

pub use availability::{split_by_availability, Availability};
pub use naive::naive_groups;
pub use reconcile::{reconcile, Reconciled};
pub use shuffle::{seeded_shuffle, shuffle_seed, SineStream};
pub use variety::variety_groups;

use crate::models::Member;

/// Output of a grouper before reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Partition {
    /// Groups that satisfy the size bounds.
    pub groups: Vec<Vec<Member>>,
    /// Members that did not fit into a minimum-sized group.
    pub leftovers: Vec<Member>,
}

impl Partition {
    /// Total members held by the partition.
    pub fn member_count(&self) -> usize {
        self.groups.iter().map(Vec::len).sum::<usize>() + self.leftovers.len()
    }
}
