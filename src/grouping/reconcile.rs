//! Unassigned-member reconciliation.
//!
//! # Policy
//!
//! Leftovers are first cut into blocks of at least `min` (at most `max`)
//! members, each becoming a new group. What remains is smaller than `min`:
//!
//! - **Strict**: it stays unassigned for the date.
//! - **Lenient**: each member joins the currently smallest group still
//!   below `max` (first such group on ties, re-selected after every
//!   insertion). When every group is full a new group is opened, even if
//!   it ends up below `min`. Every available member ends up placed.

use tracing::debug;

use super::Partition;
use crate::models::{Constraints, Member};

/// Groups and permanently unassigned members for one date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciled {
    /// Final groups.
    pub groups: Vec<Vec<Member>>,
    /// Members left out (always empty in lenient mode).
    pub unassigned: Vec<Member>,
}

/// Applies the strict/lenient policy to a grouper's leftovers.
pub fn reconcile(partition: Partition, constraints: &Constraints) -> Reconciled {
    let min = constraints.min_group_size.max(1);
    let max = constraints.max_group_size.max(min);
    let Partition {
        mut groups,
        mut leftovers,
    } = partition;

    while leftovers.len() >= min {
        let take = leftovers.len().min(max);
        groups.push(leftovers.drain(..take).collect());
    }

    if leftovers.is_empty() {
        return Reconciled {
            groups,
            unassigned: Vec::new(),
        };
    }

    if constraints.strict_min_size {
        debug!(count = leftovers.len(), min, "leaving members unassigned");
        return Reconciled {
            groups,
            unassigned: leftovers,
        };
    }

    for member in leftovers {
        let smallest = groups
            .iter()
            .enumerate()
            .filter(|(_, g)| g.len() < max)
            .min_by_key(|(_, g)| g.len())
            .map(|(idx, _)| idx);

        match smallest {
            Some(idx) => groups[idx].push(member),
            None => groups.push(vec![member]),
        }
    }

    Reconciled {
        groups,
        unassigned: Vec::new(),
    }
}
