//! Naive grouper: consecutive chunks of the shuffled list.

use super::Partition;
use crate::models::{Constraints, Member};

/// Chunks `shuffled` into groups of at most `max_group_size`.
///
/// A trailing chunk smaller than `min_group_size` is not a group; its
/// members are returned as leftovers for reconciliation.
pub fn naive_groups(shuffled: Vec<Member>, constraints: &Constraints) -> Partition {
    let max = constraints.max_group_size.max(1);
    let mut partition = Partition::default();

    for chunk in shuffled.chunks(max) {
        if chunk.len() >= constraints.min_group_size {
            partition.groups.push(chunk.to_vec());
        } else {
            partition.leftovers.extend_from_slice(chunk);
        }
    }

    partition
}
