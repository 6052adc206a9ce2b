//! Pairwise interaction history.
//!
//! Counts how often each unordered pair of members has shared a group.
//! One history lives for exactly one variant: it starts empty, is threaded
//! through the date loop as a fold accumulator, and is dropped at the end.

use std::collections::HashMap;

use super::{Group, Member, MemberId};

/// Symmetric `(member, member) → co-occurrence count` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionHistory {
    counts: HashMap<(MemberId, MemberId), u32>,
}

impl InteractionHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of prior groups shared by `a` and `b`. Zero for `a == b`.
    pub fn count(&self, a: MemberId, b: MemberId) -> u32 {
        if a == b {
            return 0;
        }
        self.counts.get(&pair_key(a, b)).copied().unwrap_or(0)
    }

    /// Sum of `candidate`'s counts against every occupant.
    pub fn score(&self, candidate: MemberId, occupants: &[Member]) -> u64 {
        occupants
            .iter()
            .map(|m| u64::from(self.count(candidate, m.id)))
            .sum()
    }

    /// Increments the count of every unordered pair within `members`.
    pub fn record_group(&mut self, members: &[Member]) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                if a.id != b.id {
                    *self.counts.entry(pair_key(a.id, b.id)).or_insert(0) += 1;
                }
            }
        }
    }

    /// Records every group of one date and returns the updated history.
    pub fn record_groups(mut self, groups: &[Group]) -> Self {
        for group in groups {
            self.record_group(&group.members);
        }
        self
    }

    /// Number of distinct pairs seen at least once.
    pub fn pair_count(&self) -> usize {
        self.counts.len()
    }

    /// Whether no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates `((low_id, high_id), count)` entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = ((MemberId, MemberId), u32)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }
}

#[inline]
fn pair_key(a: MemberId, b: MemberId) -> (MemberId, MemberId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
