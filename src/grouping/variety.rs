//! Variety-optimized grouper.
//!
//! Partitions a date's available members so that members who have
//! already shared groups (earlier dates of the same variant) are spread
//! apart.
//!
//! # Algorithm
//!
//! 1. `n <= max`: a single group if `n >= min`, otherwise all leftovers.
//! 2. `num_groups = min(floor(n / min), ceil(n / max))`.
//! 3. Target sizes `floor(n / num_groups)`, the first `n mod num_groups`
//!    groups one larger, each capped at `max`.
//! 4. Repeatedly draw a random member from the pool and place it in the
//!    open group (below target) whose occupants it has met least often;
//!    the first such group wins ties. Stop when the pool is empty or no
//!    group is open.
//! 5. Groups below `min` are dissolved into leftovers.
//!
//! Greedy and myopic: one pass per date, no backtracking. Only variety is
//! required, not an optimal partition.
//!
//! # Complexity
//! O(n * g * s) where g = groups and s = group size.

use rand::Rng;
use tracing::trace;

use super::Partition;
use crate::models::{Constraints, InteractionHistory, Member};

/// Partitions `available` using `history` to minimise repeat pairings.
pub fn variety_groups<R: Rng>(
    available: Vec<Member>,
    history: &InteractionHistory,
    constraints: &Constraints,
    rng: &mut R,
) -> Partition {
    let n = available.len();
    let min = constraints.min_group_size.max(1);
    let max = constraints.max_group_size.max(min);

    if n == 0 {
        return Partition::default();
    }

    if n <= max {
        return if n >= min {
            Partition {
                groups: vec![available],
                leftovers: Vec::new(),
            }
        } else {
            Partition {
                groups: Vec::new(),
                leftovers: available,
            }
        };
    }

    let num_groups = (n / min).min(n.div_ceil(max));
    let targets = target_sizes(n, num_groups, max);
    trace!(n, num_groups, ?targets, "variety grouping");

    let mut groups: Vec<Vec<Member>> = targets.iter().map(|&t| Vec::with_capacity(t)).collect();
    let mut pool = available;

    while !pool.is_empty() {
        let candidate = pool.swap_remove(rng.random_range(0..pool.len()));

        let best = groups
            .iter()
            .zip(&targets)
            .enumerate()
            .filter(|(_, (group, &target))| group.len() < target)
            .map(|(idx, (group, _))| (idx, history.score(candidate.id, group)))
            .min_by_key(|&(_, score)| score);

        match best {
            Some((idx, _)) => groups[idx].push(candidate),
            None => {
                pool.push(candidate);
                break;
            }
        }
    }

    let mut partition = Partition {
        groups: Vec::with_capacity(groups.len()),
        leftovers: pool,
    };
    for group in groups {
        if group.len() >= min {
            partition.groups.push(group);
        } else {
            partition.leftovers.extend(group);
        }
    }
    partition
}

/// Near-equal target sizes summing to `n` (before the `max` cap).
fn target_sizes(n: usize, num_groups: usize, max: usize) -> Vec<usize> {
    let base = n / num_groups;
    let extra = n % num_groups;
    (0..num_groups)
        .map(|i| (base + usize::from(i < extra)).min(max))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn roster(n: u32) -> Vec<Member> {
        (1..=n).map(|i| Member::new(i, format!("M{i}"))).collect()
    }

    fn sorted_sizes(p: &Partition) -> Vec<usize> {
        let mut sizes: Vec<_> = p.groups.iter().map(Vec::len).collect();
        sizes.sort_unstable();
        sizes
    }

    #[test]
    fn test_target_sizes() {
        assert_eq!(target_sizes(11, 3, 5), vec![4, 4, 3]);
        assert_eq!(target_sizes(12, 3, 5), vec![4, 4, 4]);
        assert_eq!(target_sizes(7, 1, 5), vec![5]);
    }

    #[test]
    fn test_balanced_groups() {
        let mut rng = SmallRng::seed_from_u64(42);
        let p = variety_groups(
            roster(11),
            &InteractionHistory::new(),
            &Constraints::new(3, 5),
            &mut rng,
        );
        assert_eq!(sorted_sizes(&p), vec![3, 4, 4]);
        assert!(p.leftovers.is_empty());
        assert_eq!(p.member_count(), 11);
    }

    #[test]
    fn test_ties_fill_groups_in_order() {
        let members = roster(11);
        let p = variety_groups(
            members.clone(),
            &InteractionHistory::new(),
            &Constraints::new(3, 5),
            &mut SmallRng::seed_from_u64(42),
        );
        let sizes: Vec<_> = p.groups.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![4, 4, 3]);

        // Replay the draws: with no history every score ties, so draws
        // fill group 0, then group 1, then group 2.
        let mut rng = SmallRng::seed_from_u64(42);
        let mut pool = members;
        let mut drawn = Vec::new();
        while !pool.is_empty() {
            drawn.push(pool.swap_remove(rng.random_range(0..pool.len())));
        }
        assert_eq!(p.groups[0], drawn[..4]);
        assert_eq!(p.groups[1], drawn[4..8]);
        assert_eq!(p.groups[2], drawn[8..]);
    }

    #[test]
    fn test_small_roster_single_group() {
        let mut rng = SmallRng::seed_from_u64(1);
        let h = InteractionHistory::new();
        let p = variety_groups(roster(3), &h, &Constraints::new(2, 4), &mut rng);
        assert_eq!(sorted_sizes(&p), vec![3]);

        let p = variety_groups(roster(1), &h, &Constraints::new(2, 4), &mut rng);
        assert!(p.groups.is_empty());
        assert_eq!(p.leftovers.len(), 1);
    }

    #[test]
    fn test_target_capped_at_max() {
        // floor(7/4) = 1 group, capped at 5; two members stay in the pool.
        let mut rng = SmallRng::seed_from_u64(9);
        let p = variety_groups(
            roster(7),
            &InteractionHistory::new(),
            &Constraints::new(4, 5),
            &mut rng,
        );
        assert_eq!(sorted_sizes(&p), vec![5]);
        assert_eq!(p.leftovers.len(), 2);
    }

    #[test]
    fn test_separates_frequent_pairs() {
        let mut history = InteractionHistory::new();
        for _ in 0..5 {
            history.record_group(&[Member::new(1, "A"), Member::new(2, "B")]);
            history.record_group(&[Member::new(3, "C"), Member::new(4, "D")]);
        }
        let constraints = Constraints::new(2, 2);

        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let p = variety_groups(roster(4), &history, &constraints, &mut rng);
            assert_eq!(p.groups.len(), 2);
            for group in &p.groups {
                let ids: Vec<_> = group.iter().map(|m| m.id).collect();
                assert!(!(ids.contains(&1) && ids.contains(&2)), "seed {seed}: {ids:?}");
                assert!(!(ids.contains(&3) && ids.contains(&4)), "seed {seed}: {ids:?}");
            }
        }
    }

    #[test]
    fn test_empty() {
        let mut rng = SmallRng::seed_from_u64(0);
        let p = variety_groups(
            Vec::new(),
            &InteractionHistory::new(),
            &Constraints::new(2, 4),
            &mut rng,
        );
        assert_eq!(p, Partition::default());
    }
}
