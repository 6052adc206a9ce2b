//! Plan quality metrics (KPIs).
//!
//! Summarises a finished plan so callers can compare variants.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Repeated pairings | Sum over pairs of `(times grouped - 1)` |
//! | Max pair count | Most times any single pair shared a group |
//! | Distinct pairs | Pairs that met at least once |
//! | Group size spread | Smallest / largest / mean group |
//! | Sessions per member | Groups each member was placed in |
//!
//! Pair counts span the whole plan (all dates), unlike the per-variant
//! history the generator scores against while building it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{InteractionHistory, MemberId, SchedulePlan};

/// Plan performance indicators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetrics {
    /// Number of groups across all dates.
    pub group_count: usize,
    /// Group placements across all dates.
    pub assigned_count: usize,
    /// Unassigned entries across all dates.
    pub unassigned_count: usize,
    /// Smallest group (0 if there are none).
    pub min_group_size: usize,
    /// Largest group (0 if there are none).
    pub max_group_size: usize,
    /// Mean group size (0.0 if there are none).
    pub avg_group_size: f64,
    /// Pairs that shared at least one group.
    pub distinct_pairs: usize,
    /// Extra meetings beyond the first, summed over all pairs.
    pub repeated_pairings: u32,
    /// Highest meeting count of any pair.
    pub max_pair_count: u32,
    /// Groups joined per member.
    pub sessions_by_member: BTreeMap<MemberId, usize>,
}

impl PlanMetrics {
    /// Computes metrics for one plan.
    pub fn calculate(plan: &SchedulePlan) -> Self {
        let sizes: Vec<usize> = plan.lesson_groups.iter().map(|g| g.len()).collect();
        let group_count = sizes.len();
        let assigned_count: usize = sizes.iter().sum();
        let avg_group_size = if group_count == 0 {
            0.0
        } else {
            assigned_count as f64 / group_count as f64
        };

        let history = InteractionHistory::new().record_groups(&plan.lesson_groups);
        let mut repeated_pairings = 0;
        let mut max_pair_count = 0;
        for (_, count) in history.iter() {
            repeated_pairings += count.saturating_sub(1);
            max_pair_count = max_pair_count.max(count);
        }

        let mut sessions_by_member = BTreeMap::new();
        for member in plan.lesson_groups.iter().flat_map(|g| &g.members) {
            *sessions_by_member.entry(member.id).or_insert(0) += 1;
        }

        Self {
            group_count,
            assigned_count,
            unassigned_count: plan.unassigned_count(),
            min_group_size: sizes.iter().copied().min().unwrap_or(0),
            max_group_size: sizes.iter().copied().max().unwrap_or(0),
            avg_group_size,
            distinct_pairs: history.pair_count(),
            repeated_pairings,
            max_pair_count,
            sessions_by_member,
        }
    }

    /// Gap between the most- and least-scheduled member.
    pub fn session_spread(&self) -> usize {
        let max = self.sessions_by_member.values().max().copied().unwrap_or(0);
        let min = self.sessions_by_member.values().min().copied().unwrap_or(0);
        max - min
    }

    /// Index of the plan with the fewest unassigned members, then the
    /// fewest repeated pairings. Earlier plans win ties.
    pub fn most_varied(plans: &[SchedulePlan]) -> Option<usize> {
        plans
            .iter()
            .map(Self::calculate)
            .enumerate()
            .min_by_key(|(_, m)| (m.unassigned_count, m.repeated_pairings))
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CalendarDate, Group, Member};

    fn day(d: u32) -> CalendarDate {
        CalendarDate::new(2025, 4, d).unwrap()
    }

    fn group(d: u32, ids: &[MemberId]) -> Group {
        Group::new(day(d), ids.iter().map(|&i| Member::new(i, format!("M{i}"))).collect())
    }

    fn plan(id: &str, groups: Vec<Group>) -> SchedulePlan {
        let mut p = SchedulePlan::new(id);
        p.add_groups(groups);
        p
    }

    #[test]
    fn test_metrics_basic() {
        let p = plan(
            "schedule-1",
            vec![group(5, &[1, 2, 3]), group(5, &[4, 5]), group(12, &[1, 2, 4])],
        );
        let m = PlanMetrics::calculate(&p);
        assert_eq!(m.group_count, 3);
        assert_eq!(m.assigned_count, 8);
        assert_eq!(m.min_group_size, 2);
        assert_eq!(m.max_group_size, 3);
        assert!((m.avg_group_size - 8.0 / 3.0).abs() < 1e-10);
        // (1,2) met twice.
        assert_eq!(m.repeated_pairings, 1);
        assert_eq!(m.max_pair_count, 2);
        // {12,13,23} ∪ {45} ∪ {14,24} (12 already counted)
        assert_eq!(m.distinct_pairs, 6);
        assert_eq!(m.sessions_by_member[&1], 2);
        assert_eq!(m.sessions_by_member[&5], 1);
        assert_eq!(m.session_spread(), 1);
    }

    #[test]
    fn test_metrics_empty() {
        let m = PlanMetrics::calculate(&SchedulePlan::new("schedule-1"));
        assert_eq!(m.group_count, 0);
        assert_eq!(m.min_group_size, 0);
        assert!((m.avg_group_size - 0.0).abs() < 1e-10);
        assert_eq!(m.repeated_pairings, 0);
        assert_eq!(m.session_spread(), 0);
    }

    #[test]
    fn test_most_varied() {
        let repetitive = plan(
            "schedule-1",
            vec![group(5, &[1, 2]), group(5, &[3, 4]), group(12, &[1, 2]), group(12, &[3, 4])],
        );
        let varied = plan(
            "schedule-2",
            vec![group(5, &[1, 2]), group(5, &[3, 4]), group(12, &[1, 3]), group(12, &[2, 4])],
        );
        let mut leaves_out = varied.clone();
        leaves_out.id = "schedule-3".into();
        leaves_out.record_unassigned(day(12), vec![Member::new(5, "M5")]);

        let plans = vec![repetitive, leaves_out, varied];
        assert_eq!(PlanMetrics::most_varied(&plans), Some(2));
        assert_eq!(PlanMetrics::most_varied(&[]), None);
    }
}
