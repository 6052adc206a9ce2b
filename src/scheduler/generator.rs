//! Schedule assembler.
//!
//! # Algorithm
//!
//! For each variant `v` (default 3):
//! 1. Start an empty [`InteractionHistory`].
//! 2. For each session date `k`, in order:
//!    - split members by availability,
//!    - shuffle the available ones with seed `(v, k)`,
//!    - group them: naive for `v == 0` or when mixing is off, otherwise
//!      variety-optimized against the history,
//!    - reconcile leftovers under the strict/lenient policy,
//!    - record every co-member pair of the final groups in the history.
//! 3. Emit the plan `schedule-{v + 1}`.
//!
//! Variants share nothing. Dates within a variant are sequential because
//! date `k + 1` scores against the groups formed up to date `k`.
//!
//! # Randomness
//! The shuffle is always seeded. The variety grouper's "next member to
//! place" draw uses entropy unless [`GeneratorConfig::placement_seed`] is
//! set, in which case the whole run is reproducible.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::grouping::{
    naive_groups, reconcile, seeded_shuffle, shuffle_seed, split_by_availability, variety_groups,
    Availability, Reconciled,
};
use crate::models::{CalendarDate, Constraints, Group, InteractionHistory, Member, SchedulePlan};

/// Default number of plans per run.
pub const DEFAULT_VARIANT_COUNT: usize = 3;

/// Generator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of plans to produce.
    pub variant_count: usize,
    /// Offset applied to every shuffle seed.
    pub base_seed: u64,
    /// Seed for the variety grouper's placement draws.
    /// `None` = fresh entropy per variant.
    pub placement_seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            variant_count: DEFAULT_VARIANT_COUNT,
            base_seed: 0,
            placement_seed: None,
        }
    }
}

/// Position of one date within one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateSlot {
    /// Variant index (0 = naive baseline).
    pub variant: usize,
    /// Index of the date in the session sequence.
    pub date_index: usize,
    /// Session date.
    pub date: CalendarDate,
}

/// Result of grouping one date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOutcome {
    /// Session date.
    pub date: CalendarDate,
    /// Final groups.
    pub groups: Vec<Group>,
    /// Available members left out (strict mode only).
    pub unassigned: Vec<Member>,
    /// Members excluded by their own unavailable dates.
    pub unavailable: Vec<Member>,
}

impl DateOutcome {
    /// Members free on the date (placed or not).
    pub fn available_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum::<usize>() + self.unassigned.len()
    }
}

/// Produces candidate plans assigning members to session groups.
///
/// # Example
///
/// ```
/// use roster_groups::models::{CalendarDate, Constraints, Member};
/// use roster_groups::scheduler::ScheduleGenerator;
///
/// let day = CalendarDate::parse("2025-04-05").unwrap();
/// let members: Vec<Member> = (1..=6).map(|i| Member::new(i, format!("M{i}"))).collect();
/// let constraints = Constraints::new(2, 3).with_strict_min_size(true);
///
/// let plans = ScheduleGenerator::new()
///     .with_placement_seed(7)
///     .generate(&members, &[day], &constraints);
/// assert_eq!(plans.len(), 3);
/// assert_eq!(plans[0].id, "schedule-1");
/// assert_eq!(plans[0].assigned_count(), 6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: GeneratorConfig,
}

impl ScheduleGenerator {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of plans.
    pub fn with_variant_count(mut self, count: usize) -> Self {
        self.config.variant_count = count;
        self
    }

    /// Sets the shuffle seed offset.
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.config.base_seed = seed;
        self
    }

    /// Seeds the variety grouper's placement draws.
    pub fn with_placement_seed(mut self, seed: u64) -> Self {
        self.config.placement_seed = Some(seed);
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one plan per variant.
    ///
    /// Never fails: empty members or dates produce empty plans, and
    /// out-of-order size bounds are normalised first.
    pub fn generate(
        &self,
        members: &[Member],
        dates: &[CalendarDate],
        constraints: &Constraints,
    ) -> Vec<SchedulePlan> {
        let constraints = constraints.normalized();
        debug!(
            members = members.len(),
            dates = dates.len(),
            variants = self.config.variant_count,
            "generating schedules"
        );
        (0..self.config.variant_count)
            .map(|variant| self.generate_variant(variant, members, dates, &constraints))
            .collect()
    }

    /// Generates the plan for one variant.
    pub fn generate_variant(
        &self,
        variant: usize,
        members: &[Member],
        dates: &[CalendarDate],
        constraints: &Constraints,
    ) -> SchedulePlan {
        let mut rng = self.placement_rng(variant);
        let mut plan = SchedulePlan::new(format!("schedule-{}", variant + 1));

        let history = dates.iter().enumerate().fold(
            InteractionHistory::new(),
            |history, (date_index, &date)| {
                let slot = DateSlot {
                    variant,
                    date_index,
                    date,
                };
                let (outcome, history) =
                    self.plan_date(slot, members, constraints, history, &mut rng);
                plan.add_groups(outcome.groups);
                plan.record_unassigned(outcome.date, outcome.unassigned);
                history
            },
        );

        debug!(
            plan = %plan.id,
            groups = plan.lesson_groups.len(),
            unassigned = plan.unassigned_count(),
            pairs = history.pair_count(),
            "variant complete"
        );
        plan
    }

    /// Groups one date and returns the outcome with the updated history.
    pub fn plan_date(
        &self,
        slot: DateSlot,
        members: &[Member],
        constraints: &Constraints,
        history: InteractionHistory,
        rng: &mut SmallRng,
    ) -> (DateOutcome, InteractionHistory) {
        let Availability {
            available,
            unavailable,
        } = split_by_availability(members, &slot.date);

        let seed = shuffle_seed(self.config.base_seed, slot.variant, slot.date_index);
        let shuffled = seeded_shuffle(&available, seed);

        let partition = if slot.variant == 0 || !constraints.mix_groups {
            naive_groups(shuffled, constraints)
        } else {
            variety_groups(shuffled, &history, constraints, rng)
        };

        let Reconciled { groups, unassigned } = reconcile(partition, constraints);
        let groups: Vec<Group> = groups
            .into_iter()
            .map(|members| Group::new(slot.date, members))
            .collect();
        let history = history.record_groups(&groups);

        debug!(
            variant = slot.variant,
            date = %slot.date,
            available = available.len(),
            unavailable = unavailable.len(),
            groups = groups.len(),
            unassigned = unassigned.len(),
            "date grouped"
        );

        let outcome = DateOutcome {
            date: slot.date,
            groups,
            unassigned,
            unavailable,
        };
        (outcome, history)
    }

    fn placement_rng(&self, variant: usize) -> SmallRng {
        match self.config.placement_seed {
            Some(seed) => SmallRng::seed_from_u64(seed.wrapping_add(variant as u64)),
            None => SmallRng::from_os_rng(),
        }
    }
}

/// Generates [`DEFAULT_VARIANT_COUNT`] plans with the default configuration.
pub fn generate_schedules(
    members: &[Member],
    dates: &[CalendarDate],
    constraints: &Constraints,
) -> Vec<SchedulePlan> {
    ScheduleGenerator::new().generate(members, dates, constraints)
}
