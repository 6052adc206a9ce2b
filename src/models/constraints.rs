//! Group-size constraints and mixing policy.
//!
//! Supplied once per engine run. Defaults match the roster entry form:
//! groups of up to four, no enforced minimum, lenient placement, mixing on.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Per-run grouping constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints {
    /// Smallest acceptable group (≥ 1).
    pub min_group_size: usize,
    /// Largest acceptable group (≥ `min_group_size`).
    pub max_group_size: usize,
    /// Leave members unassigned rather than form undersized groups.
    pub strict_min_size: bool,
    /// Use interaction-aware grouping for variants after the first.
    pub mix_groups: bool,
}

impl Default for Constraints {
    fn default() -> Self {
        Self {
            min_group_size: 1,
            max_group_size: 4,
            strict_min_size: false,
            mix_groups: true,
        }
    }
}

impl Constraints {
    /// Creates constraints with the given size bounds and default flags.
    pub fn new(min_group_size: usize, max_group_size: usize) -> Self {
        Self {
            min_group_size,
            max_group_size,
            ..Default::default()
        }
    }

    /// Sets strict minimum-size enforcement.
    pub fn with_strict_min_size(mut self, strict: bool) -> Self {
        self.strict_min_size = strict;
        self
    }

    /// Sets group mixing.
    pub fn with_mix_groups(mut self, mix: bool) -> Self {
        self.mix_groups = mix;
        self
    }

    /// Whether `1 <= min <= max`.
    pub fn is_valid(&self) -> bool {
        self.min_group_size >= 1 && self.max_group_size >= self.min_group_size
    }

    /// Returns a copy with the size bounds forced into `1 <= min <= max`.
    ///
    /// A zero minimum becomes 1; a maximum below the minimum is raised to it.
    pub fn normalized(&self) -> Self {
        if self.is_valid() {
            return *self;
        }
        let min_group_size = self.min_group_size.max(1);
        let max_group_size = self.max_group_size.max(min_group_size);
        warn!(
            min = self.min_group_size,
            max = self.max_group_size,
            normalized_min = min_group_size,
            normalized_max = max_group_size,
            "group size bounds out of order, normalizing"
        );
        Self {
            min_group_size,
            max_group_size,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_partial_json() {
        let c: Constraints =
            serde_json::from_str(r#"{"maxGroupSize": 5, "mixGroups": false, "comments": ""}"#)
                .unwrap();
        assert_eq!(c.max_group_size, 5);
        assert_eq!(c.min_group_size, 1);
        assert!(!c.mix_groups);
        assert!(!c.strict_min_size);
    }

    #[test]
    fn test_normalized() {
        let ok = Constraints::new(2, 4);
        assert_eq!(ok.normalized(), ok);

        let zero_min = Constraints::new(0, 3).normalized();
        assert_eq!((zero_min.min_group_size, zero_min.max_group_size), (1, 3));

        let inverted = Constraints::new(5, 3).with_strict_min_size(true).normalized();
        assert_eq!((inverted.min_group_size, inverted.max_group_size), (5, 5));
        assert!(inverted.strict_min_size);
    }
}
