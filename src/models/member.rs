//! Member (participant) model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::CalendarDate;
use crate::input::RawMember;

/// Member identifier, unique within one engine run.
pub type MemberId = u32;

/// A person to be placed into session groups.
///
/// `unavailable_dates` lists the calendar days the member cannot attend.
/// The engine never mutates a member; groups and unassigned lists hold clones.
/// Deserialization reads a [`RawMember`] and repairs it, so malformed
/// records never fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawMember")]
pub struct Member {
    /// Unique member identifier.
    pub id: MemberId,
    /// Display name. May be empty.
    pub name: String,
    /// Days the member is excluded from.
    pub unavailable_dates: BTreeSet<CalendarDate>,
}

impl Member {
    /// Creates a member with no exclusions.
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unavailable_dates: BTreeSet::new(),
        }
    }

    /// Adds an excluded day.
    pub fn with_unavailable(mut self, date: CalendarDate) -> Self {
        self.unavailable_dates.insert(date);
        self
    }

    /// Adds several excluded days.
    pub fn with_unavailable_dates(mut self, dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        self.unavailable_dates.extend(dates);
        self
    }

    /// Whether the member is excluded from `date`.
    #[inline]
    pub fn is_unavailable_on(&self, date: &CalendarDate) -> bool {
        self.unavailable_dates.contains(date)
    }
}
