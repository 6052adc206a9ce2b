//! Schedule plan (engine output) model.
//!
//! A plan is one candidate roster: the groups formed for every session
//! date plus the members that could not be placed. The engine emits one
//! plan per variant.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{CalendarDate, Member, MemberId};

/// Members meeting together on one session date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Session date.
    pub date: CalendarDate,
    /// Group occupants in placement order.
    pub members: Vec<Member>,
}

impl Group {
    /// Creates a group.
    pub fn new(date: CalendarDate, members: Vec<Member>) -> Self {
        Self { date, members }
    }

    /// Number of occupants.
    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the group has no occupants.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether `id` is in this group.
    pub fn contains(&self, id: MemberId) -> bool {
        self.members.iter().any(|m| m.id == id)
    }

    /// Occupant IDs in placement order.
    pub fn member_ids(&self) -> Vec<MemberId> {
        self.members.iter().map(|m| m.id).collect()
    }
}

/// One candidate roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePlan {
    /// Plan identifier (`schedule-1`, `schedule-2`, ...).
    pub id: String,
    /// Groups across all dates, in date order.
    pub lesson_groups: Vec<Group>,
    /// Available members left out of every group, per date.
    /// Dates with nobody left out have no entry.
    pub unassigned_members_by_date: BTreeMap<CalendarDate, Vec<Member>>,
}

/// A member's standing on one session date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    /// Placed in a group.
    Attending,
    /// Free that day but not placed.
    Available,
    /// Excluded by the member's own unavailable dates.
    Unavailable,
}

/// Date × member attendance grid for one plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceMatrix {
    /// `date → member → status`.
    pub rows: BTreeMap<CalendarDate, BTreeMap<MemberId, AttendanceStatus>>,
}

impl AttendanceMatrix {
    /// Status of `member` on `date`, if both are in the grid.
    pub fn status(&self, date: &CalendarDate, member: MemberId) -> Option<AttendanceStatus> {
        self.rows.get(date)?.get(&member).copied()
    }

    /// Number of members with `status` on `date`.
    pub fn count(&self, date: &CalendarDate, status: AttendanceStatus) -> usize {
        self.rows
            .get(date)
            .map(|row| row.values().filter(|&&s| s == status).count())
            .unwrap_or(0)
    }
}

impl SchedulePlan {
    /// Creates an empty plan.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Appends one date's groups.
    pub fn add_groups(&mut self, groups: impl IntoIterator<Item = Group>) {
        self.lesson_groups.extend(groups);
    }

    /// Records members left out on `date`. Empty lists are not stored.
    pub fn record_unassigned(&mut self, date: CalendarDate, members: Vec<Member>) {
        if members.is_empty() {
            return;
        }
        self.unassigned_members_by_date
            .entry(date)
            .or_default()
            .extend(members);
    }

    /// Whether the plan contains no groups at all.
    pub fn is_empty(&self) -> bool {
        self.lesson_groups.is_empty()
    }

    /// Groups meeting on `date`.
    pub fn groups_on<'a>(&'a self, date: &'a CalendarDate) -> impl Iterator<Item = &'a Group> + 'a {
        self.lesson_groups.iter().filter(move |g| g.date == *date)
    }

    /// Members left out on `date`.
    pub fn unassigned_on(&self, date: &CalendarDate) -> &[Member] {
        self.unassigned_members_by_date
            .get(date)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total group placements across all dates.
    pub fn assigned_count(&self) -> usize {
        self.lesson_groups.iter().map(Group::len).sum()
    }

    /// Total unassigned entries across all dates.
    pub fn unassigned_count(&self) -> usize {
        self.unassigned_members_by_date.values().map(Vec::len).sum()
    }

    /// Builds the attendance grid for `members` over `dates`.
    pub fn attendance(&self, members: &[Member], dates: &[CalendarDate]) -> AttendanceMatrix {
        let mut rows = BTreeMap::new();
        for date in dates {
            let row: BTreeMap<MemberId, AttendanceStatus> = members
                .iter()
                .map(|m| {
                    let status = if m.is_unavailable_on(date) {
                        AttendanceStatus::Unavailable
                    } else if self.groups_on(date).any(|g| g.contains(m.id)) {
                        AttendanceStatus::Attending
                    } else {
                        AttendanceStatus::Available
                    };
                    (m.id, status)
                })
                .collect();
            rows.insert(*date, row);
        }
        AttendanceMatrix { rows }
    }
}
