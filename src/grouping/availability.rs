//! Availability filter.

use crate::models::{CalendarDate, Member};

/// Members split by whether they can attend a date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Availability {
    /// Members free on the date, in input order.
    pub available: Vec<Member>,
    /// Members whose exclusions contain the date, in input order.
    pub unavailable: Vec<Member>,
}

/// Splits `members` by their exclusions for `date`.
///
/// Each call is independent; nothing is remembered across dates.
pub fn split_by_availability(members: &[Member], date: &CalendarDate) -> Availability {
    let (available, unavailable): (Vec<Member>, Vec<Member>) = members
        .iter()
        .cloned()
        .partition(|m| !m.is_unavailable_on(date));
    Availability {
        available,
        unavailable,
    }
}
