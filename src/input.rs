//! Loosely-typed member input and silent repair.
//!
//! Member lists arrive as JSON from outside the engine (form state, AI
//! extraction). Legacy and extracted records are often malformed, so they
//! are read as [`RawMember`] and repaired into [`Member`] values rather
//! than rejected.
//!
//! # Repairs
//!
//! | Defect | Repair |
//! |--------|--------|
//! | missing, zero, or non-numeric `id` | `index + 1`, or the next unused ID |
//! | missing `name` | empty name |
//! | `unavailableDates` missing or not an array | empty set |
//! | an entry that does not normalise to a date | entry dropped |
//!
//! Each repair is logged with `tracing::warn!` and reported in
//! [`RepairReport::repairs`], so callers and tests can see what changed.
//! Deserializing a [`Member`] directly goes through the same repair
//! (via `From<RawMember>`), without the report.
//! Dropping an unparseable exclusion fails open: the member is treated as
//! available on that day.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeSet, HashSet};
use thiserror::Error;
use tracing::warn;

use crate::models::{CalendarDate, Member, MemberId};

/// A member record as received, before repair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMember {
    /// Integer or numeric string; anything else is treated as missing.
    #[serde(default)]
    pub id: Option<Value>,
    /// Display name; non-string values are stringified.
    #[serde(default)]
    pub name: Option<Value>,
    /// Expected to be an array of date strings or epoch milliseconds.
    #[serde(default)]
    pub unavailable_dates: Option<Value>,
}

impl RawMember {
    /// Creates a well-formed raw record.
    pub fn new(id: MemberId, name: impl Into<String>, unavailable_dates: &[&str]) -> Self {
        Self {
            id: Some(Value::from(id)),
            name: Some(Value::from(name.into())),
            unavailable_dates: Some(Value::from(unavailable_dates.to_vec())),
        }
    }
}

/// One correction applied while repairing input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Repair {
    /// The record at `index` had no usable ID and received `id`.
    IdAssigned { index: usize, id: MemberId },
    /// The member had no name.
    NameDefaulted { id: MemberId },
    /// `unavailableDates` was missing or not an array.
    UnavailableDatesCoerced { id: MemberId },
    /// An exclusion entry could not be read as a date.
    DateEntryIgnored { id: MemberId, entry: String },
}

/// Repaired members plus the corrections made.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// Members in input order.
    pub members: Vec<Member>,
    /// Corrections in the order they were applied.
    pub repairs: Vec<Repair>,
}

impl RepairReport {
    /// Whether the input needed no correction.
    pub fn is_clean(&self) -> bool {
        self.repairs.is_empty()
    }
}

/// Errors reading a member payload.
#[derive(Debug, Error)]
pub enum InputError {
    /// The text contains neither a JSON array nor a JSON object.
    #[error("no JSON object or array found in input")]
    NoJson,
    /// The object has no `members` field.
    #[error("payload has no `members` array")]
    MissingMembers,
    /// The JSON is syntactically invalid or has the wrong shape.
    #[error("malformed member payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct MemberEnvelope {
    #[serde(default)]
    members: Option<Vec<RawMember>>,
}

/// Parses a member payload and repairs it.
///
/// Accepts a bare JSON array of members, or an object with a `members`
/// array. The object may be surrounded by other text, as in model output
/// wrapped in prose or code fences; the span from the first `{` to the
/// last `}` is used.
pub fn parse_members(text: &str) -> Result<RepairReport, InputError> {
    let trimmed = text.trim();
    if trimmed.starts_with('[') {
        let raw: Vec<RawMember> = serde_json::from_str(trimmed)?;
        return Ok(repair_members(raw));
    }

    let start = trimmed.find('{').ok_or(InputError::NoJson)?;
    let end = trimmed.rfind('}').ok_or(InputError::NoJson)?;
    if end < start {
        return Err(InputError::NoJson);
    }

    let envelope: MemberEnvelope = serde_json::from_str(&trimmed[start..=end])?;
    let raw = envelope.members.ok_or(InputError::MissingMembers)?;
    Ok(repair_members(raw))
}

/// Repairs raw records into members.
pub fn repair_members(raw: Vec<RawMember>) -> RepairReport {
    let ids: Vec<Option<MemberId>> = raw.iter().map(|r| read_id(r.id.as_ref())).collect();
    let mut taken: HashSet<MemberId> = ids.iter().flatten().copied().collect();
    let mut report = RepairReport::default();

    for (index, (record, id)) in raw.into_iter().zip(ids).enumerate() {
        let member = repair_record(index, record, id, &mut taken, &mut report.repairs);
        report.members.push(member);
    }

    report
}

impl From<RawMember> for Member {
    /// Repairs a lone record. A missing ID becomes 1.
    fn from(raw: RawMember) -> Self {
        let id = read_id(raw.id.as_ref());
        let mut taken: HashSet<MemberId> = id.into_iter().collect();
        repair_record(0, raw, id, &mut taken, &mut Vec::new())
    }
}

fn repair_record(
    index: usize,
    record: RawMember,
    id: Option<MemberId>,
    taken: &mut HashSet<MemberId>,
    repairs: &mut Vec<Repair>,
) -> Member {
    let id = match id {
        Some(id) => id,
        None => {
            let id = next_free_id(taken, index);
            taken.insert(id);
            warn!(index, id, "member has no usable id, assigning one");
            repairs.push(Repair::IdAssigned { index, id });
            id
        }
    };

    let name = match record.name {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => {
            warn!(id, "member has no name");
            repairs.push(Repair::NameDefaulted { id });
            String::new()
        }
        Some(other) => other.to_string(),
    };

    let unavailable_dates = read_dates(id, record.unavailable_dates, repairs);
    Member {
        id,
        name,
        unavailable_dates,
    }
}

fn read_id(value: Option<&Value>) -> Option<MemberId> {
    let id = match value? {
        Value::Number(n) => n.as_u64().and_then(|n| MemberId::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }?;
    (id != 0).then_some(id)
}

fn next_free_id(taken: &HashSet<MemberId>, index: usize) -> MemberId {
    let mut id = MemberId::try_from(index + 1).unwrap_or(1);
    while taken.contains(&id) {
        id = id.wrapping_add(1).max(1);
    }
    id
}

fn read_dates(
    id: MemberId,
    value: Option<Value>,
    repairs: &mut Vec<Repair>,
) -> BTreeSet<CalendarDate> {
    let entries = match value {
        Some(Value::Array(entries)) => entries,
        other => {
            warn!(id, value = ?other, "unavailableDates is not a list, treating as empty");
            repairs.push(Repair::UnavailableDatesCoerced { id });
            return BTreeSet::new();
        }
    };

    let mut dates = BTreeSet::new();
    for entry in entries {
        let parsed = match &entry {
            Value::String(s) => CalendarDate::parse(s).ok(),
            Value::Number(n) => n.as_i64().and_then(CalendarDate::from_timestamp_millis),
            _ => None,
        };
        match parsed {
            Some(date) => {
                dates.insert(date);
            }
            None => {
                let entry = match entry {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                warn!(id, %entry, "ignoring unreadable unavailable date");
                repairs.push(Repair::DateEntryIgnored { id, entry });
            }
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> Vec<RawMember> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_clean_input() {
        let report = repair_members(vec![
            RawMember::new(1, "Alice", &["2025-04-05"]),
            RawMember::new(2, "Bob", &[]),
        ]);
        assert!(report.is_clean());
        assert_eq!(report.members.len(), 2);
        assert_eq!(report.members[0].unavailable_dates.len(), 1);
    }

    #[test]
    fn test_non_list_dates_coerced() {
        let report = repair_members(raw(json!([
            {"id": 1, "name": "Alice", "unavailableDates": "2025-04-05"},
            {"id": 2, "name": "Bob"},
            {"id": 3, "name": "Cy", "unavailableDates": null},
        ])));
        assert!(report.members.iter().all(|m| m.unavailable_dates.is_empty()));
        assert_eq!(
            report.repairs,
            vec![
                Repair::UnavailableDatesCoerced { id: 1 },
                Repair::UnavailableDatesCoerced { id: 2 },
                Repair::UnavailableDatesCoerced { id: 3 },
            ]
        );
    }

    #[test]
    fn test_ids_assigned() {
        let report = repair_members(raw(json!([
            {"name": "A", "unavailableDates": []},
            {"id": 1, "name": "B", "unavailableDates": []},
            {"id": "7", "name": "C", "unavailableDates": []},
            {"id": 0, "name": "D", "unavailableDates": []},
        ])));
        let ids: Vec<_> = report.members.iter().map(|m| m.id).collect();
        // Index 0 wants 1 (taken) → 2; index 3 wants 4.
        assert_eq!(ids, vec![2, 1, 7, 4]);
        assert_eq!(
            report.repairs,
            vec![
                Repair::IdAssigned { index: 0, id: 2 },
                Repair::IdAssigned { index: 3, id: 4 },
            ]
        );
    }

    #[test]
    fn test_bad_entries_fail_open() {
        let report = repair_members(raw(json!([
            {"id": 1, "name": "A", "unavailableDates": ["2025-04-05", "someday", 1743854400000i64, {"x": 1}]},
        ])));
        let member = &report.members[0];
        // "2025-04-05" and the timestamp name the same day.
        assert_eq!(member.unavailable_dates.len(), 1);
        assert!(member.is_unavailable_on(&CalendarDate::new(2025, 4, 5).unwrap()));
        let ignored: Vec<_> = report
            .repairs
            .iter()
            .filter(|r| matches!(r, Repair::DateEntryIgnored { .. }))
            .collect();
        assert_eq!(ignored.len(), 2);
    }

    #[test]
    fn test_missing_name_tolerated() {
        let report = repair_members(raw(json!([{"id": 5, "unavailableDates": []}])));
        assert_eq!(report.members[0].name, "");
        assert_eq!(report.repairs, vec![Repair::NameDefaulted { id: 5 }]);
    }

    #[test]
    fn test_member_json_is_repaired() {
        let d = CalendarDate::new(2025, 4, 5).unwrap();

        let m: Member =
            serde_json::from_str(r#"{"id": 1, "name": "A", "unavailableDates": "2025-04-05"}"#)
                .unwrap();
        assert!(m.unavailable_dates.is_empty());

        let m: Member = serde_json::from_str(
            r#"{"id": 2, "name": "B", "unavailableDates": ["2025-04-05", "someday"]}"#,
        )
        .unwrap();
        assert_eq!(m.unavailable_dates.into_iter().collect::<Vec<_>>(), vec![d]);

        let m: Member = serde_json::from_str(r#"{"name": "C", "unavailableDates": []}"#).unwrap();
        assert_eq!(m.id, 1);
        assert_eq!(m.name, "C");
    }

    #[test]
    fn test_parse_envelope_in_prose() {
        let text = r#"Here you go:
```json
{"members": [{"id": 1, "name": "Alice", "unavailableDates": ["04/05/2025"]}]}
```"#;
        let report = parse_members(text).unwrap();
        assert_eq!(report.members.len(), 1);
        assert_eq!(report.members[0].name, "Alice");
        assert!(report.is_clean());
    }

    #[test]
    fn test_parse_bare_array() {
        let report = parse_members(r#"[{"id": 2, "name": "Bob", "unavailableDates": []}]"#).unwrap();
        assert_eq!(report.members[0].id, 2);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_members("no json here"), Err(InputError::NoJson)));
        assert!(matches!(
            parse_members(r#"{"people": []}"#),
            Err(InputError::MissingMembers)
        ));
        assert!(matches!(parse_members("{not json}"), Err(InputError::Json(_))));
    }
}
