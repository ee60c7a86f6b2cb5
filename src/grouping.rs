//! Grouping of flat record lists by calendar day

use std::collections::BTreeMap;

use crate::day_key::DayKey;
use crate::error::CalendarError;
use crate::record::TaskRecord;

/// Records bucketed by the day they are due
pub type DayGroups = BTreeMap<DayKey, Vec<TaskRecord>>;

/// File every record under the day it is due.
///
/// Records sharing a day keep the order in which they were supplied.
/// A record whose due date cannot be read fails the whole grouping: no record is ever dropped.
pub fn group_by_day<I>(records: I) -> Result<DayGroups, CalendarError>
where
    I: IntoIterator<Item = TaskRecord>,
{
    let mut groups = DayGroups::new();
    for record in records {
        let day = record.day()?;
        groups.entry(day).or_insert_with(Vec::new).push(record);
    }
    Ok(groups)
}

/// Put every bucket back into a single list, in day order
pub fn flatten(groups: DayGroups) -> Vec<TaskRecord> {
    groups.into_iter()
        .flat_map(|(_, records)| records)
        .collect()
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{OwnerId, RecordId};

    fn record(title: &str, date: &str) -> TaskRecord {
        TaskRecord {
            id: RecordId::random(),
            owner_id: OwnerId::new("owner"),
            title: title.to_string(),
            description: String::new(),
            due_date: date.to_string(),
            category: String::new(),
            completed: false,
        }
    }

    #[test]
    fn groups_keep_supply_order() {
        let records = vec![
            record("a", "2025-03-13"),
            record("b", "2025-03-11T10:00:00Z"),
            record("c", "2025-03-13T23:00:00Z"),
            record("d", "2025-03-13T00:00:00Z"),
        ];
        let groups = group_by_day(records).unwrap();
        assert_eq!(groups.len(), 2);

        let day = DayKey::from_ymd(2025, 3, 13).unwrap();
        let titles: Vec<&str> = groups[&day].iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
    }

    #[test]
    fn flatten_loses_nothing() {
        let records = vec![
            record("a", "2025-03-13"),
            record("b", "2025-04-01"),
            record("c", "2025-03-13T12:00:00Z"),
            record("b", "2025-04-01"),
            record("e", "2024-12-31"),
        ];
        let mut expected: Vec<RecordId> = records.iter().map(|r| r.id.clone()).collect();
        let mut flat: Vec<RecordId> = flatten(group_by_day(records.clone()).unwrap())
            .into_iter()
            .map(|r| r.id)
            .collect();
        expected.sort();
        flat.sort();
        assert_eq!(flat, expected);
    }

    #[test]
    fn invalid_date_fails_with_the_record_id() {
        let bad = record("bad", "March 13th");
        let bad_id = bad.id.clone();
        let records = vec![record("ok", "2025-03-13"), bad];
        match group_by_day(records) {
            Err(CalendarError::InvalidDateFormat{ id, value }) => {
                assert_eq!(id, bad_id);
                assert_eq!(value, "March 13th");
            },
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn empty_input() {
        assert!(group_by_day(Vec::new()).unwrap().is_empty());
    }
}
