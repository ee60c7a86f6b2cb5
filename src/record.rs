//! Task records, as they are stored by the remote backend

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::day_key::DayKey;
use crate::error::CalendarError;


/// The identifier of a record. The backend uses UUIDs as primary keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId {
    content: Uuid,
}
impl RecordId {
    /// Generate a random RecordId.
    pub fn random() -> Self {
        Self { content: Uuid::new_v4() }
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.content
    }
}
impl From<Uuid> for RecordId {
    fn from(uuid: Uuid) -> Self {
        Self { content: uuid }
    }
}
impl FromStr for RecordId {
    type Err = CalendarError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Uuid::parse_str(s.trim()) {
            Ok(uuid) => Ok(Self::from(uuid)),
            Err(_) => Err(CalendarError::InvalidRecordId(s.to_string())),
        }
    }
}
impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content.hyphenated())
    }
}

/// Used to support serde
impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<RecordId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}


/// The identifier of the user that owns a record
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl Display for OwnerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}


/// A to-do item, as the backend stores it.
///
/// The application never holds the sole copy of a record: this is a snapshot of the remote row.
/// `due_date` is kept exactly as the backend serialized it. It is only interpreted when records are grouped by day.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub id: RecordId,
    #[serde(rename = "user_id")]
    pub owner_id: OwnerId,
    #[serde(rename = "task")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(rename = "date")]
    pub due_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(rename = "is_complete", default)]
    pub completed: bool,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl TaskRecord {
    /// Parse the due date of this record
    pub fn day(&self) -> Result<DayKey, CalendarError> {
        DayKey::parse(&self.due_date).map_err(|_| CalendarError::InvalidDateFormat {
            id: self.id.clone(),
            value: self.due_date.clone(),
        })
    }
}


/// The fields of a record that is about to be created.
///
/// The backend assigns the identifier, and new records are always incomplete.
#[derive(Clone, Debug, PartialEq)]
pub struct NewRecord {
    pub title: String,
    pub description: String,
    pub due: DayKey,
    pub category: String,
}

/// The fields of a record that are replaced on update
#[derive(Clone, Debug, PartialEq)]
pub struct RecordFields {
    pub title: String,
    pub description: String,
    pub due: DayKey,
    pub category: String,
    pub completed: bool,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_id_validation() {
        assert!("2c5ea4c0-4067-11e9-8bad-9b1deb4d3b7d".parse::<RecordId>().is_ok());
        match "42".parse::<RecordId>() {
            Err(CalendarError::InvalidRecordId(s)) => assert_eq!(s, "42"),
            other => panic!("unexpected {:?}", other),
        }
        assert!("".parse::<RecordId>().is_err());
    }

    #[test]
    fn decode_backend_row() {
        let json = r#"{
            "id": "2c5ea4c0-4067-11e9-8bad-9b1deb4d3b7d",
            "user_id": "f1d2d2f9-24a1-4b3c-9a34-1e0b1c2d3e4f",
            "task": "Water the plants",
            "description": null,
            "date": "2025-03-13T00:00:00+00:00",
            "is_complete": true,
            "category": "home",
            "created_at": "2025-03-01T10:00:00+00:00"
        }"#;
        let record: TaskRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title, "Water the plants");
        assert_eq!(record.description, "");
        assert_eq!(record.category, "home");
        assert!(record.completed);
        assert_eq!(record.owner_id.as_str(), "f1d2d2f9-24a1-4b3c-9a34-1e0b1c2d3e4f");
        assert_eq!(record.day().unwrap().to_string(), "2025-03-13");
    }

    #[test]
    fn bad_date_names_the_record() {
        let record = TaskRecord {
            id: RecordId::random(),
            owner_id: OwnerId::new("me"),
            title: "t".to_string(),
            description: String::new(),
            due_date: "someday".to_string(),
            category: String::new(),
            completed: false,
        };
        match record.day() {
            Err(CalendarError::InvalidDateFormat{ id, value }) => {
                assert_eq!(id, record.id);
                assert_eq!(value, "someday");
            },
            other => panic!("unexpected {:?}", other),
        }
    }
}
