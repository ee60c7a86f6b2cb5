//! Calendar events, i.e. the projection of task records that the calendar displays

use serde::{Deserialize, Serialize};

use crate::day_key::DayKey;
use crate::error::CalendarError;
use crate::record::{NewRecord, RecordFields, RecordId, TaskRecord};

/// A task, as displayed on a calendar day
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayEvent {
    pub id: RecordId,
    pub title: String,
    pub description: String,
    pub day: DayKey,
    pub category: String,
    pub completed: bool,
}

impl DisplayEvent {
    pub fn from_record(record: &TaskRecord) -> Result<Self, CalendarError> {
        Ok(Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            day: record.day()?,
            category: record.category.clone(),
            completed: record.completed,
        })
    }

    /// The fields to send to the backend to make the remote record match this event
    pub fn to_fields(&self) -> RecordFields {
        RecordFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due: self.day,
            category: self.category.clone(),
            completed: self.completed,
        }
    }
}


/// What submitting the event form will do
#[derive(Clone, Debug, PartialEq)]
pub enum DraftAction {
    /// Create a new record, that has no identifier yet
    Add,
    /// Replace the fields of an existing record
    Edit(RecordId),
}

/// The event currently open in the add/edit form.
///
/// This is transient UI state: it is never persisted, and changing its fields has no effect until the form is saved.
#[derive(Clone, Debug, PartialEq)]
pub struct EventDraft {
    action: DraftAction,
    pub title: String,
    pub description: String,
    pub day: DayKey,
    pub category: String,
    pub completed: bool,
}

impl EventDraft {
    /// A blank form to add an event on the given day
    pub fn blank(day: DayKey) -> Self {
        Self {
            action: DraftAction::Add,
            title: String::new(),
            description: String::new(),
            day,
            category: String::new(),
            completed: false,
        }
    }

    /// A form pre-filled with an existing event
    pub fn editing(event: &DisplayEvent) -> Self {
        Self {
            action: DraftAction::Edit(event.id.clone()),
            title: event.title.clone(),
            description: event.description.clone(),
            day: event.day,
            category: event.category.clone(),
            completed: event.completed,
        }
    }

    pub fn action(&self) -> &DraftAction { &self.action }
    pub fn is_new(&self) -> bool { self.action == DraftAction::Add }

    /// Set the day from a user-typed value
    pub fn set_day_str(&mut self, day: &str) -> Result<(), CalendarError> {
        self.day = DayKey::parse(day)?;
        Ok(())
    }

    pub fn to_new_record(&self) -> NewRecord {
        NewRecord {
            title: self.title.clone(),
            description: self.description.clone(),
            due: self.day,
            category: self.category.clone(),
        }
    }

    pub fn to_fields(&self) -> RecordFields {
        RecordFields {
            title: self.title.clone(),
            description: self.description.clone(),
            due: self.day,
            category: self.category.clone(),
            completed: self.completed,
        }
    }

    /// The event this draft describes once saved under `id`
    pub fn to_event(&self, id: RecordId) -> DisplayEvent {
        DisplayEvent {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            day: self.day,
            category: self.category.clone(),
            completed: self.completed,
        }
    }
}
