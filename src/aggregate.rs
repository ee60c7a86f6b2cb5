//! The in-memory calendar of a session
//!
//! An [`EventAggregate`] is built once from the records of the backend, then kept in sync with it by applying the outcome
//! of every remote operation that succeeded. It is never mutated speculatively: see [`crate::controller`].

use std::collections::{BTreeMap, HashSet};

use crate::day_key::DayKey;
use crate::error::CalendarError;
use crate::event::DisplayEvent;
use crate::grouping::group_by_day;
use crate::record::{RecordId, TaskRecord};


/// Events filed by day.
///
/// Invariants:
/// * every event is filed under its own `day`
/// * an id appears at most once in the whole aggregate
/// * no day maps to an empty list
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventAggregate {
    days: BTreeMap<DayKey, Vec<DisplayEvent>>,
}

impl EventAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the aggregate out of the records fetched from the backend
    pub fn from_records<I>(records: I) -> Result<Self, CalendarError>
    where
        I: IntoIterator<Item = TaskRecord>,
    {
        let groups = group_by_day(records)?;

        let mut seen = HashSet::new();
        let mut days = BTreeMap::new();
        for (day, records) in groups {
            let mut events = Vec::with_capacity(records.len());
            for record in &records {
                if seen.insert(record.id.clone()) == false {
                    return Err(CalendarError::DuplicateId(record.id.clone()));
                }
                events.push(DisplayEvent::from_record(record)?);
            }
            days.insert(day, events);
        }
        Ok(Self { days })
    }

    /// The events due on a day, in insertion order
    pub fn events_on(&self, day: &DayKey) -> &[DisplayEvent] {
        self.days.get(day).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn day_count(&self, day: &DayKey) -> usize {
        self.events_on(day).len()
    }

    /// Every non-empty day, in chronological order
    pub fn days(&self) -> impl DoubleEndedIterator<Item = (&DayKey, &[DisplayEvent])> {
        self.days.iter().map(|(day, events)| (day, events.as_slice()))
    }

    pub fn events(&self) -> impl Iterator<Item = &DisplayEvent> {
        self.days.values().flatten()
    }

    pub fn get(&self, id: &RecordId) -> Option<&DisplayEvent> {
        self.events().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &RecordId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    fn locate(&self, id: &RecordId) -> Option<(DayKey, usize)> {
        self.days.iter()
            .find_map(|(day, events)| {
                events.iter()
                    .position(|e| &e.id == id)
                    .map(|index| (*day, index))
            })
    }

    fn remove_at(&mut self, day: &DayKey, index: usize) -> Option<DisplayEvent> {
        let events = self.days.get_mut(day)?;
        let removed = events.remove(index);
        if events.is_empty() {
            self.days.remove(day);
        }
        Some(removed)
    }


    /// Record an event that the backend has just created
    pub fn apply_create(&mut self, event: DisplayEvent) -> Result<(), CalendarError> {
        if self.contains(&event.id) {
            return Err(CalendarError::DuplicateId(event.id));
        }
        log::debug!("Adding event {} on {}", event.id, event.day);
        self.days.entry(event.day).or_insert_with(Vec::new).push(event);
        Ok(())
    }

    /// Record an event that the backend has just updated.
    ///
    /// The event is looked up by id, wherever it is currently filed. If its day has changed, it is moved to the end of
    /// its new day.
    pub fn apply_edit(&mut self, event: DisplayEvent) -> Result<(), CalendarError> {
        let (current_day, index) = match self.locate(&event.id) {
            None => return Err(CalendarError::NotFound(event.id)),
            Some(location) => location,
        };

        if current_day == event.day {
            log::debug!("Updating event {} in place on {}", event.id, event.day);
            if let Some(events) = self.days.get_mut(&current_day) {
                events[index] = event;
            }
        } else {
            log::debug!("Moving event {} from {} to {}", event.id, current_day, event.day);
            self.remove_at(&current_day, index);
            self.days.entry(event.day).or_insert_with(Vec::new).push(event);
        }
        Ok(())
    }

    /// Forget an event that the backend has just deleted.
    ///
    /// Deleting an unknown (or already deleted) id is an error, so that double submissions can be noticed.
    pub fn apply_delete(&mut self, id: &RecordId) -> Result<DisplayEvent, CalendarError> {
        let (day, index) = match self.locate(id) {
            None => return Err(CalendarError::NotFound(id.clone())),
            Some(location) => location,
        };
        log::debug!("Removing event {} from {}", id, day);
        self.remove_at(&day, index).ok_or_else(|| CalendarError::NotFound(id.clone()))
    }

    pub fn apply_set_completion(&mut self, id: &RecordId, completed: bool) -> Result<(), CalendarError> {
        match self.days.values_mut().flatten().find(|e| &e.id == id) {
            None => Err(CalendarError::NotFound(id.clone())),
            Some(event) => {
                event.completed = completed;
                Ok(())
            }
        }
    }

    /// Forget every completed event. Returns how many were removed
    pub fn apply_delete_completed(&mut self) -> usize {
        let before = self.len();
        for events in self.days.values_mut() {
            events.retain(|e| e.completed == false);
        }
        self.days.retain(|_, events| events.is_empty() == false);
        before - self.len()
    }

    pub fn apply_clear(&mut self) {
        self.days.clear();
    }
}
