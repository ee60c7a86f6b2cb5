//! An in-process record store
//!
//! It behaves like the remote backend (identifiers are assigned on creation, every operation is scoped to the session
//! user) and can be told to fail with a [`MockBehaviour`]. This is mostly useful for tests and offline demos.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::error::CalendarError;
use crate::mock_behaviour::MockBehaviour;
use crate::record::{NewRecord, RecordFields, RecordId, TaskRecord};
use crate::session::Session;
use crate::traits::RecordStore;


#[derive(Debug, Default)]
struct StoredData {
    records: HashMap<RecordId, TaskRecord>,
    /// Creation order, so that listings are stable
    order: Vec<RecordId>,
    mock_behaviour: MockBehaviour,
}

/// A [`RecordStore`] that keeps its records in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<StoredData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        let store = Self::new();
        store.set_mock_behaviour(behaviour);
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoredData> {
        match self.data.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn set_mock_behaviour(&self, behaviour: MockBehaviour) {
        self.lock().mock_behaviour = behaviour;
    }

    /// Store a record as-is, whatever its owner or the format of its due date
    pub fn insert_raw(&self, record: TaskRecord) {
        let mut data = self.lock();
        if data.records.contains_key(&record.id) == false {
            data.order.push(record.id.clone());
        }
        data.records.insert(record.id.clone(), record);
    }

    /// A snapshot of every stored record, regardless of its owner
    pub fn records(&self) -> Vec<TaskRecord> {
        let data = self.lock();
        data.order.iter()
            .filter_map(|id| data.records.get(id))
            .cloned()
            .collect()
    }
}

impl StoredData {
    fn owned_mut(&mut self, session: &Session, id: &RecordId) -> Result<&mut TaskRecord, CalendarError> {
        match self.records.get_mut(id) {
            Some(record) if &record.owner_id == session.user_id() => Ok(record),
            _ => Err(CalendarError::RemoteFailure(format!("no record {} for user {}", id, session.user_id()))),
        }
    }

    fn remove_where<F>(&mut self, predicate: F) -> usize
    where
        F: Fn(&TaskRecord) -> bool,
    {
        let before = self.records.len();
        self.records.retain(|_, record| predicate(record) == false);
        let records = &self.records;
        self.order.retain(|id| records.contains_key(id));
        before - self.records.len()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_records(&self, session: &Session) -> Result<Vec<TaskRecord>, CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_list_records()?;

        Ok(data.order.iter()
            .filter_map(|id| data.records.get(id))
            .filter(|record| &record.owner_id == session.user_id())
            .cloned()
            .collect())
    }

    async fn create_record(&self, session: &Session, record: NewRecord) -> Result<TaskRecord, CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_create_record()?;

        let created = TaskRecord {
            id: RecordId::random(),
            owner_id: session.user_id().clone(),
            title: record.title,
            description: record.description,
            due_date: record.due.to_string(),
            category: record.category,
            completed: false,
        };
        data.order.push(created.id.clone());
        data.records.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn update_record(&self, session: &Session, id: &RecordId, fields: RecordFields) -> Result<(), CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_update_record()?;

        let record = data.owned_mut(session, id)?;
        record.title = fields.title;
        record.description = fields.description;
        record.due_date = fields.due.to_string();
        record.category = fields.category;
        record.completed = fields.completed;
        Ok(())
    }

    async fn delete_record(&self, session: &Session, id: &RecordId) -> Result<(), CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_delete_record()?;

        data.owned_mut(session, id)?;
        data.remove_where(|record| &record.id == id);
        Ok(())
    }

    async fn set_completion(&self, session: &Session, id: &RecordId, completed: bool) -> Result<(), CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_set_completion()?;

        data.owned_mut(session, id)?.completed = completed;
        Ok(())
    }

    async fn delete_completed(&self, session: &Session) -> Result<usize, CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_delete_completed()?;

        let owner = session.user_id();
        Ok(data.remove_where(|record| &record.owner_id == owner && record.completed))
    }

    async fn delete_all(&self, session: &Session) -> Result<(), CalendarError> {
        let mut data = self.lock();
        data.mock_behaviour.can_delete_all()?;

        let owner = session.user_id();
        data.remove_where(|record| &record.owner_id == owner);
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::day_key::DayKey;
    use crate::record::OwnerId;

    fn new_record(title: &str) -> NewRecord {
        NewRecord {
            title: title.to_string(),
            description: String::new(),
            due: DayKey::from_ymd(2025, 3, 13).unwrap(),
            category: "misc".to_string(),
        }
    }

    #[tokio::test]
    async fn owner_scoping() {
        let store = MemoryStore::new();
        let alice = Session::new(OwnerId::new("alice"), "t1");
        let bob = Session::new(OwnerId::new("bob"), "t2");

        let created = store.create_record(&alice, new_record("alice's")).await.unwrap();
        assert_eq!(created.due_date, "2025-03-13");
        assert!(created.completed == false);
        store.create_record(&bob, new_record("bob's")).await.unwrap();

        assert_eq!(store.list_records(&alice).await.unwrap().len(), 1);
        assert!(store.delete_record(&bob, &created.id).await.is_err());
        assert!(store.set_completion(&bob, &created.id, true).await.is_err());
        assert_eq!(store.records().len(), 2);

        store.delete_all(&alice).await.unwrap();
        assert!(store.list_records(&alice).await.unwrap().is_empty());
        assert_eq!(store.list_records(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_and_completion() {
        let store = MemoryStore::new();
        let me = Session::new(OwnerId::new("me"), "t");
        let a = store.create_record(&me, new_record("a")).await.unwrap();
        let b = store.create_record(&me, new_record("b")).await.unwrap();

        store.update_record(&me, &a.id, RecordFields {
            title: "a'".to_string(),
            description: "d".to_string(),
            due: DayKey::from_ymd(2025, 3, 15).unwrap(),
            category: "c".to_string(),
            completed: false,
        }).await.unwrap();
        store.set_completion(&me, &b.id, true).await.unwrap();

        let listed = store.list_records(&me).await.unwrap();
        assert_eq!(listed[0].title, "a'");
        assert_eq!(listed[0].due_date, "2025-03-15");
        assert!(listed[1].completed);

        assert_eq!(store.delete_completed(&me).await.unwrap(), 1);
        assert_eq!(store.list_records(&me).await.unwrap().len(), 1);
        assert!(store.update_record(&me, &RecordId::random(), a.clone().into_fields()).await.is_err());
    }

    #[tokio::test]
    async fn mocked_failures() {
        let store = MemoryStore::with_behaviour(MockBehaviour {
            create_record_behaviour: (1, 1),
            ..MockBehaviour::default()
        });
        let me = Session::new(OwnerId::new("me"), "t");
        assert!(store.create_record(&me, new_record("a")).await.is_ok());
        match store.create_record(&me, new_record("b")).await {
            Err(CalendarError::RemoteFailure(_)) => (),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(store.records().len(), 1);
        assert!(store.create_record(&me, new_record("c")).await.is_ok());
    }

    impl TaskRecord {
        fn into_fields(self) -> RecordFields {
            RecordFields {
                due: self.day().unwrap(),
                title: self.title,
                description: self.description,
                category: self.category,
                completed: self.completed,
            }
        }
    }
}
