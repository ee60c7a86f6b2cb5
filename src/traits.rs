//! Traits used by this crate

use async_trait::async_trait;

use crate::error::CalendarError;
use crate::record::{NewRecord, RecordFields, RecordId, TaskRecord};
use crate::session::Session;

/// A source of truth for task records, usually the remote backend (see [`RestClient`](crate::client::RestClient)).
///
/// Every operation is scoped to the user of `session`: a store never returns nor modifies records owned by someone else.
/// Operations are not retried.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns every record owned by the session user
    async fn list_records(&self, session: &Session) -> Result<Vec<TaskRecord>, CalendarError>;

    /// Create a record. The store assigns its identifier, and marks it as not completed
    async fn create_record(&self, session: &Session, record: NewRecord) -> Result<TaskRecord, CalendarError>;

    /// Replace the title, description, due date, category and completion of an existing record
    async fn update_record(&self, session: &Session, id: &RecordId, fields: RecordFields) -> Result<(), CalendarError>;

    async fn delete_record(&self, session: &Session, id: &RecordId) -> Result<(), CalendarError>;

    /// Change only the completion flag of a record
    async fn set_completion(&self, session: &Session, id: &RecordId, completed: bool) -> Result<(), CalendarError>;

    /// Delete every completed record. Returns how many were deleted
    async fn delete_completed(&self, session: &Session) -> Result<usize, CalendarError>;

    /// Delete every record of the session user
    async fn delete_all(&self, session: &Session) -> Result<(), CalendarError>;
}
