//! This crate provides a calendar-based to-do list, backed by a hosted REST backend.
//!
//! Task records live in the backend. A client to it is provided in the [`client`] module, behind the [`RecordStore`](traits::RecordStore) trait.
//! An in-process store, that can be told to fail on purpose, is provided in the [`memory`] module.
//!
//! Records are grouped by day (see [`grouping`]) into an [`EventAggregate`], from which month views are derived (see [`view`]).
//! A [`Calendar`] ties these together: it fetches the records of a user, and keeps the aggregate consistent with the
//! store as events are added, edited and deleted.

pub mod error;
pub use error::{CalendarError, ErrorKind};
pub mod traits;

mod record;
pub use record::{NewRecord, OwnerId, RecordFields, RecordId, TaskRecord};
mod day_key;
pub use day_key::DayKey;
mod event;
pub use event::{DisplayEvent, DraftAction, EventDraft};
mod session;
pub use session::Session;

pub mod grouping;
pub mod aggregate;
pub use aggregate::EventAggregate;
pub mod view;
pub use view::{Month, ViewMode};
pub mod controller;
pub use controller::Calendar;

pub mod client;
pub mod memory;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
