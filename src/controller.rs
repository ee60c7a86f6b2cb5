//! This module holds the state of a calendar screen, and keeps it consistent with a [`RecordStore`]
//!
//! Every mutation follows the same two steps:
//! 1. the matching remote operation is performed, and awaited
//! 2. only if it succeeded, the in-memory [`EventAggregate`] is updated accordingly.
//!
//! A failed remote operation leaves the aggregate untouched, so that what is displayed always matches the last state
//! confirmed by the store. Failures are logged, kept as a user-facing [`notice`](Calendar::notice), and returned.

use crate::aggregate::EventAggregate;
use crate::day_key::DayKey;
use crate::error::CalendarError;
use crate::event::{DisplayEvent, DraftAction, EventDraft};
use crate::record::RecordId;
use crate::session::Session;
use crate::traits::RecordStore;
use crate::view::{build_view, Month, MonthView, ViewMode};


/// Whether the events are available yet
#[derive(Clone, Debug, PartialEq)]
pub enum LoadState {
    /// The initial fetch has not completed
    Loading,
    Ready(EventAggregate),
    /// The initial fetch failed. The message is meant to be shown to the user
    Failed(String),
}

/// What a calendar screen should display
#[derive(Clone, Debug, PartialEq)]
pub enum CalendarView<'a> {
    /// A neutral placeholder, while the events are being fetched
    Loading,
    Failed(&'a str),
    Ready { title: String, month: MonthView<'a> },
}


/// A calendar screen: the events of a user, the month and layout being shown, and the event open in the form (if any)
pub struct Calendar<S: RecordStore> {
    store: S,
    state: LoadState,
    month: Month,
    mode: ViewMode,
    /// At most one event can be edited at a time
    selected: Option<EventDraft>,
    notice: Option<String>,
}

impl<S: RecordStore> Calendar<S> {
    /// Create a calendar showing the current month in grid mode. Call [`Self::load`] to fetch its events
    pub fn new(store: S) -> Self {
        Self::with_month(store, Month::current())
    }

    pub fn with_month(store: S, month: Month) -> Self {
        Self {
            store,
            state: LoadState::Loading,
            month,
            mode: ViewMode::default(),
            selected: None,
            notice: None,
        }
    }

    pub fn store(&self) -> &S { &self.store }
    pub fn state(&self) -> &LoadState { &self.state }
    pub fn month(&self) -> Month { self.month }
    pub fn mode(&self) -> ViewMode { self.mode }

    /// The last error worth telling the user about
    pub fn notice(&self) -> Option<&str> { self.notice.as_deref() }
    pub fn clear_notice(&mut self) { self.notice = None; }

    pub fn aggregate(&self) -> Option<&EventAggregate> {
        match &self.state {
            LoadState::Ready(aggregate) => Some(aggregate),
            _ => None,
        }
    }

    fn aggregate_mut(&mut self) -> Result<&mut EventAggregate, CalendarError> {
        match &mut self.state {
            LoadState::Ready(aggregate) => Ok(aggregate),
            _ => Err(CalendarError::NotLoaded),
        }
    }

    /// Log a failure and keep it for the user
    fn report(&mut self, context: &str, err: CalendarError) -> CalendarError {
        log::error!("{}: {}", context, err);
        self.notice = Some(format!("{}: {}", context, err));
        err
    }

    /// Checks that must pass before anything is sent to the store
    fn ensure_ready(&self, session: &Session) -> Result<(), CalendarError> {
        session.ensure_active()?;
        match self.state {
            LoadState::Ready(_) => Ok(()),
            _ => Err(CalendarError::NotLoaded),
        }
    }


    /// Fetch every event of the session user, replacing whatever was loaded before
    pub async fn load(&mut self, session: &Session) -> Result<(), CalendarError> {
        if let Err(err) = session.ensure_active() {
            self.state = LoadState::Failed(err.to_string());
            return Err(self.report("Unable to load events", err));
        }
        self.state = LoadState::Loading;

        let loaded = match self.store.list_records(session).await {
            Err(err) => Err(err),
            Ok(records) => EventAggregate::from_records(records),
        };
        match loaded {
            Err(err) => {
                self.state = LoadState::Failed(err.to_string());
                Err(self.report("Unable to load events", err))
            },
            Ok(aggregate) => {
                log::info!("Loaded {} events over {} days", aggregate.len(), aggregate.days().count());
                self.state = LoadState::Ready(aggregate);
                Ok(())
            },
        }
    }


    pub fn next_month(&mut self) { self.month = self.month.next(); }
    pub fn previous_month(&mut self) { self.month = self.month.previous(); }
    pub fn set_month(&mut self, month: Month) { self.month = month; }
    pub fn set_view_mode(&mut self, mode: ViewMode) { self.mode = mode; }

    /// The current month, laid out in the current mode
    pub fn view(&self) -> CalendarView<'_> {
        match &self.state {
            LoadState::Loading => CalendarView::Loading,
            LoadState::Failed(message) => CalendarView::Failed(message),
            LoadState::Ready(aggregate) => CalendarView::Ready {
                title: self.month.title(),
                month: build_view(self.mode, self.month, aggregate),
            },
        }
    }


    /// Open a blank form to add an event on `day`. This replaces any form that was open
    pub fn open_add(&mut self, day: DayKey) -> &mut EventDraft {
        self.selected.insert(EventDraft::blank(day))
    }

    pub fn open_add_today(&mut self) -> &mut EventDraft {
        self.open_add(DayKey::today())
    }

    /// Open the form on an existing event. This replaces any form that was open
    pub fn open_edit(&mut self, id: &RecordId) -> Result<&mut EventDraft, CalendarError> {
        let event = self.aggregate()
            .ok_or(CalendarError::NotLoaded)?
            .get(id)
            .ok_or_else(|| CalendarError::NotFound(id.clone()))?;
        let draft = EventDraft::editing(event);
        Ok(self.selected.insert(draft))
    }

    pub fn draft(&self) -> Option<&EventDraft> { self.selected.as_ref() }
    pub fn draft_mut(&mut self) -> Option<&mut EventDraft> { self.selected.as_mut() }
    pub fn close_draft(&mut self) { self.selected = None; }


    /// Submit the open form: create or update its record, then reflect the change in the calendar.
    ///
    /// The form is closed only if this succeeds.
    pub async fn save(&mut self, session: &Session) -> Result<(), CalendarError> {
        self.ensure_ready(session)?;
        let draft = self.selected.clone().ok_or(CalendarError::NoSelection)?;

        match draft.action() {
            DraftAction::Add => {
                let created = match self.store.create_record(session, draft.to_new_record()).await {
                    Err(err) => return Err(self.report("Unable to add the event", err)),
                    Ok(record) => record,
                };
                let event = DisplayEvent::from_record(&created)?;
                self.aggregate_mut()?.apply_create(event)?;
            },
            DraftAction::Edit(id) => {
                if let Err(err) = self.store.update_record(session, id, draft.to_fields()).await {
                    return Err(self.report("Unable to save the event", err));
                }
                self.aggregate_mut()?.apply_edit(draft.to_event(id.clone()))?;
            },
        }

        self.selected = None;
        Ok(())
    }

    /// Delete the event open in the form. The form is closed only if this succeeds
    pub async fn delete_selected(&mut self, session: &Session) -> Result<(), CalendarError> {
        self.ensure_ready(session)?;
        let id = match self.selected.as_ref().map(|draft| draft.action()) {
            Some(DraftAction::Edit(id)) => id.clone(),
            _ => return Err(CalendarError::NoSelection),
        };

        if let Err(err) = self.store.delete_record(session, &id).await {
            return Err(self.report("Unable to delete the event", err));
        }
        self.aggregate_mut()?.apply_delete(&id)?;

        self.selected = None;
        Ok(())
    }

    /// Flip the completion flag of an event
    pub async fn toggle_completion(&mut self, session: &Session, id: &RecordId) -> Result<bool, CalendarError> {
        self.ensure_ready(session)?;
        let completed = match self.aggregate().and_then(|agg| agg.get(id)) {
            None => return Err(CalendarError::NotFound(id.clone())),
            Some(event) => event.completed == false,
        };

        if let Err(err) = self.store.set_completion(session, id, completed).await {
            return Err(self.report("Unable to update the event", err));
        }
        self.aggregate_mut()?.apply_set_completion(id, completed)?;
        Ok(completed)
    }

    /// Delete every completed event. Returns how many were removed from the calendar
    pub async fn delete_completed(&mut self, session: &Session) -> Result<usize, CalendarError> {
        self.ensure_ready(session)?;

        let remote_count = match self.store.delete_completed(session).await {
            Err(err) => return Err(self.report("Unable to delete completed events", err)),
            Ok(n) => n,
        };
        let local_count = self.aggregate_mut()?.apply_delete_completed();
        if remote_count != local_count {
            log::warn!("The store deleted {} completed records, but {} were displayed", remote_count, local_count);
        }
        Ok(local_count)
    }

    /// Delete every event of the session user
    pub async fn delete_all(&mut self, session: &Session) -> Result<(), CalendarError> {
        self.ensure_ready(session)?;

        if let Err(err) = self.store.delete_all(session).await {
            return Err(self.report("Unable to delete all events", err));
        }
        self.aggregate_mut()?.apply_clear();
        self.selected = None;
        Ok(())
    }
}
