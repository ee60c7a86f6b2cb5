//! Print a month of the calendar of a user
//!
//! Usage: `calendar-todo [YYYY-MM] [grid|list]`
//!
//! The backend is configured with `CALENDAR_TODO_URL` and `CALENDAR_TODO_API_KEY`, and the user with
//! `CALENDAR_TODO_USER` and `CALENDAR_TODO_TOKEN`. Without a backend, a few sample events are shown instead.

use calendar_todo::client::RestClient;
use calendar_todo::memory::MemoryStore;
use calendar_todo::traits::RecordStore;
use calendar_todo::utils::print_calendar_view;
use calendar_todo::{Calendar, CalendarError, Month, NewRecord, OwnerId, Session, ViewMode};

const USER_VAR: &str = "CALENDAR_TODO_USER";
const TOKEN_VAR: &str = "CALENDAR_TODO_TOKEN";


#[tokio::main]
async fn main() {
    env_logger::init();

    if let Err(err) = run().await {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CalendarError> {
    let mut args = std::env::args().skip(1);
    let month = match args.next() {
        Some(arg) => arg.parse()?,
        None => Month::current(),
    };
    let mode = match args.next().as_deref() {
        None | Some("grid") => ViewMode::Grid,
        Some("list") => ViewMode::List,
        Some(other) => return Err(CalendarError::Config(format!("unknown view mode {:?}, expected grid or list", other))),
    };

    match RestClient::from_env() {
        Ok(client) => {
            let session = session_from_env()?;
            show(Calendar::with_month(client, month), &session, mode).await
        },
        Err(err) => {
            log::warn!("No backend configured ({}). Showing sample events", err);
            let session = Session::new(OwnerId::new("sample-user"), "sample-token");
            let store = MemoryStore::new();
            add_samples(&store, &session, month).await?;
            show(Calendar::with_month(store, month), &session, mode).await
        },
    }
}

fn session_from_env() -> Result<Session, CalendarError> {
    let user = std::env::var(USER_VAR).map_err(|_| CalendarError::Config(format!("{} is not set", USER_VAR)))?;
    let token = std::env::var(TOKEN_VAR).map_err(|_| CalendarError::Unauthenticated)?;
    Ok(Session::new(OwnerId::new(user), token))
}

async fn add_samples<S: RecordStore>(store: &S, session: &Session, month: Month) -> Result<(), CalendarError> {
    let samples = [
        ("Pay rent", "housing", 0),
        ("Dentist", "health", 10),
        ("Team lunch", "work", 12),
        ("Call mom", "family", 12),
    ];
    let mut day = month.first_day();
    let mut offset = 0;
    for (title, category, target) in samples.iter() {
        while offset < *target {
            day = day.succ().unwrap_or(day);
            offset += 1;
        }
        store.create_record(session, NewRecord {
            title: title.to_string(),
            description: String::new(),
            due: day,
            category: category.to_string(),
        }).await?;
    }
    Ok(())
}

async fn show<S: RecordStore>(mut calendar: Calendar<S>, session: &Session, mode: ViewMode) -> Result<(), CalendarError> {
    calendar.set_view_mode(mode);
    calendar.load(session).await?;
    print_calendar_view(&calendar.view());
    Ok(())
}
