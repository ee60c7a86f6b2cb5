//! Month views of an [`EventAggregate`]
//!
//! These are pure derivations: they borrow the aggregate and never change it.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};

use crate::aggregate::EventAggregate;
use crate::day_key::DayKey;
use crate::error::CalendarError;
use crate::event::DisplayEvent;


/// A calendar month
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    /// The month a day belongs to
    pub fn containing(day: DayKey) -> Self {
        let date = day.date();
        Self { year: date.year(), month: date.month() }
    }

    /// The month of the current local day
    pub fn current() -> Self {
        Self::containing(DayKey::today())
    }

    pub fn year(&self) -> i32 { self.year }
    pub fn month(&self) -> u32 { self.month }

    pub fn first_day(&self) -> DayKey {
        // `new` and `containing` only build valid months
        DayKey::from(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN))
    }

    pub fn last_day(&self) -> DayKey {
        let next_first = self.next().first_day().date();
        DayKey::from(next_first.pred_opt().unwrap_or(next_first))
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { year: self.year, month: self.month + 1 }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { year: self.year, month: self.month - 1 }
        }
    }

    pub fn contains(&self, day: &DayKey) -> bool {
        Self::containing(*day) == *self
    }

    /// Every day of the month, in order
    pub fn days(&self) -> Vec<DayKey> {
        let last = self.last_day();
        let mut days = Vec::with_capacity(31);
        let mut current = Some(self.first_day());
        while let Some(day) = current {
            if day > last {
                break;
            }
            days.push(day);
            current = day.succ();
        }
        days
    }

    /// e.g. "March 2025"
    pub fn title(&self) -> String {
        self.first_day().date().format("%B %Y").to_string()
    }
}

impl FromStr for Month {
    type Err = CalendarError;

    /// Accepts `YYYY-MM`, or any day of the month
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let padded = format!("{}-01", s.trim());
        if let Ok(date) = NaiveDate::parse_from_str(&padded, "%Y-%m-%d") {
            return Ok(Self { year: date.year(), month: date.month() });
        }
        DayKey::parse(s).map(Self::containing)
    }
}

impl Display for Month {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}


/// How a month is laid out
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Every day of the month, in chronological order
    Grid,
    /// Only the days that have events, most recent first
    List,
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Grid
    }
}


/// A day, and the events that are due on it
#[derive(Clone, Debug, PartialEq)]
pub struct DayView<'a> {
    pub day: DayKey,
    pub events: &'a [DisplayEvent],
}

impl<'a> DayView<'a> {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// e.g. "Thursday, March 13"
    pub fn heading(&self) -> String {
        self.day.heading()
    }
}

/// The list layout of a month
#[derive(Clone, Debug, PartialEq)]
pub enum ListView<'a> {
    /// No day of the month has events
    Empty,
    /// Days that have at least one event, most recent first. This is never empty
    Days(Vec<DayView<'a>>),
}

impl<'a> ListView<'a> {
    pub fn days(&self) -> &[DayView<'a>] {
        match self {
            ListView::Empty => &[],
            ListView::Days(days) => days,
        }
    }
}

/// A month, laid out in either mode
#[derive(Clone, Debug, PartialEq)]
pub enum MonthView<'a> {
    Grid(Vec<DayView<'a>>),
    List(ListView<'a>),
}


/// Every day of `month`, from the first to the last, each with its (possibly empty) list of events
pub fn grid_view<'a>(month: Month, aggregate: &'a EventAggregate) -> Vec<DayView<'a>> {
    month.days()
        .into_iter()
        .map(|day| DayView { day, events: aggregate.events_on(&day) })
        .collect()
}

/// The days of `month` that have events, most recent day first
pub fn list_view<'a>(month: Month, aggregate: &'a EventAggregate) -> ListView<'a> {
    let days: Vec<DayView<'a>> = aggregate.days()
        .filter(|(day, _)| month.contains(day))
        .rev()
        .map(|(day, events)| DayView { day: *day, events })
        .collect();

    if days.is_empty() {
        ListView::Empty
    } else {
        ListView::Days(days)
    }
}

pub fn build_view<'a>(mode: ViewMode, month: Month, aggregate: &'a EventAggregate) -> MonthView<'a> {
    match mode {
        ViewMode::Grid => MonthView::Grid(grid_view(month, aggregate)),
        ViewMode::List => MonthView::List(list_view(month, aggregate)),
    }
}
