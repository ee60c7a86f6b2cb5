//! Some utility functions

use crate::controller::CalendarView;
use crate::event::DisplayEvent;
use crate::view::{DayView, ListView, MonthView};

/// A debug utility that pretty-prints what a calendar screen displays
pub fn print_calendar_view(view: &CalendarView<'_>) {
    print!("{}", format_calendar_view(view));
}

pub fn format_calendar_view(view: &CalendarView<'_>) -> String {
    let mut out = String::new();
    match view {
        CalendarView::Loading => out.push_str("Loading...\n"),
        CalendarView::Failed(message) => {
            out.push_str(&format!("Unable to display events: {}\n", message));
        },
        CalendarView::Ready { title, month } => {
            out.push_str(&format!("{}\n", title));
            match month {
                MonthView::Grid(days) => {
                    for day in days {
                        out.push_str(&format!("  {}\n", day.day));
                        push_events(&mut out, day);
                    }
                },
                MonthView::List(ListView::Empty) => out.push_str("  No events for this month.\n"),
                MonthView::List(ListView::Days(days)) => {
                    for day in days {
                        out.push_str(&format!("  {}\n", day.heading()));
                        push_events(&mut out, day);
                    }
                },
            }
        },
    }
    out
}

fn push_events(out: &mut String, day: &DayView<'_>) {
    for event in day.events {
        out.push_str(&format_event(event));
        out.push('\n');
    }
}

pub fn format_event(event: &DisplayEvent) -> String {
    let completion = if event.completed { "✓" } else { " " };
    let category = if event.category.is_empty() {
        String::new()
    } else {
        format!(" [{}]", event.category)
    };
    format!("    {} {}{}\t{}", completion, event.title, category, event.id)
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::EventAggregate;
    use crate::record::RecordId;
    use crate::view::{build_view, Month, ViewMode};

    #[test]
    fn formats_list_and_grid() {
        let mut agg = EventAggregate::new();
        agg.apply_create(DisplayEvent {
            id: RecordId::random(),
            title: "Dentist".to_string(),
            description: String::new(),
            day: "2025-03-13".parse().unwrap(),
            category: "health".to_string(),
            completed: true,
        }).unwrap();
        let march = Month::new(2025, 3).unwrap();

        let list = CalendarView::Ready { title: march.title(), month: build_view(ViewMode::List, march, &agg) };
        let text = format_calendar_view(&list);
        assert!(text.starts_with("March 2025\n"));
        assert!(text.contains("Thursday, March 13"));
        assert!(text.contains("✓ Dentist [health]"));

        let grid = CalendarView::Ready { title: march.title(), month: build_view(ViewMode::Grid, march, &agg) };
        assert_eq!(format_calendar_view(&grid).lines().filter(|l| l.starts_with("  2025-03-")).count(), 31);

        let empty = CalendarView::Ready { title: "April 2025".to_string(), month: build_view(ViewMode::List, march.next(), &agg) };
        assert!(format_calendar_view(&empty).contains("No events for this month."));
    }
}
