//! Terminal rendering for events.
//!
//! Extension traits that add colored output to eventbook-core types
//! using owo_colors.

use chrono::NaiveDate;
use eventbook_core::validate::parse_date;
use eventbook_core::{Event, SortState, ViewMode};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    /// One line for list views.
    fn render(&self) -> String {
        let today = chrono::Local::now().date_naive();
        let when = format!(
            "{} {}-{}",
            date_label(&self.date, today),
            self.start_time,
            self.end_time
        );
        let star = if self.is_favorite { "★" } else { " " };
        let registered = if self.registered {
            format!(" {}", "registered".green())
        } else {
            String::new()
        };

        format!(
            "{} {} {} {}{} {}",
            star.yellow(),
            format!("{:<22}", when).dimmed(),
            self.title.bold(),
            format!("@ {}", self.location).dimmed(),
            registered,
            format!("[{}]", self.id).dimmed()
        )
    }
}

impl Render for SortState {
    fn render(&self) -> String {
        self.to_string().dimmed().to_string()
    }
}

impl Render for ViewMode {
    fn render(&self) -> String {
        let label = match self {
            ViewMode::All => "All events",
            ViewMode::Saved => "Saved events",
            ViewMode::Registered => "Registered events",
        };
        label.bold().to_string()
    }
}

/// Full details for a single event.
pub fn render_details(event: &Event) -> String {
    let today = chrono::Local::now().date_naive();
    let mut lines = vec![
        event.title.bold().to_string(),
        format!("   {}", event.description),
        String::new(),
        format!("   {}  {}", "Where:".dimmed(), event.location),
        format!(
            "   {}   {} {}-{}",
            "When:".dimmed(),
            date_label(&event.date, today),
            event.start_time,
            event.end_time
        ),
    ];

    if let Some(duration) = &event.duration {
        lines.push(format!("   {}   {}", "Runs:".dimmed(), duration));
    }

    lines.push(format!(
        "   {} {} {}",
        "Going:".dimmed(),
        event.attendees,
        pluralize("attendee", event.attendees)
    ));

    let mut status = Vec::new();
    if event.is_favorite {
        status.push("saved".yellow().to_string());
    }
    if event.registered {
        status.push("registered".green().to_string());
    }
    if !status.is_empty() {
        lines.push(format!("   {}  {}", "Status:".dimmed(), status.join(", ")));
    }

    if let Some(created) = &event.created_at {
        lines.push(format!("   {} {}", "Created:".dimmed(), created));
    }
    if let Some(updated) = &event.updated_at {
        lines.push(format!("   {} {}", "Updated:".dimmed(), updated));
    }

    lines.push(format!("   {}     {}", "Id:".dimmed(), event.id.dimmed()));
    lines.join("\n")
}

/// "Today", "Tomorrow", "Wed Feb 25", or the stored text when it isn't a date.
fn date_label(date: &str, today: NaiveDate) -> String {
    let Some(date) = parse_date(date) else {
        return date.to_string();
    };

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

/// Simple pluralization helper
fn pluralize(word: &str, count: u64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
