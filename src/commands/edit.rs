use anyhow::Result;
use eventbook_core::Event;
use owo_colors::OwoColorize;

use super::{open_session, require_event};

/// Replacement values for an event; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct Changes {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

impl Changes {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.location.is_none()
            && self.date.is_none()
            && self.start.is_none()
            && self.end.is_none()
    }

    /// The full replacement record for `current`.
    fn apply_to(self, current: &Event) -> Event {
        Event {
            title: self.title.unwrap_or_else(|| current.title.clone()),
            description: self.description.unwrap_or_else(|| current.description.clone()),
            location: self.location.unwrap_or_else(|| current.location.clone()),
            date: self.date.unwrap_or_else(|| current.date.clone()),
            start_time: self.start.unwrap_or_else(|| current.start_time.clone()),
            end_time: self.end.unwrap_or_else(|| current.end_time.clone()),
            ..current.clone()
        }
    }
}

pub async fn run(id: &str, changes: Changes) -> Result<()> {
    if changes.is_empty() {
        anyhow::bail!(
            "Nothing to change. Pass at least one of --title, --description, \
             --location, --date, --start or --end."
        );
    }

    let mut session = open_session().await?;
    let updated = changes.apply_to(require_event(&session, id)?);
    session.update(updated).await?;

    println!("{}", format!("  Updated: {}", id).green());
    Ok(())
}
