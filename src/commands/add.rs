use anyhow::Result;
use eventbook_core::NewEvent;
use owo_colors::OwoColorize;

use super::open_session;

pub async fn run(
    title: String,
    description: String,
    location: String,
    date: String,
    start: String,
    end: String,
) -> Result<()> {
    let mut session = open_session().await?;

    let input = NewEvent {
        title,
        description,
        location,
        date,
        start_time: start,
        end_time: end,
    };

    let id = session.create(input).await?;

    if let Some(event) = session.get(&id) {
        let duration = event.duration.as_deref().unwrap_or_default();
        println!("{}", format!("  Created: {} ({})", event.title, duration).green());
        println!("  {}", format!("id: {}", event.id).dimmed());
    }

    Ok(())
}
