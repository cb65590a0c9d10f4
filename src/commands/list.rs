use anyhow::{Context, Result};
use eventbook_core::{ViewMode, ViewQuery};
use owo_colors::OwoColorize;

use super::open_session;
use crate::render::Render;

pub async fn run(view: ViewMode, search: Option<String>, json: bool) -> Result<()> {
    let session = open_session().await?;
    let sort = session.sort_state().await?;

    let query = ViewQuery {
        mode: view,
        search,
        sort: Some(sort),
    };
    let events = session.view(&query);

    if json {
        let out = serde_json::to_string_pretty(&events).context("Failed to serialize events")?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}  {}", view.render(), sort.render());

    if events.is_empty() {
        println!("   {}", "No events found".dimmed());
        return Ok(());
    }

    for event in events {
        println!("{}", event.render());
    }

    Ok(())
}
