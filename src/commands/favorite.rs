use anyhow::Result;
use owo_colors::OwoColorize;

use super::open_session;

pub async fn run(id: &str) -> Result<()> {
    let mut session = open_session().await?;
    let event = session.toggle_favorite(id).await?;

    if event.is_favorite {
        println!("{}", format!("  ★ Saved: {}", event.title).yellow());
    } else {
        println!("{}", format!("  Removed from saved: {}", event.title).dimmed());
    }
    Ok(())
}
