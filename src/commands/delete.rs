use anyhow::Result;
use owo_colors::OwoColorize;

use super::{confirm, open_session, require_event};

pub async fn run(id: &str, yes: bool) -> Result<()> {
    let mut session = open_session().await?;
    let title = require_event(&session, id)?.title.clone();

    if !confirm(&format!("Delete '{}'?", title), yes)? {
        println!("{}", "  Cancelled".dimmed());
        return Ok(());
    }

    session.delete(id).await?;
    println!("{}", format!("  Deleted: {}", title).red());
    Ok(())
}
