use anyhow::Result;
use owo_colors::OwoColorize;

use super::{confirm, open_session};

pub async fn run(yes: bool) -> Result<()> {
    let mut session = open_session().await?;
    let count = session.events().len();

    if count == 0 {
        println!("{}", "  No events to clear".dimmed());
        return Ok(());
    }

    let prompt = format!("Delete all {} events? This cannot be undone.", count);
    if !confirm(&prompt, yes)? {
        println!("{}", "  Cancelled".dimmed());
        return Ok(());
    }

    session.clear().await?;
    println!("{}", format!("  Cleared {} events", count).red());
    Ok(())
}
