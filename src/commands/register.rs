use anyhow::Result;
use owo_colors::OwoColorize;

use super::open_session;

pub async fn run(id: &str, email: &str) -> Result<()> {
    let mut session = open_session().await?;
    let event = session.register(id, email).await?;

    println!(
        "{}",
        format!("  Registered {} for {}", email.trim(), event.title).green()
    );
    println!("  {}", format!("{} going", event.attendees).dimmed());
    Ok(())
}

pub async fn cancel(id: &str) -> Result<()> {
    let mut session = open_session().await?;
    let event = session.cancel_registration(id).await?;

    println!("{}", format!("  Registration cancelled: {}", event.title).yellow());
    println!("  {}", format!("{} going", event.attendees).dimmed());
    Ok(())
}
