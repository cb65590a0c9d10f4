use anyhow::Result;

use super::{open_session, require_event};
use crate::render::render_details;

pub async fn run(id: &str) -> Result<()> {
    let session = open_session().await?;
    let event = require_event(&session, id)?;
    println!("{}", render_details(event));
    Ok(())
}
