use anyhow::Result;
use eventbook_core::SortKey;

use super::open_session;
use crate::render::Render;

pub async fn run(key: SortKey) -> Result<()> {
    let session = open_session().await?;
    let state = session.select_sort(key).await?;
    println!("  {}", state.render());
    Ok(())
}
