//! Create the reviews table if it does not exist yet.

use anyhow::Result;

use crate::{store::ReviewTable, ui};

pub async fn run(table: &dyn ReviewTable) -> Result<()> {
    ui::spin("Creating schema...", table.ensure_schema()).await?;

    ui::success("Database tables created successfully");

    Ok(())
}
