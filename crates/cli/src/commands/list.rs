//! Show every review, newest first.

use anyhow::Result;
use tabled::{Table, settings::Style};

use super::ReviewRow;
use crate::{store::ReviewTable, ui};

pub async fn run(table: &dyn ReviewTable) -> Result<usize> {
    let reviews = ui::spin("Fetching reviews...", table.list_all()).await?;

    if reviews.is_empty() {
        println!("No reviews");
        return Ok(0);
    }

    let rows: Vec<ReviewRow> = reviews.iter().map(ReviewRow::from).collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("{} review(s)", reviews.len());

    Ok(reviews.len())
}
