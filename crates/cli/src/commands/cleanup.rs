//! Bulk-delete every flagged review after a typed confirmation.

use anyhow::Result;

use super::{Outcome, find};
use crate::{
    prompt::{Prompter, matches_token},
    store::ReviewTable,
    ui,
};

pub const CONFIRM_TOKEN: &str = "DELETE TESTS";

pub async fn run(table: &dyn ReviewTable, prompter: &mut dyn Prompter) -> Result<Outcome> {
    let candidates = find::load_candidates(table).await?;

    if candidates.is_empty() {
        ui::success("No test-like reviews found");
        return Ok(Outcome::default());
    }

    find::print_candidates(&candidates);
    println!();
    println!(
        "{} review(s) will be permanently deleted.",
        candidates.len()
    );

    let input = prompter.type_token(&format!("Type {CONFIRM_TOKEN} to confirm"))?;
    if !matches_token(&input, CONFIRM_TOKEN) {
        ui::info("Cancelled, nothing deleted");
        let outcome = Outcome {
            deleted: 0,
            kept: candidates.len() as u64,
        };
        outcome.report();
        return Ok(outcome);
    }

    let ids: Vec<i64> = candidates.iter().map(|c| c.review.id).collect();
    let deleted = ui::spin("Deleting...", table.delete_many(&ids)).await?;

    ui::success(&format!("Deleted {deleted} review(s)"));
    let outcome = Outcome {
        deleted,
        kept: candidates.len() as u64 - deleted,
    };
    outcome.report();

    Ok(outcome)
}
