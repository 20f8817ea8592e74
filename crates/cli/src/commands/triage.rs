//! Walk flagged reviews one at a time.
//!
//! For each candidate the operator picks delete, keep or stop. A delete only
//! happens after the operator types the confirmation token for that review.

use anyhow::Result;

use super::{Outcome, find};
use crate::{
    prompt::{Prompter, TriageAction, matches_token},
    store::ReviewTable,
    ui,
};

pub const CONFIRM_TOKEN: &str = "DELETE";

pub async fn run(table: &dyn ReviewTable, prompter: &mut dyn Prompter) -> Result<Outcome> {
    let candidates = find::load_candidates(table).await?;

    if candidates.is_empty() {
        ui::success("No test-like reviews found");
        return Ok(Outcome::default());
    }

    let total = candidates.len();
    let mut outcome = Outcome::default();

    for (index, candidate) in candidates.iter().enumerate() {
        let review = &candidate.review;

        println!();
        println!("[{}/{}] Review {}", index + 1, total, ui::bold(&review.id.to_string()));
        println!("  Name:    {}", review.name);
        println!("  Rating:  {}", ui::stars(review.rating));
        println!("  Created: {}", review.created_at.format("%Y-%m-%d %H:%M"));
        println!("  Matched: {}", candidate.signal);
        println!("  Text:    {}", review.text);

        match prompter.triage_action("What should happen to this review?")? {
            TriageAction::Delete => {
                let input = prompter.type_token(&format!("Type {CONFIRM_TOKEN} to delete review {}", review.id))?;
                if !matches_token(&input, CONFIRM_TOKEN) {
                    ui::info("Not confirmed, keeping it");
                    outcome.kept += 1;
                    continue;
                }

                if table.delete(review.id).await? {
                    ui::success(&format!("Deleted review {}", review.id));
                    outcome.deleted += 1;
                } else {
                    ui::info(&format!("Review {} was already gone", review.id));
                }
            }
            TriageAction::Keep => outcome.kept += 1,
            TriageAction::Stop => {
                let remaining = total - index;
                ui::info(&format!("Stopped with {remaining} review(s) left unreviewed"));
                break;
            }
        }
    }

    outcome.report();

    Ok(outcome)
}
