//! Delete every review in the table.

use anyhow::Result;
use owo_colors::OwoColorize;

use super::Outcome;
use crate::{
    prompt::{Prompter, matches_token},
    store::ReviewTable,
    ui,
};

pub const CONFIRM_TOKEN: &str = "NUCLEAR";

pub async fn run(table: &dyn ReviewTable, prompter: &mut dyn Prompter) -> Result<Outcome> {
    let total = ui::spin("Counting reviews...", table.count()).await?;

    if total == 0 {
        println!("No reviews to delete");
        return Ok(Outcome::default());
    }

    println!();
    println!(
        "{}",
        format!("This will permanently delete ALL {total} review(s), genuine ones included.").red()
    );
    println!();

    let input = prompter.type_token(&format!("Type {CONFIRM_TOKEN} to delete everything"))?;
    if !matches_token(&input, CONFIRM_TOKEN) {
        ui::info("Cancelled, nothing deleted");
        let outcome = Outcome {
            deleted: 0,
            kept: total as u64,
        };
        outcome.report();
        return Ok(outcome);
    }

    let deleted = ui::spin("Deleting...", table.delete_all()).await?;

    ui::success(&format!("Deleted {deleted} review(s)"));
    let outcome = Outcome { deleted, kept: 0 };
    outcome.report();

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::fakes::{Answer, MemoryTable, ScriptedPrompter};

    fn table() -> MemoryTable {
        MemoryTable::with_rows(&[
            ("Jane Smith", "Lovely work on our built-in bookshelves."),
            ("Test User", "This is a test"),
        ])
    }

    #[tokio::test]
    async fn token_deletes_everything() {
        let table = table();
        let mut prompter = ScriptedPrompter::new([Answer::Type("NUCLEAR")]);

        let outcome = run(&table, &mut prompter).await.unwrap();

        assert_eq!(outcome, Outcome { deleted: 2, kept: 0 });
        assert!(table.ids().is_empty());
    }

    #[tokio::test]
    async fn other_input_cancels() {
        let table = table();
        let mut prompter = ScriptedPrompter::new([Answer::Type("nuclear")]);

        let outcome = run(&table, &mut prompter).await.unwrap();

        assert_eq!(outcome, Outcome { deleted: 0, kept: 2 });
        assert_eq!(table.ids(), vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_table_skips_prompt() {
        let table = MemoryTable::default();
        let mut prompter = ScriptedPrompter::new([]);

        run(&table, &mut prompter).await.unwrap();

        assert!(prompter.prompts.is_empty());
    }
}
