//! Report reviews that look like placeholder or test content.
//!
//! Matching is purely heuristic. Genuine short praise gets flagged too, which
//! is why every deletion path asks the operator first.

use anyhow::Result;
use shared::{
    api::Review,
    classifier::{self, TestSignal},
};
use tabled::{Table, Tabled, settings::Style};

use super::ReviewRow;
use crate::{store::ReviewTable, ui};

/// A review flagged by the classifier, with the first rule that fired.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub review: Review,
    pub signal: TestSignal,
}

/// Flag candidates, keeping the table's newest-first order.
pub fn candidates(reviews: Vec<Review>) -> Vec<Candidate> {
    reviews
        .into_iter()
        .filter_map(|review| {
            classifier::classify(&review.name, &review.text).map(|signal| Candidate { review, signal })
        })
        .collect()
}

pub async fn load_candidates(table: &dyn ReviewTable) -> Result<Vec<Candidate>> {
    let reviews = ui::spin("Scanning reviews...", table.list_all()).await?;
    Ok(candidates(reviews))
}

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(inline)]
    review: ReviewRow,
    #[tabled(rename = "Matched")]
    signal: String,
}

pub fn print_candidates(candidates: &[Candidate]) {
    let rows: Vec<CandidateRow> = candidates
        .iter()
        .map(|c| CandidateRow {
            review: ReviewRow::from(&c.review),
            signal: c.signal.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
}

pub async fn run(table: &dyn ReviewTable) -> Result<usize> {
    let candidates = load_candidates(table).await?;

    if candidates.is_empty() {
        ui::success("No test-like reviews found");
        return Ok(0);
    }

    print_candidates(&candidates);
    println!("{} possible test review(s)", candidates.len());

    Ok(candidates.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::fakes::MemoryTable;

    #[tokio::test]
    async fn flags_only_test_like_rows_newest_first() {
        let table = MemoryTable::with_rows(&[
            ("Test User", "This is a test"),
            (
                "Jane Smith",
                "The carpenters rebuilt our staircase and matched the existing trim perfectly. \
                 They were punctual, tidy and explained every step along the way.",
            ),
            ("Bob", "Good job folks"),
        ]);

        let found = candidates(table.list_all().await.unwrap());

        let ids: Vec<i64> = found.iter().map(|c| c.review.id).collect();
        assert_eq!(ids, vec![3, 1]);
        assert_eq!(found[1].signal, TestSignal::PlaceholderToken);
    }

    #[tokio::test]
    async fn run_reports_count_without_deleting() {
        let table = MemoryTable::with_rows(&[("Demo Account", "Lorem ipsum dolor sit amet.")]);

        assert_eq!(run(&table).await.unwrap(), 1);
        assert_eq!(table.ids(), vec![1]);
    }
}
