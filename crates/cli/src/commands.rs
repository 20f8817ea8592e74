//! Operator commands against the reviews table.

pub mod cleanup;
pub mod find;
pub mod init_db;
pub mod list;
pub mod purge;
pub mod triage;

use chrono_humanize::HumanTime;
use shared::api::Review;
use tabled::Tabled;

use crate::ui;

/// Result of a destructive command, printed as the closing summary.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub deleted: u64,
    pub kept: u64,
}

impl Outcome {
    pub fn report(&self) {
        println!();
        println!("Summary: {} deleted, {} kept", self.deleted, self.kept);
    }
}

#[derive(Tabled)]
struct ReviewRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Review")]
    text: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Review> for ReviewRow {
    fn from(review: &Review) -> Self {
        Self {
            id: review.id,
            name: review.name.clone(),
            rating: ui::stars(review.rating),
            text: ui::preview(&review.text, 50),
            created: HumanTime::from(review.created_at).to_string(),
        }
    }
}
