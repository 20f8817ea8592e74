//! Database repositories (PostgreSQL).
//!
//! This module contains traits and implementations for database access.
//! Each repository is abstracted behind a trait to enable mocking in tests.
//!
//! ## Repositories
//!
//! - **reviews** - Review create/list/delete and idempotent schema creation
//! - **status** - Connectivity check for the health endpoint
//!
//! ## Usage in Handlers
//!
//! Repositories are accessed via `state.repos`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let reviews = state.repos.reviews.list_newest_first().await?;
//!     let deleted = state.repos.reviews.delete(id).await?;
//! }
//! ```

mod reviews;
mod status;

pub use reviews::{PgReviewRepo, ReviewRepo};
pub use status::{PgStatusRepo, StatusRepo};

#[cfg(test)]
pub use reviews::MockReviewRepo;
#[cfg(test)]
pub use status::MockStatusRepo;

use std::sync::Arc;

/// Collection of all database repositories.
#[derive(Clone)]
pub struct Repos {
    pub reviews: Arc<dyn ReviewRepo>,
    pub status: Arc<dyn StatusRepo>,
}
