//! Review repository for PostgreSQL.

use anyhow::Result;
use async_trait::async_trait;
use shared::{api::Review, schema::REVIEWS_SCHEMA};
use sqlx::{Pool, Postgres};

use crate::models::NewReview;

/// Repository for review operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewRepo: Send + Sync {
    /// All reviews, newest first (ties broken by id, highest first).
    async fn list_newest_first(&self) -> Result<Vec<Review>>;

    /// Insert a validated review. Storage assigns `id` and `created_at`.
    async fn create(&self, review: &NewReview) -> Result<Review>;

    /// Delete a review by ID (returns true if a row was deleted).
    async fn delete(&self, id: i64) -> Result<bool>;

    /// Create the reviews table and index if they do not exist.
    async fn ensure_schema(&self) -> Result<()>;
}

/// PostgreSQL implementation of ReviewRepo.
#[derive(Clone)]
pub struct PgReviewRepo {
    pool: Pool<Postgres>,
}

impl PgReviewRepo {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewRepo for PgReviewRepo {
    async fn list_newest_first(&self) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, name, text, rating, created_at FROM reviews ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(reviews)
    }

    async fn create(&self, review: &NewReview) -> Result<Review> {
        let review = sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (name, text, rating)
            VALUES ($1, $2, $3)
            RETURNING id, name, text, rating, created_at
            "#,
        )
        .bind(&review.name)
        .bind(&review.text)
        .bind(review.rating)
        .fetch_one(&self.pool)
        .await?;
        Ok(review)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ensure_schema(&self) -> Result<()> {
        for statement in REVIEWS_SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }
}
