//! Direct access to the reviews table for operator commands.
//!
//! The admin tool bypasses the HTTP API and talks to PostgreSQL itself, so
//! it keeps working even when the server is down.

use anyhow::Result;
use async_trait::async_trait;
use shared::{api::Review, schema::REVIEWS_SCHEMA};
use sqlx::PgPool;

#[async_trait]
pub trait ReviewTable: Send + Sync {
    /// Every review, newest first.
    async fn list_all(&self) -> Result<Vec<Review>>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: i64) -> Result<bool>;
    /// Delete the given ids in one statement, returning the number removed.
    async fn delete_many(&self, ids: &[i64]) -> Result<u64>;
    async fn delete_all(&self) -> Result<u64>;
    async fn count(&self) -> Result<i64>;
    async fn ensure_schema(&self) -> Result<()>;
}

pub struct PgReviewTable {
    pool: PgPool,
}

impl PgReviewTable {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReviewTable for PgReviewTable {
    async fn list_all(&self) -> Result<Vec<Review>> {
        let reviews = sqlx::query_as::<_, Review>(
            "SELECT id, name, text, rating, created_at FROM reviews \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[i64]) -> Result<u64> {
        if ids.is_empty() {
            return Ok(0);
        }

        let result = sqlx::query("DELETE FROM reviews WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM reviews")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn ensure_schema(&self) -> Result<()> {
        for statement in REVIEWS_SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }

        Ok(())
    }
}
