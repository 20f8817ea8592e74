//! Operator-triggered schema creation.
//!
//! - GET /init-db - Create the reviews table if missing (idempotent)

use axum::{Json, Router, debug_handler, extract::State, response::IntoResponse, routing::get};
use shared::api::MessageResponse;

use crate::{error::AppError, state::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(init_db))
}

#[debug_handler]
async fn init_db(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    state.repos.reviews.ensure_schema().await?;

    tracing::info!("database schema ensured");

    Ok(Json(MessageResponse {
        message: "Database tables created successfully".into(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::MockReviewRepo;
    use crate::test_utils::TestStateBuilder;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn creates_schema() {
        let mut review_repo = MockReviewRepo::new();
        review_repo.expect_ensure_schema().times(1).returning(|| Ok(()));

        let state = TestStateBuilder::new().with_review_repo(review_repo).build();

        let response = init_db(State(state)).await.unwrap().into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let mut review_repo = MockReviewRepo::new();
        review_repo
            .expect_ensure_schema()
            .returning(|| Err(anyhow::anyhow!("permission denied for schema public")));

        let state = TestStateBuilder::new().with_review_repo(review_repo).build();

        let Err(err) = init_db(State(state)).await else {
            panic!("expected storage error");
        };
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
