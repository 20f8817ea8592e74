//! Customer review endpoints.
//!
//! Reviews are immutable once created. There is no update endpoint; the only
//! mutation is deletion, which is permanent.
//!
//! ## Endpoints
//!
//! - GET /reviews - List all reviews, newest first
//! - POST /reviews - Submit a review (rate limited per client address)
//! - DELETE /reviews/{id} - Delete a review (unauthenticated, operator use)

use axum::{
    Json, Router, debug_handler,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
};
use shared::api::{CreateReviewPayload, MessageResponse};

use crate::{
    error::AppError,
    middleware::{json::JsonPayload, rate_limit::RateLimitedClient},
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route("/{id}", delete(delete_review))
}

#[debug_handler]
async fn list_reviews(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let reviews = state.repos.reviews.list_newest_first().await?;

    Ok(Json(reviews))
}

#[debug_handler]
async fn create_review(
    client: RateLimitedClient,
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<CreateReviewPayload>,
) -> Result<impl IntoResponse, AppError> {
    let review = validation::validate_review(&payload).map_err(AppError::Validation)?;

    let created = state.repos.reviews.create(&review).await?;

    tracing::info!(review_id = created.id, rating = ?created.rating, ip = %client.ip, "review created");

    Ok((StatusCode::CREATED, Json(created)))
}

#[debug_handler]
async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let deleted = state.repos.reviews.delete(id).await?;

    if !deleted {
        return Err(AppError::External(StatusCode::NOT_FOUND, "Review not found"));
    }

    tracing::info!(review_id = id, "review deleted");

    Ok(Json(MessageResponse {
        message: format!("Review {id} deleted successfully"),
    }))
}
