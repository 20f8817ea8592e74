//! Contact form endpoint.
//!
//! A submission is rate limited, screened by a honeypot field, validated and
//! then relayed by email. Nothing is persisted.

use axum::{
    Json, Router, debug_handler, extract::State, response::IntoResponse, routing::post,
};
use shared::api::{ContactPayload, ContactResponse};

use crate::{
    error::AppError,
    middleware::{json::JsonPayload, rate_limit::RateLimitedClient},
    state::AppState,
    validation,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(submit_contact))
}

#[debug_handler]
async fn submit_contact(
    client: RateLimitedClient,
    State(state): State<AppState>,
    JsonPayload(payload): JsonPayload<ContactPayload>,
) -> Result<impl IntoResponse, AppError> {
    if payload.is_honeypot_filled() {
        tracing::warn!(ip = %client.ip, "honeypot field filled, rejecting contact submission");
        return Err(AppError::Spam);
    }

    let submission = validation::validate_contact(&payload).map_err(AppError::Validation)?;

    let report = state
        .dispatcher
        .dispatch(&submission)
        .await
        .map_err(AppError::EmailDelivery)?;

    Ok(Json(ContactResponse {
        message: "Message sent successfully".to_owned(),
        reference: report.dispatch_id.to_string(),
    }))
}
