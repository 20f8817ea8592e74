use std::sync::OnceLock;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::validation::ValidationError;

static EXPOSE_DETAILS: OnceLock<bool> = OnceLock::new();

/// Decide once at startup whether internal error details may be echoed to clients.
/// Defaults to hidden if never called.
pub fn expose_internal_details(expose: bool) {
    let _ = EXPOSE_DETAILS.set(expose);
}

fn details_exposed() -> bool {
    EXPOSE_DETAILS.get().copied().unwrap_or(false)
}

#[derive(Debug)]
pub enum AppError {
    /// Internal errors (storage and friends) - logged, generic 500 to user
    Internal(anyhow::Error),
    /// User-facing errors - message is safe to show
    External(StatusCode, &'static str),
    /// Validation errors - safe to show, names the offending field
    Validation(ValidationError),
    /// Honeypot field was filled in
    Spam,
    /// Client exceeded the sliding window limit
    RateLimited {
        limit: usize,
        window_secs: u64,
        retry_after_secs: u64,
    },
    /// The operator notification email could not be sent
    EmailDelivery(anyhow::Error),
}

impl AppError {
    fn into_response_with(self, expose_details: bool) -> Response {
        match self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {:?}", err);
                sentry::capture_error(
                    err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static)
                );

                let body = if expose_details {
                    format!("Internal server error: {err:#}")
                } else {
                    "Internal server error".to_owned()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            AppError::External(status, msg) => (status, msg).into_response(),
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            AppError::Spam => (
                StatusCode::BAD_REQUEST,
                "Submission rejected as spam",
            )
                .into_response(),
            AppError::RateLimited {
                limit,
                window_secs,
                retry_after_secs,
            } => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after_secs.to_string())],
                format!(
                    "Rate limit exceeded: at most {limit} requests per {window_secs} seconds. \
                     Try again in {retry_after_secs} seconds."
                ),
            )
                .into_response(),
            AppError::EmailDelivery(err) => {
                tracing::error!("email delivery failed: {:?}", err);
                sentry::capture_error(
                    err.as_ref() as &(dyn std::error::Error + Send + Sync + 'static)
                );

                let body = if expose_details {
                    format!("Failed to send email: {err:#}")
                } else {
                    "Failed to send email".to_owned()
                };
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(details_exposed())
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self::Internal(err.into())
    }
}
