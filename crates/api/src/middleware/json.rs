//! JSON body extractor whose rejections are validation errors.
//!
//! axum's `Json` answers malformed bodies with 422 and a serde message. Here a
//! body that does not fit the payload type is reported the same way as any
//! other bad field: 400 with `field: reason`.

use std::sync::LazyLock;

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use regex::Regex;
use serde::de::DeserializeOwned;

use crate::{error::AppError, validation::ValidationError};

/// Fields a submission may carry. Anything else is attributed to `body`.
const KNOWN_FIELDS: [&str; 6] = ["name", "text", "rating", "email", "message", "company"];

static MISSING_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"missing field `([^`]+)`").expect("missing field regex is valid"));

/// serde_path_to_error prefixes data errors with the path of the failing value.
static FIELD_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"target type: ([A-Za-z_][A-Za-z0-9_]*)[^ :]*: ").expect("field path regex is valid")
});

/// A JSON request body deserialized into `T`.
pub struct JsonPayload<T>(pub T);

impl<S, T> FromRequest<S> for JsonPayload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(payload)) => Ok(JsonPayload(payload)),
            Err(rejection) => {
                let err = describe_rejection(&rejection);
                tracing::debug!(error = %rejection.body_text(), field = err.field, "rejected request body");
                Err(AppError::Validation(err))
            }
        }
    }
}

fn known_field(name: &str) -> &'static str {
    KNOWN_FIELDS
        .into_iter()
        .find(|field| *field == name)
        .unwrap_or("body")
}

fn describe_rejection(rejection: &JsonRejection) -> ValidationError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let text = err.body_text();
            if let Some(caps) = MISSING_FIELD.captures(&text) {
                ValidationError {
                    field: known_field(&caps[1]),
                    reason: "is required".into(),
                }
            } else if let Some(caps) = FIELD_PATH.captures(&text) {
                let field = known_field(&caps[1]);
                let reason = match field {
                    "rating" => "must be a whole number",
                    "body" => "does not match the expected format",
                    _ => "must be a string",
                };
                ValidationError {
                    field,
                    reason: reason.into(),
                }
            } else {
                ValidationError {
                    field: "body",
                    reason: "must be a JSON object with the expected fields".into(),
                }
            }
        }
        JsonRejection::JsonSyntaxError(_) => ValidationError {
            field: "body",
            reason: "is not valid JSON".into(),
        },
        JsonRejection::MissingJsonContentType(_) => ValidationError {
            field: "body",
            reason: "must be sent with Content-Type: application/json".into(),
        },
        other => ValidationError {
            field: "body",
            reason: other.body_text(),
        },
    }
}
