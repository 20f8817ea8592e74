//! Shared API request/response types used by both the admin CLI and API server.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer review as stored and returned by the API.
///
/// Reviews are immutable once created; the only mutation is deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Raw review submission, before validation.
///
/// Absent text fields read as empty so the validator reports them by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Raw contact form submission, before validation.
///
/// Absent text fields read as empty, so a bot that fills the honeypot but
/// skips other fields is still caught as spam.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactPayload {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot. Hidden from humans in the frontend, so any value means a bot filled it in.
    #[serde(default)]
    pub company: Option<String>,
}

impl ContactPayload {
    /// True if the honeypot field carries any content at all.
    pub fn is_honeypot_filled(&self) -> bool {
        self.company.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// Returned after a contact submission has been relayed.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub message: String,
    /// Correlation id of the dispatch, useful when asking the operator about a submission.
    pub reference: String,
}

/// Generic acknowledgment body.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    mod contact_payload {
        use super::*;

        #[test]
        fn missing_company_defaults_to_none() {
            let payload: ContactPayload = serde_json::from_str(
                r#"{"name": "Jane", "email": "jane@example.com", "message": "Hello there, friends"}"#,
            )
            .unwrap();

            assert!(payload.company.is_none());
            assert!(!payload.is_honeypot_filled());
        }

        #[test]
        fn honeypot_survives_missing_fields() {
            let payload: ContactPayload =
                serde_json::from_str(r#"{"name": "Bot", "company": "Acme"}"#).unwrap();

            assert!(payload.email.is_empty());
            assert!(payload.is_honeypot_filled());
        }

        #[test]
        fn empty_company_is_not_spam() {
            let payload = ContactPayload {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                message: "Hello there, friends".into(),
                company: Some(String::new()),
            };

            assert!(!payload.is_honeypot_filled());
        }

        #[test]
        fn whitespace_company_counts_as_filled() {
            let payload = ContactPayload {
                name: "Jane".into(),
                email: "jane@example.com".into(),
                message: "Hello there, friends".into(),
                company: Some(" ".into()),
            };

            assert!(payload.is_honeypot_filled());
        }
    }

    #[test]
    fn review_rating_is_optional_on_the_wire() {
        let payload: CreateReviewPayload =
            serde_json::from_str(r#"{"name": "Jane", "text": "Lovely new porch"}"#).unwrap();

        assert_eq!(payload.rating, None);
    }

    #[test]
    fn review_serializes_null_rating() {
        let review = Review {
            id: 7,
            name: "Jane".into(),
            text: "Lovely new porch".into(),
            rating: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["id"], 7);
        assert!(json["rating"].is_null());
    }
}
