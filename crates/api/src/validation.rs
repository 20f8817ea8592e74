//! Field validation for review and contact submissions.
//!
//! Each field has its own function returning either the normalized value or a
//! [`ValidationError`] naming the field. Submissions are validated field by
//! field in declaration order and the first failure is reported, before any
//! storage or email side effect happens.

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::Regex;
use shared::api::{ContactPayload, CreateReviewPayload};

use crate::models::{ContactSubmission, NewReview};

pub const NAME_MAX_CHARS: usize = 100;
pub const REVIEW_TEXT_CHARS: RangeInclusive<usize> = 10..=1000;
pub const CONTACT_MESSAGE_CHARS: RangeInclusive<usize> = 10..=2000;
pub const RATING_RANGE: RangeInclusive<i32> = 1..=5;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s\-'.]+$").expect("name regex is valid"));

/// A submitted field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

impl std::error::Error for ValidationError {}

/// Trim and collapse every run of internal whitespace to a single space.
pub fn normalize_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = normalize_whitespace(raw);

    if name.is_empty() {
        return Err(ValidationError::new("name", "must not be empty"));
    }
    if name.chars().count() > NAME_MAX_CHARS {
        return Err(ValidationError::new(
            "name",
            format!("must be at most {NAME_MAX_CHARS} characters"),
        ));
    }
    if !NAME_PATTERN.is_match(&name) {
        return Err(ValidationError::new(
            "name",
            "may only contain letters, spaces, hyphens, apostrophes and periods",
        ));
    }

    Ok(name)
}

/// Normalize free text and check its length in characters against `bounds`.
pub fn validate_text(
    field: &'static str,
    raw: &str,
    bounds: RangeInclusive<usize>,
) -> Result<String, ValidationError> {
    let text = normalize_whitespace(raw);
    let len = text.chars().count();

    if len < *bounds.start() {
        return Err(ValidationError::new(
            field,
            format!("must be at least {} characters", bounds.start()),
        ));
    }
    if len > *bounds.end() {
        return Err(ValidationError::new(
            field,
            format!("must be at most {} characters", bounds.end()),
        ));
    }

    Ok(text)
}

pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();

    email
        .parse::<lettre::Address>()
        .map_err(|_| ValidationError::new("email", "must be a valid email address"))?;

    Ok(email.to_owned())
}

pub fn validate_rating(rating: Option<i32>) -> Result<Option<i32>, ValidationError> {
    match rating {
        Some(value) if !RATING_RANGE.contains(&value) => Err(ValidationError::new(
            "rating",
            format!(
                "must be between {} and {}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            ),
        )),
        other => Ok(other),
    }
}

pub fn validate_review(payload: &CreateReviewPayload) -> Result<NewReview, ValidationError> {
    Ok(NewReview {
        name: validate_name(&payload.name)?,
        text: validate_text("text", &payload.text, REVIEW_TEXT_CHARS)?,
        rating: validate_rating(payload.rating)?,
    })
}

/// Validate the human-facing fields of a contact form.
///
/// The honeypot is not examined here; callers reject spam before validating.
pub fn validate_contact(payload: &ContactPayload) -> Result<ContactSubmission, ValidationError> {
    Ok(ContactSubmission {
        name: validate_name(&payload.name)?,
        email: validate_email(&payload.email)?,
        message: validate_text("message", &payload.message, CONTACT_MESSAGE_CHARS)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(name: &str, text: &str, rating: Option<i32>) -> CreateReviewPayload {
        CreateReviewPayload {
            name: name.into(),
            text: text.into(),
            rating,
        }
    }

    mod name {
        use super::*;

        #[test]
        fn collapses_whitespace() {
            assert_eq!(validate_name("  Mary   Ann\tO'Neil ").unwrap(), "Mary Ann O'Neil");
        }

        #[test]
        fn accepts_hyphen_and_period() {
            assert_eq!(validate_name("J. Smith-Jones").unwrap(), "J. Smith-Jones");
        }

        #[test]
        fn rejects_digits() {
            let err = validate_name("R2D2").unwrap_err();
            assert_eq!(err.field, "name");
        }

        #[test]
        fn rejects_markup() {
            assert!(validate_name("<script>").is_err());
        }

        #[test]
        fn rejects_blank() {
            let err = validate_name("   ").unwrap_err();
            assert_eq!(err.to_string(), "name: must not be empty");
        }

        #[test]
        fn rejects_over_100_characters() {
            let err = validate_name(&"a".repeat(101)).unwrap_err();
            assert!(err.reason.contains("100"));
            assert!(validate_name(&"a".repeat(100)).is_ok());
        }
    }

    mod text {
        use super::*;

        #[test]
        fn bounds_are_inclusive() {
            assert!(validate_text("text", &"a".repeat(10), REVIEW_TEXT_CHARS).is_ok());
            assert!(validate_text("text", &"a".repeat(1000), REVIEW_TEXT_CHARS).is_ok());
        }

        #[test]
        fn too_short_names_lower_bound() {
            let err = validate_text("text", "too short", REVIEW_TEXT_CHARS).unwrap_err();
            assert_eq!(err.to_string(), "text: must be at least 10 characters");
        }

        #[test]
        fn too_long_names_upper_bound() {
            let err = validate_text("message", &"a".repeat(2001), CONTACT_MESSAGE_CHARS).unwrap_err();
            assert_eq!(err.to_string(), "message: must be at most 2000 characters");
        }

        #[test]
        fn length_is_measured_after_normalizing() {
            // Eleven characters of padding around a nine character sentence.
            let err = validate_text("text", "     too short      ", REVIEW_TEXT_CHARS).unwrap_err();
            assert_eq!(err.field, "text");
        }
    }

    #[test]
    fn email_is_trimmed_and_checked() {
        assert_eq!(validate_email(" jane@example.com ").unwrap(), "jane@example.com");
        assert_eq!(validate_email("jane@").unwrap_err().field, "email");
        assert!(validate_email("plainaddress").is_err());
    }

    #[test]
    fn rating_bounds() {
        assert_eq!(validate_rating(None).unwrap(), None);
        assert_eq!(validate_rating(Some(1)).unwrap(), Some(1));
        assert_eq!(validate_rating(Some(5)).unwrap(), Some(5));
        assert_eq!(validate_rating(Some(0)).unwrap_err().field, "rating");
        assert_eq!(validate_rating(Some(6)).unwrap_err().field, "rating");
    }

    #[test]
    fn valid_review_is_normalized() {
        let new = validate_review(&review(
            " Jane  Smith ",
            "They rebuilt our   porch steps in a day.",
            Some(5),
        ))
        .unwrap();

        assert_eq!(
            new,
            NewReview {
                name: "Jane Smith".into(),
                text: "They rebuilt our porch steps in a day.".into(),
                rating: Some(5),
            }
        );
    }

    #[test]
    fn first_failing_field_is_reported() {
        let err = validate_review(&review("", "short", Some(9))).unwrap_err();
        assert_eq!(err.field, "name");

        let err = validate_review(&review("Jane", "short", Some(9))).unwrap_err();
        assert_eq!(err.field, "text");

        let err = validate_review(&review("Jane", "Long enough review text", Some(9))).unwrap_err();
        assert_eq!(err.field, "rating");
    }

    #[test]
    fn valid_contact_is_normalized() {
        let payload = ContactPayload {
            name: "Jane Smith".into(),
            email: "jane@example.com ".into(),
            message: "Could you   quote a new fence?".into(),
            company: None,
        };

        let submission = validate_contact(&payload).unwrap();
        assert_eq!(submission.email, "jane@example.com");
        assert_eq!(submission.message, "Could you quote a new fence?");
    }
}
