//! Shared test utilities for API handler tests.
//!
//! Provides common fixtures and a flexible `TestStateBuilder` for constructing
//! `AppState` instances with only the mocks needed for each test.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::test_utils::{TestStateBuilder, mock_review};
//!
//! let mut review_repo = MockReviewRepo::new();
//! review_repo.expect_list_newest_first().returning(|| Ok(vec![mock_review(1, "Great work")]));
//!
//! let state = TestStateBuilder::new()
//!     .with_review_repo(review_repo)
//!     .build();
//! ```

use std::sync::Arc;

use chrono::Utc;
use shared::api::Review;

use crate::config::Config;
use crate::repos::{MockReviewRepo, MockStatusRepo, Repos};
use crate::services::{ContactDispatcher, EmailSender, MailSettings, MockEmailSender};
use crate::state::AppState;
use crate::stores::{MockRateLimiter, Stores};

/// Creates a test configuration with dummy values.
pub fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 8000,
        database_url: "postgres://test".to_string(),
        smtp_url: None,
        resend_api_key: None,
        mail_from: "info@example.com".to_string(),
        contact_recipient: "owner@example.com".to_string(),
        company_name: "Test Carpentry".to_string(),
        rate_limit_requests: 10,
        rate_limit_window: 3600,
        email_timeout_secs: 10,
        cors_origins: "http://localhost:3000".to_string(),
        env: "test".to_string(),
        sentry_dsn: None,
    }
}

/// Creates a stored review with the given id and text.
pub fn mock_review(id: i64, text: &str) -> Review {
    Review {
        id,
        name: "Jane Smith".to_string(),
        text: text.to_string(),
        rating: Some(5),
        created_at: Utc::now(),
    }
}

/// Builder for constructing test `AppState` with custom mocks.
///
/// Uses default (empty) mocks for anything not explicitly set, so a test
/// that touches an unconfigured mock fails loudly.
#[derive(Default)]
pub struct TestStateBuilder {
    review_repo: Option<MockReviewRepo>,
    status_repo: Option<MockStatusRepo>,
    rate_limiter: Option<MockRateLimiter>,
    email_sender: Option<MockEmailSender>,
}

impl TestStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_review_repo(mut self, repo: MockReviewRepo) -> Self {
        self.review_repo = Some(repo);
        self
    }

    pub fn with_status_repo(mut self, repo: MockStatusRepo) -> Self {
        self.status_repo = Some(repo);
        self
    }

    pub fn with_rate_limiter(mut self, limiter: MockRateLimiter) -> Self {
        self.rate_limiter = Some(limiter);
        self
    }

    pub fn with_email_sender(mut self, sender: MockEmailSender) -> Self {
        self.email_sender = Some(sender);
        self
    }

    /// Builds the `AppState` using configured mocks or defaults.
    pub fn build(self) -> AppState {
        let config = test_config();

        let repos = Repos {
            reviews: Arc::new(self.review_repo.unwrap_or_else(MockReviewRepo::new)),
            status: Arc::new(self.status_repo.unwrap_or_else(MockStatusRepo::new)),
        };

        let stores = Stores {
            rate_limiter: Arc::new(self.rate_limiter.unwrap_or_else(MockRateLimiter::new)),
        };

        let email = Arc::new(self.email_sender.unwrap_or_else(MockEmailSender::new))
            as Arc<dyn EmailSender>;
        let dispatcher = Arc::new(ContactDispatcher::new(
            email,
            MailSettings::from_config(&config),
        ));

        AppState {
            config,
            repos,
            stores,
            dispatcher,
        }
    }
}
