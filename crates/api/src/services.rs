//! External service abstractions.
//!
//! This module contains traits and implementations for external services
//! that the API depends on. The email transport is abstracted behind a trait
//! to enable mocking in tests.
//!
//! ## Services
//!
//! - **email** - Transactional email via Resend (prod) or SMTP (dev)
//! - **dispatch** - Contact form relay (operator notification + submitter confirmation)
//!
//! ## Usage in Handlers
//!
//! Services are accessed via `AppState`:
//!
//! ```ignore
//! async fn handler(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
//!     let report = state.dispatcher.dispatch(&submission).await?;
//! }
//! ```

mod dispatch;
mod email;

pub use dispatch::{ContactDispatcher, MailSettings};
pub use email::{EmailSender, EmailSenderImpl, OutboundEmail};

#[cfg(test)]
pub use email::MockEmailSender;
