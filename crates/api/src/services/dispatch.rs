//! Contact form relay.
//!
//! A submission produces two emails, sent one after the other:
//!
//! 1. **Operator notification** to the configured recipient, reply-to set to the
//!    submitter. If this fails the dispatch fails and nothing else is sent.
//! 2. **Submitter confirmation** back to the submitter. If this fails the
//!    failure is logged and the dispatch still succeeds, since the inquiry has
//!    already reached the operator.
//!
//! Every dispatch gets a fresh correlation id carried by a tracing span, so
//! both send attempts for one submission can be found together in the logs.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::Config,
    models::ContactSubmission,
    services::{EmailSender, OutboundEmail},
};

/// Addresses and wording used when relaying contact submissions.
#[derive(Debug, Clone)]
pub struct MailSettings {
    pub operator_recipient: String,
    pub company_name: String,
    pub send_timeout: Duration,
}

impl MailSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            operator_recipient: config.contact_recipient.clone(),
            company_name: config.company_name.clone(),
            send_timeout: config.email_timeout(),
        }
    }
}

/// Outcome of a successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub dispatch_id: Uuid,
    pub confirmation_sent: bool,
}

pub struct ContactDispatcher {
    email: Arc<dyn EmailSender>,
    settings: MailSettings,
}

impl ContactDispatcher {
    pub fn new(email: Arc<dyn EmailSender>, settings: MailSettings) -> Self {
        Self { email, settings }
    }

    /// Relay a validated submission. Fails only if the operator notification fails.
    pub async fn dispatch(&self, submission: &ContactSubmission) -> Result<DispatchReport> {
        let dispatch_id = Uuid::new_v4();
        let span = tracing::info_span!("dispatch", dispatch_id = %dispatch_id);

        async {
            tracing::info!(name = %submission.name, email = %submission.email, "relaying contact submission");

            let notification = self.operator_notification(submission);
            self.send_bounded(&notification)
                .await
                .with_context(|| format!("operator notification failed (dispatch {dispatch_id})"))?;
            tracing::info!("operator notification sent");

            let confirmation = self.submitter_confirmation(submission);
            let confirmation_sent = match self.send_bounded(&confirmation).await {
                Ok(()) => {
                    tracing::info!("confirmation sent");
                    true
                }
                Err(e) => {
                    tracing::warn!(error = %format!("{e:#}"), "confirmation email failed, continuing");
                    false
                }
            };

            Ok::<_, anyhow::Error>(DispatchReport {
                dispatch_id,
                confirmation_sent,
            })
        }
        .instrument(span)
        .await
    }

    async fn send_bounded(&self, email: &OutboundEmail) -> Result<()> {
        match tokio::time::timeout(self.settings.send_timeout, self.email.send(email)).await {
            Ok(result) => result,
            Err(_) => anyhow::bail!("send timed out after {:?}", self.settings.send_timeout),
        }
    }

    fn operator_notification(&self, submission: &ContactSubmission) -> OutboundEmail {
        let name = escape_html(&submission.name);
        let email = escape_html(&submission.email);
        let message = escape_html(&submission.message);

        OutboundEmail {
            to: self.settings.operator_recipient.clone(),
            reply_to: Some(submission.email.clone()),
            subject: format!("New contact form message from {}", submission.name),
            html: format!(
                "<p><strong>Name:</strong> {name}</p>\n\
                 <p><strong>Email:</strong> {email}</p>\n\
                 <p><strong>Message:</strong></p>\n\
                 <p>{message}</p>"
            ),
            text: format!(
                "Name: {}\nEmail: {}\nMessage:\n{}",
                submission.name, submission.email, submission.message
            ),
        }
    }

    fn submitter_confirmation(&self, submission: &ContactSubmission) -> OutboundEmail {
        let company = &self.settings.company_name;

        OutboundEmail {
            to: submission.email.clone(),
            reply_to: None,
            subject: format!("Thanks for contacting {company}"),
            html: format!(
                "<p>Hi {name},</p>\n\
                 <p>Thank you for reaching out to {company_html}. We received your message \
                 and will get back to you soon.</p>\n\
                 <p><strong>Your message:</strong></p>\n\
                 <blockquote>{message}</blockquote>\n\
                 <p>Best regards,<br>{company_html}</p>",
                name = escape_html(&submission.name),
                company_html = escape_html(company),
                message = escape_html(&submission.message),
            ),
            text: format!(
                "Hi {},\n\nThank you for reaching out to {company}. We received your message \
                 and will get back to you soon.\n\nYour message:\n{}\n\nBest regards,\n{company}",
                submission.name, submission.message
            ),
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
