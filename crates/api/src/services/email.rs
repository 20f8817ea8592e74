//! Email sending abstraction.
//!
//! Uses Resend in production, SMTP (lettre) in development.
//! This allows local development without a Resend account.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use lettre::{
    Message, SmtpTransport, Transport,
    message::{Mailbox, MultiPart},
};
use resend_rs::types::CreateEmailBaseOptions;

/// A single outbound email, rendered and ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Transport-agnostic email sender.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send one email. Attempted once; callers decide what a failure means.
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}

/// Production email sender, picked from configuration.
pub enum EmailSenderImpl {
    /// SMTP-based sender using lettre (for development)
    Smtp(SmtpSender),
    /// Resend API sender (for production)
    Resend(ResendSender),
}

impl EmailSenderImpl {
    /// Create a new email sender based on config.
    /// Uses Resend if api key is provided, otherwise falls back to SMTP.
    pub fn new(
        resend_api_key: Option<String>,
        smtp_url: Option<String>,
        from: Mailbox,
        timeout: Duration,
    ) -> Result<Self> {
        if let Some(api_key) = resend_api_key.filter(|k| !k.is_empty()) {
            Ok(Self::Resend(ResendSender::new(api_key, from.to_string())))
        } else if let Some(url) = smtp_url.filter(|u| !u.is_empty()) {
            Ok(Self::Smtp(SmtpSender::new(&url, from, timeout)?))
        } else {
            anyhow::bail!("Either RESEND_API_KEY or SMTP_URL must be configured")
        }
    }
}

#[async_trait]
impl EmailSender for EmailSenderImpl {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        match self {
            Self::Resend(sender) => sender.send(email).await,
            Self::Smtp(sender) => sender.send(email).await,
        }
    }
}

/// SMTP sender using lettre.
pub struct SmtpSender {
    transport: SmtpTransport,
    from: Mailbox,
}

impl SmtpSender {
    pub fn new(smtp_url: &str, from: Mailbox, timeout: Duration) -> Result<Self> {
        let transport = SmtpTransport::from_url(smtp_url)?
            .timeout(Some(timeout))
            .build();

        Ok(Self {
            transport,
            from,
        })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(email.to.parse()?)
            .subject(email.subject.as_str());

        if let Some(reply_to) = &email.reply_to {
            builder = builder.reply_to(reply_to.parse()?);
        }

        let message = builder.multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))?;

        Ok(message)
    }
}

#[async_trait]
impl EmailSender for SmtpSender {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let message = self.build_message(email)?;
        let transport = self.transport.clone();

        // lettre's SmtpTransport is blocking.
        tokio::task::spawn_blocking(move || transport.send(&message)).await??;

        Ok(())
    }
}

/// Resend API sender.
pub struct ResendSender {
    client: resend_rs::Resend,
    from: String,
}

impl ResendSender {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            client: resend_rs::Resend::new(&api_key),
            from,
        }
    }
}

#[async_trait]
impl EmailSender for ResendSender {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        let mut options =
            CreateEmailBaseOptions::new(&self.from, [email.to.as_str()], &email.subject)
                .with_html(&email.html)
                .with_text(&email.text);

        if let Some(reply_to) = &email.reply_to {
            options = options.with_reply(reply_to);
        }

        self.client.emails.send(options).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::test_utils::test_config;

    fn from() -> Mailbox {
        test_config().sender().unwrap()
    }

    fn smtp_sender() -> SmtpSender {
        SmtpSender::new("smtp://localhost:1025", from(), Duration::from_secs(1)).unwrap()
    }

    fn email(reply_to: Option<&str>) -> OutboundEmail {
        OutboundEmail {
            to: "owner@example.com".into(),
            reply_to: reply_to.map(str::to_owned),
            subject: "New contact form message from Jane".into(),
            html: "<p>Hello</p>".into(),
            text: "Hello".into(),
        }
    }

    #[test]
    fn no_credentials_is_an_error() {
        let result = EmailSenderImpl::new(
            None,
            Some(String::new()),
            from(),
            Duration::from_secs(1),
        );

        let Err(err) = result else {
            panic!("expected missing credential error");
        };
        assert!(err.to_string().contains("RESEND_API_KEY"));
    }

    #[test]
    fn resend_key_takes_precedence() {
        let sender = EmailSenderImpl::new(
            Some("re_test".into()),
            Some("smtp://localhost:1025".into()),
            from(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert!(matches!(sender, EmailSenderImpl::Resend(_)));
    }

    #[test]
    fn smtp_message_carries_reply_to() {
        let message = smtp_sender()
            .build_message(&email(Some("jane@example.com")))
            .unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Reply-To: jane@example.com"));
        assert!(raw.contains("To: owner@example.com"));
    }

    #[test]
    fn smtp_message_without_reply_to() {
        let message = smtp_sender().build_message(&email(None)).unwrap();

        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(!raw.contains("Reply-To"));
    }

    #[test]
    fn smtp_sender_accepts_punctuated_company_name() {
        let config = Config {
            company_name: "Oldweiler, Inc.".into(),
            ..test_config()
        };

        let sender = EmailSenderImpl::new(
            None,
            Some("smtp://localhost:1025".into()),
            config.sender().unwrap(),
            Duration::from_secs(1),
        )
        .unwrap();

        let EmailSenderImpl::Smtp(smtp) = sender else {
            panic!("expected SMTP sender");
        };
        let message = smtp.build_message(&email(None)).unwrap();
        let raw = String::from_utf8(message.formatted()).unwrap();
        assert!(raw.contains("Oldweiler, Inc."));
        assert!(raw.contains("<info@example.com>"));
    }

    #[test]
    fn smtp_rejects_malformed_recipient() {
        let mut bad = email(None);
        bad.to = "not an address".into();

        assert!(smtp_sender().build_message(&bad).is_err());
    }
}
