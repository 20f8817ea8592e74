use std::time::Duration;

use anyhow::{Context, Result, bail};
use lettre::message::Mailbox;
use serde::{Deserialize, Serialize};

/// Longest accepted rate limit window: one year.
pub const MAX_RATE_LIMIT_WINDOW_SECS: u64 = 365 * 24 * 60 * 60;

/// Server configuration, read from the environment (and `.env` when present).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
    /// SMTP URL for development email (e.g., smtp://localhost:1025)
    #[serde(default)]
    pub smtp_url: Option<String>,
    /// Resend API key for production email
    #[serde(default)]
    pub resend_api_key: Option<String>,
    /// Address outbound email is sent from.
    pub mail_from: String,
    /// Operator mailbox that receives contact form notifications.
    pub contact_recipient: String,
    /// Display name used in email senders, templates and the greeting.
    #[serde(default = "default_company_name")]
    pub company_name: String,
    #[serde(default = "default_rate_limit_requests")]
    pub rate_limit_requests: u32,
    /// Sliding window length in seconds.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window: u64,
    #[serde(default = "default_email_timeout_secs")]
    pub email_timeout_secs: u64,
    /// Comma-separated list of origins allowed by CORS.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: String,
    /// Set to "production" for JSON logging and opaque error bodies.
    #[serde(default)]
    pub env: String,
    /// Sentry DSN for error tracking
    #[serde(default)]
    pub sentry_dsn: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8000
}

fn default_company_name() -> String {
    "Our Team".into()
}

fn default_rate_limit_requests() -> u32 {
    10
}

fn default_rate_limit_window() -> u64 {
    3600
}

fn default_email_timeout_secs() -> u64 {
    10
}

fn default_cors_origins() -> String {
    "http://localhost:3000".into()
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.env == "production"
    }

    /// Reject settings that would make the server misbehave rather than fail fast.
    pub fn validate(&self) -> Result<()> {
        if self.rate_limit_requests == 0 {
            bail!("RATE_LIMIT_REQUESTS must be a positive integer");
        }
        if self.rate_limit_window == 0 {
            bail!("RATE_LIMIT_WINDOW must be a positive integer");
        }
        if self.rate_limit_window > MAX_RATE_LIMIT_WINDOW_SECS {
            bail!("RATE_LIMIT_WINDOW must be at most {MAX_RATE_LIMIT_WINDOW_SECS} seconds");
        }
        if self.email_timeout_secs == 0 {
            bail!("EMAIL_TIMEOUT_SECS must be a positive integer");
        }
        if self.mail_from.parse::<lettre::Address>().is_err() {
            bail!("MAIL_FROM is not a valid email address");
        }
        if self.contact_recipient.parse::<lettre::Address>().is_err() {
            bail!("CONTACT_RECIPIENT is not a valid email address");
        }
        Ok(())
    }

    /// Sender mailbox with the company as display name, quoted when needed.
    pub fn sender(&self) -> Result<Mailbox> {
        let address = self
            .mail_from
            .parse()
            .context("MAIL_FROM is not a valid email address")?;

        Ok(Mailbox::new(Some(self.company_name.clone()), address))
    }

    pub fn email_timeout(&self) -> Duration {
        Duration::from_secs(self.email_timeout_secs)
    }

    pub fn cors_origins(&self) -> Vec<&str> {
        self.cors_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}
