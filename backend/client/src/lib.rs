//! # Contact Client
//!
//! Submission side of the contact dialog.
//!
//! ## Flow
//! - [`ClientGate`] is built when the dialog opens and keeps that render time
//! - On submit, the gate judges the attempt locally
//! - Rejected: wait out a fake network delay, then report the normal success notice
//! - Accepted: post the fields plus honeypot metadata, with an explicit timeout
//! - Server errors come back as [`SubmitError`], the user may resubmit by hand
//!
//! Nothing is retried automatically.
use std::time::Duration;

use honeypot::{ClientGate, HONEYPOT_FIELD, HoneypotFields};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_FAKE_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn visible_fields(&self) -> [(&str, &str); 3] {
        [
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("message", self.message.as_str()),
        ]
    }
}

#[derive(Serialize)]
struct ContactSubmission<'a> {
    name: &'a str,
    email: &'a str,
    message: &'a str,

    #[serde(flatten)]
    honeypot: HoneypotFields,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Toast shown to the person at the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn sent() -> Self {
        Self {
            title: "Message sent!".to_string(),
            description: "Thank you for your message! I'll get back to you soon.".to_string(),
        }
    }

    pub fn failed(error: &SubmitError) -> Self {
        Self {
            title: "Failed to send message".to_string(),
            description: error.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Sorry, there was an error. Please try again. ({0})")]
    Transport(reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub timeout: Duration,
    pub fake_latency: Duration,
}

impl ClientOptions {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            timeout: DEFAULT_TIMEOUT,
            fake_latency: DEFAULT_FAKE_LATENCY,
        }
    }
}

pub struct ContactClient {
    http: Client,
    options: ClientOptions,
}

impl ContactClient {
    pub fn new(options: ClientOptions) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(options.timeout).build()?;

        Ok(Self { http, options })
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// `decoys` is whatever the hidden inputs and tracked decoy state hold right now.
    pub async fn submit(
        &self,
        gate: &ClientGate,
        form: &ContactForm,
        decoys: &[(&str, &str)],
    ) -> Result<Notice, SubmitError> {
        let attempt = gate.attempt(form.visible_fields(), decoys.iter().copied());

        if let Some(reason) = gate.evaluate(&attempt).reason() {
            debug!(%reason, "Honeypot triggered, faking success");
            tokio::time::sleep(self.options.fake_latency).await;

            return Ok(Notice::sent());
        }

        let tracked = decoys
            .iter()
            .find(|(name, _)| *name == HONEYPOT_FIELD)
            .map(|(_, value)| *value)
            .unwrap_or_default();

        let submission = ContactSubmission {
            name: &form.name,
            email: &form.email,
            message: &form.message,
            honeypot: gate.package(tracked),
        };

        info!(endpoint = %self.options.endpoint, "Submitting contact form");

        let res = self
            .http
            .post(&self.options.endpoint)
            .json(&submission)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();

        if !status.is_success() {
            let message = res
                .json::<ErrorBody>()
                .await
                .map(|body| body.error)
                .unwrap_or_else(|_| "Failed to send message".to_string());

            warn!(status = status.as_u16(), %message, "Contact endpoint returned an error");

            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(Notice::sent())
    }

    fn transport_error(&self, e: reqwest::Error) -> SubmitError {
        if e.is_timeout() {
            SubmitError::Timeout(self.options.timeout)
        } else {
            SubmitError::Transport(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{ContactForm, Notice, SubmitError};

    #[test]
    fn test_visible_fields() {
        let form = ContactForm {
            name: "Jane".to_string(),
            email: "jane@x.com".to_string(),
            message: "hi".to_string(),
        };

        assert_eq!(
            form.visible_fields(),
            [("name", "Jane"), ("email", "jane@x.com"), ("message", "hi")]
        );
    }

    #[test]
    fn test_failure_notice_uses_server_message() {
        let error = SubmitError::Rejected {
            status: 400,
            message: "Invalid email format".to_string(),
        };

        let notice = Notice::failed(&error);
        assert_eq!(notice.title, "Failed to send message");
        assert_eq!(notice.description, "Invalid email format");
    }

    #[test]
    fn test_timeout_message() {
        let error = SubmitError::Timeout(Duration::from_secs(10));

        assert_eq!(error.to_string(), "Request timed out after 10000ms");
    }
}
