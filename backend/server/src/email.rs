//! # Email Delivery
//!
//! Hands accepted contact messages to a transactional email provider.
//!
//! ## Provider
//! Resend, plain HTTP API.
//! - `POST /emails` with a bearer key
//! - Success body: `{ "id": "..." }`
//! - Failure body: `{ "statusCode": 422, "name": "validation_error", "message": "..." }`
//!
//! ## Notes
//! - One request per accepted submission, no retries
//! - Client carries an explicit timeout, expiry is a delivery error
//! - The route sits behind the [`Mailer`] trait so tests can count deliveries
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub from: String,
    pub reply_to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub id: String,
}

#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("email provider timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("{0}")]
    Transport(reqwest::Error),
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, DeliveryError>;
}

pub struct ResendMailer {
    client: Client,
    api_url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct ResendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ResendErrorBody {
    message: String,
}

impl ResendMailer {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            timeout,
        })
    }

    fn transport_error(&self, e: reqwest::Error) -> DeliveryError {
        if e.is_timeout() {
            DeliveryError::Timeout(self.timeout)
        } else {
            DeliveryError::Transport(e)
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<Delivery, DeliveryError> {
        let request = ResendRequest {
            from: &email.from,
            to: [&email.to],
            reply_to: &email.reply_to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let res = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.map_err(|e| self.transport_error(e))?;
            let message = serde_json::from_str::<ResendErrorBody>(&body)
                .map(|error| error.message)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("unknown error").to_string());

            return Err(DeliveryError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let response: ResendResponse = res.json().await.map_err(|e| self.transport_error(e))?;

        Ok(Delivery { id: response.id })
    }
}
