use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::email::DeliveryError;

/// Everything the contact route can report back. Spam rejections never land here.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Email service not configured")]
    EmailServiceNotConfigured,

    #[error("Recipient email not configured")]
    RecipientNotConfigured,

    #[error("Failed to send email: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Payload too large")]
    PayloadTooLarge,

    #[error("Internal server error: {0}")]
    InternalError(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingFields | AppError::InvalidEmail => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::EmailServiceNotConfigured
            | AppError::RecipientNotConfigured
            | AppError::Delivery { .. }
            | AppError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value: {reason}")]
    Invalid { key: String, reason: String },
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AppError;
    use crate::email::DeliveryError;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::MissingFields, StatusCode::BAD_REQUEST),
            (AppError::InvalidEmail, StatusCode::BAD_REQUEST),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (AppError::EmailServiceNotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (AppError::RecipientNotConfigured, StatusCode::INTERNAL_SERVER_ERROR),
            (
                AppError::Delivery(DeliveryError::Provider {
                    status: 422,
                    message: "bad from".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::InternalError("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_messages() {
        let delivery = AppError::Delivery(DeliveryError::Provider {
            status: 403,
            message: "domain not verified".to_string(),
        });
        assert_eq!(delivery.to_string(), "Failed to send email: domain not verified");

        let internal = AppError::InternalError("expected value at line 1".into());
        assert_eq!(
            internal.to_string(),
            "Internal server error: expected value at line 1"
        );
    }
}
