use std::sync::Arc;

use axum::{Json, body::Bytes, extract};
use honeypot::now_millis;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::{
    email::OutgoingEmail,
    error::AppError,
    state::State,
    template::{render_html, render_text, subject},
    utils::{check_email, get_form, get_payload},
};

/// Same body for delivered and silently dropped submissions.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Success {
    pub success: bool,
}

const SUCCESS: Success = Success { success: true };

pub async fn contact_handler(
    extract::State(state): extract::State<Arc<State>>,
    body: Bytes,
) -> Result<Json<Success>, AppError> {
    let payload = get_payload(&body).inspect_err(|e| error!("Contact form error: {e}"))?;

    info!(
        name = payload.get("name").and_then(|v| v.as_str()).unwrap_or_default(),
        has_email = payload.contains_key("email"),
        "Contact form submission received"
    );

    let verdict = state.gate.validate(&payload, now_millis());
    if let Some(reason) = verdict.reason() {
        info!(%reason, "Server honeypot triggered");

        return Ok(Json(SUCCESS));
    }

    let form = get_form(&payload).inspect_err(|_| {
        warn!(
            name = payload.contains_key("name"),
            email = payload.contains_key("email"),
            message = payload.contains_key("message"),
            "Missing required fields"
        );
    })?;

    check_email(&form.email).inspect_err(|_| warn!(email = %form.email, "Invalid email format"))?;

    let Some(mailer) = state.mailer.as_ref() else {
        error!("RESEND_API_KEY not configured");
        return Err(AppError::EmailServiceNotConfigured);
    };

    let Some(recipient) = state.config.contact_email.as_ref() else {
        error!("CONTACT_EMAIL not configured");
        return Err(AppError::RecipientNotConfigured);
    };

    let email = OutgoingEmail {
        to: recipient.clone(),
        from: state.config.contact_from.clone(),
        reply_to: form.email.clone(),
        subject: subject(&form.name),
        html: render_html(&form),
        text: render_text(&form),
    };

    info!("Sending contact email");
    let delivery = mailer.send(&email).await.map_err(|e| {
        error!("Email provider error: {e}");
        AppError::Delivery(e)
    })?;

    info!(id = %delivery.id, "Email sent successfully");

    Ok(Json(SUCCESS))
}
