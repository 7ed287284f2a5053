use std::sync::Arc;

use honeypot::ServerGate;
use tracing::warn;

use super::{
    config::Config,
    email::{Mailer, ResendMailer},
};

/// Read-only after startup. Requests share nothing mutable.
pub struct State {
    pub config: Config,
    pub gate: ServerGate,
    pub mailer: Option<Arc<dyn Mailer>>,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, reqwest::Error> {
        let mailer: Option<Arc<dyn Mailer>> = match config.resend_api_key.as_deref() {
            Some(api_key) => Some(Arc::new(ResendMailer::new(
                &config.resend_api_url,
                api_key,
                config.email_timeout,
            )?)),
            None => {
                warn!("RESEND_API_KEY not configured, contact submissions will fail");
                None
            }
        };

        if config.contact_email.is_none() {
            warn!("CONTACT_EMAIL not configured, contact submissions will fail");
        }

        Ok(Self::with_mailer(config, mailer))
    }

    pub fn with_mailer(config: Config, mailer: Option<Arc<dyn Mailer>>) -> Arc<Self> {
        let gate = ServerGate {
            require_timestamp: config.require_timestamp,
        };

        Arc::new(Self {
            config,
            gate,
            mailer,
        })
    }
}
