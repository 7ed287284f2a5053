use std::{env, fmt::Display, fs::read_to_string, str::FromStr, time::Duration};

use tracing::{info, warn};

use crate::error::ConfigError;

pub const DEFAULT_FROM: &str = "Portfolio Contact <onboarding@resend.dev>";
pub const DEFAULT_RESEND_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub resend_api_key: Option<String>,
    pub contact_email: Option<String>,
    pub contact_from: String,
    pub resend_api_url: String,
    pub email_timeout: Duration,
    pub require_timestamp: bool,
    pub allowed_origin: Option<String>,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 1111,
            resend_api_key: None,
            contact_email: None,
            contact_from: DEFAULT_FROM.to_string(),
            resend_api_url: DEFAULT_RESEND_URL.to_string(),
            email_timeout: Duration::from_millis(10_000),
            require_timestamp: false,
            allowed_origin: None,
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Config {
    /// Missing email secrets are not fatal here. The contact route reports them per request.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RUST_PORT", "1111")?,
            resend_api_key: read_secret("RESEND_API_KEY"),
            contact_email: read_secret("CONTACT_EMAIL"),
            contact_from: try_load("CONTACT_FROM", DEFAULT_FROM)?,
            resend_api_url: try_load("RESEND_API_URL", DEFAULT_RESEND_URL)?,
            email_timeout: Duration::from_millis(try_load("EMAIL_TIMEOUT_MS", "10000")?),
            require_timestamp: try_load("HONEYPOT_REQUIRE_TIMESTAMP", "false")?,
            allowed_origin: var("ALLOWED_ORIGIN").ok(),
            max_body_bytes: try_load("MAX_BODY_BYTES", "65536")?,
        })
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        info!("Environment variable {key} not found");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    parse_or(key, var(key).ok(), default)
}

fn parse_or<T: FromStr>(key: &str, raw: Option<String>, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
    .trim()
    .parse()
    .map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");

        ConfigError::Invalid {
            key: key.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Env var first, then the docker secret mount.
fn read_secret(secret_name: &str) -> Option<String> {
    if let Ok(value) = env::var(secret_name) {
        return non_empty(value);
    }

    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map_err(|e| {
            warn!("Failed to read {secret_name} from env or file: {e}");
        })
        .ok()
        .and_then(non_empty)
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, non_empty, parse_or};

    #[test]
    fn test_default_used_when_unset() {
        let port: u16 = parse_or("RUST_PORT", None, "1111").unwrap();
        assert_eq!(port, 1111);
    }

    #[test]
    fn test_value_trimmed() {
        let port: u16 = parse_or("RUST_PORT", Some(" 8080\n".to_string()), "1111").unwrap();
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_invalid_value() {
        let result: Result<bool, ConfigError> =
            parse_or("HONEYPOT_REQUIRE_TIMESTAMP", Some("sometimes".to_string()), "false");

        match result {
            Err(ConfigError::Invalid { key, .. }) => assert_eq!(key, "HONEYPOT_REQUIRE_TIMESTAMP"),
            other => panic!("expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn test_blank_secret_is_missing() {
        assert_eq!(non_empty("  \n".to_string()), None);
        assert_eq!(non_empty(" key \n".to_string()), Some("key".to_string()));
    }
}
