//! # Server Gate
//!
//! Authoritative check at the endpoint. Re-derives the verdict from raw payload contents,
//! so a fabricated client verdict buys nothing.
//!
//! ## Rules
//! - Any recognized decoy key that is filled rejects, regardless of timing
//! - A positive `_honeypot_timestamp` enables the timing checks against receipt time
//! - Under 3s rejects as too quick, over 1 hour rejects as expired
//! - No usable timestamp skips timing, unless `require_timestamp` is set
use serde_json::{Map, Value};

use crate::{
    fields::{HONEYPOT_TIMESTAMP, SERVER_DECOY_KEYS},
    verdict::{Rejection, Verdict},
};

pub const MIN_ELAPSED_MS: i64 = 3000;
pub const MAX_SESSION_MS: i64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerGate {
    pub require_timestamp: bool,
}

impl ServerGate {
    pub fn strict() -> Self {
        Self {
            require_timestamp: true,
        }
    }

    /// Pure. Same payload and receipt time always give the same verdict.
    pub fn validate(&self, payload: &Map<String, Value>, server_receipt_ms: i64) -> Verdict {
        if let Some(field) = SERVER_DECOY_KEYS
            .iter()
            .find(|key| payload.get(**key).is_some_and(is_filled))
        {
            return Rejection::DecoyFilled {
                field: field.to_string(),
            }
            .into();
        }

        let Some(client_timestamp) = payload.get(HONEYPOT_TIMESTAMP).and_then(parse_timestamp)
        else {
            if self.require_timestamp {
                return Rejection::MissingTimestamp.into();
            }

            return Verdict::Accepted;
        };

        let elapsed_ms = server_receipt_ms.saturating_sub(client_timestamp);

        if elapsed_ms < MIN_ELAPSED_MS {
            return Rejection::TooQuick { elapsed_ms }.into();
        }

        if elapsed_ms > MAX_SESSION_MS {
            return Rejection::SessionExpired { elapsed_ms }.into();
        }

        Verdict::Accepted
    }
}

/// Lenient gate, timing checks skipped when no timestamp is sent.
pub fn validate(payload: &Map<String, Value>, server_receipt_ms: i64) -> Verdict {
    ServerGate::default().validate(payload, server_receipt_ms)
}

/// Scripts fill decoys with whatever type they like, so anything truthy counts.
fn is_filled(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Positive epoch millis, or nothing worth judging.
fn parse_timestamp(value: &Value) -> Option<i64> {
    let timestamp = match value {
        Value::String(text) => leading_integer(text)?,
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|n| n.trunc() as i64))?,
        _ => return None,
    };

    (timestamp > 0).then_some(timestamp)
}

// "1700000000000abc" parses to its digit prefix, same as the browser side does.
// Prefixes too long for i64 saturate, like the number branch.
fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if digits.is_empty() {
        return None;
    }

    let value = if negative {
        format!("-{digits}").parse::<i64>().unwrap_or(i64::MIN)
    } else {
        digits.parse::<i64>().unwrap_or(i64::MAX)
    };

    Some(value)
}
