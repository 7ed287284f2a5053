use std::sync::LazyLock;

use axum::body::Bytes;
use regex::Regex;
use serde_json::{Map, Value};

use crate::error::AppError::{self, InvalidEmail, MissingFields};

static EMAIL_RE: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"));

/// The fields a human actually typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Keeps the raw key/value map so the gate sees decoys of any JSON type.
pub fn get_payload(body: &Bytes) -> Result<Map<String, Value>, AppError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| AppError::InternalError(Box::new(e)))?;

    // anything other than an object carries no fields, the required field check reports it
    match value {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

pub fn get_form(payload: &Map<String, Value>) -> Result<ContactForm, AppError> {
    let field = |key: &str| {
        payload
            .get(key)
            .and_then(Value::as_str)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .ok_or(MissingFields)
    };

    Ok(ContactForm {
        name: field("name")?,
        email: field("email")?,
        message: field("message")?,
    })
}

pub fn check_email(email: &str) -> Result<(), AppError> {
    let re = EMAIL_RE
        .as_ref()
        .map_err(|e| AppError::InternalError(e.to_string().into()))?;

    if re.is_match(email) { Ok(()) } else { Err(InvalidEmail) }
}

#[cfg(test)]
mod tests {
    use axum::body::Bytes;
    use serde_json::{Value, json};

    use super::{check_email, get_form, get_payload};
    use crate::error::AppError;

    fn object(value: Value) -> serde_json::Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_valid_emails() {
        for email in ["jane@x.com", "first.last+tag@sub.example.org", "a@b.c"] {
            assert!(check_email(email).is_ok(), "{email} should pass");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["not-an-email", "jane@x", "@x.com", "jane@.com.", "ja ne@x.com", "jane@@x.com"] {
            assert!(
                matches!(check_email(email), Err(AppError::InvalidEmail)),
                "{email} should fail"
            );
        }
    }

    #[test]
    fn test_form_requires_all_fields() {
        let full = object(json!({ "name": "Jane", "email": "jane@x.com", "message": "hi" }));
        assert_eq!(get_form(&full).unwrap().name, "Jane");

        for missing in ["name", "email", "message"] {
            let mut payload = full.clone();
            payload.remove(missing);
            assert!(matches!(get_form(&payload), Err(AppError::MissingFields)));

            let mut payload = full.clone();
            payload.insert(missing.to_string(), json!(""));
            assert!(matches!(get_form(&payload), Err(AppError::MissingFields)));
        }
    }

    #[test]
    fn test_form_rejects_non_string_fields() {
        let payload = object(json!({ "name": 7, "email": "jane@x.com", "message": "hi" }));

        assert!(matches!(get_form(&payload), Err(AppError::MissingFields)));
    }

    #[test]
    fn test_payload_parse() {
        let body = Bytes::from_static(br#"{"name":"Jane","website":""}"#);
        assert_eq!(get_payload(&body).unwrap()["name"], "Jane");

        let array = Bytes::from_static(b"[1,2]");
        assert!(get_payload(&array).unwrap().is_empty());

        let broken = Bytes::from_static(b"{not json");
        assert!(matches!(get_payload(&broken), Err(AppError::InternalError(_))));
    }
}
