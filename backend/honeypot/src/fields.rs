//! # Decoy Fields
//!
//! Names shared by the rendering layer, the client gate, and the endpoint. Naive bots key
//! off these names, so they must stay stable.
//!
//! ## Rendered Decoys
//! - `website`: "Company Website (optional)"
//! - `_honeypot`: "Confirm Email (optional)"
//!
//! ## Payload Metadata
//! - `_honeypot_timestamp`: client render time, epoch millis as a decimal string
//! - `_honeypot_field`: decoy value tracked in client component state
use serde::{Deserialize, Serialize};

pub const HONEYPOT_TIMESTAMP: &str = "_honeypot_timestamp";
pub const HONEYPOT_FIELD: &str = "_honeypot_field";

/// Every payload key the endpoint treats as a decoy.
pub const SERVER_DECOY_KEYS: [&str; 3] = ["website", "_honeypot", HONEYPOT_FIELD];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoyField {
    pub name: &'static str,
    pub id: &'static str,
    pub label: &'static str,
}

pub const DECOY_FIELDS: [DecoyField; 2] = [
    DecoyField {
        name: "website",
        id: "company_website",
        label: "Company Website (optional)",
    },
    DecoyField {
        name: "_honeypot",
        id: "confirm_email",
        label: "Confirm Email (optional)",
    },
];

const HIDDEN_STYLE: &str =
    "opacity:0;position:absolute;top:0;left:0;height:0;width:0;z-index:-1";

/// Markup for the decoy inputs. Zero size and off-flow, skipped by keyboard tabbing.
pub fn render_decoy_fields() -> String {
    DECOY_FIELDS
        .iter()
        .map(|field| {
            format!(
                r#"<div style="{HIDDEN_STYLE}" aria-hidden="true"><label for="{id}">{label}</label><input type="text" id="{id}" name="{name}" tabindex="-1" autocomplete="off"></div>"#,
                id = field.id,
                label = field.label,
                name = field.name,
            )
        })
        .collect()
}

/// Spam metadata appended to the outbound contact payload.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HoneypotFields {
    #[serde(rename = "_honeypot_timestamp")]
    pub timestamp: String,

    #[serde(rename = "_honeypot_field")]
    pub field: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoys_never_shadow_visible_fields() {
        for visible in ["name", "email", "message"] {
            assert!(!SERVER_DECOY_KEYS.contains(&visible));
            assert!(DECOY_FIELDS.iter().all(|field| field.name != visible));
        }
    }

    #[test]
    fn test_rendered_decoys_are_server_keys() {
        for field in DECOY_FIELDS {
            assert!(SERVER_DECOY_KEYS.contains(&field.name));
        }
    }

    #[test]
    fn test_render_hides_inputs() {
        let html = render_decoy_fields();

        assert_eq!(html.matches("<input").count(), 2);
        assert_eq!(html.matches(r#"tabindex="-1""#).count(), 2);
        assert_eq!(html.matches(r#"aria-hidden="true""#).count(), 2);
        assert!(html.contains(r#"name="website""#));
        assert!(html.contains(r#"name="_honeypot""#));
        assert!(html.contains("Company Website (optional)"));
    }

    #[test]
    fn test_payload_keys() {
        let fields = HoneypotFields {
            timestamp: "1700000000000".to_string(),
            field: String::new(),
        };

        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json[HONEYPOT_TIMESTAMP], "1700000000000");
        assert_eq!(json[HONEYPOT_FIELD], "");
    }
}
