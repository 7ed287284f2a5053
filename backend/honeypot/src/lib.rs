//! # Honeypot
//!
//! Spam gating for the portfolio contact form.
//!
//!
//!
//! ## Flow
//! - Form mounts, the client captures `form_rendered_at` once and keeps it by value
//! - Decoy inputs render next to the visible ones, hidden from humans but not from scripts
//! - On submit, the [`ClientGate`] checks decoys and elapsed time before any network call
//! - If rejected, the client fakes a success toast after a short delay and stops
//! - If accepted, the payload carries the visible fields plus [`HoneypotFields`]
//! - The endpoint re-runs the same checks with [`ServerGate`], never trusting the client verdict
//! - If rejected there, the endpoint still answers `200 {"success":true}`
//!
//!
//!
//! ## Why Two Gates
//! The client check only saves a round trip for obvious bots. A scripted sender can skip
//! the client entirely, so the server check is the real boundary. Both stay.
//!
//!
//!
//! ## Timing
//! - Client: `submitted_at - form_rendered_at < min_submit_time` (default 3s) rejects
//! - Server: same start point, the client's render timestamp, measured against receipt time
//! - Server also rejects sessions older than 1 hour
//! - Server skips timing when no timestamp is sent, unless strict mode is on
//!
//! The client timestamp is trusted for spam heuristics only, never for authorization.

use chrono::Utc;

pub mod client;
pub mod fields;
pub mod server;
pub mod verdict;

pub use client::{ClientGate, GateConfig, SubmissionAttempt};
pub use fields::{
    DECOY_FIELDS, DecoyField, HONEYPOT_FIELD, HONEYPOT_TIMESTAMP, HoneypotFields,
    SERVER_DECOY_KEYS, render_decoy_fields,
};
pub use server::{MAX_SESSION_MS, MIN_ELAPSED_MS, ServerGate, validate};
pub use verdict::{Rejection, Verdict};

/// Wall clock in epoch milliseconds, the unit every timestamp in this crate uses.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
