//! # Client Gate
//!
//! Cheap local rejection before the form ever hits the network.
//!
//! - Render time is captured once at construction and never reset
//! - Any non-empty decoy rejects, whitespace included, since humans never reach those inputs
//! - Submitting before `min_submit_time` rejects when time validation is on
//! - No I/O, the caller decides how to fake the success
use std::{collections::BTreeMap, time::Duration};

use crate::{
    fields::HoneypotFields,
    now_millis,
    verdict::{Rejection, Verdict},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateConfig {
    pub min_submit_time: Duration,
    pub enable_time_validation: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_submit_time: Duration::from_millis(3000),
            enable_time_validation: true,
        }
    }
}

/// Form data and timing metadata for one submit action.
///
/// Immutable once built. Both gates read it, neither changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAttempt {
    visible_fields: BTreeMap<String, String>,
    decoy_field_values: BTreeMap<String, String>,
    form_rendered_at: i64,
    submitted_at: i64,
}

impl SubmissionAttempt {
    pub fn new<V, D, K1, V1, K2, V2>(
        visible_fields: V,
        decoy_field_values: D,
        form_rendered_at: i64,
        submitted_at: i64,
    ) -> Self
    where
        V: IntoIterator<Item = (K1, V1)>,
        D: IntoIterator<Item = (K2, V2)>,
        K1: Into<String>,
        V1: Into<String>,
        K2: Into<String>,
        V2: Into<String>,
    {
        Self {
            visible_fields: collect(visible_fields),
            decoy_field_values: collect(decoy_field_values),
            form_rendered_at,
            submitted_at,
        }
    }

    pub fn visible_fields(&self) -> &BTreeMap<String, String> {
        &self.visible_fields
    }

    pub fn visible(&self, name: &str) -> Option<&str> {
        self.visible_fields.get(name).map(String::as_str)
    }

    pub fn decoy_field_values(&self) -> &BTreeMap<String, String> {
        &self.decoy_field_values
    }

    pub fn form_rendered_at(&self) -> i64 {
        self.form_rendered_at
    }

    pub fn submitted_at(&self) -> i64 {
        self.submitted_at
    }

    pub fn elapsed_ms(&self) -> i64 {
        self.submitted_at.saturating_sub(self.form_rendered_at)
    }

    /// First decoy holding anything at all.
    pub fn filled_decoy(&self) -> Option<&str> {
        self.decoy_field_values
            .iter()
            .find(|(_, value)| !value.is_empty())
            .map(|(name, _)| name.as_str())
    }
}

fn collect<I, K, V>(pairs: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[derive(Debug, Clone)]
pub struct ClientGate {
    config: GateConfig,
    form_rendered_at: i64,
}

impl ClientGate {
    /// Captures the render time now. Build this when the form becomes interactive.
    pub fn new(config: GateConfig) -> Self {
        Self::with_rendered_at(config, now_millis())
    }

    pub fn with_rendered_at(config: GateConfig, form_rendered_at: i64) -> Self {
        Self {
            config,
            form_rendered_at,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    pub fn form_rendered_at(&self) -> i64 {
        self.form_rendered_at
    }

    /// Bundles the current form state, stamped with the current time.
    pub fn attempt<V, D, K1, V1, K2, V2>(&self, visible_fields: V, decoys: D) -> SubmissionAttempt
    where
        V: IntoIterator<Item = (K1, V1)>,
        D: IntoIterator<Item = (K2, V2)>,
        K1: Into<String>,
        V1: Into<String>,
        K2: Into<String>,
        V2: Into<String>,
    {
        self.attempt_at(visible_fields, decoys, now_millis())
    }

    pub fn attempt_at<V, D, K1, V1, K2, V2>(
        &self,
        visible_fields: V,
        decoys: D,
        submitted_at: i64,
    ) -> SubmissionAttempt
    where
        V: IntoIterator<Item = (K1, V1)>,
        D: IntoIterator<Item = (K2, V2)>,
        K1: Into<String>,
        V1: Into<String>,
        K2: Into<String>,
        V2: Into<String>,
    {
        SubmissionAttempt::new(visible_fields, decoys, self.form_rendered_at, submitted_at)
    }

    pub fn evaluate(&self, attempt: &SubmissionAttempt) -> Verdict {
        if let Some(field) = attempt.filled_decoy() {
            return Rejection::DecoyFilled {
                field: field.to_string(),
            }
            .into();
        }

        if self.config.enable_time_validation {
            let elapsed_ms = attempt.elapsed_ms();
            let min_ms = i64::try_from(self.config.min_submit_time.as_millis()).unwrap_or(i64::MAX);

            if elapsed_ms < min_ms {
                return Rejection::TooQuick { elapsed_ms }.into();
            }
        }

        Verdict::Accepted
    }

    /// Metadata the endpoint needs to re-derive the verdict on its own.
    pub fn package(&self, decoy_value: &str) -> HoneypotFields {
        HoneypotFields {
            timestamp: self.form_rendered_at.to_string(),
            field: decoy_value.to_string(),
        }
    }
}
