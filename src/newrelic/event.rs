//! Typed New Relic webhook events and their decoding.
//!
//! Payloads are trusted only as far as their shape: every textual field may be
//! missing or `null`, in which case it's treated as empty. `created_at` must be
//! an RFC 3339 timestamp if it's present at all.

use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use serde_with::{serde_as, DefaultOnNull};
use std::fmt;

/// The form field names New Relic may send, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Alert,
    Deployment,
}

impl EventKind {
    pub fn field(&self) -> &'static str {
        match self {
            EventKind::Alert => "alert",
            EventKind::Deployment => "deployment",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum InboundEvent {
    Alert(Alert),
    Deployment(Deployment),
}

// Decoded in full even though not every field is rendered.
#[allow(dead_code)]
#[serde_as]
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Alert {
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub application_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub account_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub severity: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub message: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub short_description: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub long_description: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "alert_url")]
    pub url: String,
}

#[allow(dead_code)]
#[serde_as]
#[derive(Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Deployment {
    pub created_at: Option<DateTime<FixedOffset>>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub application_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub account_name: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub changelog: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub revision: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(rename = "deployment_url")]
    pub url: String,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub deployed_by: String,
}

/// The payload wasn't valid JSON of the expected shape.
#[derive(Debug)]
pub struct DecodeError(serde_json::Error);

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to deserialize payload: {}", self.0)
    }
}

/// Pick the payload out of a decoded form. `alert` takes precedence over
/// `deployment`, and only the first value of a repeated field is used.
pub fn select_payload(form: &[(String, String)]) -> Option<(EventKind, &str)> {
    [EventKind::Alert, EventKind::Deployment]
        .into_iter()
        .find_map(|kind| {
            form.iter()
                .find(|(k, _)| k == kind.field())
                .map(|(_, v)| (kind, v.as_str()))
        })
}

/// Decode the raw JSON text of a form field into the event its field name
/// implies.
pub fn decode(kind: EventKind, raw: &str) -> Result<InboundEvent, DecodeError> {
    match kind {
        EventKind::Alert => serde_json::from_str(raw).map(InboundEvent::Alert),
        EventKind::Deployment => serde_json::from_str(raw).map(InboundEvent::Deployment),
    }
    .map_err(DecodeError)
}
