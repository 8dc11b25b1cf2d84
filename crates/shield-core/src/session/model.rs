//! Session domain model.
//!
//! A session is one candidate safety incident produced by the detection
//! pipeline and stored by the backend. The console only ever changes its
//! `status`, and only locally.

use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of a session.
///
/// Anything the backend sends besides the three known values is kept
/// verbatim in `Other` and treated as non-actionable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum SessionStatus {
    /// Waiting for an operator decision.
    Pending,
    /// Confirmed as a real incident.
    Approved,
    /// Marked as a false alarm.
    Rejected,
    /// Unrecognized value from the backend.
    Other(String),
}

impl SessionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl Default for SessionStatus {
    /// A missing status is not pending.
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for SessionStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw),
        }
    }
}

impl From<SessionStatus> for String {
    fn from(status: SessionStatus) -> Self {
        match status {
            SessionStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity assigned by the detection pipeline.
///
/// Parsing is case-insensitive; unknown or missing values fall back to `Normal`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Severity {
    Critical,
    Warning,
    Informational,
    #[default]
    Normal,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::Warning => "Warning",
            Self::Informational => "Informational",
            Self::Normal => "Normal",
        }
    }
}

impl From<String> for Severity {
    fn from(raw: String) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "warning" => Self::Warning,
            "informational" => Self::Informational,
            _ => Self::Normal,
        }
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.as_str().to_string()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator decision on a pending session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionAction {
    Approve,
    Reject,
}

impl SessionAction {
    /// Path segment used by the action endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    /// Status the session takes once the backend accepts the action.
    pub fn resulting_status(&self) -> SessionStatus {
        match self {
            Self::Approve => SessionStatus::Approved,
            Self::Reject => SessionStatus::Rejected,
        }
    }
}

impl fmt::Display for SessionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate incident as returned by `GET /sessions`.
///
/// Every field tolerates being missing, null or of an unexpected JSON type.
/// Display attributes are opaque strings; nothing here is parsed or validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque primary key, stable across polls
    #[serde(default, deserialize_with = "lenient::string")]
    pub session_id: String,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub status: SessionStatus,
    #[serde(default, deserialize_with = "lenient::parsed")]
    pub severity: Severity,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    /// Backend timestamp, e.g. `2025-01-31 14:02:11`
    #[serde(default, deserialize_with = "lenient::string")]
    pub created_at: String,
    /// Recorded clip of the incident
    #[serde(default, deserialize_with = "lenient::string")]
    pub video_url: String,
    /// Live image/stream of the reporting camera
    #[serde(default, deserialize_with = "lenient::string")]
    pub live_url: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub camera_id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub latitude: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub longitude: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub confidence: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub notify_to: String,
}

impl Session {
    /// Creates a session carrying only an id and a status.
    pub fn new(session_id: impl Into<String>, status: SessionStatus) -> Self {
        Self {
            session_id: session_id.into(),
            status,
            ..Self::default()
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// First eight characters of the id, used as a compact reference.
    pub fn short_id(&self) -> &str {
        match self.session_id.char_indices().nth(8) {
            Some((end, _)) => &self.session_id[..end],
            None => &self.session_id,
        }
    }
}
