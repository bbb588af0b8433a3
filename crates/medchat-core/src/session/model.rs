//! Chat session domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A consultation chat thread attached to exactly one case.
///
/// Sessions are created by the backend (`start_session`) and cached per case
/// on the client. The `updated_at` timestamp is bumped locally whenever a
/// message is appended or the title is changed so that the cached list can be
/// sorted by recency without a round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Backend session identifier
    pub id: String,
    /// Owning patient
    pub patient_id: String,
    /// Owning case
    pub case_id: String,
    /// Optional human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Session {
    /// Title to display, falling back to a generic label for untitled sessions.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("New consultation")
    }

    /// Marks the session as modified now.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}
