use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{MedChatError, Result};

/// Lifecycle of a clinical case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Open,
    InProgress,
    Closed,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for CaseStatus {
    type Err = MedChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => Err(MedChatError::validation(format!(
                "Unknown case status '{other}'"
            ))),
        }
    }
}

/// A clinical case belonging to one patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub patient_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: CaseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Fields a user can set when creating or editing a case.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseDraft {
    pub patient_id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<CaseStatus>,
    pub diagnosis: Option<String>,
}

impl CaseDraft {
    pub fn validate(&self) -> Result<()> {
        if self.patient_id.trim().is_empty() {
            return Err(MedChatError::validation("A case must belong to a patient"));
        }
        if self.title.trim().is_empty() {
            return Err(MedChatError::validation("Case title is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [CaseStatus::Open, CaseStatus::InProgress, CaseStatus::Closed] {
            assert_eq!(status.as_str().parse::<CaseStatus>().unwrap(), status);
        }
        assert!("archived".parse::<CaseStatus>().is_err());
    }

    #[test]
    fn test_draft_requires_title_and_patient() {
        let draft = CaseDraft {
            patient_id: "p1".into(),
            title: "Chest pain".into(),
            ..Default::default()
        };
        assert!(draft.validate().is_ok());

        let mut no_title = draft.clone();
        no_title.title = "  ".into();
        assert!(no_title.validate().is_err());

        let mut no_patient = draft;
        no_patient.patient_id.clear();
        assert!(no_patient.validate().is_err());
    }
}
