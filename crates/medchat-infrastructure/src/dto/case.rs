use super::{id_string, opt_timestamp};
use chrono::{DateTime, Utc};
use medchat_core::case::{Case, CaseDraft, CaseStatus};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct CaseDto {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(deserialize_with = "id_string")]
    pub patient_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<CaseStatus>,
    #[serde(default)]
    pub diagnosis: Option<String>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CaseDto> for Case {
    fn from(dto: CaseDto) -> Self {
        Case {
            id: dto.id,
            patient_id: dto.patient_id,
            title: dto.title,
            description: dto.description,
            status: dto.status.unwrap_or_default(),
            diagnosis: dto.diagnosis,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Query-string payload for create and update.
#[derive(Debug, Clone, Serialize)]
pub struct CaseQuery<'a> {
    pub patient_id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<&'a str>,
}

impl<'a> From<&'a CaseDraft> for CaseQuery<'a> {
    fn from(d: &'a CaseDraft) -> Self {
        CaseQuery {
            patient_id: &d.patient_id,
            title: d.title.trim(),
            description: d.description.as_deref(),
            status: d.status,
            diagnosis: d.diagnosis.as_deref(),
        }
    }
}

/// Filter for listing a patient's cases.
#[derive(Debug, Clone, Serialize)]
pub struct CaseFilter<'a> {
    pub patient_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_dto_defaults_status() {
        let dto: CaseDto =
            serde_json::from_str(r#"{"id":"c1","patient_id":5,"title":"Chest pain"}"#).unwrap();
        let case = Case::from(dto);
        assert_eq!(case.patient_id, "5");
        assert_eq!(case.status, CaseStatus::Open);

        let json = serde_json::to_value(&case).unwrap();
        assert_eq!(json["patientId"], "5");
        assert_eq!(json["status"], "open");
    }

    #[test]
    fn test_case_query_fields() {
        let draft = CaseDraft {
            patient_id: "p1".into(),
            title: "Dyspnea ".into(),
            status: Some(CaseStatus::InProgress),
            ..Default::default()
        };
        let json = serde_json::to_value(CaseQuery::from(&draft)).unwrap();
        assert_eq!(json["patient_id"], "p1");
        assert_eq!(json["title"], "Dyspnea");
        assert_eq!(json["status"], "in_progress");
        assert!(json.get("diagnosis").is_none());
    }
}
