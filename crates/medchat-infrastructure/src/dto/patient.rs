use super::{id_string, opt_timestamp};
use chrono::{DateTime, NaiveDate, Utc};
use medchat_core::patient::{Patient, PatientDraft};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct PatientDto {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub medical_record_number: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "opt_timestamp")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PatientDto> for Patient {
    fn from(dto: PatientDto) -> Self {
        Patient {
            id: dto.id,
            first_name: dto.first_name,
            last_name: dto.last_name,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            medical_record_number: dto.medical_record_number,
            phone: dto.phone,
            email: dto.email,
            notes: dto.notes,
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

/// Query-string payload for create and update.
#[derive(Debug, Clone, Serialize)]
pub struct PatientQuery<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medical_record_number: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<&'a str>,
}

impl<'a> From<&'a PatientDraft> for PatientQuery<'a> {
    fn from(d: &'a PatientDraft) -> Self {
        PatientQuery {
            first_name: d.first_name.trim(),
            last_name: d.last_name.trim(),
            date_of_birth: d.date_of_birth,
            gender: d.gender.as_deref(),
            medical_record_number: d.medical_record_number.as_deref(),
            phone: d.phone.as_deref(),
            email: d.email.as_deref(),
            notes: d.notes.as_deref(),
        }
    }
}
