//! REST implementation of [`PatientApi`].
//!
//! Create and update send their fields as a snake_case query string.

use crate::dto::patient::{PatientDto, PatientQuery};
use crate::endpoints;
use crate::http_client::HttpClient;
use async_trait::async_trait;
use medchat_core::error::Result;
use medchat_core::patient::{Patient, PatientApi, PatientDraft};

#[derive(Clone)]
pub struct RestPatientApi {
    http: HttpClient,
}

impl RestPatientApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }
}

#[async_trait]
impl PatientApi for RestPatientApi {
    async fn list(&self) -> Result<Vec<Patient>> {
        let dtos: Vec<PatientDto> = self.http.get(endpoints::PATIENTS).await?;
        Ok(dtos.into_iter().map(Patient::from).collect())
    }

    async fn get(&self, patient_id: &str) -> Result<Patient> {
        let dto: PatientDto = self.http.get(&endpoints::patient(patient_id)).await?;
        Ok(dto.into())
    }

    async fn create(&self, draft: &PatientDraft) -> Result<Patient> {
        let dto: PatientDto = self
            .http
            .post_query(endpoints::PATIENTS, &PatientQuery::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn update(&self, patient_id: &str, draft: &PatientDraft) -> Result<Patient> {
        let dto: PatientDto = self
            .http
            .put_query(&endpoints::patient(patient_id), &PatientQuery::from(draft))
            .await?;
        Ok(dto.into())
    }

    async fn delete(&self, patient_id: &str) -> Result<()> {
        self.http.delete(&endpoints::patient(patient_id)).await
    }
}
