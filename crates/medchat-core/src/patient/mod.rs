//! Patient domain module.

mod model;

pub use model::{Patient, PatientDraft};

use crate::error::Result;
use async_trait::async_trait;

/// Backend operations for patients.
#[async_trait]
pub trait PatientApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Patient>>;

    async fn get(&self, patient_id: &str) -> Result<Patient>;

    async fn create(&self, draft: &PatientDraft) -> Result<Patient>;

    async fn update(&self, patient_id: &str, draft: &PatientDraft) -> Result<Patient>;

    async fn delete(&self, patient_id: &str) -> Result<()>;
}
