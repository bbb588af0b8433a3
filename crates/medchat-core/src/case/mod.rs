//! Clinical case domain module.

mod model;

pub use model::{Case, CaseDraft, CaseStatus};

use crate::error::Result;
use async_trait::async_trait;

/// Backend operations for cases.
#[async_trait]
pub trait CaseApi: Send + Sync {
    /// Lists the cases of one patient.
    async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Case>>;

    async fn get(&self, case_id: &str) -> Result<Case>;

    async fn create(&self, draft: &CaseDraft) -> Result<Case>;

    async fn update(&self, case_id: &str, draft: &CaseDraft) -> Result<Case>;

    async fn delete(&self, case_id: &str) -> Result<()>;
}
