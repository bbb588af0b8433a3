use crate::notification::Notifier;
use crate::status::StoreStatus;
use medchat_core::patient::{Patient, PatientApi, PatientDraft};
use medchat_core::{MedChatError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct PatientState {
    pub patients: HashMap<String, Patient>,
    pub status: StoreStatus,
}

/// Patient cache keyed by id.
pub struct PatientStore {
    api: Arc<dyn PatientApi>,
    notifier: Notifier,
    state: RwLock<PatientState>,
}

impl PatientStore {
    pub fn new(api: Arc<dyn PatientApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: RwLock::new(PatientState::default()),
        }
    }

    /// Cached patients ordered by last name, then first name.
    pub async fn patients(&self) -> Vec<Patient> {
        let mut patients: Vec<Patient> = self.state.read().await.patients.values().cloned().collect();
        patients.sort_by(|a, b| {
            (a.last_name.to_lowercase(), a.first_name.to_lowercase())
                .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
        });
        patients
    }

    pub async fn cached(&self, patient_id: &str) -> Option<Patient> {
        self.state.read().await.patients.get(patient_id).cloned()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.status.error.clone()
    }

    pub async fn list(&self) -> Result<Vec<Patient>> {
        self.state.write().await.status.begin();
        match self.api.list().await {
            Ok(patients) => {
                let mut state = self.state.write().await;
                state.patients = patients.iter().map(|p| (p.id.clone(), p.clone())).collect();
                state.status.succeed();
                Ok(patients)
            }
            Err(e) => Err(self.fail("load patients", e).await),
        }
    }

    pub async fn get(&self, patient_id: &str) -> Result<Patient> {
        self.state.write().await.status.begin();
        match self.api.get(patient_id).await {
            Ok(patient) => {
                self.upsert(patient.clone()).await;
                Ok(patient)
            }
            Err(e) if e.is_not_found() => {
                self.state.write().await.patients.remove(patient_id);
                Err(self.fail("load patient", e).await)
            }
            Err(e) => Err(self.fail("load patient", e).await),
        }
    }

    pub async fn create(&self, draft: &PatientDraft) -> Result<Patient> {
        if let Err(e) = draft.validate() {
            return Err(self.fail("create patient", e).await);
        }
        self.state.write().await.status.begin();
        match self.api.create(draft).await {
            Ok(patient) => {
                tracing::info!("Created patient {}", patient.id);
                self.upsert(patient.clone()).await;
                Ok(patient)
            }
            Err(e) => Err(self.fail("create patient", e).await),
        }
    }

    pub async fn update(&self, patient_id: &str, draft: &PatientDraft) -> Result<Patient> {
        if let Err(e) = draft.validate() {
            return Err(self.fail("update patient", e).await);
        }
        self.state.write().await.status.begin();
        match self.api.update(patient_id, draft).await {
            Ok(patient) => {
                self.upsert(patient.clone()).await;
                Ok(patient)
            }
            Err(e) => Err(self.fail("update patient", e).await),
        }
    }

    pub async fn delete(&self, patient_id: &str) -> Result<()> {
        self.state.write().await.status.begin();
        match self.api.delete(patient_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.patients.remove(patient_id);
                state.status.succeed();
                tracing::info!("Deleted patient {}", patient_id);
                Ok(())
            }
            Err(e) => Err(self.fail("delete patient", e).await),
        }
    }

    async fn upsert(&self, patient: Patient) {
        let mut state = self.state.write().await;
        state.patients.insert(patient.id.clone(), patient);
        state.status.succeed();
    }

    async fn fail(&self, action: &str, err: MedChatError) -> MedChatError {
        self.state
            .write()
            .await
            .status
            .fail(&self.notifier, action, err)
    }
}
