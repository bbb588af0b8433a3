use crate::notification::Notifier;
use crate::status::StoreStatus;
use medchat_core::case::{Case, CaseApi, CaseDraft};
use medchat_core::{MedChatError, Result};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Default)]
pub struct CaseState {
    pub cases: HashMap<String, Case>,
    /// Case ids per patient, in backend order.
    pub case_ids_by_patient: HashMap<String, Vec<String>>,
    pub status: StoreStatus,
}

impl CaseState {
    fn insert(&mut self, case: Case) {
        if let Some(previous) = self.cases.get(&case.id) {
            if previous.patient_id != case.patient_id {
                let (old_patient, id) = (previous.patient_id.clone(), case.id.clone());
                self.unindex(&old_patient, &id);
            }
        }
        let mut ids = self
            .case_ids_by_patient
            .get(&case.patient_id)
            .cloned()
            .unwrap_or_default();
        if !ids.contains(&case.id) {
            ids.push(case.id.clone());
        }
        self.case_ids_by_patient.insert(case.patient_id.clone(), ids);
        self.cases.insert(case.id.clone(), case);
    }

    fn unindex(&mut self, patient_id: &str, case_id: &str) {
        if let Some(ids) = self.case_ids_by_patient.get(patient_id) {
            let remaining = ids.iter().filter(|id| *id != case_id).cloned().collect();
            self.case_ids_by_patient
                .insert(patient_id.to_string(), remaining);
        }
    }
}

/// Case cache keyed by id, with a per-patient index.
pub struct CaseStore {
    api: Arc<dyn CaseApi>,
    notifier: Notifier,
    state: RwLock<CaseState>,
}

impl CaseStore {
    pub fn new(api: Arc<dyn CaseApi>, notifier: Notifier) -> Self {
        Self {
            api,
            notifier,
            state: RwLock::new(CaseState::default()),
        }
    }

    pub async fn cases_for_patient(&self, patient_id: &str) -> Vec<Case> {
        let state = self.state.read().await;
        state
            .case_ids_by_patient
            .get(patient_id)
            .map(|ids| ids.iter().filter_map(|id| state.cases.get(id).cloned()).collect())
            .unwrap_or_default()
    }

    pub async fn cached(&self, case_id: &str) -> Option<Case> {
        self.state.read().await.cases.get(case_id).cloned()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.status.error.clone()
    }

    pub async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Case>> {
        self.state.write().await.status.begin();
        match self.api.list_for_patient(patient_id).await {
            Ok(cases) => {
                let mut state = self.state.write().await;
                let stale = state
                    .case_ids_by_patient
                    .insert(
                        patient_id.to_string(),
                        cases.iter().map(|c| c.id.clone()).collect(),
                    )
                    .unwrap_or_default();
                for id in stale {
                    state.cases.remove(&id);
                }
                for case in &cases {
                    state.cases.insert(case.id.clone(), case.clone());
                }
                state.status.succeed();
                Ok(cases)
            }
            Err(e) => Err(self.fail("load cases", e).await),
        }
    }

    pub async fn get(&self, case_id: &str) -> Result<Case> {
        self.state.write().await.status.begin();
        match self.api.get(case_id).await {
            Ok(case) => {
                let mut state = self.state.write().await;
                state.insert(case.clone());
                state.status.succeed();
                Ok(case)
            }
            Err(e) => Err(self.fail("load case", e).await),
        }
    }

    pub async fn create(&self, draft: &CaseDraft) -> Result<Case> {
        if let Err(e) = draft.validate() {
            return Err(self.fail("create case", e).await);
        }
        self.state.write().await.status.begin();
        match self.api.create(draft).await {
            Ok(case) => {
                tracing::info!("Created case {} for patient {}", case.id, case.patient_id);
                let mut state = self.state.write().await;
                state.insert(case.clone());
                state.status.succeed();
                Ok(case)
            }
            Err(e) => Err(self.fail("create case", e).await),
        }
    }

    pub async fn update(&self, case_id: &str, draft: &CaseDraft) -> Result<Case> {
        if let Err(e) = draft.validate() {
            return Err(self.fail("update case", e).await);
        }
        self.state.write().await.status.begin();
        match self.api.update(case_id, draft).await {
            Ok(case) => {
                let mut state = self.state.write().await;
                state.insert(case.clone());
                state.status.succeed();
                Ok(case)
            }
            Err(e) => Err(self.fail("update case", e).await),
        }
    }

    pub async fn delete(&self, case_id: &str) -> Result<()> {
        self.state.write().await.status.begin();
        match self.api.delete(case_id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                if let Some(case) = state.cases.remove(case_id) {
                    state.unindex(&case.patient_id, case_id);
                }
                state.status.succeed();
                tracing::info!("Deleted case {}", case_id);
                Ok(())
            }
            Err(e) => Err(self.fail("delete case", e).await),
        }
    }

    async fn fail(&self, action: &str, err: MedChatError) -> MedChatError {
        self.state
            .write()
            .await
            .status
            .fail(&self.notifier, action, err)
    }
}
