//! In-memory fakes of the backend contracts used by store tests.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use medchat_core::auth::{AuthApi, AuthTokens, Credentials, Registration, User};
use medchat_core::case::{Case, CaseApi, CaseDraft};
use medchat_core::patient::{Patient, PatientApi, PatientDraft};
use medchat_core::session::{ChatApi, Message, MessageRole, Reaction, SendMessageRequest, Session};
use medchat_core::{MedChatError, Result};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Records calls and optionally fails every one of them.
#[derive(Default)]
pub struct CallLog {
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<MedChatError>>,
}

impl CallLog {
    fn record(&self, call: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(call.into());
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn fail_with(&self, err: MedChatError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn recover(&self) {
        *self.failure.lock().unwrap() = None;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(name))
            .count()
    }

    pub fn total(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// Fixed timestamp backend records are stamped with.
pub fn past() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap()
}

pub fn session(id: &str, patient_id: &str, case_id: &str) -> Session {
    Session {
        id: id.to_string(),
        patient_id: patient_id.to_string(),
        case_id: case_id.to_string(),
        title: None,
        created_at: Some(past()),
        updated_at: Some(past()),
    }
}

pub fn server_message(session_id: &str, id: &str, role: MessageRole, content: &str) -> Message {
    Message {
        id: id.to_string(),
        session_id: session_id.to_string(),
        role,
        content: content.to_string(),
        created_at: Some(Utc::now()),
        attachments: Vec::new(),
        like: None,
        feedback: None,
        stars: None,
        server_message_id: Some(id.to_string()),
    }
}

#[derive(Default)]
pub struct MockChatApi {
    pub log: CallLog,
    next_id: AtomicUsize,
    sessions: Mutex<Vec<Session>>,
    messages: Mutex<HashMap<String, Vec<Message>>>,
    pub last_send: Mutex<Option<SendMessageRequest>>,
    pub last_reaction: Mutex<Option<Option<Reaction>>>,
    pub last_feedback: Mutex<Option<(Option<u8>, Option<String>)>>,
}

impl MockChatApi {
    pub fn seed_sessions(&self, sessions: Vec<Session>) {
        *self.sessions.lock().unwrap() = sessions;
    }

    pub fn seed_messages(&self, session_id: &str, messages: Vec<Message>) {
        self.messages
            .lock()
            .unwrap()
            .insert(session_id.to_string(), messages);
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl ChatApi for MockChatApi {
    async fn list_sessions(&self, patient_id: &str, case_id: &str) -> Result<Vec<Session>> {
        self.log.record(format!("list_sessions:{patient_id}/{case_id}"))?;
        Ok(self
            .sessions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.case_id == case_id)
            .cloned()
            .collect())
    }

    async fn start_session(
        &self,
        patient_id: &str,
        case_id: &str,
        title: Option<&str>,
    ) -> Result<Session> {
        self.log.record(format!("start_session:{patient_id}/{case_id}"))?;
        let mut created = session(&self.next_id("s"), patient_id, case_id);
        created.title = title.map(str::to_string);
        self.sessions.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_messages(&self, session_id: &str) -> Result<Vec<Message>> {
        self.log.record(format!("list_messages:{session_id}"))?;
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn send_message(&self, request: &SendMessageRequest) -> Result<Message> {
        self.log.record(format!("send_message:{}", request.session_id))?;
        *self.last_send.lock().unwrap() = Some(request.clone());
        let id = self.next_id("m");
        let stored = server_message(&request.session_id, &id, MessageRole::User, &request.content)
            .with_attachments(request.attachments.clone());
        self.messages
            .lock()
            .unwrap()
            .entry(request.session_id.clone())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }

    async fn set_reaction(&self, server_message_id: &str, reaction: Option<Reaction>) -> Result<()> {
        self.log.record(format!("set_reaction:{server_message_id}"))?;
        *self.last_reaction.lock().unwrap() = Some(reaction);
        Ok(())
    }

    async fn edit_feedback(
        &self,
        server_message_id: &str,
        stars: Option<u8>,
        feedback: Option<&str>,
    ) -> Result<()> {
        self.log.record(format!("edit_feedback:{server_message_id}"))?;
        *self.last_feedback.lock().unwrap() = Some((stars, feedback.map(str::to_string)));
        Ok(())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.log.record(format!("delete_session:{session_id}"))?;
        self.sessions.lock().unwrap().retain(|s| s.id != session_id);
        Ok(())
    }

    async fn rename_session(&self, session_id: &str, title: &str) -> Result<()> {
        self.log.record(format!("rename_session:{session_id}"))?;
        if let Some(s) = self
            .sessions
            .lock()
            .unwrap()
            .iter_mut()
            .find(|s| s.id == session_id)
        {
            s.title = Some(title.to_string());
        }
        Ok(())
    }
}

pub fn user(email: &str) -> User {
    User {
        id: "u1".to_string(),
        email: email.to_string(),
        full_name: Some("Dr. Test".to_string()),
        role: None,
    }
}

pub fn tokens(access: &str, refresh: Option<&str>) -> AuthTokens {
    AuthTokens {
        access_token: access.to_string(),
        refresh_token: refresh.map(str::to_string),
        token_type: "bearer".to_string(),
    }
}

#[derive(Default)]
pub struct MockAuthApi {
    pub log: CallLog,
    pub me_failure: Mutex<Option<MedChatError>>,
    pub refreshed_without_rotation: std::sync::atomic::AtomicBool,
}

#[async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthTokens> {
        self.log.record(format!("login:{}", credentials.email))?;
        Ok(tokens("access-1", Some("refresh-1")))
    }

    async fn register(&self, registration: &Registration) -> Result<AuthTokens> {
        self.log.record(format!("register:{}", registration.email))?;
        Ok(tokens("access-new", Some("refresh-new")))
    }

    async fn relogin(&self, refresh_token: &str) -> Result<AuthTokens> {
        self.log.record(format!("relogin:{refresh_token}"))?;
        Ok(tokens("access-2", Some("refresh-2")))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<AuthTokens> {
        self.log.record(format!("refresh:{refresh_token}"))?;
        if self.refreshed_without_rotation.load(Ordering::SeqCst) {
            Ok(tokens("access-3", None))
        } else {
            Ok(tokens("access-3", Some("refresh-3")))
        }
    }

    async fn logout(&self) -> Result<()> {
        self.log.record("logout")
    }

    async fn me(&self) -> Result<User> {
        self.log.record("me")?;
        match self.me_failure.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(user("doc@example.com")),
        }
    }
}

#[derive(Default)]
pub struct MockPatientApi {
    pub log: CallLog,
    next_id: AtomicUsize,
    patients: Mutex<Vec<Patient>>,
}

impl MockPatientApi {
    pub fn seed(&self, patients: Vec<Patient>) {
        *self.patients.lock().unwrap() = patients;
    }
}

pub fn patient_from(id: &str, draft: &PatientDraft) -> Patient {
    Patient {
        id: id.to_string(),
        first_name: draft.first_name.trim().to_string(),
        last_name: draft.last_name.trim().to_string(),
        date_of_birth: draft.date_of_birth,
        gender: draft.gender.clone(),
        medical_record_number: draft.medical_record_number.clone(),
        phone: draft.phone.clone(),
        email: draft.email.clone(),
        notes: draft.notes.clone(),
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

pub fn patient_draft(first: &str, last: &str) -> PatientDraft {
    PatientDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl PatientApi for MockPatientApi {
    async fn list(&self) -> Result<Vec<Patient>> {
        self.log.record("list")?;
        Ok(self.patients.lock().unwrap().clone())
    }

    async fn get(&self, patient_id: &str) -> Result<Patient> {
        self.log.record(format!("get:{patient_id}"))?;
        self.patients
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == patient_id)
            .cloned()
            .ok_or_else(|| MedChatError::http(404, "Patient not found"))
    }

    async fn create(&self, draft: &PatientDraft) -> Result<Patient> {
        self.log.record("create")?;
        let id = format!("p{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = patient_from(&id, draft);
        self.patients.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, patient_id: &str, draft: &PatientDraft) -> Result<Patient> {
        self.log.record(format!("update:{patient_id}"))?;
        let updated = patient_from(patient_id, draft);
        let mut patients = self.patients.lock().unwrap();
        patients.retain(|p| p.id != patient_id);
        patients.push(updated.clone());
        Ok(updated)
    }

    async fn delete(&self, patient_id: &str) -> Result<()> {
        self.log.record(format!("delete:{patient_id}"))?;
        self.patients.lock().unwrap().retain(|p| p.id != patient_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockCaseApi {
    pub log: CallLog,
    next_id: AtomicUsize,
    cases: Mutex<Vec<Case>>,
}

impl MockCaseApi {
    pub fn seed(&self, cases: Vec<Case>) {
        *self.cases.lock().unwrap() = cases;
    }
}

pub fn case_from(id: &str, draft: &CaseDraft) -> Case {
    Case {
        id: id.to_string(),
        patient_id: draft.patient_id.clone(),
        title: draft.title.trim().to_string(),
        description: draft.description.clone(),
        status: draft.status.unwrap_or_default(),
        diagnosis: draft.diagnosis.clone(),
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

pub fn case_draft(patient_id: &str, title: &str) -> CaseDraft {
    CaseDraft {
        patient_id: patient_id.to_string(),
        title: title.to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl CaseApi for MockCaseApi {
    async fn list_for_patient(&self, patient_id: &str) -> Result<Vec<Case>> {
        self.log.record(format!("list_for_patient:{patient_id}"))?;
        Ok(self
            .cases
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn get(&self, case_id: &str) -> Result<Case> {
        self.log.record(format!("get:{case_id}"))?;
        self.cases
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == case_id)
            .cloned()
            .ok_or_else(|| MedChatError::http(404, "Case not found"))
    }

    async fn create(&self, draft: &CaseDraft) -> Result<Case> {
        self.log.record("create")?;
        let id = format!("c{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        let created = case_from(&id, draft);
        self.cases.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, case_id: &str, draft: &CaseDraft) -> Result<Case> {
        self.log.record(format!("update:{case_id}"))?;
        let updated = case_from(case_id, draft);
        let mut cases = self.cases.lock().unwrap();
        cases.retain(|c| c.id != case_id);
        cases.push(updated.clone());
        Ok(updated)
    }

    async fn delete(&self, case_id: &str) -> Result<()> {
        self.log.record(format!("delete:{case_id}"))?;
        self.cases.lock().unwrap().retain(|c| c.id != case_id);
        Ok(())
    }
}
