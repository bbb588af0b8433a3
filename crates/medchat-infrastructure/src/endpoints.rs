//! Backend endpoint paths.

pub const AUTH_LOGIN: &str = "/auth/login";
pub const AUTH_REGISTER: &str = "/auth/register";
pub const AUTH_RELOGIN: &str = "/auth/relogin";
pub const AUTH_REFRESH: &str = "/auth/refresh";
pub const AUTH_LOGOUT: &str = "/auth/logout";
pub const USERS_ME: &str = "/users/me";

pub const PATIENTS: &str = "/patient/";
pub const CASES: &str = "/cases/";

pub fn patient(patient_id: &str) -> String {
    format!("/patient/{patient_id}")
}

pub fn case(case_id: &str) -> String {
    format!("/cases/{case_id}")
}

pub fn case_sessions(patient_id: &str, case_id: &str) -> String {
    format!("/patients/{patient_id}/cases/{case_id}/sessions")
}

pub fn session(session_id: &str) -> String {
    format!("/chat/sessions/{session_id}")
}

pub fn session_messages(session_id: &str) -> String {
    format!("/chat/sessions/{session_id}/messages")
}

pub fn message_like(server_message_id: &str) -> String {
    format!("/chat/messages/{server_message_id}/like")
}

pub fn message_feedback(server_message_id: &str) -> String {
    format!("/chat/messages/{server_message_id}/feedback")
}
