pub mod auth;
pub mod cases;
pub mod messages;
pub mod patients;
pub mod sessions;
pub mod settings;
