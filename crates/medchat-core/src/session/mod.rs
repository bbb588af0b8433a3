//! Chat session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session entity (`Session`)
//! - `message`: Message types (`Message`, `MessageRole`, `Reaction`, `Attachment`)
//! - `feedback`: Like/dislike toggle rules and star/text submissions
//! - `api`: Backend contract used by the chat store (`ChatApi`)

mod api;
mod feedback;
mod message;
mod model;

pub use api::{ChatApi, SendMessageRequest};
pub use feedback::{FeedbackOutcome, FeedbackSubmission, MAX_STARS, MIN_STARS, toggle_reaction};
pub use message::{Attachment, Message, MessageRole, Reaction};
pub use model::Session;
