//! Per-message feedback rules.
//!
//! Like and dislike are toggles over a single `Option<Reaction>`: invoking the
//! current state clears it, invoking the other state replaces it. Star rating
//! and free-text feedback are independent of the reaction and are always
//! submitted together.

use super::message::Reaction;
use crate::error::{MedChatError, Result};

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;

/// Computes the reaction after the user presses `pressed`.
pub fn toggle_reaction(current: Option<Reaction>, pressed: Reaction) -> Option<Reaction> {
    if current == Some(pressed) {
        None
    } else {
        Some(pressed)
    }
}

/// Star rating plus free text, applied as one update.
///
/// `None` in either field clears it on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackSubmission {
    pub stars: Option<u8>,
    pub text: Option<String>,
}

impl FeedbackSubmission {
    pub fn new(stars: Option<u8>, text: Option<String>) -> Self {
        // Blank text is treated as "no feedback".
        let text = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        Self { stars, text }
    }

    /// Rejects star values outside 1..=5.
    pub fn validate(&self) -> Result<()> {
        match self.stars {
            Some(s) if !(MIN_STARS..=MAX_STARS).contains(&s) => Err(MedChatError::validation(
                format!("Star rating must be between {MIN_STARS} and {MAX_STARS}, got {s}"),
            )),
            _ => Ok(()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_none() && self.text.is_none()
    }
}

/// Result of a like/dislike/feedback action.
///
/// Feedback actions never propagate errors to the caller; failures are
/// reported through the store error field and a notification instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Backend confirmed; the local message now carries the new state.
    Applied,
    /// Nothing was sent (no server link, unknown message, invalid input).
    Skipped(String),
    /// Backend rejected or was unreachable; local state is unchanged.
    Failed(String),
}

impl FeedbackOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}
