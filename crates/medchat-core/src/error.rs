//! Error types for the MedChat client.

use thiserror::Error;

/// A shared error type for the entire MedChat client.
///
/// Every layer (HTTP client, resource APIs, snapshot storage, stores) reports
/// failures through this enum so the front end can render one uniform
/// notification regardless of where the failure originated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MedChatError {
    /// Non-2xx response from the backend.
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    /// The request never produced a response (connection refused, DNS, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// 401 from the backend, or an action that needs a token without one.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Form-level validation failed before any network call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An action was attempted on an entity that is not ready for it.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MedChatError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an Http error
    pub fn http(status: u16, detail: impl Into<String>) -> Self {
        Self::Http {
            status,
            detail: detail.into(),
        }
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Precondition error
    pub fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Unauthorized(_) => Some(401),
            _ => None,
        }
    }

    /// Check if this is a NotFound error (local or a backend 404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Http { status: 404, .. })
    }

    /// Check if this is an authentication failure
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_) | Self::Http { status: 401, .. })
    }

    /// Check if this error was raised before any network call was made.
    pub fn is_client_side(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Precondition(_))
    }

    /// The human-readable reason shown in notifications.
    ///
    /// For backend errors this is the backend-supplied detail alone, without
    /// the status prefix of the `Display` form.
    pub fn reason(&self) -> String {
        match self {
            Self::Http { detail, .. } => detail.clone(),
            Self::Transport(m)
            | Self::Unauthorized(m)
            | Self::Validation(m)
            | Self::Precondition(m)
            | Self::Config(m)
            | Self::Internal(m) => m.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for MedChatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for MedChatError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for MedChatError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for MedChatError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for MedChatError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            };
        }
        match err.status() {
            Some(status) => Self::http(status.as_u16(), err.to_string()),
            None => Self::Transport(err.to_string()),
        }
    }
}

/// A type alias for `Result<T, MedChatError>`.
pub type Result<T> = std::result::Result<T, MedChatError>;
