/// Convenience result type used across Telestrator.
pub type TelestratorResult<T> = Result<T, TelestratorError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Per-tick playback never fails: malformed annotations degrade to "not shown". Errors are only
/// surfaced by document/config validation, persistence, and calls into a disposed engine.
#[derive(thiserror::Error, Debug)]
pub enum TelestratorError {
    /// Invalid analysis document or engine configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Playback control requested in a state that cannot honor it.
    #[error("playback error: {0}")]
    Playback(String),

    /// The save collaborator rejected a mutation that was already applied in memory.
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TelestratorError {
    /// Build a [`TelestratorError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TelestratorError::Playback`] value.
    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    /// Build a [`TelestratorError::Persistence`] value.
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Build a [`TelestratorError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TelestratorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
