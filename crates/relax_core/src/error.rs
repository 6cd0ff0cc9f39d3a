//! Error taxonomy shared by every engine component.

use crate::playback::PlaybackStatus;

/// Errors raised synchronously by engine commands.
///
/// A command that returns an error leaves the engine in the state it was in
/// before the call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// Non-finite or out-of-domain input, or a field the process does not have.
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: String, reason: String },

    /// Unknown preset name.
    #[error("Preset not found: {0}")]
    NotFound(String),

    /// The parameter store cannot be locked in its current state.
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),

    /// The command is not allowed in the current playback status.
    #[error("Cannot {command} while {status}")]
    InvalidTransition {
        command: &'static str,
        status: PlaybackStatus,
    },
}

impl EngineError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
