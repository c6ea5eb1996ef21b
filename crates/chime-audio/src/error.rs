use thiserror::Error;

use crate::category::SoundCategory;

/// Failures inside the notification engine.
///
/// None of these reach callers of `NotificationService::play`; they are
/// logged and degrade to silence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotifyError {
    /// No audio output device could be opened.
    #[error("audio output unavailable: {0}")]
    EnvironmentUnsupported(String),

    /// A string did not name any sound category.
    #[error("unknown sound category: {0:?}")]
    UnknownCategory(String),

    /// A registered profile breaks one of the profile invariants.
    #[error("invalid profile for {category}: {reason}")]
    InvalidProfile {
        category: SoundCategory,
        reason: String,
    },

    /// A live output failed to emit a tone.
    #[error("tone playback failed: {0}")]
    Playback(String),
}
