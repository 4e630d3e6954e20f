//! Crate-wide error type for card generation.
//!
//! The chess layer keeps plain `Result<_, String>` returns; those are wrapped
//! into [`CardError::Board`] where sampling or formatting consumes them.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::brick_catalog::BrickId;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Error)]
pub enum CardError {
    /// Out-of-range or contradictory puzzle parameters, rejected before sampling.
    #[error("invalid puzzle spec: {0}")]
    InvalidSpec(String),

    /// Rejection sampling gave up after the configured number of attempts.
    #[error("no valid position found after {attempts} attempts")]
    SamplingExhaustion { attempts: u32 },

    #[error("audio brick '{0}' is missing from the library")]
    MissingBrick(BrickId),

    /// Listed in the library but the file does not decode.
    #[error("audio brick '{id}' could not be decoded: {source}")]
    UnreadableBrick {
        id: BrickId,
        #[source]
        source: hound::Error,
    },

    #[error("'{0}' is not a known audio brick id")]
    InvalidBrickId(String),

    #[error("move '{0}' cannot be narrated")]
    UnsupportedMove(String),

    #[error("brick library directory {} is missing or unreadable", .0.display())]
    BrickLibraryUnavailable(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("audio format mismatch: {0}")]
    AudioFormat(String),

    #[error("board error: {0}")]
    Board(String),

    #[error(transparent)]
    Audio(#[from] hound::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CardError {
    /// Failures confined to a single card: the batch logs them, skips the
    /// card and moves on.
    pub fn is_card_local(&self) -> bool {
        matches!(
            self,
            CardError::MissingBrick(_)
                | CardError::UnreadableBrick { .. }
                | CardError::SamplingExhaustion { .. }
                | CardError::UnsupportedMove(_)
                | CardError::AudioFormat(_)
        )
    }
}
