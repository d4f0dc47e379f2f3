//! Error types for the activity player.

use std::path::PathBuf;

use crate::player::ActivityPhase;

#[derive(Debug, thiserror::Error)]
pub enum AnswerKeyError {
    #[error("failed to read answer key {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse answer key JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported circleCount {0} (expected a positive group size, 0 or -1)")]
    InvalidCircleCount(i32),
    #[error("unknown activity type \"{0}\"")]
    UnknownKind(String),
    #[error("answer index {0} appears more than once")]
    DuplicateIndex(usize),
    #[error("answer region {0} has a negative or non-finite rectangle")]
    InvalidRegion(usize),
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse manifest JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("manifest has no activities")]
    Empty,
}

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),
    #[error("cannot {action} while {from:?}")]
    InvalidTransition {
        from: ActivityPhase,
        action: &'static str,
    },
    #[error(transparent)]
    AnswerKey(#[from] AnswerKeyError),
}
