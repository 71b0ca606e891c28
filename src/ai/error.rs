use std::{io, path::PathBuf};

use thiserror::Error;

use super::assets::Artifact;

/// Startup-only failure: the four artifacts could not be turned into a
/// usable [`super::ModelAssets`].
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error(
        "required model asset not found: {artifact} (expected at {})",
        .path.display()
    )]
    Missing { artifact: Artifact, path: PathBuf },

    #[error("failed to read model asset {artifact} at {}: {source}", .path.display())]
    Unreadable {
        artifact: Artifact,
        path: PathBuf,
        source: io::Error,
    },

    #[error("model asset {artifact} at {} is corrupt: {source}", .path.display())]
    Corrupt {
        artifact: Artifact,
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("model asset {artifact} is inconsistent: {reason}")]
    Inconsistent { artifact: Artifact, reason: String },
}

impl AssetLoadError {
    pub fn artifact(&self) -> Artifact {
        match self {
            AssetLoadError::Missing { artifact, .. }
            | AssetLoadError::Unreadable { artifact, .. }
            | AssetLoadError::Corrupt { artifact, .. }
            | AssetLoadError::Inconsistent { artifact, .. } => *artifact,
        }
    }
}

/// Per-request failure while vectorizing or scoring.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("{stage} features have width {actual} but the model expects {expected}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} model produced a non-finite score")]
    NonFiniteScore { stage: &'static str },

    #[error("classification task aborted: {0}")]
    Aborted(String),
}
