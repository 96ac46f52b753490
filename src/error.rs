//! Error types shared across the showcase
//!
//! Asset failures are `Clone` because a single decode result is handed to
//! every caller that joined the same in-flight load.

use thiserror::Error;

/// Failure reported by an [`AssetLoader`](crate::assets::AssetLoader)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    /// The asset could not be fetched from its source
    #[error("failed to read asset '{path}': {message}")]
    Io { path: String, message: String },

    /// The asset was fetched but its contents could not be decoded
    #[error("failed to decode asset '{path}': {message}")]
    Decode { path: String, message: String },

    /// No decoder exists for the asset's extension
    #[error("unsupported asset format: '{0}'")]
    UnsupportedFormat(String),
}

impl AssetError {
    pub fn io(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    pub fn decode(path: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Decode {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

/// Failure while wiring a scene controller
#[derive(Debug, Error)]
pub enum ShowcaseError {
    /// The executor refused a task, which only happens after it shut down
    #[error("failed to spawn '{label}': {source}")]
    Spawn {
        label: &'static str,
        #[source]
        source: futures::task::SpawnError,
    },

    /// The variant table is empty, so there is nothing to show
    #[error("no keyboard variants configured")]
    NoVariants,
}
