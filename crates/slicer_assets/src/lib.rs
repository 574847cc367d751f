use std::{io, path::PathBuf};

use thiserror::Error;

pub mod document;
pub mod png;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed sprite document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to decode png: {0}")]
    Png(#[from] lodepng::Error),
    #[error("sprite {index} is invalid: {reason}")]
    InvalidSprite { index: usize, reason: &'static str },
    #[error("atlas image not found: {}", .0.display())]
    AtlasNotFound(PathBuf),
    #[error("there are no sprites to export")]
    NothingToExport,
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
