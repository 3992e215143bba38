//! Crate error type
//!
//! Construction preconditions fail fast, persistence problems are surfaced
//! to callers that decide whether to recover, and render failures end the
//! frame loop.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error enum for Euclides.
#[derive(Debug)]
pub enum GameError {
    /// A polygon was requested with fewer than 3 vertices or a non-positive radius.
    InvalidPolygon {
        /// Requested vertex count.
        vertices: u32,
        /// Requested containing square side.
        size: i32,
    },

    /// A tuning value would break the simulation.
    InvalidTuning { field: &'static str, reason: String },

    /// A pilot name is not exactly four ASCII letters or digits.
    InvalidPilotName { name: String },

    /// A required asset (font, sound) is missing or unreadable.
    AssetLoad { path: PathBuf, source: io::Error },

    /// The renderer could not produce a frame.
    Render { reason: String },

    /// Reading or writing a persisted file failed.
    Persistence { path: PathBuf, source: io::Error },

    /// Persisted JSON could not be encoded or decoded.
    Serialization(serde_json::Error),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::InvalidPolygon { vertices, size } => write!(
                f,
                "invalid polygon: {} vertices with size {} (need at least 3 vertices and radius > 0)",
                vertices, size
            ),
            GameError::InvalidTuning { field, reason } => {
                write!(f, "invalid tuning '{}': {}", field, reason)
            }
            GameError::InvalidPilotName { name } => {
                write!(f, "invalid pilot name '{}': need 4 letters or digits", name)
            }
            GameError::AssetLoad { path, source } => {
                write!(f, "failed to load asset {}: {}", path.display(), source)
            }
            GameError::Render { reason } => write!(f, "render failed: {}", reason),
            GameError::Persistence { path, source } => {
                write!(f, "persistence failed for {}: {}", path.display(), source)
            }
            GameError::Serialization(e) => write!(f, "serialization failed: {}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::AssetLoad { source, .. } | GameError::Persistence { source, .. } => {
                Some(source)
            }
            GameError::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for GameError {
    fn from(e: serde_json::Error) -> Self {
        GameError::Serialization(e)
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_mentions_vertex_count() {
        let err = GameError::InvalidPolygon { vertices: 2, size: 40 };
        assert!(err.to_string().contains("2 vertices"));
    }

    #[test]
    fn test_display_names_tuning_field() {
        let err = GameError::InvalidTuning {
            field: "screen_height",
            reason: "must be at least 2".to_string(),
        };
        assert_eq!(err.to_string(), "invalid tuning 'screen_height': must be at least 2");
    }

    #[test]
    fn test_io_source_is_exposed() {
        use std::error::Error;
        let err = GameError::Persistence {
            path: PathBuf::from("hiscore.json"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("hiscore.json"));
    }
}
