//! Startup asset checks

use std::fs::File;
use std::path::PathBuf;

use crate::error::{GameError, GameResult};

/// Fail on the first asset that cannot be opened
pub fn require_assets(paths: &[PathBuf]) -> GameResult<()> {
    for path in paths {
        File::open(path).map_err(|source| GameError::AssetLoad {
            path: path.clone(),
            source,
        })?;
        log::debug!("Asset ok: {}", path.display());
    }
    Ok(())
}
