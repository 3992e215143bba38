//! Leaderboard persistence
//!
//! Loading never fails: a missing or corrupt store yields an empty list,
//! bad entries are skipped one by one, and the hall of fame pads itself
//! with defaults. Saving reports errors
//! so the caller can decide how loudly to complain.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use crate::error::{GameError, GameResult};
use crate::highscores::Pilot;

/// Storage for the hall of fame
pub trait PersistentStore {
    fn load_leaderboard(&mut self) -> Vec<Pilot>;
    fn save_leaderboard(&mut self, pilots: &[Pilot]) -> GameResult<()>;
}

impl<T: PersistentStore + ?Sized> PersistentStore for &mut T {
    fn load_leaderboard(&mut self) -> Vec<Pilot> {
        (**self).load_leaderboard()
    }

    fn save_leaderboard(&mut self, pilots: &[Pilot]) -> GameResult<()> {
        (**self).save_leaderboard(pilots)
    }
}

/// Leaderboard as a JSON array on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> GameResult<Vec<Pilot>> {
        let json = fs::read_to_string(&self.path).map_err(|source| GameError::Persistence {
            path: self.path.clone(),
            source,
        })?;
        let entries: Vec<serde_json::Value> = serde_json::from_str(&json)?;
        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(i, entry)| match serde_json::from_value::<Pilot>(entry) {
                Ok(pilot) => Some(pilot),
                Err(err) => {
                    log::warn!("Skipping hall of fame entry {}: {}", i, err);
                    None
                }
            })
            .collect())
    }
}

impl PersistentStore for JsonFileStore {
    fn load_leaderboard(&mut self) -> Vec<Pilot> {
        match self.read() {
            Ok(pilots) => {
                log::info!(
                    "Loaded {} pilots from {}",
                    pilots.len(),
                    self.path.display()
                );
                pilots
            }
            Err(GameError::Persistence { source, .. }) if source.kind() == ErrorKind::NotFound => {
                log::info!("No hall of fame at {}, starting fresh", self.path.display());
                Vec::new()
            }
            Err(err) => {
                log::warn!("Discarding unreadable hall of fame: {}", err);
                Vec::new()
            }
        }
    }

    fn save_leaderboard(&mut self, pilots: &[Pilot]) -> GameResult<()> {
        let json = serde_json::to_string_pretty(pilots)?;
        // Replace atomically via a sibling file
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json)
            .and_then(|()| fs::rename(&tmp, &self.path))
            .map_err(|source| GameError::Persistence {
                path: self.path.clone(),
                source,
            })?;
        log::info!("Hall of fame saved ({} pilots)", pilots.len());
        Ok(())
    }
}

/// In-memory store for tests and sessions without a disk
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pilots: Vec<Pilot>,
    saves: usize,
}

impl MemoryStore {
    pub fn new(pilots: Vec<Pilot>) -> Self {
        Self { pilots, saves: 0 }
    }

    pub fn pilots(&self) -> &[Pilot] {
        &self.pilots
    }

    /// Number of successful saves
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl PersistentStore for MemoryStore {
    fn load_leaderboard(&mut self) -> Vec<Pilot> {
        self.pilots.clone()
    }

    fn save_leaderboard(&mut self, pilots: &[Pilot]) -> GameResult<()> {
        self.pilots = pilots.to_vec();
        self.saves += 1;
        Ok(())
    }
}
