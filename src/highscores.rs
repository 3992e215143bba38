//! Hall of fame
//!
//! A fixed-size leaderboard kept in ascending score order. It is never
//! empty: missing slots are padded with the default pilot.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PILOT_NAME, DEFAULT_PILOT_SCORE, HALL_OF_FAME_CAPACITY, PILOT_NAME_LENGTH};
use crate::error::{GameError, GameResult};

/// A leaderboard entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PilotRecord")]
pub struct Pilot {
    name: String,
    pub score: u64,
}

/// Unchecked on-disk form of a pilot
#[derive(Deserialize)]
struct PilotRecord {
    name: String,
    score: u64,
}

impl TryFrom<PilotRecord> for Pilot {
    type Error = GameError;

    fn try_from(record: PilotRecord) -> Result<Self, Self::Error> {
        Pilot::new(&record.name, record.score)
    }
}

impl Pilot {
    /// Build a pilot, upper-casing the name. Names must be exactly four
    /// ASCII letters or digits.
    pub fn new(name: &str, score: u64) -> GameResult<Self> {
        let name = name.trim().to_ascii_uppercase();
        if name.len() != PILOT_NAME_LENGTH || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GameError::InvalidPilotName { name });
        }
        Ok(Self { name, score })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn placeholder() -> Self {
        Self {
            name: DEFAULT_PILOT_NAME.to_string(),
            score: DEFAULT_PILOT_SCORE,
        }
    }
}

/// Sorted, fixed-capacity leaderboard (lowest score first)
#[derive(Debug, Clone, PartialEq)]
pub struct HallOfFame {
    capacity: usize,
    pilots: Vec<Pilot>,
}

impl Default for HallOfFame {
    fn default() -> Self {
        Self::from_entries(Vec::new(), HALL_OF_FAME_CAPACITY)
    }
}

impl HallOfFame {
    /// Build from stored entries: sort, pad with the default pilot and keep
    /// the highest `capacity` scores.
    pub fn from_entries(mut pilots: Vec<Pilot>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        pilots.resize_with(pilots.len().max(capacity), Pilot::placeholder);
        // Stable sort keeps stored order among equal scores
        pilots.sort_by_key(|p| p.score);
        let excess = pilots.len() - capacity;
        Self {
            capacity,
            pilots: pilots.split_off(excess),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries in ascending score order
    pub fn entries(&self) -> &[Pilot] {
        &self.pilots
    }

    /// Entries from best to worst, as shown on the intro screen
    pub fn ranked(&self) -> impl Iterator<Item = &Pilot> {
        self.pilots.iter().rev()
    }

    pub fn top_score(&self) -> u64 {
        self.pilots.last().map_or(0, |p| p.score)
    }

    pub fn lowest_score(&self) -> u64 {
        self.pilots.first().map_or(0, |p| p.score)
    }

    /// Score would earn a place
    pub fn is_eligible(&self, score: u64) -> bool {
        score > self.lowest_score()
    }

    pub fn is_new_hiscore(&self, score: u64) -> bool {
        score > self.top_score()
    }

    /// Insert after any equal scores and drop the lowest entry when full.
    /// Returns the 1-based rank from the top, or None if the new pilot was
    /// the one dropped.
    pub fn insert(&mut self, pilot: Pilot) -> Option<usize> {
        let score = pilot.score;
        let index = self.pilots.partition_point(|p| p.score <= score);
        self.pilots.insert(index, pilot);
        let rank = self.pilots.len() - index;
        if self.pilots.len() > self.capacity {
            self.pilots.remove(0);
            if index == 0 {
                return None;
            }
        }
        log::info!("Hall of fame: score {} placed at rank {}", score, rank);
        Some(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pilot(name: &str, score: u64) -> Pilot {
        Pilot::new(name, score).unwrap()
    }

    #[test]
    fn test_pilot_name_validation() {
        assert_eq!(pilot("abcd", 1).name(), "ABCD");
        assert_eq!(pilot("R2D2", 1).name(), "R2D2");
        assert!(Pilot::new("abc", 1).is_err());
        assert!(Pilot::new("abcde", 1).is_err());
        assert!(Pilot::new("ab d", 1).is_err());
        assert!(Pilot::new("", 1).is_err());
    }

    #[test]
    fn test_default_is_padded() {
        let hall = HallOfFame::default();
        assert_eq!(hall.entries().len(), HALL_OF_FAME_CAPACITY);
        assert!(hall.entries().iter().all(|p| p.name() == "ROLI" && p.score == 1000));
        assert_eq!(hall.top_score(), 1000);
    }

    #[test]
    fn test_from_entries_sorts_and_keeps_highest() {
        let stored: Vec<Pilot> = (0..12).map(|i| pilot("ABCD", 2000 + i * 10)).collect();
        let hall = HallOfFame::from_entries(stored, 10);
        assert_eq!(hall.entries().len(), 10);
        assert_eq!(hall.lowest_score(), 2020);
        assert_eq!(hall.top_score(), 2110);
        assert!(hall.entries().windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn test_eligibility() {
        let hall = HallOfFame::from_entries(vec![pilot("ABCD", 5000)], 10);
        assert!(!hall.is_eligible(1000));
        assert!(hall.is_eligible(1001));
        assert!(!hall.is_new_hiscore(5000));
        assert!(hall.is_new_hiscore(5001));
    }

    #[test]
    fn test_insert_into_full_default_board() {
        let mut hall = HallOfFame::default();
        assert_eq!(hall.insert(pilot("ABCD", 1500)), Some(1));
        assert_eq!(hall.entries().len(), 10);
        assert_eq!(hall.top_score(), 1500);
        let defaults = hall.entries().iter().filter(|p| p.score == 1000).count();
        assert_eq!(defaults, 9);
    }

    #[test]
    fn test_insert_ties_rank_above_existing() {
        let mut hall = HallOfFame::from_entries(vec![pilot("AAAA", 3000)], 10);
        assert_eq!(hall.insert(pilot("BBBB", 3000)), Some(1));
        let names: Vec<&str> = hall.ranked().take(2).map(Pilot::name).collect();
        assert_eq!(names, ["BBBB", "AAAA"]);
    }

    #[test]
    fn test_insert_below_everything_is_dropped() {
        let mut hall = HallOfFame::default();
        assert_eq!(hall.insert(pilot("LOWW", 10)), None);
        assert_eq!(hall, HallOfFame::default());
    }

    #[test]
    fn test_pilot_json_validates_name() {
        let ok: Pilot = serde_json::from_str(r#"{"name":"abcd","score":7}"#).unwrap();
        assert_eq!(ok.name(), "ABCD");
        assert!(serde_json::from_str::<Pilot>(r#"{"name":"toolong","score":7}"#).is_err());
    }

    proptest! {
        #[test]
        fn prop_insert_keeps_capacity_and_order(
            scores in prop::collection::vec(0u64..5000, 0..15),
            new_score in 0u64..5000,
        ) {
            let stored = scores.iter().map(|&s| pilot("TEST", s)).collect();
            let mut hall = HallOfFame::from_entries(stored, 10);
            let before = hall.entries().to_vec();
            let min = hall.lowest_score();
            let unique_min = before.iter().filter(|p| p.score == min).count() == 1;

            hall.insert(pilot("NEWP", new_score));

            prop_assert_eq!(hall.entries().len(), 10);
            prop_assert!(hall.entries().windows(2).all(|w| w[0].score <= w[1].score));
            if new_score > min {
                let min_left = hall.entries().iter().any(|p| p.score == min);
                prop_assert_eq!(min_left, !unique_min);
            }
        }
    }
}
