//! Ownership groups for ships and projectiles
//!
//! A member belongs to exactly one group; dropping it from the group is the
//! only way it leaves the game.

use super::entity::{Projectile, Ship};

/// A collection of entities with a running score that only increases
#[derive(Debug, Clone, PartialEq)]
pub struct Group<T> {
    members: Vec<T>,
    score: u64,
}

/// Enemy collection
pub type Wave = Group<Ship>;
/// Projectile collection fired by one side
pub type Swarm = Group<Projectile>;

impl<T> Default for Group<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Group<T> {
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            score: 0,
        }
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }

    pub fn add(&mut self, member: T) {
        self.members.push(member);
    }

    pub fn extend(&mut self, members: impl IntoIterator<Item = T>) {
        self.members.extend(members);
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.members.iter_mut()
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    pub(crate) fn members_mut(&mut self) -> &mut Vec<T> {
        &mut self.members
    }

    pub fn retain(&mut self, keep: impl FnMut(&mut T) -> bool) {
        self.members.retain_mut(keep);
    }

    /// Remove and return every member matching `pred`, keeping order
    pub fn drain_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut taken = Vec::new();
        let mut kept = Vec::with_capacity(self.members.len());
        for member in self.members.drain(..) {
            if pred(&member) {
                taken.push(member);
            } else {
                kept.push(member);
            }
        }
        self.members = kept;
        taken
    }

    /// Empty the group and zero its score (new session)
    pub fn reset(&mut self) {
        self.score = 0;
        self.members.clear();
    }

    /// Empty the group, keep the score
    pub fn clear(&mut self) {
        self.members.clear();
    }
}

impl Wave {
    /// Ships still in the fight
    pub fn alive(&self) -> impl Iterator<Item = &Ship> {
        self.members.iter().filter(|s| !s.is_destroyed())
    }
}
