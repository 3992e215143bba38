//! Collision detection and resolution
//!
//! Everything collides as circles inscribed in the bounding squares. Group
//! resolution applies damage immediately, so a ship destroyed earlier in the
//! same tick is skipped by every later check.

use super::entity::{Polygon, Projectile, Ship};
use super::geometry::distance_squared;
use super::group::{Swarm, Wave};
use crate::tuning::Tuning;

/// True if the circles of two polygons overlap (touching does not count)
#[inline]
pub fn collide(a: &Polygon, b: &Polygon) -> bool {
    let reach = (a.radius() + b.radius()) as i64;
    distance_squared(a.center(), b.center()) < reach * reach
}

/// A projectile landing on a ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    /// Index of the ship in the slice that was resolved
    pub ship: usize,
    /// Vertices of the ship that was hit
    pub n: u32,
    /// This hit took the hull below 1
    pub destroyed: bool,
}

/// Outcome of projectile-vs-ship resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HitReport {
    pub hits: Vec<Hit>,
    pub score: u64,
}

impl HitReport {
    pub fn destroyed(&self) -> usize {
        self.hits.iter().filter(|h| h.destroyed).count()
    }
}

/// Outcome of player-vs-enemy contact resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReport {
    pub contacts: u32,
    pub enemies_destroyed: u32,
    pub player_damaged: u32,
}

/// Resolve projectiles against ships
///
/// Each colliding projectile is consumed by the first living ship it overlaps
/// and deals one point of damage. Scores `score_hull_damage × n` per hit and
/// `score_destroy_enemy × n` for the hit that destroys a ship.
pub fn resolve_hits(
    ships: &mut [Ship],
    projectiles: &mut Vec<Projectile>,
    tuning: &Tuning,
    now: u64,
) -> HitReport {
    let mut report = HitReport::default();
    projectiles.retain(|shot| {
        let Some((index, ship)) = ships
            .iter_mut()
            .enumerate()
            .find(|(_, ship)| !ship.is_destroyed() && collide(&ship.polygon, &shot.polygon))
        else {
            return true;
        };

        if ship.damage(now) {
            let n = ship.n() as u64;
            report.score += tuning.score_hull_damage * n;
            let destroyed = ship.is_destroyed();
            if destroyed {
                report.score += tuning.score_destroy_enemy * n;
            }
            report.hits.push(Hit {
                ship: index,
                n: ship.n(),
                destroyed,
            });
        }
        false
    });
    report
}

impl Wave {
    /// Resolve `swarm` against this wave, crediting the score to the wave
    pub fn hit_by(&mut self, swarm: &mut Swarm, tuning: &Tuning, now: u64) -> HitReport {
        let report = resolve_hits(self.members_mut(), swarm.members_mut(), tuning, now);
        self.award(report.score);
        report
    }
}

/// Friendly fire crossing hostile fire: both shots are destroyed and the
/// friendly swarm scores. Returns the number of clashes.
pub fn clash(friendly: &mut Swarm, hostile: &mut Swarm, tuning: &Tuning) -> u32 {
    let targets = hostile.members_mut();
    let mut points = 0;
    let mut count = 0;
    friendly.members_mut().retain(|shot| {
        match targets
            .iter()
            .position(|target| collide(&shot.polygon, &target.polygon))
        {
            Some(i) => {
                let target = targets.remove(i);
                points += tuning.score_projectile_clash * target.n() as u64;
                count += 1;
                false
            }
            None => true,
        }
    });
    friendly.award(points);
    count
}

/// Player ramming enemies: knock each overlapping enemy back, damage both
pub fn contact(player: &mut Ship, wave: &mut Wave, tuning: &Tuning, now: u64) -> ContactReport {
    let mut report = ContactReport::default();
    let mut points = 0;
    for enemy in wave.iter_mut() {
        if player.is_destroyed() {
            break;
        }
        if enemy.is_destroyed() || !collide(&player.polygon, &enemy.polygon) {
            continue;
        }
        knockback(player, enemy);
        report.contacts += 1;
        if enemy.damage(now) && enemy.is_destroyed() {
            points += tuning.score_destroy_enemy * enemy.n() as u64;
            report.enemies_destroyed += 1;
        }
        if player.damage(now) {
            report.player_damaged += 1;
        }
    }
    wave.award(points);
    report
}

/// Push `enemy` out of the player's bounding box along the shallowest edge
/// and reverse both of its velocity components
pub fn knockback(player: &Ship, enemy: &mut Ship) {
    let p = player.polygon.rect;
    let e = enemy.polygon.rect;

    // Distance the enemy has to travel to clear each edge
    let up = e.bottom() - p.top();
    let down = p.bottom() - e.top();
    let left = e.right() - p.left();
    let right = p.right() - e.left();

    let shallowest = [(up, 0), (down, 1), (left, 2), (right, 3)]
        .into_iter()
        .filter(|(depth, _)| *depth > 0)
        .min_by_key(|(depth, _)| *depth);

    if let Some((depth, side)) = shallowest {
        let rect = &mut enemy.polygon.rect;
        match side {
            0 => rect.y -= depth,
            1 => rect.y += depth,
            2 => rect.x -= depth,
            _ => rect.x += depth,
        }
        enemy.turn_dx();
        enemy.turn_dy();
    }
}
