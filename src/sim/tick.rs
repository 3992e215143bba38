//! One simulation frame
//!
//! Fixed order: spawn, fire, move, collide, reap. Collisions run after all
//! movement, in this order: player shots vs enemies, player shots vs enemy
//! shots, enemy shots vs player, player vs enemies.

use glam::IVec2;
use std::f64::consts::PI;

use super::collision::{clash, contact, resolve_hits};
use super::entity::{Explosion, Projectile, Ship, UpdateContext};
use super::state::{GameEvent, GamePhase, GameState};
use crate::error::GameResult;
use crate::tuning::Tuning;

/// Player shots travel straight up
const PLAYER_FIRE_ANGLE: f64 = PI * 1.5;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Clock time in milliseconds
    pub now: u64,
    /// Latest pointer position, if the pointer has been seen
    pub pointer: Option<IVec2>,
    /// Primary button held
    pub fires: bool,
}

/// Advance the game state by one frame. Does nothing outside `Play`.
pub fn tick(state: &mut GameState, input: &TickInput) -> GameResult<Vec<GameEvent>> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Play {
        return Ok(events);
    }
    let now = input.now;
    state.time_ticks += 1;

    // Next wave once the sky is clear
    if let Some(index) = state
        .director
        .update(&mut state.hostile, &state.tuning, &mut state.rng)?
    {
        events.push(GameEvent::WaveSpawned { index });
    }

    // Player weapon
    state.player.set_fires(input.fires);
    if state.player.trigger(now) {
        let shot = Projectile::new(
            &state.player.polygon,
            state.tuning.player_projectile_speed,
            PLAYER_FIRE_ANGLE,
            state.tuning.projectile_size_divisor,
        )?;
        state.fire.add(shot);
        events.push(GameEvent::PlayerFired);
    }

    // Enemies aim where the player is now
    let target = state.player.polygon.center();
    if let Some(shot) = state.director.enemy_fire(
        &state.hostile,
        target,
        &state.tuning,
        &mut state.rng,
        now,
    )? {
        state.hostile_fire.add(shot);
        events.push(GameEvent::EnemyFired);
    }

    // Movement
    let bounds = state.tuning.bounds();
    let ctx = UpdateContext {
        bounds,
        pointer: input.pointer,
        spin: state.spin.fire(now),
    };
    state.player.update(&ctx);
    for enemy in state.hostile.iter_mut() {
        enemy.update(&ctx);
    }
    state.fire.retain(|shot| shot.update(bounds));
    state.hostile_fire.retain(|shot| shot.update(bounds));

    // Collisions
    let hits = state.hostile.hit_by(&mut state.fire, &state.tuning, now);
    events.extend(hits.hits.iter().map(|hit| GameEvent::EnemyHit { n: hit.n }));

    let clashes = clash(&mut state.fire, &mut state.hostile_fire, &state.tuning);
    events.extend((0..clashes).map(|_| GameEvent::ProjectileClash));

    let incoming = resolve_hits(
        std::slice::from_mut(&mut state.player),
        state.hostile_fire.members_mut(),
        &state.tuning,
        now,
    );
    state.hostile_fire.award(incoming.score);
    events.extend(incoming.hits.iter().map(|_| GameEvent::PlayerHit));

    let rammed = contact(&mut state.player, &mut state.hostile, &state.tuning, now);
    events.extend((0..rammed.player_damaged).map(|_| GameEvent::PlayerHit));

    // Reap
    for wreck in state.hostile.drain_where(Ship::is_destroyed) {
        events.push(GameEvent::EnemyDestroyed { n: wreck.n() });
        let boom = explode(&state.tuning, wreck, now);
        state.wreckage.push(boom);
    }
    if state.player.is_destroyed() {
        log::info!("Player destroyed with score {}", state.score());
        events.push(GameEvent::PlayerDestroyed);
        let boom = explode(&state.tuning, state.player.clone(), now);
        state.wreckage.push(boom);
        state.enter(GamePhase::GameOver, now);
    }
    state.advance_wreckage(now);

    Ok(events)
}

fn explode(tuning: &Tuning, ship: Ship, now: u64) -> Explosion {
    Explosion::new(
        ship.polygon,
        tuning.explosion_frame_ms,
        tuning.explosion_growth,
        now,
    )
}
