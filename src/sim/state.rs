//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives here: the player, the hostile
//! wave, both projectile swarms and the wreckage still animating.

use glam::IVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::{Explosion, Ship};
use super::group::{Swarm, Wave};
use super::timer::Timer;
use super::wave::WaveDirector;
use crate::error::GameResult;
use crate::tuning::Tuning;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen with the hall of fame
    Intro,
    /// Active gameplay
    Play,
    /// Player destroyed, final score on screen
    GameOver,
    /// Terminal
    Quit,
}

/// Something that happened during a tick (drives audio and logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    WaveSpawned { index: u32 },
    PlayerFired,
    EnemyFired,
    EnemyHit { n: u32 },
    EnemyDestroyed { n: u32 },
    ProjectileClash,
    PlayerHit,
    PlayerDestroyed,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Ship,
    /// Enemy ships; their score is the player's kill score
    pub hostile: Wave,
    /// Player projectiles
    pub fire: Swarm,
    /// Enemy projectiles
    pub hostile_fire: Swarm,
    /// Destroyed ships still exploding
    pub wreckage: Vec<Explosion>,
    pub director: WaveDirector,
    /// Shared rotation animation step
    pub spin: Timer,
    /// Simulation tick counter (play ticks this session)
    pub time_ticks: u64,
    /// Best score known before this session
    pub hiscore: u64,
}

impl GameState {
    /// Create a new game state in the intro phase
    pub fn new(tuning: Tuning, seed: u64, hiscore: u64, now: u64) -> GameResult<Self> {
        tuning.validate()?;
        let player = Ship::player(&tuning, now)?;
        let director = WaveDirector::new(&tuning, now);
        let spin = Timer::new(tuning.spin_cooldown_ms, now);
        Ok(Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            phase: GamePhase::Intro,
            player,
            hostile: Wave::new(),
            fire: Swarm::new(),
            hostile_fire: Swarm::new(),
            wreckage: Vec::new(),
            director,
            spin,
            time_ticks: 0,
            hiscore,
        })
    }

    /// Player score: kills and hull damage plus shot-down projectiles
    pub fn score(&self) -> u64 {
        self.hostile.score() + self.fire.score()
    }

    /// Hi-score as shown on the HUD
    pub fn current_hiscore(&self) -> u64 {
        self.hiscore.max(self.score())
    }

    /// Switch phase, resetting whatever that phase owns
    pub fn enter(&mut self, phase: GamePhase, now: u64) {
        log::info!("Phase {:?} -> {:?}", self.phase, phase);
        match phase {
            GamePhase::Intro => {
                self.player
                    .reset(self.tuning.player_hull, self.tuning.player_start(), now);
                self.clear_entities();
            }
            GamePhase::Play => {
                self.clear_entities();
                self.player.set_fires(false);
                self.director = WaveDirector::new(&self.tuning, now);
                self.spin.reset(now);
                self.time_ticks = 0;
            }
            GamePhase::GameOver => {
                self.player.set_fires(false);
                self.fire.clear();
                self.hostile_fire.clear();
            }
            GamePhase::Quit => {}
        }
        self.phase = phase;
    }

    /// Drop every transient entity and zero the session score
    fn clear_entities(&mut self) {
        self.hostile.reset();
        self.fire.reset();
        self.hostile_fire.reset();
        self.wreckage.clear();
    }

    /// Pointer is over the player ship (the intro start button)
    pub fn player_rect_contains(&self, point: IVec2) -> bool {
        self.player.polygon.rect.contains_point(point)
    }

    /// Advance explosion animations and drop finished ones
    pub fn advance_wreckage(&mut self, now: u64) {
        for boom in &mut self.wreckage {
            boom.advance(now);
        }
        self.wreckage.retain(|boom| !boom.is_finished());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Projectile;

    #[test]
    fn test_new_state_starts_in_intro() {
        let state = GameState::new(Tuning::default(), 1, 1000, 0).unwrap();
        assert_eq!(state.phase, GamePhase::Intro);
        assert_eq!(state.score(), 0);
        assert_eq!(state.current_hiscore(), 1000);
        assert!(state.player_rect_contains(IVec2::new(400, 500)));
    }

    #[test]
    fn test_unplayable_tuning_fails_before_first_tick() {
        let tuning = Tuning {
            enemy_heading_range: (330, 330),
            ..Tuning::default()
        };
        let err = GameState::new(tuning, 1, 1000, 0).unwrap_err();
        assert!(matches!(
            err,
            crate::error::GameError::InvalidTuning {
                field: "enemy_heading_range",
                ..
            }
        ));
    }

    #[test]
    fn test_entering_play_clears_previous_session() {
        let mut state = GameState::new(Tuning::default(), 1, 0, 0).unwrap();
        state.hostile.award(500);
        state.fire.award(20);
        let shot = Projectile::new(&state.player.polygon, 15.0, 0.0, 4).unwrap();
        state.fire.add(shot);
        state.director.advance(&state.tuning);

        state.enter(GamePhase::Play, 100);
        assert_eq!(state.phase, GamePhase::Play);
        assert_eq!(state.score(), 0);
        assert!(state.fire.is_empty());
        assert_eq!(state.director.index, 0);
    }

    #[test]
    fn test_game_over_keeps_score() {
        let mut state = GameState::new(Tuning::default(), 1, 100, 0).unwrap();
        state.enter(GamePhase::Play, 0);
        state.hostile.award(560);
        state.enter(GamePhase::GameOver, 10);
        assert_eq!(state.score(), 560);
        assert_eq!(state.current_hiscore(), 560);
    }

    #[test]
    fn test_intro_restores_player() {
        let mut state = GameState::new(Tuning::default(), 1, 0, 0).unwrap();
        state.player.damage(0);
        state.player.follow_pointer(IVec2::new(10, 10), state.tuning.bounds());
        state.enter(GamePhase::Intro, 0);
        assert_eq!(state.player.hull(), state.tuning.player_hull);
        assert_eq!(state.player.polygon.center(), IVec2::new(400, 500));
    }
}
