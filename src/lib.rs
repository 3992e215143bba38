//! Euclides - A geometric arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, tick)
//! - `game`: State machine driving intro, play and game over
//! - `renderer`: Renderer trait and a CPU mesh implementation
//! - `platform`: Clock, input and name entry collaborators
//! - `highscores`: Hall of fame and pilot names
//! - `persistence`: Leaderboard storage
//! - `audio`: Sound cues
//! - `settings`/`tuning`: Preferences and data-driven game balance

pub mod audio;
pub mod error;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::{GameError, GameResult};
pub use game::{Collaborators, Game};
pub use highscores::{HallOfFame, Pilot};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Target frame rate; one simulation tick per frame
    pub const FPS: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Player ship: a triangle
    pub const PLAYER_SIZE: i32 = 40;
    pub const PLAYER_VERTICES: u32 = 3;
    pub const PLAYER_HULL: i32 = 3;
    pub const PLAYER_START_POSITION: (i32, i32) = (SCREEN_WIDTH / 2, SCREEN_HEIGHT - 100);
    pub const PLAYER_PROJECTILE_SPEED: f64 = 15.0;
    /// Player can fire at this rate (milliseconds)
    pub const WEAPON_COOLDOWN_MS: i64 = 50;

    /// Enemy progression. The first wave is one step past these values.
    pub const ENEMY_STARTING_SIZE: i32 = 105;
    pub const ENEMY_SIZE_DECREMENT: i32 = -5;
    pub const ENEMY_MIN_SIZE: i32 = 20;
    pub const ENEMY_STARTING_SPEED: f64 = 2.5;
    pub const ENEMY_SPEED_INCREMENT: f64 = 0.5;
    pub const ENEMY_STARTING_VERTICES: u32 = 3;
    /// Spawn heading band in degrees (end exclusive)
    pub const ENEMY_HEADING_RANGE: (u32, u32) = (315, 345);

    /// Enemy fire
    pub const ENEMY_PROJECTILE_STARTING_SPEED: f64 = 2.0;
    pub const ENEMY_PROJECTILE_SPEED_INCREMENT: f64 = 1.0;
    pub const ENEMY_FIRE_COOLDOWN_MS: i64 = 1500;
    pub const ENEMY_FIRE_COOLDOWN_DECREMENT_MS: i64 = 10;
    pub const ENEMY_FIRE_COOLDOWN_FLOOR_MS: i64 = 200;

    /// Projectiles are this fraction of their owner's size
    pub const PROJECTILE_SIZE_DIVISOR: i32 = 4;

    /// Enemy heading animation
    pub const SPIN_COOLDOWN_MS: i64 = 50;
    pub const SPIN_STEP_DEG: f32 = 3.0;
    /// Ships are drawn upside down so the player's tip points up
    pub const DEFAULT_HEADING_DEG: f32 = 180.0;

    /// Explosion animation
    pub const EXPLOSION_FRAME_MS: i64 = 30;
    pub const EXPLOSION_GROWTH: i32 = 6;

    /// Scoring (multiplied by the vertices of the target)
    pub const SCORE_HULL_DAMAGE: u64 = 10;
    pub const SCORE_DESTROY_ENEMY: u64 = 100;
    pub const SCORE_PROJECTILE_CLASH: u64 = 5;

    /// HUD layout (text centers) and font sizes
    pub const SCORE_COORDS: (i32, i32) = (160, 10);
    pub const HISCORE_COORDS: (i32, i32) = (610, 10);
    pub const TITLE_COORDS: (i32, i32) = (400, 300);
    pub const SUBTITLE_COORDS: (i32, i32) = (400, 350);
    pub const HALL_OF_FAME_COORDS: (i32, i32) = (400, 60);
    pub const HALL_OF_FAME_LINE_HEIGHT: i32 = 22;
    pub const TITLE_FONT_SIZE: u32 = 60;
    pub const SUBTITLE_FONT_SIZE: u32 = 30;
    pub const SCORE_FONT_SIZE: u32 = 40;
    pub const LIST_FONT_SIZE: u32 = 20;
    /// Outline width of every polygon
    pub const STROKE: u32 = 1;

    /// Hall of fame
    pub const HALL_OF_FAME_CAPACITY: usize = 10;
    pub const PILOT_NAME_LENGTH: usize = 4;
    pub const DEFAULT_PILOT_NAME: &str = "ROLI";
    pub const DEFAULT_PILOT_SCORE: u64 = 1000;
    /// Name prompts before giving up on an entry
    pub const PILOT_NAME_ATTEMPTS: u32 = 3;
    pub const MUSIC_FADE_MS: u64 = 500;
}

/// Zero padded score line used by the HUD
#[inline]
pub fn format_score(label: &str, score: u64) -> String {
    format!("{}: {:07}", label, score)
}
