//! Data-driven game balance
//!
//! Every gameplay constant in one serializable struct. Defaults come from
//! [`crate::consts`]; a settings file can override any subset.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, GameResult};

/// Gameplay tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Player ===
    pub player_size: i32,
    pub player_vertices: u32,
    pub player_hull: i32,
    pub player_start: (i32, i32),
    pub player_projectile_speed: f64,
    pub weapon_cooldown_ms: i64,
    /// Invulnerability after a hit. None means every contact tick hurts.
    pub player_shield_ms: Option<u64>,

    // === Enemy waves ===
    pub enemy_starting_size: i32,
    pub enemy_size_decrement: i32,
    pub enemy_min_size: i32,
    pub enemy_starting_speed: f64,
    pub enemy_speed_increment: f64,
    pub enemy_starting_vertices: u32,
    pub enemy_heading_range: (u32, u32),
    pub spin_cooldown_ms: i64,
    pub spin_step_deg: f32,

    // === Enemy fire ===
    pub enemy_fire: bool,
    pub enemy_projectile_speed: f64,
    pub enemy_projectile_speed_increment: f64,
    pub enemy_fire_cooldown_ms: i64,
    pub enemy_fire_cooldown_decrement_ms: i64,
    /// Lowest fire cadence. None lets the cadence shrink without bound.
    pub enemy_fire_floor_ms: Option<i64>,

    // === Projectiles and effects ===
    pub projectile_size_divisor: i32,
    pub explosion_frame_ms: i64,
    pub explosion_growth: i32,

    // === Scoring ===
    pub score_hull_damage: u64,
    pub score_destroy_enemy: u64,
    pub score_projectile_clash: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_size: PLAYER_SIZE,
            player_vertices: PLAYER_VERTICES,
            player_hull: PLAYER_HULL,
            player_start: PLAYER_START_POSITION,
            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            weapon_cooldown_ms: WEAPON_COOLDOWN_MS,
            player_shield_ms: None,

            enemy_starting_size: ENEMY_STARTING_SIZE,
            enemy_size_decrement: ENEMY_SIZE_DECREMENT,
            enemy_min_size: ENEMY_MIN_SIZE,
            enemy_starting_speed: ENEMY_STARTING_SPEED,
            enemy_speed_increment: ENEMY_SPEED_INCREMENT,
            enemy_starting_vertices: ENEMY_STARTING_VERTICES,
            enemy_heading_range: ENEMY_HEADING_RANGE,
            spin_cooldown_ms: SPIN_COOLDOWN_MS,
            spin_step_deg: SPIN_STEP_DEG,

            enemy_fire: true,
            enemy_projectile_speed: ENEMY_PROJECTILE_STARTING_SPEED,
            enemy_projectile_speed_increment: ENEMY_PROJECTILE_SPEED_INCREMENT,
            enemy_fire_cooldown_ms: ENEMY_FIRE_COOLDOWN_MS,
            enemy_fire_cooldown_decrement_ms: ENEMY_FIRE_COOLDOWN_DECREMENT_MS,
            enemy_fire_floor_ms: Some(ENEMY_FIRE_COOLDOWN_FLOOR_MS),

            projectile_size_divisor: PROJECTILE_SIZE_DIVISOR,
            explosion_frame_ms: EXPLOSION_FRAME_MS,
            explosion_growth: EXPLOSION_GROWTH,

            score_hull_damage: SCORE_HULL_DAMAGE,
            score_destroy_enemy: SCORE_DESTROY_ENEMY,
            score_projectile_clash: SCORE_PROJECTILE_CLASH,
        }
    }
}

impl Tuning {
    /// Screen width and height
    pub fn bounds(&self) -> IVec2 {
        IVec2::new(self.screen_width, self.screen_height)
    }

    pub fn player_start(&self) -> IVec2 {
        IVec2::new(self.player_start.0, self.player_start.1)
    }

    /// Reject values the simulation cannot run with: empty spawn ranges,
    /// zero divisors and ships whose projectiles would have no radius.
    pub fn validate(&self) -> GameResult<()> {
        fn invalid(field: &'static str, reason: String) -> GameResult<()> {
            Err(GameError::InvalidTuning { field, reason })
        }

        if self.screen_width < 1 {
            return invalid("screen_width", format!("{} is below 1", self.screen_width));
        }
        // Enemies spawn in the top half
        if self.screen_height < 2 {
            return invalid("screen_height", format!("{} is below 2", self.screen_height));
        }
        let (min_heading, max_heading) = self.enemy_heading_range;
        if min_heading >= max_heading {
            return invalid(
                "enemy_heading_range",
                format!("[{}, {}) is empty", min_heading, max_heading),
            );
        }
        if self.projectile_size_divisor < 1 {
            return invalid(
                "projectile_size_divisor",
                format!("{} is below 1", self.projectile_size_divisor),
            );
        }
        if self.player_vertices < 3 {
            return invalid("player_vertices", format!("{} is below 3", self.player_vertices));
        }
        // The first wave adds a vertex before spawning
        if self.enemy_starting_vertices < 2 {
            return invalid(
                "enemy_starting_vertices",
                format!("{} is below 2", self.enemy_starting_vertices),
            );
        }
        for (field, size) in [
            ("player_size", self.player_size),
            ("enemy_min_size", self.enemy_min_size),
        ] {
            if size / self.projectile_size_divisor / 2 < 1 {
                return invalid(
                    field,
                    format!(
                        "{} leaves projectiles without a radius at divisor {}",
                        size, self.projectile_size_divisor
                    ),
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let tuning: Tuning =
            serde_json::from_str(r#"{ "player_shield_ms": 250, "enemy_fire": false }"#).unwrap();
        assert_eq!(tuning.player_shield_ms, Some(250));
        assert!(!tuning.enemy_fire);
        assert_eq!(tuning.player_size, PLAYER_SIZE);
        assert_eq!(tuning.bounds(), IVec2::new(800, 600));
    }

    fn rejected_field(json: &str) -> &'static str {
        let tuning: Tuning = serde_json::from_str(json).unwrap();
        match tuning.validate() {
            Err(GameError::InvalidTuning { field, .. }) => field,
            other => panic!("expected InvalidTuning, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unplayable_values() {
        assert_eq!(rejected_field(r#"{"screen_width": 0}"#), "screen_width");
        assert_eq!(rejected_field(r#"{"screen_height": 1}"#), "screen_height");
        assert_eq!(
            rejected_field(r#"{"enemy_heading_range": [330, 330]}"#),
            "enemy_heading_range"
        );
        assert_eq!(
            rejected_field(r#"{"projectile_size_divisor": 0}"#),
            "projectile_size_divisor"
        );
        assert_eq!(rejected_field(r#"{"player_vertices": 2}"#), "player_vertices");
        assert_eq!(
            rejected_field(r#"{"enemy_starting_vertices": 1}"#),
            "enemy_starting_vertices"
        );
        assert_eq!(rejected_field(r#"{"player_size": 6}"#), "player_size");
        assert_eq!(rejected_field(r#"{"enemy_min_size": 7}"#), "enemy_min_size");
    }

    #[test]
    fn test_smallest_sizes_that_still_fire() {
        let tuning = Tuning {
            player_size: 8,
            enemy_min_size: 8,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_ok());
    }
}
