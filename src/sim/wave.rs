//! Wave progression and enemy fire
//!
//! A new wave spawns only once the previous one is gone. Each wave has one
//! more vertex (and one more enemy) than the last, smaller hulls and faster
//! movement.

use glam::IVec2;
use rand::Rng;

use super::entity::{Projectile, Ship};
use super::geometry::angle_between;
use super::group::Wave;
use super::timer::Timer;
use crate::error::GameResult;
use crate::tuning::Tuning;

/// Spawns and escalates enemy waves
#[derive(Debug, Clone, PartialEq)]
pub struct WaveDirector {
    /// Waves spawned this session (1-based once the first wave is out)
    pub index: u32,
    /// Vertex count, also the number of enemies in the wave
    pub n: u32,
    pub size: i32,
    pub speed: f64,
    /// Enemy fire cadence; shrinks with every shot
    pub fire: Timer,
}

impl WaveDirector {
    pub fn new(tuning: &Tuning, now: u64) -> Self {
        Self {
            index: 0,
            n: tuning.enemy_starting_vertices,
            size: tuning.enemy_starting_size,
            speed: tuning.enemy_starting_speed,
            fire: Timer::new(tuning.enemy_fire_cooldown_ms, now),
        }
    }

    /// Step the progression to the next wave
    pub fn advance(&mut self, tuning: &Tuning) {
        self.index += 1;
        self.n += 1;
        self.size = (self.size + tuning.enemy_size_decrement).max(tuning.enemy_min_size);
        self.speed += tuning.enemy_speed_increment;
    }

    /// Speed of hostile projectiles for the current wave
    pub fn projectile_speed(&self, tuning: &Tuning) -> f64 {
        tuning.enemy_projectile_speed
            + tuning.enemy_projectile_speed_increment * self.index.saturating_sub(1) as f64
    }

    /// Build the enemies of the current wave at random positions
    pub fn spawn<R: Rng>(&self, tuning: &Tuning, rng: &mut R) -> GameResult<Vec<Ship>> {
        let (min_heading, max_heading) = tuning.enemy_heading_range;
        (0..self.n)
            .map(|_| -> GameResult<Ship> {
                let x = rng.random_range(0..tuning.screen_width);
                let y = rng.random_range(0..tuning.screen_height / 2);
                let heading = rng.random_range(min_heading..max_heading) as f64;
                Ok(Ship::enemy(
                    self.size,
                    self.n,
                    IVec2::new(x, y),
                    self.speed,
                    heading.to_radians(),
                )?
                .with_spin(tuning.spin_step_deg))
            })
            .collect()
    }

    /// If the wave is cleared, advance and fill it again. Returns the new wave
    /// index when a wave was spawned.
    pub fn update<R: Rng>(
        &mut self,
        wave: &mut Wave,
        tuning: &Tuning,
        rng: &mut R,
    ) -> GameResult<Option<u32>> {
        if !wave.is_empty() {
            return Ok(None);
        }
        self.advance(tuning);
        wave.extend(self.spawn(tuning, rng)?);
        log::info!(
            "Wave {} spawned: {} enemies, size {}, speed {:.1}",
            self.index,
            self.n,
            self.size,
            self.speed
        );
        Ok(Some(self.index))
    }

    /// A random living enemy fires at `target` when the cadence allows.
    /// The cadence then shrinks by the configured decrement.
    pub fn enemy_fire<R: Rng>(
        &mut self,
        wave: &Wave,
        target: IVec2,
        tuning: &Tuning,
        rng: &mut R,
        now: u64,
    ) -> GameResult<Option<Projectile>> {
        if !tuning.enemy_fire || !self.fire.is_ready(now) {
            return Ok(None);
        }
        let shooters: Vec<&Ship> = wave.alive().collect();
        if shooters.is_empty() {
            return Ok(None);
        }
        let shooter = shooters[rng.random_range(0..shooters.len())];
        let angle = angle_between(shooter.polygon.center(), target);
        let shot = Projectile::new(
            &shooter.polygon,
            self.projectile_speed(tuning),
            angle,
            tuning.projectile_size_divisor,
        )?;
        self.fire.reset(now);
        self.fire.shorten(
            tuning.enemy_fire_cooldown_decrement_ms,
            tuning.enemy_fire_floor_ms,
        );
        Ok(Some(shot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_wave_is_four_squares() {
        let tuning = Tuning::default();
        let mut director = WaveDirector::new(&tuning, 0);
        let mut wave = Wave::new();
        let mut rng = Pcg32::seed_from_u64(7);

        assert_eq!(director.update(&mut wave, &tuning, &mut rng).unwrap(), Some(1));
        assert_eq!(wave.len(), 4);
        for ship in wave.iter() {
            assert_eq!(ship.n(), 4);
            assert_eq!(ship.hull(), 4);
            assert_eq!(ship.polygon.size(), 100);
            let c = ship.polygon.center();
            assert!((0..800).contains(&c.x));
            assert!((0..300).contains(&c.y));
            // 315..345 degrees: moving right, never down
            assert!(ship.velocity.x > 0 && ship.velocity.y <= 0);
        }

        // Not empty: nothing happens
        assert_eq!(director.update(&mut wave, &tuning, &mut rng).unwrap(), None);
    }

    #[test]
    fn test_progression_is_linear() {
        let tuning = Tuning::default();
        let mut director = WaveDirector::new(&tuning, 0);
        director.advance(&tuning);
        director.advance(&tuning);
        assert_eq!(director.index, 2);
        assert_eq!(director.n, 5);
        assert_eq!(director.size, 95);
        assert!((director.speed - 3.5).abs() < 1e-9);
    }

    #[test]
    fn test_size_never_drops_below_minimum() {
        let tuning = Tuning::default();
        let mut director = WaveDirector::new(&tuning, 0);
        for _ in 0..100 {
            director.advance(&tuning);
        }
        assert_eq!(director.size, tuning.enemy_min_size);
    }

    #[test]
    fn test_enemy_fire_aims_at_target_and_speeds_up() {
        let tuning = Tuning::default();
        let mut director = WaveDirector::new(&tuning, 0);
        director.advance(&tuning);
        let mut wave = Wave::new();
        wave.add(Ship::enemy(100, 4, IVec2::new(400, 100), 0.0, 0.0).unwrap());
        let mut rng = Pcg32::seed_from_u64(1);

        let early = director
            .enemy_fire(&wave, IVec2::new(400, 500), &tuning, &mut rng, 10)
            .unwrap();
        assert!(early.is_none());

        let shot = director
            .enemy_fire(&wave, IVec2::new(400, 500), &tuning, &mut rng, 1500)
            .unwrap()
            .expect("cadence elapsed");
        assert_eq!(shot.n(), 4);
        // Straight down at the wave-1 projectile speed; cos(90°) is a hair
        // above zero and rounds up to 1
        assert_eq!(shot.velocity, IVec2::new(1, 2));
        assert_eq!(
            director.fire.cooldown_ms,
            tuning.enemy_fire_cooldown_ms - tuning.enemy_fire_cooldown_decrement_ms
        );
    }

    #[test]
    fn test_enemy_fire_disabled() {
        let tuning = Tuning {
            enemy_fire: false,
            ..Tuning::default()
        };
        let mut director = WaveDirector::new(&tuning, 0);
        let mut wave = Wave::new();
        wave.add(Ship::enemy(100, 4, IVec2::new(400, 100), 0.0, 0.0).unwrap());
        let mut rng = Pcg32::seed_from_u64(1);
        let shot = director
            .enemy_fire(&wave, IVec2::new(0, 0), &tuning, &mut rng, 100_000)
            .unwrap();
        assert!(shot.is_none());
    }
}
