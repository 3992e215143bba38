//! Game entities: polygons, ships, projectiles and explosions
//!
//! Every actor in Euclides is a regular polygon inside a square bounding box.
//! Ships add a hull and a per-tick behavior pipeline; projectiles inherit the
//! shape family of whoever fired them.

use glam::IVec2;

use super::geometry::{self, Rect};
use super::timer::Timer;
use crate::consts::DEFAULT_HEADING_DEG;
use crate::error::{GameError, GameResult};
use crate::tuning::Tuning;

/// A regular polygon positioned by its bounding box
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    n: u32,
    size: i32,
    pub rect: Rect,
    /// Only affects how vertices are rasterized, never the hitbox
    pub heading_deg: f32,
}

impl Polygon {
    /// `size` is the side of the containing square
    pub fn new(size: i32, n: u32, center: IVec2) -> GameResult<Self> {
        if n < 3 || size / 2 <= 0 {
            return Err(GameError::InvalidPolygon { vertices: n, size });
        }
        Ok(Self {
            n,
            size,
            rect: Rect::square(size, center),
            heading_deg: DEFAULT_HEADING_DEG,
        })
    }

    /// Number of vertices
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Collision radius: half the containing square
    #[inline]
    pub fn radius(&self) -> i32 {
        self.size / 2
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        self.rect.center()
    }

    /// Local vertices for the current heading
    pub fn vertices(&self) -> Vec<IVec2> {
        geometry::vertices(self.n, self.radius(), self.heading_deg)
    }

    /// Enlarge around the current center
    pub fn grow(&mut self, by: i32) {
        let center = self.center();
        self.size += by;
        self.rect = Rect::square(self.size, center);
    }
}

/// One step of a ship's per-tick update, run in order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Behavior {
    /// Move the center to the pointer, clamped so the hull stays on screen
    FollowPointer,
    /// Turn the heading when the shared rotation timer fires
    Spin { step_deg: f32 },
    /// Reflect velocity off screen edges
    Bounce,
    /// Integrate velocity
    Drift,
}

/// Per-tick inputs shared by all ships
#[derive(Debug, Clone, Copy)]
pub struct UpdateContext {
    /// Screen width and height
    pub bounds: IVec2,
    pub pointer: Option<IVec2>,
    /// Rotation timer fired this tick
    pub spin: bool,
}

/// Kind-specific ship state
#[derive(Debug, Clone, PartialEq)]
pub enum ShipKind {
    Player {
        /// Continuous fire toggle
        fires: bool,
        weapon: Timer,
        /// Optional invulnerability window after taking damage
        shield: Option<Timer>,
    },
    Enemy,
}

/// A player or enemy spaceship
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub polygon: Polygon,
    hull: i32,
    pub velocity: IVec2,
    pub kind: ShipKind,
    behaviors: Vec<Behavior>,
}

impl Ship {
    /// The player's triangle at its start position
    pub fn player(tuning: &Tuning, now: u64) -> GameResult<Self> {
        let polygon = Polygon::new(
            tuning.player_size,
            tuning.player_vertices,
            tuning.player_start(),
        )?;
        Ok(Self {
            polygon,
            hull: tuning.player_hull,
            velocity: IVec2::ZERO,
            kind: ShipKind::Player {
                fires: false,
                weapon: Timer::new(tuning.weapon_cooldown_ms, now),
                shield: tuning
                    .player_shield_ms
                    .map(|ms| Timer::new(ms as i64, now.saturating_sub(ms))),
            },
            behaviors: vec![Behavior::FollowPointer],
        })
    }

    /// An enemy moving at `speed` pixels per tick along `angle` (radians)
    pub fn enemy(size: i32, n: u32, center: IVec2, speed: f64, angle: f64) -> GameResult<Self> {
        let polygon = Polygon::new(size, n, center)?;
        Ok(Self {
            polygon,
            hull: n as i32,
            velocity: geometry::offset(speed, angle),
            kind: ShipKind::Enemy,
            behaviors: vec![Behavior::Bounce, Behavior::Drift],
        })
    }

    /// Add a spin step in front of the pipeline
    pub fn with_spin(mut self, step_deg: f32) -> Self {
        self.behaviors.insert(0, Behavior::Spin { step_deg });
        self
    }

    pub fn behaviors(&self) -> &[Behavior] {
        &self.behaviors
    }

    #[inline]
    pub fn n(&self) -> u32 {
        self.polygon.n()
    }

    #[inline]
    pub fn hull(&self) -> i32 {
        self.hull
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.hull < 1
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ShipKind::Player { .. })
    }

    /// Take one point of hull damage. Returns false if the damage was ignored
    /// (already destroyed, or shielded).
    pub fn damage(&mut self, now: u64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        if let ShipKind::Player {
            shield: Some(shield),
            ..
        } = &mut self.kind
        {
            if !shield.fire(now) {
                return false;
            }
        }
        self.hull -= 1;
        true
    }

    /// Run the behavior pipeline for one tick
    pub fn update(&mut self, ctx: &UpdateContext) {
        for i in 0..self.behaviors.len() {
            let behavior = self.behaviors[i];
            match behavior {
                Behavior::FollowPointer => {
                    if let Some(pointer) = ctx.pointer {
                        self.follow_pointer(pointer, ctx.bounds);
                    }
                }
                Behavior::Spin { step_deg } => {
                    if ctx.spin {
                        self.polygon.heading_deg = (self.polygon.heading_deg + step_deg) % 360.0;
                    }
                }
                Behavior::Bounce => self.keep_on_screen(ctx.bounds),
                Behavior::Drift => self.polygon.rect.translate(self.velocity),
            }
        }
    }

    /// Set the center to `pointer`, clamped so the whole polygon stays visible
    pub fn follow_pointer(&mut self, pointer: IVec2, bounds: IVec2) {
        let half = IVec2::new(self.polygon.rect.w / 2, self.polygon.rect.h / 2);
        let x = pointer.x.max(half.x).min(bounds.x - half.x);
        let y = pointer.y.max(half.y).min(bounds.y - half.y);
        self.polygon.rect.set_center(IVec2::new(x, y));
    }

    /// Bounce off screen edges. Each side is checked on its own, so a corner
    /// hit flips both axes in one tick.
    pub fn keep_on_screen(&mut self, bounds: IVec2) {
        let rect = &mut self.polygon.rect;
        if rect.left() < 0 {
            rect.set_left(0);
            self.velocity.x = -self.velocity.x;
        }
        if rect.right() > bounds.x {
            rect.set_right(bounds.x - 1);
            self.velocity.x = -self.velocity.x;
        }
        if rect.top() < 0 {
            rect.set_top(0);
            self.velocity.y = -self.velocity.y;
        }
        if rect.bottom() > bounds.y {
            rect.set_bottom(bounds.y - 1);
            self.velocity.y = -self.velocity.y;
        }
    }

    pub fn turn_dx(&mut self) {
        self.velocity.x = -self.velocity.x;
    }

    pub fn turn_dy(&mut self) {
        self.velocity.y = -self.velocity.y;
    }

    pub fn fires(&self) -> bool {
        matches!(self.kind, ShipKind::Player { fires: true, .. })
    }

    pub fn set_fires(&mut self, state: bool) {
        if let ShipKind::Player { fires, .. } = &mut self.kind {
            *fires = state;
        }
    }

    /// Firing and weapon cooled down. Resets the weapon timer when true.
    pub fn trigger(&mut self, now: u64) -> bool {
        match &mut self.kind {
            ShipKind::Player {
                fires: true,
                weapon,
                ..
            } => weapon.fire(now),
            _ => false,
        }
    }

    /// Restore hull and move to `center` (player restart)
    pub fn reset(&mut self, hull: i32, center: IVec2, now: u64) {
        self.hull = hull;
        self.polygon.rect.set_center(center);
        self.polygon.heading_deg = DEFAULT_HEADING_DEG;
        if let ShipKind::Player {
            fires,
            weapon,
            shield,
        } = &mut self.kind
        {
            *fires = false;
            weapon.reset(now);
            if let Some(shield) = shield {
                shield.last_update = now.saturating_sub(shield.cooldown_ms.max(0) as u64);
            }
        }
    }
}

/// A shot travelling in a straight line
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub polygon: Polygon,
    pub velocity: IVec2,
}

impl Projectile {
    /// Same shape as `owner`, a quarter of its size, starting at its center
    pub fn new(owner: &Polygon, speed: f64, angle: f64, size_divisor: i32) -> GameResult<Self> {
        let polygon = Polygon::new(owner.size() / size_divisor, owner.n(), owner.center())?;
        Ok(Self {
            polygon,
            velocity: geometry::offset(speed, angle),
        })
    }

    #[inline]
    pub fn n(&self) -> u32 {
        self.polygon.n()
    }

    /// Move one tick. Returns false once the center has left the screen.
    pub fn update(&mut self, bounds: IVec2) -> bool {
        self.polygon.rect.translate(self.velocity);
        let c = self.polygon.center();
        !(c.x < 0 || c.x > bounds.x || c.y < 0 || c.y > bounds.y)
    }
}

/// A destroyed ship's polygon growing for `n + 1` frames
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub polygon: Polygon,
    frame: u32,
    frames: u32,
    growth: i32,
    timer: Timer,
}

impl Explosion {
    pub fn new(polygon: Polygon, frame_ms: i64, growth: i32, now: u64) -> Self {
        let frames = polygon.n() + 1;
        Self {
            polygon,
            frame: 0,
            frames,
            growth,
            timer: Timer::new(frame_ms, now),
        }
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn is_finished(&self) -> bool {
        self.frame >= self.frames
    }

    /// Advance one animation frame if its timer allows
    pub fn advance(&mut self, now: u64) {
        if !self.is_finished() && self.timer.fire(now) {
            self.polygon.grow(self.growth);
            self.frame += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const BOUNDS: IVec2 = IVec2::new(800, 600);

    fn enemy_at(left: i32, top: i32, velocity: IVec2) -> Ship {
        let mut ship = Ship::enemy(50, 4, IVec2::new(400, 300), 0.0, 0.0).unwrap();
        ship.polygon.rect.set_left(left);
        ship.polygon.rect.set_top(top);
        ship.velocity = velocity;
        ship
    }

    #[test]
    fn test_polygon_rejects_degenerate_shapes() {
        assert!(matches!(
            Polygon::new(40, 2, IVec2::ZERO),
            Err(GameError::InvalidPolygon { vertices: 2, .. })
        ));
        assert!(Polygon::new(1, 5, IVec2::ZERO).is_err());
        assert!(Polygon::new(-10, 5, IVec2::ZERO).is_err());
        assert!(Polygon::new(2, 3, IVec2::ZERO).is_ok());
    }

    #[test]
    fn test_enemy_hull_matches_vertices() {
        let ship = Ship::enemy(100, 6, IVec2::new(100, 100), 3.0, 0.0).unwrap();
        assert_eq!(ship.hull(), 6);
        assert!(!ship.is_destroyed());
    }

    #[test]
    fn test_damage_until_destroyed() {
        let mut ship = Ship::enemy(100, 3, IVec2::new(100, 100), 3.0, 0.0).unwrap();
        assert!(ship.damage(0));
        assert!(ship.damage(0));
        assert!(!ship.is_destroyed());
        assert!(ship.damage(0));
        assert!(ship.is_destroyed());
        // Destroyed ships are not damaged again
        assert!(!ship.damage(0));
        assert_eq!(ship.hull(), 0);
    }

    #[test]
    fn test_player_clamped_to_screen() {
        let tuning = Tuning::default();
        let mut player = Ship::player(&tuning, 0).unwrap();
        assert_eq!(player.polygon.center(), IVec2::new(400, 500));
        player.follow_pointer(IVec2::new(0, 0), BOUNDS);
        assert_eq!(player.polygon.center(), IVec2::new(20, 20));
        player.follow_pointer(IVec2::new(900, 700), BOUNDS);
        assert_eq!(player.polygon.center(), IVec2::new(780, 580));
    }

    #[test]
    fn test_player_without_pointer_stays_put() {
        let tuning = Tuning::default();
        let mut player = Ship::player(&tuning, 0).unwrap();
        let ctx = UpdateContext {
            bounds: BOUNDS,
            pointer: None,
            spin: true,
        };
        player.update(&ctx);
        assert_eq!(player.polygon.center(), IVec2::new(400, 500));
    }

    #[test]
    fn test_bounce_left_edge() {
        let mut ship = enemy_at(-3, 100, IVec2::new(-5, 2));
        ship.keep_on_screen(BOUNDS);
        assert_eq!(ship.polygon.rect.left(), 0);
        assert_eq!(ship.velocity, IVec2::new(5, 2));
    }

    #[test]
    fn test_bounce_corner_flips_both_axes() {
        let mut ship = enemy_at(760, 560, IVec2::new(4, 3));
        ship.keep_on_screen(BOUNDS);
        assert_eq!(ship.velocity, IVec2::new(-4, -3));
        assert_eq!(ship.polygon.rect.right(), 799);
        assert_eq!(ship.polygon.rect.bottom(), 599);
    }

    #[test]
    fn test_pipeline_bounces_before_drifting() {
        let mut ship = enemy_at(-3, 100, IVec2::new(-5, 0));
        let ctx = UpdateContext {
            bounds: BOUNDS,
            pointer: None,
            spin: false,
        };
        ship.update(&ctx);
        assert_eq!(ship.polygon.rect.left(), 5);
    }

    #[test]
    fn test_spin_only_when_timer_fires() {
        let mut ship = enemy_at(100, 100, IVec2::ZERO).with_spin(5.0);
        let mut ctx = UpdateContext {
            bounds: BOUNDS,
            pointer: None,
            spin: false,
        };
        ship.update(&ctx);
        assert_eq!(ship.polygon.heading_deg, DEFAULT_HEADING_DEG);
        ctx.spin = true;
        ship.update(&ctx);
        assert_eq!(ship.polygon.heading_deg, DEFAULT_HEADING_DEG + 5.0);
    }

    #[test]
    fn test_player_shield_blocks_repeat_damage() {
        let tuning = Tuning {
            player_shield_ms: Some(500),
            ..Tuning::default()
        };
        let mut player = Ship::player(&tuning, 1000).unwrap();
        assert!(player.damage(1000));
        assert!(!player.damage(1200));
        assert!(player.damage(1500));
        assert_eq!(player.hull(), tuning.player_hull - 2);
    }

    #[test]
    fn test_trigger_respects_weapon_cooldown() {
        let tuning = Tuning::default();
        let mut player = Ship::player(&tuning, 0).unwrap();
        assert!(!player.trigger(100));
        player.set_fires(true);
        assert!(player.trigger(100));
        assert!(!player.trigger(120));
        assert!(player.trigger(150));
    }

    #[test]
    fn test_projectile_inherits_owner_shape() {
        let owner = Polygon::new(40, 3, IVec2::new(400, 500)).unwrap();
        let p = Projectile::new(&owner, 15.0, std::f64::consts::PI * 1.5, 4).unwrap();
        assert_eq!(p.n(), 3);
        assert_eq!(p.polygon.size(), 10);
        assert_eq!(p.polygon.center(), IVec2::new(400, 500));
        assert_eq!(p.velocity, IVec2::new(0, -15));
    }

    #[test]
    fn test_projectile_dies_off_screen() {
        let owner = Polygon::new(40, 3, IVec2::new(400, 20)).unwrap();
        let mut p = Projectile::new(&owner, 15.0, std::f64::consts::PI * 1.5, 4).unwrap();
        assert!(p.update(BOUNDS)); // y = 5
        assert!(!p.update(BOUNDS)); // y = -10
    }

    #[test]
    fn test_explosion_runs_n_plus_one_frames() {
        let polygon = Polygon::new(60, 4, IVec2::new(300, 300)).unwrap();
        let mut boom = Explosion::new(polygon, 30, 6, 0);
        let mut now = 0;
        while !boom.is_finished() {
            now += 30;
            boom.advance(now);
        }
        assert_eq!(boom.frame(), 5);
        assert_eq!(boom.polygon.size(), 60 + 5 * 6);
        assert_eq!(boom.polygon.center(), IVec2::new(300, 300));
    }

    proptest! {
        #[test]
        fn test_on_screen_enemy_keeps_heading(
            left in 0..=750i32,
            top in 0..=550i32,
            dx in -8..=8i32,
            dy in -8..=8i32,
        ) {
            let mut ship = enemy_at(left, top, IVec2::new(dx, dy));
            ship.keep_on_screen(BOUNDS);
            prop_assert_eq!(ship.velocity, IVec2::new(dx, dy));
            prop_assert_eq!(ship.polygon.rect.left(), left);
            prop_assert_eq!(ship.polygon.rect.top(), top);
        }
    }
}
