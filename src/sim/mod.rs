//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as `now` values, never from a clock
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each group)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod geometry;
pub mod group;
pub mod state;
pub mod tick;
pub mod timer;
pub mod wave;

pub use collision::{ContactReport, Hit, HitReport, clash, collide, contact, knockback, resolve_hits};
pub use entity::{Behavior, Explosion, Polygon, Projectile, Ship, ShipKind, UpdateContext};
pub use geometry::{Rect, angle_between, offset, vertices};
pub use group::{Group, Swarm, Wave};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
pub use timer::Timer;
pub use wave::WaveDirector;
