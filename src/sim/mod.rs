//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only, owned by the game state
//! - Stable iteration order (collection order)
//! - No rendering or platform dependencies

pub mod ai;
pub mod arena;
pub mod collision;
pub mod combat;
pub mod effects;
pub mod movement;
pub mod state;
pub mod tick;

pub use arena::{TileGrid, TileKind, Wall, WallKind, derive_walls, generate_level};
pub use collision::{Rect, aabb_intersect, circle_circle_hit, circle_rect_hit};
pub use combat::{Impact, fire, update_projectiles};
pub use movement::{DriveAxes, Obstacles, apply_motion, drive_player};
pub use state::{
    EffectColor, EffectCue, GameMode, GameState, Hud, Owner, Particle, Projectile, Tank, TankKind,
};
pub use tick::{TickInput, restart, start, tick, toggle_pause};
