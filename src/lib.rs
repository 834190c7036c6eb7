//! Tank Arena - A tile-based arcade tank combat simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, AI, ballistics, game mode)
//! - `tuning`: Data-driven game balance
//!
//! Rendering, input binding and HUD presentation are left to the host; the
//! simulation only consumes [`sim::TickInput`] and exposes [`sim::GameState`].

pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest span a single tick may simulate (avoids huge jumps after a stall)
    pub const MAX_TICK_DT: f32 = 0.033;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 32.0;
    /// Arena dimensions
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Projectiles further than this outside the arena are dropped
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 20.0;
    /// Gap kept between a tank's edge and the arena edge
    pub const EDGE_GAP: f32 = 1.0;
}

/// Normalize angle to (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if angle > -PI && angle <= PI {
        return angle;
    }
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_boundaries() {
        assert_eq!(normalize_angle(PI), PI);
        assert_eq!(normalize_angle(0.0), 0.0);
        let wrapped = normalize_angle(-PI);
        assert!(wrapped > 0.0 && (wrapped - PI).abs() < 1e-5);
        assert!((normalize_angle(-PI / 2.0 - 2.0 * PI) + PI / 2.0).abs() < 1e-4);
        assert!((normalize_angle(PI / 2.0 + 4.0 * PI) - PI / 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_lerp() {
        assert_eq!(lerp(0.22, 0.52, 0.0), 0.22);
        assert!((lerp(0.22, 0.52, 1.0) - 0.52).abs() < 1e-6);
        assert_eq!(lerp(-1.0, 1.0, 0.5), 0.0);
    }

    proptest! {
        #[test]
        fn normalize_angle_in_range(a in -1000.0f32..1000.0) {
            let n = normalize_angle(a);
            prop_assert!(n > -PI && n <= PI, "{} -> {}", a, n);
        }

        #[test]
        fn normalize_angle_idempotent(a in -1000.0f32..1000.0) {
            let n = normalize_angle(a);
            prop_assert_eq!(normalize_angle(n), n);
        }
    }
}
