//! Tank movement against the tile world
//!
//! Each axis is stepped and checked on its own, so a tank driving diagonally
//! into a wall keeps sliding along it instead of stopping dead.

use glam::Vec2;

use super::arena::{TileGrid, Wall};
use super::collision::circle_rect_hit;
use super::state::{Tank, TankKind};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, EDGE_GAP};
use crate::tuning::TerrainTuning;
use crate::{heading_vector, normalize_angle};

/// Read-only view of everything a moving tank can bump into
#[derive(Clone, Copy)]
pub struct Obstacles<'a> {
    pub grid: &'a TileGrid,
    pub walls: &'a [Wall],
    pub terrain: &'a TerrainTuning,
}

impl Obstacles<'_> {
    fn blocks(&self, pos: Vec2, radius: f32) -> bool {
        self.walls.iter().any(|w| circle_rect_hit(pos, radius, &w.rect))
    }
}

/// Move `tank` by `delta`, resolving x then y against the arena edges and
/// walls, then apply drag and terrain friction to its speed
pub fn apply_motion(tank: &mut Tank, delta: Vec2, dt: f32, obstacles: &Obstacles) {
    let r = tank.radius;
    debug_assert!(delta.is_finite(), "non-finite displacement {delta}");

    let prev_x = tank.pos.x;
    tank.pos.x = (tank.pos.x + delta.x).clamp(r + EDGE_GAP, ARENA_WIDTH - r - EDGE_GAP);
    if obstacles.blocks(tank.pos, r) {
        tank.pos.x = prev_x;
    }

    let prev_y = tank.pos.y;
    tank.pos.y = (tank.pos.y + delta.y).clamp(r + EDGE_GAP, ARENA_HEIGHT - r - EDGE_GAP);
    if obstacles.blocks(tank.pos, r) {
        tank.pos.y = prev_y;
    }

    // 60 Hz-calibrated drag generalised to any dt
    let friction = obstacles.grid.friction_at(tank.pos, obstacles.terrain);
    tank.speed *= obstacles.terrain.drag.powf(60.0 * dt) * friction;
}

/// Net control axes for the player, each in {-1, 0, 1}
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DriveAxes {
    /// Left -1, right +1
    pub turn: f32,
    /// Backward -1, forward +1
    pub throttle: f32,
    /// Left -1, right +1
    pub strafe: f32,
}

/// Turn, accelerate and strafe the player tank, then move it
pub fn drive_player(tank: &mut Tank, axes: DriveAxes, dt: f32, obstacles: &Obstacles) {
    let strafe_speed = match &tank.kind {
        TankKind::Player(traits) => traits.strafe_speed,
        TankKind::Enemy(_) => 0.0,
    };

    tank.angle = normalize_angle(tank.angle + axes.turn * tank.turn_rate * dt);

    tank.speed += axes.throttle * tank.accel * dt;
    tank.clamp_speed();

    let forward = heading_vector(tank.angle) * tank.speed * dt;
    let right = heading_vector(tank.angle + std::f32::consts::FRAC_PI_2);
    let side = right * axes.strafe * strafe_speed * dt;
    apply_motion(tank, forward + side, dt, obstacles);
}

/// Count down cooldown and immunity timers, floored at zero
pub fn decay_timers(tank: &mut Tank, dt: f32) {
    tank.fire_cooldown = (tank.fire_cooldown - dt).max(0.0);
    if let TankKind::Player(traits) = &mut tank.kind {
        traits.invuln = (traits.invuln - dt).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILE_SIZE;
    use crate::sim::arena::{TileKind, derive_walls};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn open_arena() -> TileGrid {
        TileGrid::empty(ARENA_WIDTH, ARENA_HEIGHT)
    }

    fn tank_at(x: f32, y: f32) -> Tank {
        let mut tank = Tank::player(&Tuning::default());
        tank.pos = Vec2::new(x, y);
        tank
    }

    #[test]
    fn test_clamps_to_arena_edges() {
        let grid = open_arena();
        let terrain = TerrainTuning::default();
        let obstacles = Obstacles {
            grid: &grid,
            walls: &[],
            terrain: &terrain,
        };

        let mut tank = tank_at(20.0, 20.0);
        apply_motion(&mut tank, Vec2::new(-500.0, -500.0), 1.0 / 60.0, &obstacles);
        assert_eq!(tank.pos, Vec2::new(17.0, 17.0));

        apply_motion(&mut tank, Vec2::new(5000.0, 5000.0), 1.0 / 60.0, &obstacles);
        assert_eq!(tank.pos, Vec2::new(ARENA_WIDTH - 17.0, ARENA_HEIGHT - 17.0));
    }

    #[test]
    fn test_blocked_axis_reverts_other_axis_slides() {
        let mut grid = open_arena();
        grid.set(5, 5, TileKind::Steel);
        let walls = derive_walls(&grid, 2);
        let terrain = TerrainTuning::default();
        let obstacles = Obstacles {
            grid: &grid,
            walls: &walls,
            terrain: &terrain,
        };

        // Left of the steel cell (x 160..192), touching distance 17
        let mut tank = tank_at(160.0 - 17.0, 176.0);
        apply_motion(&mut tank, Vec2::new(3.0, 4.0), 1.0 / 60.0, &obstacles);
        assert_eq!(tank.pos.x, 143.0);
        assert_eq!(tank.pos.y, 180.0);
    }

    #[test]
    fn test_drag_is_frame_rate_independent() {
        let grid = open_arena();
        let terrain = TerrainTuning::default();
        let obstacles = Obstacles {
            grid: &grid,
            walls: &[],
            terrain: &terrain,
        };

        let mut a = tank_at(300.0, 300.0);
        a.speed = 100.0;
        apply_motion(&mut a, Vec2::ZERO, 1.0 / 60.0, &obstacles);
        assert!((a.speed - 98.0).abs() < 1e-3);

        let mut b = tank_at(300.0, 300.0);
        b.speed = 100.0;
        apply_motion(&mut b, Vec2::ZERO, 1.0 / 120.0, &obstacles);
        apply_motion(&mut b, Vec2::ZERO, 1.0 / 120.0, &obstacles);
        assert!((a.speed - b.speed).abs() < 1e-3);
    }

    #[test]
    fn test_water_slows() {
        let mut grid = open_arena();
        grid.set(9, 9, TileKind::Water);
        let terrain = TerrainTuning::default();
        let obstacles = Obstacles {
            grid: &grid,
            walls: &[],
            terrain: &terrain,
        };

        let mut tank = tank_at(9.5 * TILE_SIZE, 9.5 * TILE_SIZE);
        tank.speed = 100.0;
        apply_motion(&mut tank, Vec2::ZERO, 1.0 / 60.0, &obstacles);
        assert!((tank.speed - 100.0 * 0.98 * 0.70).abs() < 1e-3);
    }

    #[test]
    fn test_drive_player_turn_and_reverse_limit() {
        let grid = open_arena();
        let terrain = TerrainTuning::default();
        let obstacles = Obstacles {
            grid: &grid,
            walls: &[],
            terrain: &terrain,
        };

        let mut tank = tank_at(480.0, 360.0);
        let start_angle = tank.angle;
        let axes = DriveAxes {
            turn: 1.0,
            throttle: -1.0,
            strafe: 0.0,
        };
        for _ in 0..120 {
            drive_player(&mut tank, axes, 1.0 / 60.0, &obstacles);
        }
        assert!(tank.angle != start_angle);
        assert!(tank.speed < 0.0);
        assert!(tank.speed >= -240.0 * 0.55);
    }

    #[test]
    fn test_strafe_moves_sideways() {
        let grid = open_arena();
        let terrain = TerrainTuning::default();
        let obstacles = Obstacles {
            grid: &grid,
            walls: &[],
            terrain: &terrain,
        };

        // Facing up (-π/2); strafing right moves toward +x
        let mut tank = tank_at(480.0, 360.0);
        let axes = DriveAxes {
            turn: 0.0,
            throttle: 0.0,
            strafe: 1.0,
        };
        drive_player(&mut tank, axes, 0.1, &obstacles);
        assert!((tank.pos.x - 494.0).abs() < 1e-3);
        assert!((tank.pos.y - 360.0).abs() < 1e-3);
    }

    #[test]
    fn test_decay_timers_floor_at_zero() {
        let mut tank = tank_at(100.0, 100.0);
        tank.fire_cooldown = 0.01;
        decay_timers(&mut tank, 0.5);
        assert_eq!(tank.fire_cooldown, 0.0);
        assert_eq!(tank.invuln(), 0.5);
        decay_timers(&mut tank, 0.5);
        assert_eq!(tank.invuln(), 0.0);
    }

    fn level_walls() -> (TileGrid, Vec<Wall>) {
        let grid = crate::sim::arena::generate_level(ARENA_WIDTH, ARENA_HEIGHT);
        let walls = derive_walls(&grid, 2);
        (grid, walls)
    }

    proptest! {
        #[test]
        fn motion_stays_in_bounds_and_out_of_walls(
            x in 17.0f32..(ARENA_WIDTH - 17.0),
            y in 17.0f32..(ARENA_HEIGHT - 17.0),
            dx in -40.0f32..40.0,
            dy in -40.0f32..40.0,
        ) {
            let (grid, walls) = level_walls();
            let terrain = TerrainTuning::default();
            let obstacles = Obstacles {
                grid: &grid,
                walls: &walls,
                terrain: &terrain,
            };
            let mut tank = tank_at(x, y);
            let r = tank.radius;
            prop_assume!(!walls.iter().any(|w| circle_rect_hit(tank.pos, r, &w.rect)));

            apply_motion(&mut tank, Vec2::new(dx, dy), 1.0 / 60.0, &obstacles);

            prop_assert!(tank.pos.x >= r + 1.0 && tank.pos.x <= ARENA_WIDTH - r - 1.0);
            prop_assert!(tank.pos.y >= r + 1.0 && tank.pos.y <= ARENA_HEIGHT - r - 1.0);
            for wall in &walls {
                prop_assert!(!circle_rect_hit(tank.pos, r, &wall.rect));
            }
        }
    }
}
