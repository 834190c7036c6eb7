//! Simulation tick
//!
//! Core game loop: one call applies the mode commands, then, while running,
//! advances the player, the enemies (in collection order), the projectiles
//! and the particles, and finally checks for a win.

use super::ai;
use super::combat::{fire, update_projectiles};
use super::effects::update_particles;
use super::movement::{DriveAxes, Obstacles, apply_motion, decay_timers, drive_player};
use super::state::{GameMode, GameState};
use crate::consts::MAX_TICK_DT;
use crate::heading_vector;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start a run from the intro (or resume from pause)
    pub start: bool,
    /// Back to the intro with a fresh world
    pub restart: bool,
    /// Pause toggle
    pub toggle_pause: bool,

    // Held controls, sampled once per tick
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub fire: bool,
}

impl TickInput {
    /// Net control axes; opposite keys cancel out
    pub fn axes(&self) -> DriveAxes {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        DriveAxes {
            turn: axis(self.turn_left, self.turn_right),
            throttle: axis(self.backward, self.forward),
            strafe: axis(self.strafe_left, self.strafe_right),
        }
    }
}

/// Bound a requested tick duration to `[0, MAX_TICK_DT]`
pub fn clamp_dt(dt: f32) -> f32 {
    if dt > 0.0 { dt.min(MAX_TICK_DT) } else { 0.0 }
}

/// Begin a run from the intro, or resume a paused one. Ignored in every
/// other mode.
pub fn start(state: &mut GameState) {
    match state.mode {
        GameMode::Intro => {
            state.reset_run();
            state.mode = GameMode::Running;
            log::info!("Run started (seed {})", state.seed);
        }
        GameMode::Paused => {
            state.mode = GameMode::Running;
            log::info!("Resumed");
        }
        GameMode::Running | GameMode::Win | GameMode::Lose => {}
    }
}

/// Back to the intro from any mode, with a regenerated world
pub fn restart(state: &mut GameState) {
    state.mode = GameMode::Intro;
    state.reset_run();
    log::info!("Restarted");
}

pub fn toggle_pause(state: &mut GameState) {
    match state.mode {
        GameMode::Running => {
            state.mode = GameMode::Paused;
            log::info!("Paused");
        }
        GameMode::Paused => {
            state.mode = GameMode::Running;
            log::info!("Resumed");
        }
        _ => {}
    }
}

/// Advance the game state by one tick of (at most) `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = clamp_dt(dt);
    state.elapsed += dt;
    state.cues.clear();

    if input.restart {
        restart(state);
    } else if input.start {
        start(state);
    }
    if input.toggle_pause {
        toggle_pause(state);
    }

    // Don't tick unless running
    if state.mode != GameMode::Running {
        return;
    }

    update_player(state, input, dt);
    update_enemies(state, dt);
    update_projectiles(state, dt);
    update_particles(&mut state.particles, dt);

    // A loss during hit resolution takes precedence
    if state.mode == GameMode::Running && state.enemies.is_empty() {
        state.mode = GameMode::Win;
        log::info!("All enemies destroyed, score {}", state.score);
    }
}

fn update_player(state: &mut GameState, input: &TickInput, dt: f32) {
    let obstacles = Obstacles {
        grid: &state.grid,
        walls: &state.walls,
        terrain: &state.tuning.terrain,
    };
    drive_player(&mut state.player, input.axes(), dt, &obstacles);

    if input.fire {
        fire(&mut state.player, &state.tuning.projectile, &mut state.projectiles);
    }
    decay_timers(&mut state.player, dt);
}

fn update_enemies(state: &mut GameState, dt: f32) {
    let target = state.player.pos;
    let obstacles = Obstacles {
        grid: &state.grid,
        walls: &state.walls,
        terrain: &state.tuning.terrain,
    };
    let policy = &state.tuning.ai;

    for enemy in state.enemies.iter_mut() {
        ai::think(enemy, target, dt, policy, &mut state.rng);
        ai::steer(enemy, dt, policy);

        let delta = heading_vector(enemy.angle) * enemy.speed * dt;
        apply_motion(enemy, delta, dt, &obstacles);

        if ai::wants_to_fire(enemy, target, policy, &mut state.rng) {
            fire(enemy, &state.tuning.projectile, &mut state.projectiles);
        }
        decay_timers(enemy, dt);
    }
}
