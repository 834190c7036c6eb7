//! Firing, projectile ballistics and hit resolution
//!
//! Projectiles resolve newest first, at most once per tick each, in this
//! order: expiry, walls, then tanks. Spent projectiles are only marked during
//! the pass and compacted afterwards, so removal never skips or revisits a
//! shot. Enemies are scanned newest first as well.

use glam::Vec2;

use super::collision::{circle_circle_hit, circle_rect_hit};
use super::effects::{
    BRICK_HIT_PARTICLES, ENEMY_DESTROYED_PARTICLES, ENEMY_HIT_PARTICLES, PLAYER_HIT_PARTICLES,
    STEEL_HIT_PARTICLES, emit,
};
use super::state::{EffectColor, GameMode, GameState, Owner, Projectile, Tank, TankKind};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, OUT_OF_BOUNDS_MARGIN};
use crate::heading_vector;
use crate::tuning::ProjectileTuning;

/// Spawn a projectile from the tank's muzzle unless it is still cooling down.
/// Returns true if a shot was fired.
pub fn fire(tank: &mut Tank, shots: &ProjectileTuning, projectiles: &mut Vec<Projectile>) -> bool {
    if tank.fire_cooldown > 0.0 {
        return false;
    }

    let owner = tank.owner();
    let (speed, radius) = match owner {
        Owner::Player => (shots.player_speed, shots.player_radius),
        Owner::Enemy => (shots.enemy_speed, shots.enemy_radius),
    };
    let dir = heading_vector(tank.angle);
    projectiles.push(Projectile {
        owner,
        pos: tank.pos + dir * (tank.radius + shots.muzzle_offset),
        vel: dir * speed,
        radius,
        life: shots.lifetime,
    });
    tank.fire_cooldown = tank.fire_rate;
    true
}

/// How a projectile was used up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Expired,
    OutOfBounds,
    Brick { destroyed: bool },
    Steel,
    /// Hit the player; `absorbed` if invulnerability ate the damage
    Player { absorbed: bool },
    Enemy { destroyed: bool },
}

fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < -OUT_OF_BOUNDS_MARGIN
        || pos.y < -OUT_OF_BOUNDS_MARGIN
        || pos.x > ARENA_WIDTH + OUT_OF_BOUNDS_MARGIN
        || pos.y > ARENA_HEIGHT + OUT_OF_BOUNDS_MARGIN
}

/// Advance every projectile and resolve its hits. Returns the impacts in
/// resolution order (newest projectile first).
pub fn update_projectiles(state: &mut GameState, dt: f32) -> Vec<Impact> {
    let was_running = state.mode == GameMode::Running;
    let mut impacts = Vec::new();
    let mut spent = vec![false; state.projectiles.len()];

    for i in (0..state.projectiles.len()).rev() {
        let shot = &mut state.projectiles[i];
        shot.pos += shot.vel * dt;
        shot.life -= dt;
        let shot = *shot;

        let impact = resolve_shot(state, &shot);
        spent[i] = impact.is_some();
        impacts.extend(impact);
    }

    let mut spent = spent.into_iter();
    state
        .projectiles
        .retain(|_| !spent.next().unwrap_or(false));

    // Kills later in the same pass still count toward the final score
    if was_running && state.mode == GameMode::Lose {
        state.final_score = Some(state.score);
        log::info!("Player destroyed, game over with score {}", state.score);
    }
    impacts
}

/// First matching outcome for one projectile, or `None` if it flies on
fn resolve_shot(state: &mut GameState, shot: &Projectile) -> Option<Impact> {
    if shot.life <= 0.0 {
        return Some(Impact::Expired);
    }
    if out_of_bounds(shot.pos) {
        return Some(Impact::OutOfBounds);
    }

    if let Some(idx) = state
        .walls
        .iter()
        .position(|w| circle_rect_hit(shot.pos, shot.radius, &w.rect))
    {
        return Some(hit_wall(state, idx, shot.pos));
    }

    match shot.owner {
        Owner::Enemy => {
            let player = &state.player;
            if circle_circle_hit(shot.pos, shot.radius, player.pos, player.radius) {
                return Some(hit_player(state));
            }
        }
        Owner::Player => {
            if let Some(idx) = state
                .enemies
                .iter()
                .rposition(|e| circle_circle_hit(shot.pos, shot.radius, e.pos, e.radius))
            {
                return Some(hit_enemy(state, idx));
            }
        }
    }

    None
}

fn hit_wall(state: &mut GameState, idx: usize, at: Vec2) -> Impact {
    let (impact, color, particles) = if state.walls[idx].hp().is_none() {
        (Impact::Steel, EffectColor::Steel, STEEL_HIT_PARTICLES)
    } else {
        let destroyed = state.walls[idx].take_hit();
        (Impact::Brick { destroyed }, EffectColor::Brick, BRICK_HIT_PARTICLES)
    };
    emit(
        &mut state.cues,
        &mut state.particles,
        &mut state.rng,
        at,
        color,
        particles,
    );

    if impact == (Impact::Brick { destroyed: true }) {
        let wall = state.walls.remove(idx);
        log::debug!("Brick at ({}, {}) destroyed", wall.rect.x, wall.rect.y);
    }
    impact
}

fn hit_player(state: &mut GameState) -> Impact {
    let hit_invuln = state.tuning.player.hit_invuln;
    let TankKind::Player(traits) = &mut state.player.kind else {
        unreachable!("player slot holds an enemy tank");
    };
    if traits.invuln > 0.0 {
        return Impact::Player { absorbed: true };
    }

    traits.invuln = hit_invuln;
    state.lives = state.lives.saturating_sub(1);
    emit(
        &mut state.cues,
        &mut state.particles,
        &mut state.rng,
        state.player.pos,
        EffectColor::Player,
        PLAYER_HIT_PARTICLES,
    );

    if state.lives == 0 {
        state.mode = GameMode::Lose;
    } else {
        let (x, y) = state.tuning.player.spawn;
        state.player.pos = Vec2::new(x, y);
        state.player.speed = 0.0;
        log::debug!("Player hit, {} lives left", state.lives);
    }
    Impact::Player { absorbed: false }
}

fn hit_enemy(state: &mut GameState, idx: usize) -> Impact {
    let enemy = &mut state.enemies[idx];
    let pos = enemy.pos;
    let destroyed = match &mut enemy.kind {
        TankKind::Enemy(brain) => {
            brain.hp = brain.hp.saturating_sub(1);
            brain.hp == 0
        }
        TankKind::Player(_) => true,
    };

    if destroyed {
        state.enemies.remove(idx);
        state.score += state.tuning.rules.score_per_kill;
        emit(
            &mut state.cues,
            &mut state.particles,
            &mut state.rng,
            pos,
            EffectColor::Enemy,
            ENEMY_DESTROYED_PARTICLES,
        );
        log::debug!(
            "Enemy destroyed, score {} ({} left)",
            state.score,
            state.enemies.len()
        );
    } else {
        emit(
            &mut state.cues,
            &mut state.particles,
            &mut state.rng,
            pos,
            EffectColor::Enemy,
            ENEMY_HIT_PARTICLES,
        );
    }
    Impact::Enemy { destroyed }
}
