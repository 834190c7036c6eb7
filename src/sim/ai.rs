//! Enemy decision policy
//!
//! Enemies re-decide on a jittered timer (chase the player or wander), steer
//! smoothly toward the chosen heading and speed every tick, and take
//! opportunistic shots whenever they roughly face the player.

use glam::Vec2;
use rand::Rng;

use super::state::{Tank, TankKind, sample};
use crate::tuning::AiTuning;
use crate::{lerp, normalize_angle};

/// Outcome of a decision
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Chase,
    Wander,
}

/// Count down the decision timer and, when it runs out, pick a new desired
/// heading and speed. Returns the new intent if a decision was made.
pub fn think(
    tank: &mut Tank,
    target: Vec2,
    dt: f32,
    ai: &AiTuning,
    rng: &mut impl Rng,
) -> Option<Intent> {
    let (angle, max_speed, pos) = (tank.angle, tank.max_speed, tank.pos);
    let TankKind::Enemy(brain) = &mut tank.kind else {
        return None;
    };

    brain.think_timer -= dt;
    if brain.think_timer > 0.0 {
        return None;
    }
    brain.think_timer = sample(rng, ai.think_interval) * brain.jitter;

    let to_target = target - pos;
    let dist = to_target.length();
    let bearing = to_target.y.atan2(to_target.x);

    let chase_chance = if dist < ai.near_range {
        ai.chase_chance_near
    } else {
        ai.chase_chance_far
    };

    let intent = if rng.random::<f32>() < chase_chance {
        brain.desired_angle = bearing + lerp(-ai.chase_spread, ai.chase_spread, rng.random());
        brain.desired_speed = if dist > ai.close_range {
            max_speed
        } else {
            max_speed * ai.close_speed_factor
        };
        Intent::Chase
    } else {
        brain.desired_angle = angle + lerp(-ai.wander_spread, ai.wander_spread, rng.random());
        brain.desired_speed = max_speed * sample(rng, ai.wander_speed);
        Intent::Wander
    };
    log::trace!(
        "enemy at ({:.0}, {:.0}) -> {:?}, heading {:.2}",
        pos.x,
        pos.y,
        intent,
        brain.desired_angle
    );
    Some(intent)
}

/// Turn toward the desired heading (turn-rate limited) and accelerate toward
/// the desired speed (acceleration limited)
pub fn steer(tank: &mut Tank, dt: f32, ai: &AiTuning) {
    let TankKind::Enemy(brain) = &tank.kind else {
        return;
    };
    let (desired_angle, desired_speed) = (brain.desired_angle, brain.desired_speed);

    let error = normalize_angle(desired_angle - tank.angle);
    let turn = error.clamp(-ai.max_steer, ai.max_steer) * tank.turn_rate * dt;
    tank.angle = normalize_angle(tank.angle + turn);

    let max_dv = tank.accel * dt;
    tank.speed += (desired_speed - tank.speed).clamp(-max_dv, max_dv);
    tank.clamp_speed();
}

/// True if the tank's heading is within the facing tolerance of `target`
pub fn is_facing(tank: &Tank, target: Vec2, ai: &AiTuning) -> bool {
    let to_target = target - tank.pos;
    let bearing = to_target.y.atan2(to_target.x);
    normalize_angle(bearing - tank.angle).abs() < ai.facing_tolerance
}

/// Facing check plus the per-tick trigger roll. The cooldown gate is applied
/// by the firing itself.
pub fn wants_to_fire(tank: &Tank, target: Vec2, ai: &AiTuning, rng: &mut impl Rng) -> bool {
    is_facing(tank, target, ai) && rng.random::<f32>() < ai.fire_chance
}
