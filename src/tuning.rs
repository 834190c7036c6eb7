//! Data-driven game balance
//!
//! Every gameplay number that is a matter of taste rather than geometry lives
//! here. `Tuning::default()` is the stock balance; a JSON document can override
//! any subset of it.

use serde::{Deserialize, Serialize};

/// Player tank stats
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    pub max_speed: f32,
    /// Reverse speed limit as a fraction of `max_speed`
    pub reverse_factor: f32,
    pub accel: f32,
    /// Radians per second
    pub turn_rate: f32,
    pub strafe_speed: f32,
    /// Seconds between shots
    pub fire_rate: f32,
    /// Spawn position (world units)
    pub spawn: (f32, f32),
    /// Immunity granted when a run starts
    pub spawn_invuln: f32,
    /// Immunity granted after losing a life
    pub hit_invuln: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: 16.0,
            max_speed: 240.0,
            reverse_factor: 0.55,
            accel: 620.0,
            turn_rate: 2.8,
            strafe_speed: 140.0,
            fire_rate: 0.28,
            spawn: (96.0, crate::consts::ARENA_HEIGHT - 96.0),
            spawn_invuln: 1.0,
            hit_invuln: 1.2,
        }
    }
}

/// Enemy tank stats; ranges are sampled once per enemy at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub count: usize,
    pub radius: f32,
    pub max_speed: f32,
    pub reverse_factor: f32,
    pub accel: f32,
    pub turn_rate: f32,
    pub hp: u8,
    pub initial_cooldown: (f32, f32),
    pub fire_rate: (f32, f32),
    pub initial_think: (f32, f32),
    pub jitter: (f32, f32),
    /// Enemies are assigned spawn points round-robin
    pub spawn_points: Vec<(f32, f32)>,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        use crate::consts::{ARENA_WIDTH, TILE_SIZE};
        let y = TILE_SIZE * 2.0;
        Self {
            count: 6,
            radius: 16.0,
            max_speed: 190.0,
            reverse_factor: 0.3,
            accel: 520.0,
            turn_rate: 2.4,
            hp: 1,
            initial_cooldown: (0.1, 0.6),
            fire_rate: (0.55, 0.9),
            initial_think: (0.25, 0.6),
            jitter: (0.5, 1.2),
            spawn_points: vec![
                (96.0, y),
                (ARENA_WIDTH - 96.0, y),
                (ARENA_WIDTH / 2.0, y),
                (ARENA_WIDTH / 2.0 - 180.0, y),
                (ARENA_WIDTH / 2.0 + 180.0, y),
            ],
        }
    }
}

/// Enemy decision policy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Base re-decision interval, scaled by the enemy's jitter
    pub think_interval: (f32, f32),
    /// Chase probability when the player is within `near_range`
    pub chase_chance_near: f32,
    pub chase_chance_far: f32,
    pub near_range: f32,
    /// Below this distance a chasing enemy slows to `close_speed_factor`
    pub close_range: f32,
    pub close_speed_factor: f32,
    pub chase_spread: f32,
    pub wander_spread: f32,
    pub wander_speed: (f32, f32),
    /// Max angular error (rad) at which an enemy counts as facing the player
    pub facing_tolerance: f32,
    /// Per-tick chance to pull the trigger while facing the player
    pub fire_chance: f32,
    /// Steering error is clamped to this before scaling by turn rate
    pub max_steer: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            think_interval: (0.22, 0.52),
            chase_chance_near: 0.80,
            chase_chance_far: 0.50,
            near_range: 520.0,
            close_range: 200.0,
            close_speed_factor: 0.4,
            chase_spread: 0.35,
            wander_spread: 1.4,
            wander_speed: (0.2, 0.9),
            facing_tolerance: 0.45,
            fire_chance: 0.45,
            max_steer: 1.0,
        }
    }
}

/// Projectile stats per owner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub player_speed: f32,
    pub enemy_speed: f32,
    pub player_radius: f32,
    pub enemy_radius: f32,
    pub lifetime: f32,
    /// Extra distance past the tank's edge where shots appear
    pub muzzle_offset: f32,
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self {
            player_speed: 520.0,
            enemy_speed: 460.0,
            player_radius: 4.5,
            enemy_radius: 4.0,
            lifetime: 1.8,
            muzzle_offset: 10.0,
        }
    }
}

/// Terrain effects on movement
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainTuning {
    /// Per-tick speed retention at 60 ticks/s
    pub drag: f32,
    pub water_friction: f32,
    pub grass_friction: f32,
    pub brick_hp: u8,
}

impl Default for TerrainTuning {
    fn default() -> Self {
        Self {
            drag: 0.98,
            water_friction: 0.70,
            grass_friction: 0.88,
            brick_hp: 2,
        }
    }
}

/// Session rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesTuning {
    pub lives: u8,
    pub score_per_kill: u64,
}

impl Default for RulesTuning {
    fn default() -> Self {
        Self {
            lives: 3,
            score_per_kill: 100,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub enemy: EnemyTuning,
    pub ai: AiTuning,
    pub projectile: ProjectileTuning,
    pub terrain: TerrainTuning,
    pub rules: RulesTuning,
}

impl Tuning {
    /// Parse a (possibly partial) balance table; missing fields keep their
    /// defaults. A table that parses but fails [`Tuning::validate`] is an error.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning
            .validate()
            .map_err(<serde_json::Error as serde::de::Error>::custom)?;
        log::info!(
            "Loaded tuning: {} enemies, {} lives",
            tuning.enemy.count,
            tuning.rules.lives
        );
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check the bounds the simulation relies on: tanks must fit inside the
    /// arena, and every speed, acceleration and steering limit must be a
    /// non-negative number.
    pub fn validate(&self) -> Result<(), String> {
        use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH, EDGE_GAP};

        let fits = |radius: f32| {
            radius > 0.0 && 2.0 * (radius + EDGE_GAP) <= ARENA_WIDTH.min(ARENA_HEIGHT)
        };
        let non_negative = |name: &str, value: f32| {
            if value >= 0.0 {
                Ok(())
            } else {
                Err(format!("{name} must be >= 0, got {value}"))
            }
        };

        for (who, radius) in [("player", self.player.radius), ("enemy", self.enemy.radius)] {
            if !fits(radius) {
                return Err(format!("{who}.radius {radius} does not fit the arena"));
            }
        }
        non_negative("player.max_speed", self.player.max_speed)?;
        non_negative("player.reverse_factor", self.player.reverse_factor)?;
        non_negative("player.accel", self.player.accel)?;
        non_negative("enemy.max_speed", self.enemy.max_speed)?;
        non_negative("enemy.reverse_factor", self.enemy.reverse_factor)?;
        non_negative("enemy.accel", self.enemy.accel)?;
        non_negative("ai.max_steer", self.ai.max_steer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let json = r#"{ "ai": { "fire_chance": 0.1 }, "rules": { "lives": 5 } }"#;
        let tuning = Tuning::from_json(json).expect("valid json");
        assert_eq!(tuning.ai.fire_chance, 0.1);
        assert_eq!(tuning.ai.facing_tolerance, 0.45);
        assert_eq!(tuning.rules.lives, 5);
        assert_eq!(tuning.rules.score_per_kill, 100);
        assert_eq!(tuning.enemy.spawn_points.len(), 5);
    }

    #[test]
    fn test_json_roundtrip_preserves_values() {
        let tuning = Tuning::default();
        let json = tuning.to_json().expect("serialize");
        let back = Tuning::from_json(&json).expect("deserialize");
        assert_eq!(back.player.spawn, tuning.player.spawn);
        assert_eq!(back.terrain.brick_hp, 2);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(Tuning::from_json("{ not json").is_err());
        assert!(Tuning::from_json(r#"{ "rules": { "lives": -1 } }"#).is_err());
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        assert!(Tuning::default().validate().is_ok());

        let oversized = r#"{ "player": { "radius": 500 } }"#;
        let err = Tuning::from_json(oversized).expect_err("radius too large");
        assert!(err.to_string().contains("player.radius"));

        assert!(Tuning::from_json(r#"{ "enemy": { "max_speed": -1 } }"#).is_err());
        assert!(Tuning::from_json(r#"{ "player": { "reverse_factor": -0.5 } }"#).is_err());
        assert!(Tuning::from_json(r#"{ "ai": { "max_steer": -1 } }"#).is_err());
        assert!(Tuning::from_json(r#"{ "enemy": { "radius": 0 } }"#).is_err());
    }
}
