//! Game state and core simulation types
//!
//! One `GameState` is one independent run: it owns the world, the RNG and
//! the balance table. Nothing in the simulation is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::{TileGrid, Wall, derive_walls, generate_level};
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::lerp;
use crate::tuning::Tuning;

/// Current mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    /// Waiting for the start command
    #[default]
    Intro,
    /// Simulation active
    Running,
    /// Simulation frozen until resumed
    Paused,
    /// All enemies destroyed
    Win,
    /// Out of lives
    Lose,
}

/// Who fired a projectile; decides what it can hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// Player-only state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerTraits {
    pub strafe_speed: f32,
    /// Seconds of damage immunity left
    pub invuln: f32,
}

/// Enemy-only state: the decision policy's memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyBrain {
    pub desired_angle: f32,
    pub desired_speed: f32,
    /// Counts down to the next decision
    pub think_timer: f32,
    /// Fixed per-enemy scale on the decision interval
    pub jitter: f32,
    pub hp: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TankKind {
    Player(PlayerTraits),
    Enemy(EnemyBrain),
}

/// A tank, player or enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    pub pos: Vec2,
    pub radius: f32,
    /// Heading (radians, normalized to (-π, π])
    pub angle: f32,
    /// Signed speed along the heading
    pub speed: f32,
    pub max_speed: f32,
    /// Reverse limit as a fraction of `max_speed`
    pub reverse_factor: f32,
    pub accel: f32,
    pub turn_rate: f32,
    pub fire_cooldown: f32,
    /// Seconds between shots
    pub fire_rate: f32,
    pub kind: TankKind,
}

impl Tank {
    pub fn player(tuning: &Tuning) -> Self {
        let p = &tuning.player;
        Self {
            pos: Vec2::new(p.spawn.0, p.spawn.1),
            radius: p.radius,
            angle: -std::f32::consts::FRAC_PI_2,
            speed: 0.0,
            max_speed: p.max_speed,
            reverse_factor: p.reverse_factor,
            accel: p.accel,
            turn_rate: p.turn_rate,
            fire_cooldown: 0.0,
            fire_rate: p.fire_rate,
            kind: TankKind::Player(PlayerTraits {
                strafe_speed: p.strafe_speed,
                invuln: p.spawn_invuln,
            }),
        }
    }

    /// Enemy number `index`, placed on the spawn points round-robin
    pub fn enemy(index: usize, tuning: &Tuning, rng: &mut impl Rng) -> Self {
        let e = &tuning.enemy;
        let spawn = e
            .spawn_points
            .get(index % e.spawn_points.len().max(1))
            .copied()
            .unwrap_or((ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0));
        let down = std::f32::consts::FRAC_PI_2;
        Self {
            pos: Vec2::new(spawn.0, spawn.1),
            radius: e.radius,
            angle: down,
            speed: 0.0,
            max_speed: e.max_speed,
            reverse_factor: e.reverse_factor,
            accel: e.accel,
            turn_rate: e.turn_rate,
            fire_cooldown: sample(rng, e.initial_cooldown),
            fire_rate: sample(rng, e.fire_rate),
            kind: TankKind::Enemy(EnemyBrain {
                desired_angle: down,
                desired_speed: 0.0,
                think_timer: sample(rng, e.initial_think),
                jitter: sample(rng, e.jitter),
                hp: e.hp,
            }),
        }
    }

    pub fn owner(&self) -> Owner {
        match self.kind {
            TankKind::Player(_) => Owner::Player,
            TankKind::Enemy(_) => Owner::Enemy,
        }
    }

    /// Clamp speed to [-reverse limit, max speed]
    pub fn clamp_speed(&mut self) {
        self.speed = self
            .speed
            .clamp(-self.max_speed * self.reverse_factor, self.max_speed);
    }

    pub fn invuln(&self) -> f32 {
        match &self.kind {
            TankKind::Player(traits) => traits.invuln,
            TankKind::Enemy(_) => 0.0,
        }
    }
}

/// Uniform sample from `[lo, hi]` given as a tuning range
pub(crate) fn sample(rng: &mut impl Rng, (lo, hi): (f32, f32)) -> f32 {
    lerp(lo, hi, rng.random::<f32>())
}

/// A shell in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Seconds left before it fizzles
    pub life: f32,
}

/// Palette hint for the renderer; the core never draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectColor {
    Brick,
    Steel,
    Player,
    Enemy,
}

/// A visual event emitted during a tick for the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectCue {
    pub pos: Vec2,
    pub color: EffectColor,
    pub particles: u32,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub life: f32,
    pub color: EffectColor,
}

/// What the HUD shows after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub mode: GameMode,
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub enemies: usize,
    /// Score recorded when the run ended in a loss
    pub final_score: Option<u64>,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub mode: GameMode,
    /// Seconds since the session was created
    pub elapsed: f32,
    pub level_index: u32,
    pub score: u64,
    pub lives: u8,
    pub final_score: Option<u64>,
    pub grid: TileGrid,
    pub walls: Vec<Wall>,
    pub player: Tank,
    pub enemies: Vec<Tank>,
    pub projectiles: Vec<Projectile>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Effect cues emitted by the last tick
    pub cues: Vec<EffectCue>,
}

impl GameState {
    /// Create a new session in `Intro` with a freshly generated world.
    /// `tuning` must pass [`Tuning::validate`].
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        debug_assert!(tuning.validate().is_ok(), "invalid tuning: {:?}", tuning.validate());
        let grid = generate_level(ARENA_WIDTH, ARENA_HEIGHT);
        let player = Tank::player(&tuning);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            lives: tuning.rules.lives,
            tuning,
            mode: GameMode::Intro,
            elapsed: 0.0,
            level_index: 1,
            score: 0,
            final_score: None,
            grid,
            walls: Vec::new(),
            player,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            cues: Vec::new(),
        };
        state.reset_world();
        state
    }

    /// Regenerate the level and respawn every entity
    pub fn reset_world(&mut self) {
        self.grid = generate_level(ARENA_WIDTH, ARENA_HEIGHT);
        self.walls = derive_walls(&self.grid, self.tuning.terrain.brick_hp);
        self.player = Tank::player(&self.tuning);
        self.enemies = (0..self.tuning.enemy.count)
            .map(|i| Tank::enemy(i, &self.tuning, &mut self.rng))
            .collect();
        self.projectiles.clear();
        self.particles.clear();
        self.cues.clear();
        log::info!(
            "Level {}: {}x{} tiles, {} walls, {} enemies",
            self.level_index,
            self.grid.cols,
            self.grid.rows,
            self.walls.len(),
            self.enemies.len()
        );
    }

    /// Reset score, lives and level, then regenerate the world
    pub fn reset_run(&mut self) {
        self.level_index = 1;
        self.score = 0;
        self.lives = self.tuning.rules.lives;
        self.final_score = None;
        self.reset_world();
    }

    pub fn hud(&self) -> Hud {
        Hud {
            mode: self.mode,
            score: self.score,
            lives: self.lives,
            level: self.level_index,
            enemies: self.enemies.len(),
            final_score: self.final_score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(v: f32, (lo, hi): (f32, f32)) -> bool {
        v >= lo - 1e-5 && v <= hi + 1e-5
    }

    #[test]
    fn test_new_state_starts_in_intro() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.mode, GameMode::Intro);
        assert_eq!(state.lives, 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.level_index, 1);
        assert_eq!(state.enemies.len(), 6);
        assert!(!state.walls.is_empty());
        assert_eq!(state.player.owner(), Owner::Player);
        assert_eq!(state.player.invuln(), 1.0);
    }

    #[test]
    fn test_enemy_stats_within_ranges() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for i in 0..20 {
            let enemy = Tank::enemy(i, &tuning, &mut rng);
            assert_eq!(enemy.owner(), Owner::Enemy);
            assert!(within(enemy.fire_cooldown, (0.1, 0.6)));
            assert!(within(enemy.fire_rate, (0.55, 0.9)));
            let TankKind::Enemy(brain) = &enemy.kind else {
                panic!("expected an enemy");
            };
            assert!(within(brain.think_timer, (0.25, 0.6)));
            assert!(within(brain.jitter, (0.5, 1.2)));
            assert_eq!(brain.hp, 1);
        }
    }

    #[test]
    fn test_enemy_spawn_points_round_robin() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let first = Tank::enemy(0, &tuning, &mut rng);
        let sixth = Tank::enemy(5, &tuning, &mut rng);
        assert_eq!(first.pos, sixth.pos);
    }

    #[test]
    fn test_speed_clamp_is_asymmetric() {
        let tuning = Tuning::default();
        let mut tank = Tank::player(&tuning);
        tank.speed = 10_000.0;
        tank.clamp_speed();
        assert_eq!(tank.speed, 240.0);
        tank.speed = -10_000.0;
        tank.clamp_speed();
        assert!((tank.speed + 240.0 * 0.55).abs() < 1e-4);
    }

    #[test]
    fn test_spawns_do_not_overlap_walls() {
        use crate::sim::collision::circle_rect_hit;
        let state = GameState::new(1, Tuning::default());
        for tank in std::iter::once(&state.player).chain(state.enemies.iter()) {
            for wall in &state.walls {
                assert!(!circle_rect_hit(tank.pos, tank.radius, &wall.rect));
            }
        }
    }
}
