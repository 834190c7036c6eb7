//! Tank Arena entry point
//!
//! Headless runner: plays one seeded session at the fixed timestep with a
//! scripted autopilot and prints the final HUD as JSON.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use tank_arena::Tuning;
    use tank_arena::consts::SIM_DT;
    use tank_arena::normalize_angle;
    use tank_arena::sim::{GameMode, GameState, TickInput, tick};

    const SEED: u64 = 12345;
    /// Five simulated minutes
    const MAX_TICKS: u64 = 60 * 60 * 5;

    /// Aim error under which the autopilot stops turning
    const AIM_DEADZONE: f32 = 0.05;
    /// Aim error under which the autopilot pulls the trigger
    const FIRE_CONE: f32 = 0.2;
    /// The autopilot holds position once this close
    const STANDOFF: f32 = 220.0;

    /// Turn toward the nearest enemy, close in and shoot
    fn autopilot(state: &GameState) -> TickInput {
        let player = &state.player;
        let Some(target) = state
            .enemies
            .iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .total_cmp(&b.distance_squared(player.pos))
            })
        else {
            return TickInput::default();
        };

        let to_target = target - player.pos;
        let error = normalize_angle(to_target.y.atan2(to_target.x) - player.angle);
        TickInput {
            turn_left: error < -AIM_DEADZONE,
            turn_right: error > AIM_DEADZONE,
            forward: to_target.length() > STANDOFF,
            fire: error.abs() < FIRE_CONE,
            ..Default::default()
        }
    }

    pub fn run() -> Result<(), serde_json::Error> {
        log::info!("Tank Arena (headless) starting with seed {SEED}");
        let mut state = GameState::new(SEED, Tuning::default());

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        tick(&mut state, &start, SIM_DT);

        let mut ticks = 1;
        while state.mode == GameMode::Running && ticks < MAX_TICKS {
            let input = autopilot(&state);
            tick(&mut state, &input, SIM_DT);
            ticks += 1;
        }

        if state.mode == GameMode::Running {
            log::warn!("Tick limit reached after {:.1}s", state.elapsed);
        } else {
            log::info!("Session ended ({:?}) after {ticks} ticks", state.mode);
        }

        let hud = serde_json::to_string(&state.hud())?;
        println!("{hud}");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("Failed to encode HUD: {e}");
        std::process::exit(2);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner on the web; hosts drive the library directly
}
