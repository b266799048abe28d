//! Snake Rush entry point
//!
//! The browser build is driven from JavaScript through `snake_rush::web`.
//! Natively this runs a headless autopilot in both control modes, which is
//! handy for checking balance changes: `snake-rush [tuning.json]`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Snake Rush (native) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match load_tuning(&path) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => snake_rush::Tuning::default(),
    };

    for mode in [
        snake_rush::sim::ControlMode::Grid,
        snake_rush::sim::ControlMode::Pursuit,
    ] {
        let report = autopilot::run(tuning.clone(), mode);
        println!(
            "{:>8}: score {:>3}, length {:>3}, {} power-ups, {} frames{}",
            mode.as_str(),
            report.score,
            report.length,
            report.power_ups,
            report.frames,
            if report.crashed { " (crashed)" } else { "" }
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> Result<snake_rush::Tuning, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(snake_rush::Tuning::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is snake_rush::web::WebSession, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use snake_rush::BestScore;
    use snake_rush::Tuning;
    use snake_rush::sim::{ControlMode, Direction, GameEvent, GamePhase, Session};

    /// Simulated display refresh (ms per frame)
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    pub struct Report {
        pub score: u64,
        pub length: usize,
        pub power_ups: u32,
        pub frames: u32,
        pub crashed: bool,
    }

    /// Chase the food until the snake crashes or time runs out
    pub fn run(tuning: Tuning, mode: ControlMode) -> Report {
        let mut session = Session::new(tuning, mode, BestScore::default());
        session.start();

        let mut power_ups = 0;
        let mut frames = 0;
        while frames < MAX_FRAMES && session.state.phase == GamePhase::Running {
            steer(&mut session);
            session.frame(frames as f64 * FRAME_MS);
            frames += 1;

            for event in session.drain_events() {
                match event {
                    GameEvent::EffectApplied(kind) | GameEvent::EffectRefreshed(kind) => {
                        log::debug!("frame {}: picked up {}", frames, kind.as_str());
                        power_ups += 1;
                    }
                    GameEvent::GameOver { score, .. } => {
                        log::info!(
                            "{} autopilot crashed at score {}",
                            session.state.mode.as_str(),
                            score
                        );
                    }
                    _ => {}
                }
            }
        }

        Report {
            score: session.state.score,
            length: session.state.snake.len(),
            power_ups,
            frames,
            crashed: session.state.phase == GamePhase::GameOver,
        }
    }

    fn steer(session: &mut Session) {
        let head = session.state.snake.head();
        let food = session.state.food;
        match session.state.mode {
            ControlMode::Pursuit => session.point_at(food),
            ControlMode::Grid => {
                let delta = food - head;
                let dir = if delta.x.abs() >= delta.y.abs() {
                    if delta.x > 0.0 {
                        Direction::Right
                    } else {
                        Direction::Left
                    }
                } else if delta.y > 0.0 {
                    Direction::Down
                } else {
                    Direction::Up
                };
                session.turn(dir);
            }
        }
    }
}
