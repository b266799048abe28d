//! Per-frame simulation driver
//!
//! The host calls [`Session::frame`] once per animation frame with a
//! monotonic timestamp (ms). Each live frame runs, in order: effect upkeep,
//! movement, food pickup, power-up pickup. A collision ends the run.

use super::movement::{Movement, Steering, movement_for};
use super::powerup::{expire_effects, magnet_pull, pickup};
use super::spawn::{place_food, roll_power_up};
use super::state::{
    ControlMode, Direction, EffectView, GameEvent, GamePhase, GameState, Position, Snapshot,
};
use crate::best_score::BestScore;
use crate::tuning::Tuning;

/// One player's game: state, active control scheme and frame timing
pub struct Session {
    pub state: GameState,
    pub tuning: Tuning,
    pub best: BestScore,
    movement: Box<dyn Movement>,
    last_time: Option<f64>,
}

impl Session {
    /// New session in the menu, with an unpredictable RNG seed
    pub fn new(tuning: Tuning, mode: ControlMode, best: BestScore) -> Self {
        Self::with_seed(tuning, mode, best, rand::random())
    }

    pub fn with_seed(tuning: Tuning, mode: ControlMode, best: BestScore, seed: u64) -> Self {
        Self {
            state: GameState::new(&tuning, mode, seed),
            movement: movement_for(mode),
            tuning,
            best,
            last_time: None,
        }
    }

    /// Begin a fresh run (from the menu or after game over)
    pub fn start(&mut self) {
        self.state.reset_run(&self.tuning);
        self.movement
            .reset(&self.state.snake, &self.state.pace, &self.tuning);
        self.last_time = None;

        place_food(&mut self.state, &self.tuning);
        roll_power_up(&mut self.state, &self.tuning, self.tuning.power_up_chance);

        self.state.phase = GamePhase::Running;
        log::info!("Run started in {} mode", self.state.mode.as_str());
    }

    /// Switch control scheme. Always ends any run and returns to the menu.
    pub fn set_mode(&mut self, mode: ControlMode) {
        self.state.mode = mode;
        if self.movement.mode() != mode {
            self.movement = movement_for(mode);
        }
        self.state.reset_run(&self.tuning);
        self.movement
            .reset(&self.state.snake, &self.state.pace, &self.tuning);
        self.state.phase = GamePhase::Menu;
        self.last_time = None;
        log::info!("Control mode set to {}, back to menu", mode.as_str());
    }

    /// Flip pause. Ignored outside a run.
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            _ => return,
        };
        // The host may stop calling `frame` while paused; resume from dt = 0
        if self.state.phase == GamePhase::Running {
            self.last_time = None;
        }
        log::info!(
            "{}",
            if self.state.phase == GamePhase::Paused {
                "Paused"
            } else {
                "Resumed"
            }
        );
    }

    /// Directional key. Only meaningful while a grid run is moving.
    pub fn turn(&mut self, dir: Direction) {
        if self.state.phase != GamePhase::Running || self.state.mode != ControlMode::Grid {
            return;
        }
        self.movement.steer(Steering::Turn(dir), &self.tuning);
    }

    /// Pointer moved (canvas coordinates)
    pub fn point_at(&mut self, pos: Position) {
        self.movement.steer(Steering::Point(pos), &self.tuning);
    }

    /// Advance the simulation to `now` (ms)
    pub fn frame(&mut self, now: f64) {
        if !self.state.is_live() {
            return;
        }
        let last = self.last_time.replace(now).unwrap_or(now);
        let dt = (now - last).max(0.0);

        if self.state.phase == GamePhase::Paused {
            return;
        }

        // Effects first: magnet may feed before the snake moves
        if magnet_pull(&mut self.state, &self.tuning) {
            self.feed(true);
        }
        expire_effects(&mut self.state, now);

        let outcome = self.movement.advance(
            &mut self.state.snake,
            self.state.food,
            &self.state.pace,
            &self.tuning,
            dt,
        );
        if outcome.collided {
            self.game_over();
            return;
        }
        if outcome.grew {
            self.feed(false);
        }
        if outcome.stepped {
            let reach = self.movement.power_up_reach(&self.tuning);
            let head = self.state.snake.head();
            if self
                .state
                .power_up
                .is_some_and(|p| p.pos.distance(head) < reach)
            {
                pickup(&mut self.state, &self.tuning, now);
            }
        }
    }

    /// Score, speed-up, relocate food, roll for a power-up.
    ///
    /// `extend` appends a tail segment; movement steps that eat have already grown.
    fn feed(&mut self, extend: bool) {
        let tuning = &self.tuning;
        let state = &mut self.state;

        state.score += state.score_multiplier;
        match state.mode {
            ControlMode::Grid => {
                if state.score % tuning.move_interval_every == 0
                    && state.pace.move_interval > tuning.min_move_interval
                {
                    state.pace.move_interval = (state.pace.move_interval
                        - tuning.move_interval_step)
                        .max(tuning.min_move_interval);
                }
            }
            ControlMode::Pursuit => {
                if state.score % tuning.speed_every == 0 && state.pace.speed < tuning.max_speed {
                    state.pace.speed = (state.pace.speed + tuning.speed_step).min(tuning.max_speed);
                }
            }
        }

        if extend {
            state.snake.grow();
        }
        state.events.push(GameEvent::Grew {
            score: state.score,
            length: state.snake.len(),
        });
        log::debug!("Ate food, score {}", state.score);

        place_food(state, tuning);
        roll_power_up(state, tuning, tuning.power_up_chance);
    }

    fn game_over(&mut self) {
        let score = self.state.score;
        let new_best = self.best.submit(score);
        self.state.phase = GamePhase::GameOver;
        self.state.events.push(GameEvent::Collided);
        self.state.events.push(GameEvent::GameOver {
            score,
            best: self.best.value,
            new_best,
        });
        log::info!("Game over: score {} (best {})", score, self.best.value);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.state.events)
    }

    pub fn snapshot(&self, now: f64) -> Snapshot {
        Snapshot {
            phase: self.state.phase,
            mode: self.state.mode,
            score: self.state.score,
            best: self.best.value,
            snake: self.state.snake.segments().to_vec(),
            facing: self.movement.facing(&self.state.snake),
            food: self.state.food,
            power_up: self.state.power_up,
            effects: self
                .state
                .effects
                .iter()
                .map(|e| EffectView {
                    kind: e.kind(),
                    remaining_ms: e.remaining(now),
                })
                .collect(),
        }
    }
}
