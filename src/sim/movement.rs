//! Movement strategies
//!
//! Grid mode steps one cell at a time from a short queue of direction
//! changes. Pursuit mode glides the head toward the pointer every frame and
//! rebuilds the body from a trail of past head positions.
//!
//! Strategies only ever touch the snake. Pace is passed in read-only.

use std::collections::VecDeque;

use glam::Vec2;

use super::boundary::BoundaryPolicy;
use super::state::{ControlMode, Direction, Pace, Position, Snake};
use crate::tuning::Tuning;
use crate::{heading, step_along};

/// Discrete input routed to the active strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    Turn(Direction),
    Point(Position),
}

/// What one `advance` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// Head moved this call
    pub stepped: bool,
    /// Food was reached and the body lengthened by one
    pub grew: bool,
    /// Head ran into the body; the snake was left untouched
    pub collided: bool,
}

impl StepOutcome {
    fn moved() -> Self {
        Self {
            stepped: true,
            ..Default::default()
        }
    }
}

/// One control scheme
pub trait Movement {
    fn mode(&self) -> ControlMode;

    /// Prepare for a new run with the snake in its start layout
    fn reset(&mut self, snake: &Snake, pace: &Pace, tuning: &Tuning);

    /// Feed a player input. Inputs meant for the other scheme are ignored.
    fn steer(&mut self, steering: Steering, tuning: &Tuning);

    /// Consume `dt` ms of real time
    fn advance(
        &mut self,
        snake: &mut Snake,
        food: Position,
        pace: &Pace,
        tuning: &Tuning,
        dt: f64,
    ) -> StepOutcome;

    /// Head-to-power-up distance that counts as a pickup
    fn power_up_reach(&self, tuning: &Tuning) -> f32;

    /// Head orientation for rendering (radians)
    fn facing(&self, snake: &Snake) -> f32;
}

/// Build the strategy for a control mode
pub fn movement_for(mode: ControlMode) -> Box<dyn Movement> {
    match mode {
        ControlMode::Grid => Box::new(GridMovement::default()),
        ControlMode::Pursuit => Box::new(PursuitMovement::default()),
    }
}

/// Cell stepping on a fixed period
#[derive(Debug, Clone)]
pub struct GridMovement {
    pub velocity: Direction,
    /// Pending turns, oldest first
    pub queue: VecDeque<Direction>,
    /// Real time not yet spent on steps (ms)
    pub accumulator: f64,
}

impl Default for GridMovement {
    fn default() -> Self {
        Self {
            velocity: Direction::Right,
            queue: VecDeque::new(),
            accumulator: 0.0,
        }
    }
}

impl GridMovement {
    /// Queue a turn unless it reverses the last queued (or current) direction
    pub fn enqueue(&mut self, dir: Direction, capacity: usize) -> bool {
        let last = self.queue.back().copied().unwrap_or(self.velocity);
        if dir == last.opposite() || self.queue.len() >= capacity {
            return false;
        }
        self.queue.push_back(dir);
        true
    }
}

impl Movement for GridMovement {
    fn mode(&self) -> ControlMode {
        ControlMode::Grid
    }

    fn reset(&mut self, _snake: &Snake, _pace: &Pace, _tuning: &Tuning) {
        *self = Self::default();
    }

    fn steer(&mut self, steering: Steering, tuning: &Tuning) {
        if let Steering::Turn(dir) = steering {
            self.enqueue(dir, tuning.input_queue_capacity);
        }
    }

    fn advance(
        &mut self,
        snake: &mut Snake,
        food: Position,
        pace: &Pace,
        tuning: &Tuning,
        dt: f64,
    ) -> StepOutcome {
        self.accumulator += dt;
        if self.accumulator < pace.move_interval {
            return StepOutcome::default();
        }
        self.accumulator -= pace.move_interval;

        if let Some(next) = self.queue.pop_front() {
            if next != self.velocity.opposite() {
                self.velocity = next;
            }
        }

        let head = snake.head() + self.velocity.unit() * tuning.cell_size;
        let head = BoundaryPolicy::Wrap.apply(head, tuning);

        let tol = tuning.grid_collision_tolerance();
        let hit = snake.segments()[1..]
            .iter()
            .any(|s| (head.x - s.x).abs() < tol && (head.y - s.y).abs() < tol);
        if hit {
            return StepOutcome {
                collided: true,
                ..StepOutcome::moved()
            };
        }

        snake.push_head(head);
        let grew = head.distance(food) < tuning.grid_food_reach();
        if !grew {
            snake.drop_tail();
        }

        StepOutcome {
            grew,
            ..StepOutcome::moved()
        }
    }

    fn power_up_reach(&self, tuning: &Tuning) -> f32 {
        tuning.grid_power_up_reach()
    }

    fn facing(&self, _snake: &Snake) -> f32 {
        heading(self.velocity.unit())
    }
}

/// Continuous chase of the pointer
#[derive(Debug, Clone, Default)]
pub struct PursuitMovement {
    /// Last pointer position; `None` until the pointer first moves
    pub target: Option<Position>,
    /// Past head positions, newest first
    pub history: VecDeque<Position>,
}

impl PursuitMovement {
    /// Every `step`-th history point becomes a body segment. Faster heads
    /// sample fewer points so the spacing on screen stays the same.
    fn sample_step(spacing: f32, speed: f32) -> usize {
        ((spacing / speed).floor() as usize).max(1)
    }
}

impl Movement for PursuitMovement {
    fn mode(&self) -> ControlMode {
        ControlMode::Pursuit
    }

    fn reset(&mut self, snake: &Snake, pace: &Pace, tuning: &Tuning) {
        let head = snake.head();
        self.history.clear();
        self.history.extend(
            (0..tuning.history_seed_len).map(|i| head - Vec2::new(i as f32 * pace.speed, 0.0)),
        );
    }

    fn steer(&mut self, steering: Steering, _tuning: &Tuning) {
        if let Steering::Point(pos) = steering {
            self.target = Some(pos);
        }
    }

    fn advance(
        &mut self,
        snake: &mut Snake,
        food: Position,
        pace: &Pace,
        tuning: &Tuning,
        _dt: f64,
    ) -> StepOutcome {
        let head = snake.head();
        let to_target = self.target.unwrap_or(head) - head;
        if to_target.length() < pace.speed {
            return StepOutcome::default();
        }

        let head = head + step_along(heading(to_target), pace.speed);
        let head = BoundaryPolicy::Clamp.apply(head, tuning);

        self.history.push_front(head);
        self.history
            .truncate(snake.len() * tuning.history_per_segment);

        let step = Self::sample_step(tuning.segment_spacing, pace.speed);
        let oldest = self.history.back().copied().unwrap_or(head);
        for (i, seg) in snake.segments_mut().iter_mut().enumerate() {
            *seg = self.history.get(i * step).copied().unwrap_or(oldest);
        }

        let reach = tuning.pursuit_collision_reach();
        let hit = snake
            .segments()
            .iter()
            .skip(tuning.neck_segments)
            .any(|s| s.distance(head) < reach);
        if hit {
            return StepOutcome {
                collided: true,
                ..StepOutcome::moved()
            };
        }

        let grew = head.distance(food) < tuning.pursuit_food_reach();
        if grew {
            snake.grow();
        }

        StepOutcome {
            grew,
            ..StepOutcome::moved()
        }
    }

    fn power_up_reach(&self, tuning: &Tuning) -> f32 {
        tuning.pursuit_power_up_reach()
    }

    fn facing(&self, snake: &Snake) -> f32 {
        let head = snake.head();
        heading(self.target.unwrap_or(head) - head)
    }
}
