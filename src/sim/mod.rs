//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio or storage:
//! - Frame-driven, single-threaded
//! - Pace and score multiplier change only through food and power-ups
//! - Failures are game states, never errors

pub mod boundary;
pub mod movement;
pub mod powerup;
pub mod spawn;
pub mod state;
pub mod tick;

pub use boundary::BoundaryPolicy;
pub use movement::{GridMovement, Movement, PursuitMovement, Steering, StepOutcome, movement_for};
pub use powerup::{expire_effects, magnet_pull, pickup};
pub use spawn::{place_food, roll_power_up};
pub use state::{
    ActiveEffect, ControlMode, Direction, Effect, EffectView, GameEvent, GamePhase, GameState,
    Pace, Position, PowerUp, PowerUpKind, Snake, Snapshot,
};
pub use tick::Session;
