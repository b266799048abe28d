//! Snake Rush - a snake arcade game with two control schemes
//!
//! Core modules:
//! - `sim`: Simulation engine (movement, collisions, food, power-ups, timing)
//! - `tuning`: Data-driven game balance
//! - `best_score`: Best-score comparison and browser persistence
//! - `web`: Browser bindings (wasm32 only)

pub mod best_score;
pub mod sim;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use best_score::BestScore;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 400.0;
    pub const CANVAS_HEIGHT: f32 = 400.0;
    /// Diameter of one snake segment, also the grid cell size
    pub const CELL_SIZE: f32 = 20.0;

    /// Grid mode step period (ms)
    pub const INITIAL_MOVE_INTERVAL: f64 = 100.0;
    /// Hard minimum step period - eating never accelerates past this
    pub const MIN_MOVE_INTERVAL: f64 = 50.0;
    pub const MOVE_INTERVAL_STEP: f64 = 5.0;
    pub const MOVE_INTERVAL_EVERY: u64 = 5;

    /// Pursuit mode travel per frame (pixels)
    pub const INITIAL_SPEED: f32 = 3.0;
    pub const MAX_SPEED: f32 = 6.0;
    pub const SPEED_STEP: f32 = 0.2;
    pub const SPEED_EVERY: u64 = 10;

    /// Starting body length
    pub const INITIAL_LENGTH: usize = 3;
    /// Max buffered direction changes in grid mode
    pub const INPUT_QUEUE_CAPACITY: usize = 3;

    /// Pursuit body: distance between sampled segments (pixels)
    pub const SEGMENT_SPACING: f32 = 10.0;
    /// Pursuit history is capped at this many points per body segment
    pub const HISTORY_PER_SEGMENT: usize = 20;
    /// Points pre-seeded into the pursuit history at run start
    pub const HISTORY_SEED_LEN: usize = 100;
    /// Segments nearest the head ignored by the pursuit self-collision test
    pub const NECK_SEGMENTS: usize = 10;

    /// Power-up spawn roll, made each time food is placed
    pub const POWER_UP_CHANCE: f32 = 0.18;
    pub const POWER_UP_PLACEMENT_ATTEMPTS: u32 = 200;
    /// Every effect lasts this long (ms)
    pub const EFFECT_DURATION: f64 = 6000.0;

    pub const SLOW_INTERVAL_FACTOR: f64 = 1.6;
    pub const SLOW_SPEED_FACTOR: f32 = 0.6;
    pub const SLOW_MIN_SPEED: f32 = 0.8;

    pub const MAGNET_STRENGTH: f32 = 0.12;
    pub const MAGNET_RADIUS: f32 = 60.0;
    /// Food this close to the head (in cells) snaps in and is eaten
    pub const MAGNET_SNAP_CELLS: f32 = 0.9;
}

/// Euclidean distance between two canvas points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Heading angle of a vector, radians in (-π, π]
#[inline]
pub fn heading(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Offset of length `len` along heading `angle`
#[inline]
pub fn step_along(angle: f32, len: f32) -> Vec2 {
    Vec2::new(angle.cos() * len, angle.sin() * len)
}

/// Top-left aligned cell index to the center of that cell
#[inline]
pub fn cell_center(col: i32, row: i32, cell: f32) -> Vec2 {
    Vec2::new(col as f32 * cell + cell / 2.0, row as f32 * cell + cell / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_step_along() {
        let angle = heading(Vec2::new(0.0, 5.0));
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

        let step = step_along(angle, 3.0);
        assert!(step.x.abs() < 1e-5);
        assert!((step.y - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_cell_center() {
        assert_eq!(cell_center(10, 10, 20.0), Vec2::new(210.0, 210.0));
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
    }
}
