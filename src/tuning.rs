//! Data-driven game balance
//!
//! Every number the simulation consults lives here so a build can ship
//! alternative balance as JSON without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("tuning field `{field}` {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Balance constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub cell_size: f32,

    // === Grid mode ===
    pub initial_move_interval: f64,
    pub min_move_interval: f64,
    pub move_interval_step: f64,
    /// Interval drops every time the score is a multiple of this
    pub move_interval_every: u64,
    pub input_queue_capacity: usize,

    // === Pursuit mode ===
    pub initial_speed: f32,
    pub max_speed: f32,
    pub speed_step: f32,
    pub speed_every: u64,
    pub segment_spacing: f32,
    pub history_per_segment: usize,
    pub history_seed_len: usize,
    pub neck_segments: usize,

    pub initial_length: usize,

    // === Power-ups ===
    pub power_up_chance: f32,
    pub power_up_attempts: u32,
    pub effect_duration: f64,
    pub slow_interval_factor: f64,
    pub slow_speed_factor: f32,
    pub slow_min_speed: f32,
    pub magnet_strength: f32,
    pub magnet_radius: f32,
    pub magnet_snap_cells: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            cell_size: CELL_SIZE,

            initial_move_interval: INITIAL_MOVE_INTERVAL,
            min_move_interval: MIN_MOVE_INTERVAL,
            move_interval_step: MOVE_INTERVAL_STEP,
            move_interval_every: MOVE_INTERVAL_EVERY,
            input_queue_capacity: INPUT_QUEUE_CAPACITY,

            initial_speed: INITIAL_SPEED,
            max_speed: MAX_SPEED,
            speed_step: SPEED_STEP,
            speed_every: SPEED_EVERY,
            segment_spacing: SEGMENT_SPACING,
            history_per_segment: HISTORY_PER_SEGMENT,
            history_seed_len: HISTORY_SEED_LEN,
            neck_segments: NECK_SEGMENTS,

            initial_length: INITIAL_LENGTH,

            power_up_chance: POWER_UP_CHANCE,
            power_up_attempts: POWER_UP_PLACEMENT_ATTEMPTS,
            effect_duration: EFFECT_DURATION,
            slow_interval_factor: SLOW_INTERVAL_FACTOR,
            slow_speed_factor: SLOW_SPEED_FACTOR,
            slow_min_speed: SLOW_MIN_SPEED,
            magnet_strength: MAGNET_STRENGTH,
            magnet_radius: MAGNET_RADIUS,
            magnet_snap_cells: MAGNET_SNAP_CELLS,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let invalid = |field: &'static str, reason: &'static str| -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        };

        if self.cell_size <= 0.0 {
            return invalid("cell_size", "must be positive");
        }
        if self.canvas_width < self.cell_size || self.canvas_height < self.cell_size {
            return invalid("canvas_width", "canvas must fit at least one cell");
        }
        if self.min_move_interval <= 0.0 {
            return invalid("min_move_interval", "must be positive");
        }
        if self.initial_move_interval < self.min_move_interval {
            return invalid("initial_move_interval", "must not be below min_move_interval");
        }
        if self.move_interval_every == 0 || self.speed_every == 0 {
            return invalid("move_interval_every", "speed-up periods must be non-zero");
        }
        if self.initial_speed <= 0.0 || self.max_speed < self.initial_speed {
            return invalid("initial_speed", "must be positive and not above max_speed");
        }
        if self.initial_length == 0 {
            return invalid("initial_length", "must be at least 1");
        }
        if self.segment_spacing <= 0.0 {
            return invalid("segment_spacing", "must be positive");
        }
        if self.history_per_segment == 0 {
            return invalid("history_per_segment", "must be at least 1");
        }
        if self.effect_duration <= 0.0 {
            return invalid("effect_duration", "must be positive");
        }
        if !(0.0..=1.0).contains(&self.power_up_chance) {
            return invalid("power_up_chance", "must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.magnet_strength) {
            return invalid("magnet_strength", "must be within [0, 1]");
        }
        Ok(())
    }

    /// Columns and rows of whole cells on the canvas
    pub fn grid_dims(&self) -> (i32, i32) {
        (
            (self.canvas_width / self.cell_size).floor() as i32,
            (self.canvas_height / self.cell_size).floor() as i32,
        )
    }

    #[inline]
    pub fn half_cell(&self) -> f32 {
        self.cell_size / 2.0
    }

    /// Per-axis tolerance for the grid self-collision test
    pub fn grid_collision_tolerance(&self) -> f32 {
        self.cell_size / 4.0
    }

    /// Head-to-food distance for a grid pickup
    pub fn grid_food_reach(&self) -> f32 {
        self.cell_size / 2.0
    }

    /// Grid power-up pickup is a little looser than food
    pub fn grid_power_up_reach(&self) -> f32 {
        self.cell_size / 1.5
    }

    /// Head-to-body distance for a pursuit self-collision
    pub fn pursuit_collision_reach(&self) -> f32 {
        self.cell_size * 0.75
    }

    pub fn pursuit_food_reach(&self) -> f32 {
        self.cell_size
    }

    pub fn pursuit_power_up_reach(&self) -> f32 {
        self.cell_size
    }

    /// Magnet snaps food onto the head inside this distance
    pub fn magnet_snap_reach(&self) -> f32 {
        self.cell_size * self.magnet_snap_cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.grid_dims(), (20, 20));
        assert_eq!(tuning.grid_collision_tolerance(), 5.0);
        assert_eq!(tuning.pursuit_collision_reach(), 15.0);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let tuning = Tuning::from_json(r#"{ "cell_size": 10.0, "power_up_chance": 0.5 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.cell_size, 10.0);
        assert_eq!(tuning.power_up_chance, 0.5);
        assert_eq!(tuning.initial_move_interval, INITIAL_MOVE_INTERVAL);
        assert_eq!(tuning.grid_dims(), (40, 40));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Tuning::from_json(r#"{ "cell_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "cell_size", .. }));

        let err = Tuning::from_json(r#"{ "power_up_chance": 1.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            TuningError::Invalid {
                field: "power_up_chance",
                ..
            }
        ));
        assert!(err.to_string().contains("power_up_chance"));
    }

    #[test]
    fn test_rejects_degenerate_body_and_effect_settings() {
        let cases = [
            (r#"{ "history_per_segment": 0 }"#, "history_per_segment"),
            (r#"{ "segment_spacing": 0.0 }"#, "segment_spacing"),
            (r#"{ "segment_spacing": -4.0 }"#, "segment_spacing"),
            (r#"{ "effect_duration": 0.0 }"#, "effect_duration"),
            (r#"{ "effect_duration": -100.0 }"#, "effect_duration"),
        ];
        for (json, expected) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, expected, "{json}"),
                other => panic!("{json} should be rejected, got {other:?}"),
            }
        }
    }
}
