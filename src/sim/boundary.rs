//! Canvas edge handling
//!
//! Grid mode wraps the board into a torus; pursuit mode keeps the head's
//! leading edge on the canvas.

use glam::Vec2;

use super::state::{ControlMode, Position};
use crate::tuning::Tuning;

/// What happens when the head reaches a canvas edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Leave by half a cell, re-enter by half a cell on the far side
    Wrap,
    /// Center stays within `[half_cell, dim - half_cell]`
    Clamp,
}

impl BoundaryPolicy {
    pub fn for_mode(mode: ControlMode) -> Self {
        match mode {
            ControlMode::Grid => BoundaryPolicy::Wrap,
            ControlMode::Pursuit => BoundaryPolicy::Clamp,
        }
    }

    pub fn apply(self, pos: Position, tuning: &Tuning) -> Position {
        let half = tuning.half_cell();
        let (w, h) = (tuning.canvas_width, tuning.canvas_height);
        match self {
            BoundaryPolicy::Clamp => Vec2::new(
                pos.x.clamp(half, (w - half).max(half)),
                pos.y.clamp(half, (h - half).max(half)),
            ),
            BoundaryPolicy::Wrap => Vec2::new(wrap_axis(pos.x, w, half), wrap_axis(pos.y, h, half)),
        }
    }
}

/// Once a coordinate is a half cell past either edge it reappears the same
/// margin past the opposite edge.
fn wrap_axis(v: f32, dim: f32, margin: f32) -> f32 {
    if v <= -margin {
        dim + margin
    } else if v >= dim + margin {
        -margin
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_mirrors_margin() {
        let tuning = Tuning::default();
        let wrap = BoundaryPolicy::Wrap;
        assert_eq!(wrap.apply(Vec2::new(410.0, 210.0), &tuning), Vec2::new(-10.0, 210.0));
        assert_eq!(wrap.apply(Vec2::new(-10.0, 210.0), &tuning), Vec2::new(410.0, 210.0));
        assert_eq!(wrap.apply(Vec2::new(210.0, 410.0), &tuning), Vec2::new(210.0, -10.0));
        assert_eq!(wrap.apply(Vec2::new(210.0, -10.0), &tuning), Vec2::new(210.0, 410.0));
        // Partially off-canvas cells are left alone
        assert_eq!(wrap.apply(Vec2::new(405.0, 0.0), &tuning), Vec2::new(405.0, 0.0));
    }

    #[test]
    fn test_policy_per_mode() {
        assert_eq!(BoundaryPolicy::for_mode(ControlMode::Grid), BoundaryPolicy::Wrap);
        assert_eq!(BoundaryPolicy::for_mode(ControlMode::Pursuit), BoundaryPolicy::Clamp);
    }

    proptest! {
        #[test]
        fn clamp_stays_inside(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let tuning = Tuning::default();
            let out = BoundaryPolicy::Clamp.apply(Vec2::new(x, y), &tuning);
            prop_assert!(out.x >= 10.0 && out.x <= 390.0);
            prop_assert!(out.y >= 10.0 && out.y <= 390.0);
        }

        #[test]
        fn clamp_is_identity_inside(x in 10.0f32..=390.0, y in 10.0f32..=390.0) {
            let tuning = Tuning::default();
            let p = Vec2::new(x, y);
            prop_assert_eq!(BoundaryPolicy::Clamp.apply(p, &tuning), p);
        }

        #[test]
        fn wrap_exact_margin_mirrors(y in -9.0f32..409.0) {
            let tuning = Tuning::default();
            let left = BoundaryPolicy::Wrap.apply(Vec2::new(-10.0, y), &tuning);
            let right = BoundaryPolicy::Wrap.apply(Vec2::new(410.0, y), &tuning);
            prop_assert_eq!(left, Vec2::new(410.0, y));
            prop_assert_eq!(right, Vec2::new(-10.0, y));
        }
    }
}
