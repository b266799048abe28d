//! Power-up pickup, effect lifecycle and the magnet pull
//!
//! Effects change the session's [`Pace`](super::state::Pace) and score
//! multiplier. Each one records what it needs to undo itself, so expiry
//! restores exactly what was there before the pickup.

use super::state::{ActiveEffect, Effect, GameEvent, GameState, PowerUpKind};
use crate::tuning::Tuning;

impl PowerUpKind {
    /// Apply this kind's change to the state and return the record that reverts it
    pub fn activate(self, state: &mut GameState, tuning: &Tuning) -> Effect {
        match self {
            PowerUpKind::Slow => {
                let prev = state.pace;
                state.pace.move_interval =
                    (prev.move_interval * tuning.slow_interval_factor).floor();
                state.pace.speed =
                    (prev.speed * tuning.slow_speed_factor).max(tuning.slow_min_speed);
                Effect::Slow { prev }
            }
            PowerUpKind::Double => {
                state.score_multiplier = 2;
                Effect::Double
            }
            PowerUpKind::Magnet => Effect::Magnet {
                strength: tuning.magnet_strength,
                radius: tuning.magnet_radius,
            },
        }
    }
}

impl Effect {
    pub fn revert(&self, state: &mut GameState) {
        match *self {
            Effect::Slow { prev } => state.pace = prev,
            Effect::Double => state.score_multiplier = 1,
            Effect::Magnet { .. } => {}
        }
    }
}

/// Collect the power-up on the board, if any.
///
/// A kind that is already active only has its timer refreshed.
pub fn pickup(state: &mut GameState, tuning: &Tuning, now: f64) {
    let Some(power_up) = state.power_up.take() else {
        return;
    };
    let kind = power_up.kind;
    let expires_at = now + tuning.effect_duration;

    if let Some(active) = state.effects.iter_mut().find(|e| e.kind() == kind) {
        active.expires_at = expires_at;
        state.events.push(GameEvent::EffectRefreshed(kind));
        log::debug!("Effect {} refreshed until {}", kind.as_str(), expires_at);
        return;
    }

    let effect = kind.activate(state, tuning);
    state.effects.push(ActiveEffect { effect, expires_at });
    state.events.push(GameEvent::EffectApplied(kind));
    log::debug!("Effect {} applied until {}", kind.as_str(), expires_at);
}

/// Drag food toward the head while a magnet is active.
///
/// Returns true when the food got close enough to snap onto the head; the
/// caller must then feed the snake.
pub fn magnet_pull(state: &mut GameState, tuning: &Tuning) -> bool {
    let Some((strength, radius)) = state.effects.iter().find_map(|e| match e.effect {
        Effect::Magnet { strength, radius } => Some((strength, radius)),
        _ => None,
    }) else {
        return false;
    };

    let head = state.snake.head();
    let to_head = head - state.food;
    let dist = to_head.length();
    if dist > radius {
        return false;
    }

    if dist < tuning.magnet_snap_reach() {
        state.food = head;
        true
    } else {
        state.food += to_head * strength;
        false
    }
}

/// Revert and remove every effect whose time is up
pub fn expire_effects(state: &mut GameState, now: f64) {
    let mut i = state.effects.len();
    while i > 0 {
        i -= 1;
        if state.effects[i].expires_at > now {
            continue;
        }
        let expired = state.effects.remove(i);
        expired.effect.revert(state);
        state.events.push(GameEvent::EffectExpired(expired.kind()));
        log::debug!("Effect {} expired", expired.kind().as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ControlMode, PowerUp};
    use glam::Vec2;

    fn state_with(kind: PowerUpKind) -> GameState {
        let mut state = GameState::new(&Tuning::default(), ControlMode::Grid, 1);
        state.power_up = Some(PowerUp {
            pos: Vec2::new(50.0, 50.0),
            kind,
        });
        state
    }

    fn give(state: &mut GameState, kind: PowerUpKind) {
        state.power_up = Some(PowerUp {
            pos: Vec2::new(50.0, 50.0),
            kind,
        });
    }

    #[test]
    fn test_slow_applies_and_reverts_exactly() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Slow);
        state.pace.move_interval = 85.0;
        state.pace.speed = 3.4;
        let before = state.pace;

        pickup(&mut state, &tuning, 1000.0);
        assert!(state.power_up.is_none());
        assert_eq!(state.pace.move_interval, 136.0);
        assert!((state.pace.speed - 2.04).abs() < 1e-5);

        // Food speed-up while slowed is discarded on expiry
        state.pace.move_interval -= 5.0;

        expire_effects(&mut state, 6999.0);
        assert_eq!(state.effects.len(), 1);
        expire_effects(&mut state, 7000.0);
        assert!(state.effects.is_empty());
        assert_eq!(state.pace, before);
        assert_eq!(
            state.events,
            vec![
                GameEvent::EffectApplied(PowerUpKind::Slow),
                GameEvent::EffectExpired(PowerUpKind::Slow)
            ]
        );
    }

    #[test]
    fn test_slow_speed_floor() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Slow);
        state.pace.speed = 1.0;
        pickup(&mut state, &tuning, 0.0);
        assert_eq!(state.pace.speed, 0.8);
    }

    #[test]
    fn test_duplicate_pickup_only_refreshes() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Slow);
        pickup(&mut state, &tuning, 0.0);
        let slowed = state.pace;

        give(&mut state, PowerUpKind::Slow);
        pickup(&mut state, &tuning, 2500.0);

        assert_eq!(state.effects.len(), 1);
        assert_eq!(state.effects[0].expires_at, 8500.0);
        assert_eq!(state.pace, slowed);
        assert_eq!(
            state.events.last(),
            Some(&GameEvent::EffectRefreshed(PowerUpKind::Slow))
        );
    }

    #[test]
    fn test_double_sets_and_resets_multiplier() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Double);
        pickup(&mut state, &tuning, 0.0);
        assert_eq!(state.score_multiplier, 2);
        expire_effects(&mut state, 6000.0);
        assert_eq!(state.score_multiplier, 1);
    }

    #[test]
    fn test_expiry_sweep_handles_several_at_once() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Slow);
        pickup(&mut state, &tuning, 0.0);
        give(&mut state, PowerUpKind::Double);
        pickup(&mut state, &tuning, 10.0);
        give(&mut state, PowerUpKind::Magnet);
        pickup(&mut state, &tuning, 20.0);
        assert_eq!(state.effects.len(), 3);

        expire_effects(&mut state, 10_000.0);
        assert!(state.effects.is_empty());
        assert_eq!(state.score_multiplier, 1);
        assert_eq!(state.pace.move_interval, tuning.initial_move_interval);
    }

    #[test]
    fn test_magnet_nudges_food() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Magnet);
        pickup(&mut state, &tuning, 0.0);
        let head = state.snake.head();
        state.food = head + Vec2::new(40.0, 0.0);

        assert!(!magnet_pull(&mut state, &tuning));
        assert!((state.food.x - (head.x + 35.2)).abs() < 1e-4);
        assert_eq!(state.food.y, head.y);
    }

    #[test]
    fn test_magnet_snaps_close_food() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Magnet);
        pickup(&mut state, &tuning, 0.0);
        let head = state.snake.head();
        state.food = head + Vec2::new(0.0, 17.0);

        assert!(magnet_pull(&mut state, &tuning));
        assert_eq!(state.food, head);
    }

    #[test]
    fn test_magnet_ignores_far_food_and_inactive() {
        let tuning = Tuning::default();
        let mut state = state_with(PowerUpKind::Magnet);
        let head = state.snake.head();
        state.food = head + Vec2::new(30.0, 0.0);
        assert!(!magnet_pull(&mut state, &tuning));
        assert_eq!(state.food, head + Vec2::new(30.0, 0.0));

        pickup(&mut state, &tuning, 0.0);
        state.food = head + Vec2::new(61.0, 0.0);
        assert!(!magnet_pull(&mut state, &tuning));
        assert_eq!(state.food, head + Vec2::new(61.0, 0.0));
    }
}
