//! Food relocation and power-up spawning

use rand::Rng;

use super::state::{GameEvent, GameState, Position, PowerUp, PowerUpKind};
use crate::cell_center;
use crate::tuning::Tuning;

/// Center of a uniformly random cell
fn random_cell(state: &mut GameState, tuning: &Tuning) -> Position {
    let (cols, rows) = tuning.grid_dims();
    let col = state.rng.random_range(0..cols.max(1));
    let row = state.rng.random_range(0..rows.max(1));
    cell_center(col, row, tuning.cell_size)
}

/// Move the food to a random cell at least one cell away from every segment.
///
/// Random rolls come first; once they run out the board is scanned in order.
/// A board with no free cell at all gets the food on the last roll.
pub fn place_food(state: &mut GameState, tuning: &Tuning) {
    let (cols, rows) = tuning.grid_dims();
    let budget = cols.max(1) * rows.max(1) * 4;

    let mut candidate = random_cell(state, tuning);
    for _ in 0..budget {
        if !state.snake.occupies(candidate, tuning.cell_size) {
            state.food = candidate;
            return;
        }
        candidate = random_cell(state, tuning);
    }

    let free = (0..rows)
        .flat_map(|row| (0..cols).map(move |col| (col, row)))
        .map(|(col, row)| cell_center(col, row, tuning.cell_size))
        .find(|&pos| !state.snake.occupies(pos, tuning.cell_size));

    state.food = match free {
        Some(pos) => pos,
        None => {
            log::warn!("Board is full, food placed under the body");
            candidate
        }
    };
}

/// Roll for a new power-up. No-op while one is already on the board.
///
/// Returns true if one was placed.
pub fn roll_power_up(state: &mut GameState, tuning: &Tuning, chance: f32) -> bool {
    if state.power_up.is_some() {
        return false;
    }
    let roll: f32 = state.rng.random();
    if roll >= chance {
        return false;
    }

    for _ in 0..tuning.power_up_attempts {
        let pos = random_cell(state, tuning);
        let kind = PowerUpKind::ALL[state.rng.random_range(0..PowerUpKind::ALL.len())];

        let near_food = pos.distance(state.food) < tuning.cell_size;
        if near_food || state.snake.occupies(pos, tuning.cell_size) {
            continue;
        }

        state.power_up = Some(PowerUp { pos, kind });
        state.events.push(GameEvent::PowerUpSpawned(kind));
        log::debug!("Power-up {} spawned at ({}, {})", kind.as_str(), pos.x, pos.y);
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{ControlMode, Snake};
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(&Tuning::default(), ControlMode::Grid, 7)
    }

    #[test]
    fn test_food_lands_on_free_cell_center() {
        let tuning = Tuning::default();
        let mut state = state();
        for _ in 0..200 {
            place_food(&mut state, &tuning);
            assert!(!state.snake.occupies(state.food, tuning.cell_size));
            assert_eq!((state.food.x - 10.0) % 20.0, 0.0);
            assert_eq!((state.food.y - 10.0) % 20.0, 0.0);
        }
    }

    #[test]
    fn test_food_on_nearly_full_board_finds_last_cell() {
        let tuning = Tuning {
            canvas_width: 60.0,
            canvas_height: 20.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(&tuning, ControlMode::Grid, 3);
        state.snake =
            Snake::from_segments(vec![Vec2::new(10.0, 10.0), Vec2::new(30.0, 10.0)]).unwrap();
        place_food(&mut state, &tuning);
        assert_eq!(state.food, Vec2::new(50.0, 10.0));
    }

    #[test]
    fn test_power_up_respects_chance() {
        let tuning = Tuning::default();
        let mut state = state();
        assert!(!roll_power_up(&mut state, &tuning, 0.0));
        assert!(state.power_up.is_none());

        assert!(roll_power_up(&mut state, &tuning, 1.0));
        let power_up = state.power_up.expect("spawned");
        assert!(power_up.pos.distance(state.food) >= tuning.cell_size);
        assert!(!state.snake.occupies(power_up.pos, tuning.cell_size));
        assert_eq!(state.events, vec![GameEvent::PowerUpSpawned(power_up.kind)]);
    }

    #[test]
    fn test_power_up_never_replaced() {
        let tuning = Tuning::default();
        let mut state = state();
        assert!(roll_power_up(&mut state, &tuning, 1.0));
        let first = state.power_up;
        assert!(!roll_power_up(&mut state, &tuning, 1.0));
        assert_eq!(state.power_up, first);
    }

    #[test]
    fn test_power_up_gives_up_on_crowded_board() {
        let tuning = Tuning {
            canvas_width: 20.0,
            canvas_height: 20.0,
            ..Tuning::default()
        };
        let mut state = GameState::new(&tuning, ControlMode::Grid, 11);
        state.food = Vec2::new(10.0, 10.0);
        assert!(!roll_power_up(&mut state, &tuning, 1.0));
        assert!(state.power_up.is_none());
    }
}
