//! Game state and core simulation types
//!
//! Everything the engine mutates lives in [`GameState`]; renderers and the
//! HUD read it (or a [`Snapshot`]) after each frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::cell_center;
use crate::tuning::Tuning;

/// A point in canvas space (pixels)
pub type Position = Vec2;

/// Which control scheme drives the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    /// Cell-quantized stepping from queued direction keys
    #[default]
    Grid,
    /// Head chases the pointer every frame
    Pursuit,
}

impl ControlMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlMode::Grid => "grid",
            ControlMode::Pursuit => "pursuit",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "grid" | "keyboard" => Some(ControlMode::Grid),
            "pursuit" | "mouse" | "pointer" => Some(ControlMode::Pursuit),
            _ => None,
        }
    }
}

/// Axis-aligned grid direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit vector in screen space (y grows downward)
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Arrow keys and WASD
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "arrowup" | "w" => Some(Direction::Up),
            "arrowdown" | "s" => Some(Direction::Down),
            "arrowleft" | "a" => Some(Direction::Left),
            "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The snake body, head first. Never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snake {
    segments: Vec<Position>,
}

impl Snake {
    /// Straight body of `length` cells ending at `head`, trailing to the left
    pub fn new(head: Position, length: usize, cell: f32) -> Self {
        let segments = (0..length.max(1))
            .map(|i| head - Vec2::new(i as f32 * cell, 0.0))
            .collect();
        Self { segments }
    }

    /// Starting snake centred on the middle cell
    pub fn centered(tuning: &Tuning) -> Self {
        let (cols, rows) = tuning.grid_dims();
        let head = cell_center(cols / 2, rows / 2, tuning.cell_size);
        Self::new(head, tuning.initial_length, tuning.cell_size)
    }

    pub fn from_segments(segments: Vec<Position>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    #[inline]
    pub fn head(&self) -> Position {
        self.segments[0]
    }

    #[inline]
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Never true for a constructed snake
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[Position] {
        &self.segments
    }

    /// Append a copy of the tail
    pub fn grow(&mut self) {
        let tail = self.tail();
        self.segments.push(tail);
    }

    /// New head in front, body shifts back by one
    pub(crate) fn push_head(&mut self, head: Position) {
        self.segments.insert(0, head);
    }

    /// Drop the tail, keeping at least the head
    pub(crate) fn drop_tail(&mut self) {
        if self.segments.len() > 1 {
            self.segments.pop();
        }
    }

    pub(crate) fn segments_mut(&mut self) -> &mut [Position] {
        &mut self.segments
    }

    /// True if any segment lies within `reach` of `pos`
    pub fn occupies(&self, pos: Position, reach: f32) -> bool {
        self.segments.iter().any(|s| s.distance(pos) < reach)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Slower stepping / travel
    Slow,
    /// Double points per food
    Double,
    /// Food drifts toward the head
    Magnet,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [PowerUpKind::Slow, PowerUpKind::Double, PowerUpKind::Magnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            PowerUpKind::Slow => "slow",
            PowerUpKind::Double => "double",
            PowerUpKind::Magnet => "magnet",
        }
    }
}

/// The single power-up lying on the board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub pos: Position,
    pub kind: PowerUpKind,
}

/// Movement rate parameters. Owned by the session, changed only by food
/// speed-ups and effects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pace {
    /// Grid mode step period (ms)
    pub move_interval: f64,
    /// Pursuit mode travel per frame (pixels)
    pub speed: f32,
}

impl Pace {
    pub fn initial(tuning: &Tuning) -> Self {
        Self {
            move_interval: tuning.initial_move_interval,
            speed: tuning.initial_speed,
        }
    }
}

/// A live effect with the data needed to undo it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Effect {
    /// Pace captured at apply time, restored verbatim on expiry
    Slow { prev: Pace },
    Double,
    Magnet { strength: f32, radius: f32 },
}

impl Effect {
    pub fn kind(&self) -> PowerUpKind {
        match self {
            Effect::Slow { .. } => PowerUpKind::Slow,
            Effect::Double => PowerUpKind::Double,
            Effect::Magnet { .. } => PowerUpKind::Magnet,
        }
    }
}

/// One active effect per kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActiveEffect {
    pub effect: Effect,
    /// Absolute frame time (ms) at which the effect ends
    pub expires_at: f64,
}

impl ActiveEffect {
    #[inline]
    pub fn kind(&self) -> PowerUpKind {
        self.effect.kind()
    }

    /// Milliseconds left, never negative
    pub fn remaining(&self, now: f64) -> f64 {
        (self.expires_at - now).max(0.0)
    }
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for start
    Menu,
    /// Active run
    Running,
    /// Run frozen
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// Things the presentation layer reacts to (sound, HUD, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Food eaten
    Grew { score: u64, length: usize },
    /// Head hit the body
    Collided,
    /// Run over; `new_best` means the caller should persist `best`
    GameOver { score: u64, best: u64, new_best: bool },
    PowerUpSpawned(PowerUpKind),
    EffectApplied(PowerUpKind),
    /// Duplicate pickup extended an active effect
    EffectRefreshed(PowerUpKind),
    EffectExpired(PowerUpKind),
}

/// Complete mutable simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub mode: ControlMode,
    pub score: u64,
    /// 1, or 2 while `Double` is active
    pub score_multiplier: u64,
    pub pace: Pace,
    pub snake: Snake,
    pub food: Position,
    pub power_up: Option<PowerUp>,
    pub effects: Vec<ActiveEffect>,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    pub fn new(tuning: &Tuning, mode: ControlMode, seed: u64) -> Self {
        Self {
            phase: GamePhase::Menu,
            mode,
            score: 0,
            score_multiplier: 1,
            pace: Pace::initial(tuning),
            snake: Snake::centered(tuning),
            food: Vec2::ZERO,
            power_up: None,
            effects: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Back to a fresh run layout. Food and power-up placement is left to the caller.
    pub fn reset_run(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.score_multiplier = 1;
        self.pace = Pace::initial(tuning);
        self.snake = Snake::centered(tuning);
        self.power_up = None;
        self.effects.clear();
        self.events.clear();
    }

    pub fn effect(&self, kind: PowerUpKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind() == kind)
    }

    pub fn has_effect(&self, kind: PowerUpKind) -> bool {
        self.effect(kind).is_some()
    }

    pub fn is_live(&self) -> bool {
        matches!(self.phase, GamePhase::Running | GamePhase::Paused)
    }
}

/// Remaining time on one effect, for the HUD
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectView {
    pub kind: PowerUpKind,
    pub remaining_ms: f64,
}

/// Read-only view of a frame for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub mode: ControlMode,
    pub score: u64,
    pub best: u64,
    pub snake: Vec<Position>,
    /// Head sprite orientation (radians)
    pub facing: f32,
    pub food: Position,
    pub power_up: Option<PowerUp>,
    pub effects: Vec<EffectView>,
}
