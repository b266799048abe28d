//! Browser bindings
//!
//! The page owns the canvas, audio and DOM. It forwards input here, calls
//! `frame` from `requestAnimationFrame`, and draws from `snapshot`.

use std::sync::Once;

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::best_score::BestScore;
use crate::sim::{ControlMode, Direction, GameEvent, GamePhase, Session};
use crate::tuning::Tuning;

static INIT: Once = Once::new();

fn init_logging() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
    });
}

/// Game instance handed to JavaScript
#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    /// Events from the last frame, JSON encoded
    last_events: String,
}

#[wasm_bindgen]
impl WebSession {
    /// `tuning_json` may be empty for default balance
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: &str) -> Result<WebSession, JsValue> {
        init_logging();

        let mut tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        tuning.canvas_width = width;
        tuning.canvas_height = height;
        tuning
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Snake Rush ready ({}x{})", width, height);
        Ok(WebSession {
            session: Session::new(tuning, ControlMode::Grid, BestScore::load()),
            last_events: String::from("[]"),
        })
    }

    pub fn start(&mut self) {
        self.session.start();
    }

    /// Advance to `timestamp` (ms, from requestAnimationFrame).
    /// Returns false once the run is no longer live.
    pub fn frame(&mut self, timestamp: f64) -> bool {
        self.session.frame(timestamp);

        let events = self.session.drain_events();
        for event in &events {
            if let GameEvent::GameOver { new_best: true, .. } = event {
                self.session.best.save();
            }
        }
        self.last_events = serde_json::to_string(&events).unwrap_or_else(|_| String::from("[]"));

        self.session.state.is_live()
    }

    /// Events raised by the last `frame`, as JSON
    pub fn events(&self) -> String {
        self.last_events.clone()
    }

    /// Keyboard input (`KeyboardEvent.key`). Returns true if the key was a direction.
    pub fn key(&mut self, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.session.turn(dir);
                true
            }
            None => false,
        }
    }

    pub fn pointer(&mut self, x: f32, y: f32) {
        self.session.point_at(Vec2::new(x, y));
    }

    pub fn toggle_pause(&mut self) {
        self.session.toggle_pause();
    }

    pub fn paused(&self) -> bool {
        self.session.state.phase == GamePhase::Paused
    }

    /// "grid"/"keyboard" or "pursuit"/"mouse". Resets to the menu.
    pub fn set_mode(&mut self, mode: &str) -> bool {
        match ControlMode::from_str(mode) {
            Some(mode) => {
                self.session.set_mode(mode);
                true
            }
            None => {
                log::warn!("Unknown control mode: {}", mode);
                false
            }
        }
    }

    pub fn score(&self) -> f64 {
        self.session.state.score as f64
    }

    pub fn best(&self) -> f64 {
        self.session.best.value as f64
    }

    /// Full render state as JSON
    pub fn snapshot(&self, timestamp: f64) -> String {
        serde_json::to_string(&self.session.snapshot(timestamp)).unwrap_or_default()
    }
}
