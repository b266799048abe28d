//! Best score record
//!
//! The session only compares; saving is up to the host. In the browser the
//! value lives in LocalStorage as a bare integer.

use serde::{Deserialize, Serialize};

/// Highest score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u64,
}

impl BestScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snakeHighScore";

    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Would this score replace the record?
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.value
    }

    /// Record `score` if it is a new best. Returns true when it was.
    pub fn submit(&mut self, score: u64) -> bool {
        if self.beaten_by(score) {
            self.value = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(value) = serde_json::from_str::<u64>(raw.trim()) {
                    log::info!("Loaded best score {}", value);
                    return Self::new(value);
                }
            }
        }

        log::info!("No best score found, starting fresh");
        Self::default()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(raw) = serde_json::to_string(&self.value) {
                let _ = storage.set_item(Self::STORAGE_KEY, &raw);
                log::info!("Best score saved ({})", self.value);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_only_on_strictly_higher() {
        let mut best = BestScore::new(10);
        assert!(!best.submit(10));
        assert!(!best.submit(3));
        assert_eq!(best.value, 10);
        assert!(best.submit(11));
        assert_eq!(best.value, 11);
    }

    #[test]
    fn test_zero_never_beats_empty_record() {
        let mut best = BestScore::default();
        assert!(!best.beaten_by(0));
        assert!(!best.submit(0));
        assert!(best.submit(1));
    }
}
