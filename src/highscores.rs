//! Persisted high score
//!
//! A single integer in LocalStorage. The in-memory value is authoritative for
//! the session; storage failures are swallowed.

use serde::{Deserialize, Serialize};

/// The persisted best score. Serializes as a bare integer, which is also the
/// format older clients stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScore {
    value: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "highScore";

    pub fn new(value: u32) -> Self {
        Self { value }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Raise the stored value if `score` beats it. Returns true on a new
    /// record.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            return true;
        }
        false
    }

    /// Load from LocalStorage (WASM only). Absent or unparsable reads as 0.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(score) = serde_json::from_str::<HighScore>(&raw) {
                    log::info!("Loaded high score: {}", score.value);
                    return score;
                }
            }
        }

        log::info!("No stored high score, starting at 0");
        Self::default()
    }

    /// Save to LocalStorage (WASM only), best-effort.
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(raw) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &raw);
                log::info!("High score saved: {}", self.value);
            }
        }
    }

    /// Wipe the stored value (WASM only).
    #[cfg(target_arch = "wasm32")]
    pub fn clear(&mut self) {
        self.value = 0;
        if let Some(storage) = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
        {
            let _ = storage.remove_item(Self::STORAGE_KEY);
            log::info!("High score cleared");
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

    #[cfg(not(target_arch = "wasm32"))]
    pub fn clear(&mut self) {
        self.value = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_is_monotonic() {
        let mut hs = HighScore::default();
        assert!(hs.record(10));
        assert!(!hs.record(5));
        assert_eq!(hs.value(), 10);
        assert!(hs.record(11));
        assert_eq!(hs.value(), 11);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let hs = HighScore::new(42);
        assert_eq!(serde_json::to_string(&hs).unwrap(), "42");
        assert_eq!(serde_json::from_str::<HighScore>("42").unwrap(), hs);
    }

    #[test]
    fn test_garbage_does_not_parse() {
        assert!(serde_json::from_str::<HighScore>("not a number").is_err());
        assert!(serde_json::from_str::<HighScore>("-3").is_err());
    }

    #[test]
    fn test_clear_resets_value() {
        let mut hs = HighScore::new(99);
        hs.clear();
        assert_eq!(hs.value(), 0);
    }
}
