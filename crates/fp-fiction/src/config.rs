//! Configuration for a fiction engine.

/// Utterance that asks a character to greet instead of answer.
pub const DEFAULT_HANDSHAKE: &str = "$handshake$";

/// Configuration for a fiction engine.
#[derive(Debug, Clone)]
pub struct FictionConfig {
    /// Room a fresh session starts in.
    pub default_room: String,
    /// Probe text that triggers a greeting.
    pub handshake: String,
    /// Minimum similarity (0.0-1.0) for the fuzzy matcher to accept a key.
    pub match_threshold: f64,
}

impl Default for FictionConfig {
    fn default() -> Self {
        Self {
            default_room: "throne".to_string(),
            handshake: DEFAULT_HANDSHAKE.to_string(),
            match_threshold: 0.85,
        }
    }
}

impl FictionConfig {
    /// Set the starting room.
    pub fn with_default_room(mut self, room: impl Into<String>) -> Self {
        self.default_room = room.into();
        self
    }

    /// Set the handshake probe.
    pub fn with_handshake(mut self, handshake: impl Into<String>) -> Self {
        self.handshake = handshake.into();
        self
    }

    /// Set the match threshold (clamped to 0.0-1.0).
    pub fn with_match_threshold(mut self, threshold: f64) -> Self {
        self.match_threshold = threshold.clamp(0.0, 1.0);
        self
    }
}
