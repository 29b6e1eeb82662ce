//! Dialogue orchestration and world operations for False Prophet.
//!
//! [`FictionEngine`] owns an immutable [`Scenario`](fp_core::Scenario) and a
//! [`Matcher`] oracle. Each call takes the session [`Context`](fp_core::Context)
//! it acts on, so sessions are plain values that can be stored, encoded and
//! shipped between calls.

/// Engine configuration.
pub mod config;
/// A single turn of dialogue.
pub mod dialogue;
/// The fiction engine.
pub mod engine;
/// Error types for the fiction engine.
pub mod error;
/// Utterance-to-key matching.
pub mod matcher;
/// Text rendering of rooms and inventories.
pub mod narrator;
/// Presentation of side-effect tags.
pub mod present;

pub use config::{DEFAULT_HANDSHAKE, FictionConfig};
pub use dialogue::{HANDSHAKE_KEYWORD, NO_MATCH_KEYWORD, Turn, hear};
pub use engine::{FictionEngine, THIS_ROOM};
pub use error::{FictionError, FictionResult};
pub use matcher::{FuzzyMatcher, Matcher};
pub use present::{Presented, present};
