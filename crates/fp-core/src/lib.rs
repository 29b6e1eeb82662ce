//! Core types for False Prophet: the per-player session context and the
//! scenario registries it is evaluated against.
//!
//! Nothing in this crate knows about the tag language. A [`Scenario`] is
//! authored data loaded once from YAML; a [`Context`] is the mutable state of
//! one player session and round-trips through an opaque text blob.

/// Per-session mutable state and its blob codec.
pub mod context;
/// Cardinal directions used by room exits.
pub mod direction;
/// Error types used throughout the crate.
pub mod error;
/// Rooms, characters, replies and YAML scenario loading.
pub mod scenario;

/// Re-export context types.
pub use context::{Context, FlagValue};
/// Re-export direction type.
pub use direction::Direction;
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export scenario types.
pub use scenario::{Character, Reply, Room, Scenario};
