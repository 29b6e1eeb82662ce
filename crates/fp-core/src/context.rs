use std::collections::HashMap;
use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The value stored under a world or character flag.
///
/// Guards only test whether a flag exists; the value is kept for whoever
/// inspects the context later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A flag set without an argument.
    Bool(bool),
    /// A flag set with a free-text argument.
    Text(String),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// The mutable state of one player session.
///
/// A context is created once per session, changed turn by turn and handed
/// back to the transport as an opaque blob (see [`Context::encode`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Name of the room the player is in.
    pub room: String,
    /// Acquired items in acquisition order. Duplicates are allowed.
    #[serde(default)]
    pub inventory: Vec<String>,
    /// World flags.
    #[serde(default)]
    pub world: HashMap<String, FlagValue>,
    /// Per-character flags, keyed by character name.
    #[serde(default)]
    pub characters: HashMap<String, HashMap<String, FlagValue>>,
}

impl Context {
    /// Create an empty context with the player in `room`.
    pub fn new(room: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            inventory: Vec::new(),
            world: HashMap::new(),
            characters: HashMap::new(),
        }
    }

    /// Check if the player carries an item.
    pub fn has_item(&self, item: &str) -> bool {
        self.inventory.iter().any(|i| i == item)
    }

    /// Append an item to the inventory.
    pub fn add_item(&mut self, item: impl Into<String>) {
        self.inventory.push(item.into());
    }

    /// Check if a world flag exists, whatever its value.
    pub fn has_world_flag(&self, key: &str) -> bool {
        self.world.contains_key(key)
    }

    /// Get a world flag value.
    pub fn world_flag(&self, key: &str) -> Option<&FlagValue> {
        self.world.get(key)
    }

    /// Set a world flag.
    pub fn set_world_flag(&mut self, key: impl Into<String>, value: FlagValue) {
        self.world.insert(key.into(), value);
    }

    /// Check if a character has a flag, whatever its value.
    ///
    /// A character that was never flagged has no flags at all.
    pub fn has_character_flag(&self, character: &str, key: &str) -> bool {
        self.characters
            .get(character)
            .is_some_and(|flags| flags.contains_key(key))
    }

    /// Get a character flag value.
    pub fn character_flag(&self, character: &str, key: &str) -> Option<&FlagValue> {
        self.characters.get(character)?.get(key)
    }

    /// Set a character flag, creating the character's flag map if needed.
    pub fn set_character_flag(
        &mut self,
        character: impl Into<String>,
        key: impl Into<String>,
        value: FlagValue,
    ) {
        self.characters
            .entry(character.into())
            .or_default()
            .insert(key.into(), value);
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::Encode(e.to_string()))
    }

    /// Encode the context as an opaque, transport-safe blob.
    pub fn encode(&self) -> CoreResult<String> {
        Ok(BASE64_ENGINE.encode(self.to_json()?))
    }

    /// Rebuild a context from a blob produced by [`Context::encode`].
    pub fn decode(blob: &str) -> CoreResult<Self> {
        let bytes = BASE64_ENGINE
            .decode(blob.trim())
            .map_err(|e| CoreError::Decode(format!("invalid base64: {e}")))?;
        serde_json::from_slice(&bytes).map_err(|e| CoreError::Decode(format!("invalid json: {e}")))
    }
}
