use std::sync::Arc;

use fp_core::{Context, Direction, Scenario};

use crate::config::FictionConfig;
use crate::dialogue::{self, Turn};
use crate::error::{FictionError, FictionResult};
use crate::matcher::Matcher;
use crate::narrator;

/// Room name that stands for wherever the player currently is.
pub const THIS_ROOM: &str = "_this";

/// Plays a loaded scenario.
///
/// The engine is immutable once built: every operation takes the session
/// [`Context`] explicitly, so one engine can serve many sessions at once.
pub struct FictionEngine {
    scenario: Scenario,
    matcher: Arc<dyn Matcher>,
    config: FictionConfig,
}

impl FictionEngine {
    /// Create an engine with the default configuration.
    pub fn new(scenario: Scenario, matcher: Arc<dyn Matcher>) -> Self {
        Self {
            scenario,
            matcher,
            config: FictionConfig::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: FictionConfig) -> Self {
        self.config = config;
        self
    }

    /// The scenario being played.
    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    /// The active configuration.
    pub fn config(&self) -> &FictionConfig {
        &self.config
    }

    /// A fresh session standing in the default room.
    pub fn default_context(&self) -> Context {
        Context::new(self.config.default_room.clone())
    }

    /// The scenario intro text.
    pub fn hello(&self) -> &str {
        &self.scenario.hello
    }

    /// Say something to a character and return its tagged reply.
    ///
    /// Does not check that the character is within earshot; see
    /// [`can_hear`](Self::can_hear).
    pub fn hear(
        &self,
        context: &mut Context,
        character: &str,
        utterance: &str,
    ) -> FictionResult<String> {
        self.turn(context, character, utterance)
            .map(|turn| turn.to_string())
    }

    /// Like [`hear`](Self::hear), but returns the structured turn.
    pub fn turn(
        &self,
        context: &mut Context,
        character: &str,
        utterance: &str,
    ) -> FictionResult<Turn> {
        let speaker = self
            .scenario
            .character(character)
            .ok_or_else(|| FictionError::UnknownCharacter(character.to_string()))?;

        let turn = dialogue::hear(
            speaker,
            context,
            utterance,
            self.matcher.as_ref(),
            &self.config.handshake,
        )
        .inspect_err(|err| tracing::warn!(character, %err, "reply could not be resolved"))?;

        tracing::debug!(
            character,
            keyword = %turn.keyword,
            mutations = turn.mutations.len(),
            "turn"
        );
        Ok(turn)
    }

    /// A character's description.
    pub fn describe_character(&self, name: &str) -> FictionResult<String> {
        self.scenario
            .character(name)
            .map(|c| c.description.clone())
            .ok_or_else(|| FictionError::UnknownCharacter(name.to_string()))
    }

    /// Describe a room by name; [`THIS_ROOM`] means the player's room.
    pub fn describe_room(&self, context: &Context, name: &str) -> FictionResult<String> {
        let name = if name == THIS_ROOM {
            context.room.as_str()
        } else {
            name
        };
        self.scenario
            .room(name)
            .map(narrator::describe_room)
            .ok_or_else(|| FictionError::UnknownRoom(name.to_string()))
    }

    /// Describe the player's inventory.
    pub fn inventory(&self, context: &Context) -> String {
        narrator::describe_inventory(&context.inventory)
    }

    /// Check if a character stands in the player's room.
    pub fn can_hear(&self, context: &Context, character: &str) -> bool {
        self.scenario
            .room(&context.room)
            .is_some_and(|room| room.has_thing(character))
    }

    /// Walk through an exit and return the new room name.
    ///
    /// Returns `None`, leaving `context` untouched, if the direction is not
    /// understood, the current room is unknown, or the exit is missing or
    /// leads nowhere.
    pub fn go(&self, context: &mut Context, direction: &str) -> Option<String> {
        let direction = Direction::parse(direction)?;
        let target = self.scenario.room(&context.room)?.exit(direction)?;
        let room = self.scenario.room(target)?;
        tracing::debug!(from = %context.room, to = %room.name, %direction, "moved");
        context.room = room.name.clone();
        Some(room.name.clone())
    }
}

impl std::fmt::Debug for FictionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FictionEngine")
            .field("rooms", &self.scenario.room_count())
            .field("characters", &self.scenario.character_count())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
