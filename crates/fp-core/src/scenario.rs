use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::direction::Direction;
use crate::error::{CoreError, CoreResult};

/// Authored dialogue bound to one candidate key of a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    /// Unconditional reply text.
    Text(String),
    /// Guarded candidates, each starting with an `if` or `default` tag.
    Conditional(Vec<String>),
}

impl Reply {
    /// An empty reply is treated as if the key had not matched at all.
    pub fn is_empty(&self) -> bool {
        match self {
            Reply::Text(text) => text.is_empty(),
            Reply::Conditional(candidates) => candidates.is_empty(),
        }
    }
}

/// A room the player can stand in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Unique room name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    exits: [Option<String>; 4],
    things: Vec<String>,
}

impl Room {
    /// Create a room with no exits and nothing in it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            exits: Default::default(),
            things: Vec::new(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an exit towards another room.
    pub fn with_exit(mut self, direction: Direction, room: impl Into<String>) -> Self {
        self.exits[direction.index()] = Some(room.into());
        self
    }

    /// The room an exit leads to, if there is one.
    pub fn exit(&self, direction: Direction) -> Option<&str> {
        self.exits[direction.index()].as_deref()
    }

    /// All exits in north, south, east, west order.
    pub fn exits(&self) -> impl Iterator<Item = (Direction, &str)> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.exit(dir).map(|room| (dir, room)))
    }

    /// Names of the characters placed in this room, in scenario order.
    pub fn things(&self) -> &[String] {
        &self.things
    }

    /// Check if a character is in this room.
    pub fn has_thing(&self, name: &str) -> bool {
        self.things.iter().any(|t| t == name)
    }

    fn put_thing(&mut self, name: impl Into<String>) {
        self.things.push(name.into());
    }
}

/// A character the player can talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// Unique character name.
    pub name: String,
    /// The room the character stands in, if placed anywhere.
    pub room: Option<String>,
    /// Text shown when the player looks at the character.
    pub description: String,
    /// Text answered to the handshake probe.
    pub greeting: String,
    /// Text answered when no candidate key matches.
    pub no_match: String,
    replies: Vec<(String, Reply)>,
}

impl Character {
    /// Create a character with no replies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            room: None,
            description: String::new(),
            greeting: String::new(),
            no_match: String::new(),
            replies: Vec::new(),
        }
    }

    /// Place the character in a room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the greeting.
    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    /// Set the no-match text.
    pub fn with_no_match(mut self, no_match: impl Into<String>) -> Self {
        self.no_match = no_match.into();
        self
    }

    /// Bind a reply to a candidate key. A later binding replaces an earlier one.
    pub fn with_reply(mut self, key: impl Into<String>, reply: Reply) -> Self {
        let key = key.into();
        match self.replies.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = reply,
            None => self.replies.push((key, reply)),
        }
        self
    }

    /// The reply bound to a key.
    pub fn reply(&self, key: &str) -> Option<&Reply> {
        self.replies
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, reply)| reply)
    }

    /// All bound replies in authored order.
    pub fn replies(&self) -> impl Iterator<Item = (&str, &Reply)> {
        self.replies.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Keys offered to the matcher. Reserved keys start with `_`.
    pub fn candidate_keys(&self) -> Vec<&str> {
        self.replies
            .iter()
            .map(|(k, _)| k.as_str())
            .filter(|k| !k.starts_with('_'))
            .collect()
    }
}

/// The authored world: rooms, characters and the intro text.
///
/// Loaded once and never mutated while sessions are played.
#[derive(Debug, Clone, Default)]
pub struct Scenario {
    /// Intro text shown when a session starts.
    pub hello: String,
    rooms: Vec<Room>,
    characters: Vec<Character>,

    // Indexes
    room_index: HashMap<String, usize>,
    character_index: HashMap<String, usize>,
}

impl Scenario {
    /// Create an empty scenario.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the intro text.
    pub fn with_hello(mut self, hello: impl Into<String>) -> Self {
        self.hello = hello.into();
        self
    }

    /// Register a room.
    pub fn add_room(&mut self, room: Room) -> CoreResult<()> {
        if self.room_index.contains_key(&room.name) {
            return Err(CoreError::DuplicateName(room.name));
        }
        self.room_index.insert(room.name.clone(), self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    /// Register a character and place it in its room.
    ///
    /// The room must already be registered.
    pub fn add_character(&mut self, character: Character) -> CoreResult<()> {
        if self.character_index.contains_key(&character.name) {
            return Err(CoreError::DuplicateName(character.name));
        }
        if let Some(room_name) = &character.room {
            let idx = *self
                .room_index
                .get(room_name)
                .ok_or_else(|| CoreError::UnknownRoom(room_name.clone()))?;
            self.rooms[idx].put_thing(character.name.clone());
        }
        self.character_index
            .insert(character.name.clone(), self.characters.len());
        self.characters.push(character);
        Ok(())
    }

    /// Look up a room by name.
    pub fn room(&self, name: &str) -> Option<&Room> {
        self.room_index.get(name).map(|&idx| &self.rooms[idx])
    }

    /// Look up a character by name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.character_index
            .get(name)
            .map(|&idx| &self.characters[idx])
    }

    /// All rooms in authored order.
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    /// All characters in authored order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    /// Number of rooms.
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Number of characters.
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// Load a scenario file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_yaml_str(&source)?;
        tracing::info!(
            path = %path.display(),
            rooms = scenario.room_count(),
            characters = scenario.character_count(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Parse a scenario from YAML source.
    ///
    /// Top-level keys are `_hello`, `rooms` and `characters`. Inside a room,
    /// `_description` and the four direction names are read. Inside a
    /// character, `_room`, `_description`, `_hi` and `_no_match` are reserved;
    /// every other key binds a [`Reply`].
    pub fn from_yaml_str(source: &str) -> CoreResult<Self> {
        let raw: RawScenario = serde_yaml::from_str(source)?;
        let mut scenario = Scenario::new().with_hello(raw.hello);

        for (key, value) in raw.rooms {
            let name = key_str(&key)?;
            let fields: RawRoom = if value.is_null() {
                RawRoom::default()
            } else {
                serde_yaml::from_value(value)?
            };
            let mut room = Room::new(name).with_description(fields.description);
            for (dir, target) in [
                (Direction::North, fields.north),
                (Direction::South, fields.south),
                (Direction::East, fields.east),
                (Direction::West, fields.west),
            ] {
                if let Some(target) = target {
                    room = room.with_exit(dir, target);
                }
            }
            scenario.add_room(room)?;
        }

        for (key, value) in raw.characters {
            let name = key_str(&key)?;
            let character = parse_character(name, value)?;
            scenario.add_character(character)?;
        }

        Ok(scenario)
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawScenario {
    #[serde(rename = "_hello", default)]
    hello: String,
    #[serde(default)]
    rooms: Mapping,
    #[serde(default)]
    characters: Mapping,
}

#[derive(Debug, Default, Deserialize)]
struct RawRoom {
    #[serde(rename = "_description", default)]
    description: String,
    north: Option<String>,
    south: Option<String>,
    east: Option<String>,
    west: Option<String>,
}

fn key_str(key: &Value) -> CoreResult<&str> {
    key.as_str()
        .ok_or_else(|| CoreError::Validation(format!("expected a string key, found {key:?}")))
}

fn parse_character(name: &str, value: Value) -> CoreResult<Character> {
    let mut character = Character::new(name);
    let fields = match value {
        Value::Null => return Ok(character),
        Value::Mapping(fields) => fields,
        other => {
            return Err(CoreError::Validation(format!(
                "character {name} must be a mapping, found {other:?}"
            )));
        }
    };

    for (key, value) in fields {
        let key = key_str(&key)?;
        match key {
            "_room" => character.room = Some(serde_yaml::from_value(value)?),
            "_description" => character.description = serde_yaml::from_value(value)?,
            "_hi" => character.greeting = serde_yaml::from_value(value)?,
            "_no_match" => character.no_match = serde_yaml::from_value(value)?,
            reserved if reserved.starts_with('_') => {
                tracing::debug!(character = name, key = reserved, "ignoring reserved key");
            }
            _ => {
                let reply: Reply = serde_yaml::from_value(value)?;
                character = character.with_reply(key, reply);
            }
        }
    }

    Ok(character)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
_hello: Welcome to the court.
rooms:
  throne:
    _description: A gilded hall.
    north: garden
  garden:
    _description: Roses everywhere.
    south: throne
  cellar:
characters:
  king:
    _room: throne
    _description: A tired old king.
    _hi: What do you want?
    _no_match: The king stares blankly.
    battle: We fight at dawn.
    treasure:
      - "$if/_world/vault_open$ Take what you like."
      - "$default$ The vault is sealed."
  guard:
    _room: throne
    _hi: Halt.
  gardener:
    _room: garden
    _secret: never offered
    roses: They bloom in spring.
"#;

    #[test]
    fn load_rooms_in_order() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        assert_eq!(scenario.hello, "Welcome to the court.");
        let names: Vec<_> = scenario.rooms().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["throne", "garden", "cellar"]);

        let throne = scenario.room("throne").unwrap();
        assert_eq!(throne.description, "A gilded hall.");
        assert_eq!(throne.exit(Direction::North), Some("garden"));
        assert_eq!(throne.exit(Direction::South), None);
        assert_eq!(scenario.room("cellar").unwrap().exits().count(), 0);
    }

    #[test]
    fn characters_are_placed_in_rooms() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        let throne = scenario.room("throne").unwrap();
        assert_eq!(throne.things(), ["king".to_string(), "guard".to_string()]);
        assert!(throne.has_thing("guard"));
        assert!(!throne.has_thing("gardener"));
    }

    #[test]
    fn character_fields_and_replies() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        let king = scenario.character("king").unwrap();
        assert_eq!(king.room.as_deref(), Some("throne"));
        assert_eq!(king.greeting, "What do you want?");
        assert_eq!(king.no_match, "The king stares blankly.");
        assert_eq!(
            king.reply("battle"),
            Some(&Reply::Text("We fight at dawn.".to_string()))
        );
        assert!(matches!(king.reply("treasure"), Some(Reply::Conditional(c)) if c.len() == 2));
        assert_eq!(king.candidate_keys(), vec!["battle", "treasure"]);
    }

    #[test]
    fn reserved_keys_are_not_candidates() {
        let scenario = Scenario::from_yaml_str(SCENARIO).unwrap();
        let gardener = scenario.character("gardener").unwrap();
        assert_eq!(gardener.candidate_keys(), vec!["roses"]);
        assert!(gardener.reply("_secret").is_none());
    }

    #[test]
    fn unknown_character_room_is_an_error() {
        let source = "rooms:\n  hall:\ncharacters:\n  ghost:\n    _room: attic\n";
        assert!(matches!(
            Scenario::from_yaml_str(source),
            Err(CoreError::UnknownRoom(r)) if r == "attic"
        ));
    }

    #[test]
    fn duplicate_room_is_rejected() {
        let mut scenario = Scenario::new();
        scenario.add_room(Room::new("hall")).unwrap();
        assert!(matches!(
            scenario.add_room(Room::new("hall")),
            Err(CoreError::DuplicateName(_))
        ));
    }

    #[test]
    fn empty_replies() {
        assert!(Reply::Text(String::new()).is_empty());
        assert!(Reply::Conditional(vec![]).is_empty());
        assert!(!Reply::Text("hi".to_string()).is_empty());
    }

    #[test]
    fn rebinding_a_reply_replaces_it() {
        let c = Character::new("king")
            .with_reply("battle", Reply::Text("a".into()))
            .with_reply("battle", Reply::Text("b".into()));
        assert_eq!(c.candidate_keys(), vec!["battle"]);
        assert_eq!(c.reply("battle"), Some(&Reply::Text("b".into())));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scenario.yml");
        std::fs::write(&path, SCENARIO).unwrap();
        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.character_count(), 3);
        assert_eq!(scenario.room_count(), 3);
    }

    #[test]
    fn load_missing_file() {
        let err = Scenario::load(Path::new("/nonexistent/scenario.yml")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
