//! Second pass: apply `set` tags to the context.

use std::fmt;

use fp_core::{Context, FlagValue};

use crate::lexer::{Pass, scan, strip};
use crate::tag::Target;

/// One state change performed by a `set` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// An item was appended to the inventory.
    Acquire(String),
    /// A world flag was set.
    SetWorld {
        /// Flag name.
        key: String,
        /// Stored value.
        value: FlagValue,
    },
    /// A character flag was set.
    SetCharacter {
        /// Character name.
        character: String,
        /// Flag name.
        key: String,
        /// Stored value.
        value: FlagValue,
    },
}

/// The outcome of the mutation pass over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutated {
    /// Applied changes, in tag order.
    pub mutations: Vec<Mutation>,
    /// The input with every `set` tag removed.
    pub text: String,
}

impl Mutated {
    /// Items acquired during the pass.
    pub fn acquired(&self) -> impl Iterator<Item = &str> {
        self.mutations.iter().filter_map(|m| match m {
            Mutation::Acquire(item) => Some(item.as_str()),
            _ => None,
        })
    }

    /// One `$acquire/<item>$ ` marker per acquired item.
    pub fn prefix(&self) -> String {
        self.acquired()
            .map(|item| format!("$acquire/{item}$ "))
            .collect()
    }
}

/// Markers first, then the stripped text. Whitespace is not normalized.
impl fmt::Display for Mutated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix(), self.text)
    }
}

/// Apply every `set` tag in `text` to `context`, left to right.
///
/// `name` is the speaking character and stands in for `_me`. Tags without a
/// key, without a thing, or aimed at an unknown reserved name do nothing.
/// An empty or missing arg stores `true`.
pub fn apply_mutations(text: &str, context: &mut Context, name: &str) -> Mutated {
    let mut mutations = Vec::new();

    for found in scan(Pass::Mutation, text) {
        let tag = &found.tag;
        let (Some(target), Some(key)) = (tag.target(), tag.key()) else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        let value = match tag.arg() {
            Some(arg) if !arg.is_empty() => FlagValue::Text(arg.to_string()),
            _ => FlagValue::Bool(true),
        };

        let mutation = match target.resolve_me(name) {
            Target::Inventory => {
                context.add_item(key);
                Mutation::Acquire(key.to_string())
            }
            Target::World => {
                context.set_world_flag(key, value.clone());
                Mutation::SetWorld {
                    key: key.to_string(),
                    value,
                }
            }
            Target::Character(character) => {
                context.set_character_flag(character.as_str(), key, value.clone());
                Mutation::SetCharacter {
                    character,
                    key: key.to_string(),
                    value,
                }
            }
            Target::Me | Target::Reserved(_) => continue,
        };
        tracing::debug!(?mutation, "applied");
        mutations.push(mutation);
    }

    Mutated {
        mutations,
        text: strip(Pass::Mutation, text),
    }
}

/// Collapse every whitespace run to one space and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
