//! One conversational turn with a character.

use std::fmt;

use fp_core::{Character, Context, Reply};
use fp_tags::{Mutation, TagResult, apply_mutations, normalize_whitespace, resolve_conditional};

use crate::matcher::Matcher;

/// Keyword emitted when the handshake probe is heard.
pub const HANDSHAKE_KEYWORD: &str = "handshake";

/// Keyword emitted when no candidate key matched.
pub const NO_MATCH_KEYWORD: &str = "_no_match";

/// What a character said back, with the state changes it caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    /// The matched key, [`HANDSHAKE_KEYWORD`] or [`NO_MATCH_KEYWORD`].
    pub keyword: String,
    /// Changes applied to the context, in tag order.
    pub mutations: Vec<Mutation>,
    /// Acquire markers and reply text, whitespace normalized.
    pub text: String,
}

impl Turn {
    /// True if the character did not recognize the utterance.
    pub fn is_no_match(&self) -> bool {
        self.keyword == NO_MATCH_KEYWORD
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$keyword/{}$ {}", self.keyword, self.text)
    }
}

/// Run one turn: match, resolve, mutate.
///
/// The handshake probe short-circuits to the greeting and never touches
/// `context`. A missing or empty reply falls back to the no-match text,
/// which still goes through the mutation pass. On a resolve error
/// `context` is left unchanged.
pub fn hear(
    character: &Character,
    context: &mut Context,
    utterance: &str,
    matcher: &dyn Matcher,
    handshake: &str,
) -> TagResult<Turn> {
    if !handshake.is_empty() && utterance.contains(handshake) {
        return Ok(Turn {
            keyword: HANDSHAKE_KEYWORD.to_string(),
            mutations: Vec::new(),
            text: normalize_whitespace(&character.greeting),
        });
    }

    let candidates = character.candidate_keys();
    let matched = matcher
        .best_match(utterance, &candidates)
        .and_then(|key| {
            let reply = character.reply(&key)?;
            (!key.starts_with('_') && !reply.is_empty()).then_some((key, reply))
        });

    let (keyword, text) = match matched {
        Some((key, Reply::Text(text))) => (key, text.clone()),
        Some((key, Reply::Conditional(candidates))) => {
            let text = resolve_conditional(candidates, context, &character.name)?;
            (key, text)
        }
        None => (NO_MATCH_KEYWORD.to_string(), character.no_match.clone()),
    };

    let mutated = apply_mutations(&text, context, &character.name);
    Ok(Turn {
        keyword,
        text: normalize_whitespace(&mutated.to_string()),
        mutations: mutated.mutations,
    })
}
