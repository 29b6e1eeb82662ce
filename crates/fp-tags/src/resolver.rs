//! First pass: pick the first candidate whose guard holds.

use fp_core::Context;

use crate::error::{TagError, TagResult};
use crate::lexer::{Pass, scan, strip};
use crate::tag::{Command, Tag, Target};

/// Select the first candidate whose guard tag holds against `context`.
///
/// Each candidate is guarded by its first `if` or `default` tag. `name` is
/// the speaking character and stands in for `_me`. The winner is returned
/// with its guard tags removed and its whitespace untouched.
pub fn resolve_conditional<S: AsRef<str>>(
    candidates: &[S],
    context: &Context,
    name: &str,
) -> TagResult<String> {
    for (index, candidate) in candidates.iter().enumerate() {
        let candidate = candidate.as_ref();
        let guard = scan(Pass::Guard, candidate)
            .next()
            .ok_or(TagError::GuardMissing { index })?;
        if guard_holds(&guard.tag, context, name)? {
            tracing::trace!(index, guard = %guard.tag, "guard holds");
            return Ok(strip(Pass::Guard, candidate));
        }
    }
    Err(TagError::NoConditionMet)
}

/// Evaluate one guard. Guards test existence only, never values.
pub fn guard_holds(tag: &Tag, context: &Context, name: &str) -> TagResult<bool> {
    match &tag.command {
        Command::Default => Ok(true),
        Command::If => {
            // a guard without a key has no condition and never holds
            let (Some(target), Some(key)) = (tag.target(), tag.key()) else {
                return Ok(false);
            };
            Ok(match target.resolve_me(name) {
                Target::Inventory => context.has_item(key),
                Target::World => context.has_world_flag(key),
                Target::Character(character) => context.has_character_flag(&character, key),
                Target::Me | Target::Reserved(_) => false,
            })
        }
        other => Err(TagError::InvalidCondition(other.to_string())),
    }
}
