//! Interpretation of the side-effect tags left in a reply.
//!
//! The engine never interprets `acquire`, `keyword` or `win`; a front end
//! calls [`present`] to turn them into notices and strip them from the text.

use fp_tags::{Command, Pass, normalize_whitespace, scan, strip};

/// A reply ready to show to the player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Presented {
    /// Notices raised by side-effect tags, in order.
    pub notices: Vec<String>,
    /// The reply with every tag removed.
    pub text: String,
    /// A `win` tag was present.
    pub won: bool,
}

/// Interpret side-effect tags. Keywords are only shown when `cheat` is set.
pub fn present(reply: &str, cheat: bool) -> Presented {
    let mut presented = Presented::default();

    for found in scan(Pass::Any, reply) {
        match (&found.tag.command, found.tag.thing()) {
            (Command::Acquire, Some(item)) => presented.notices.push(format!("You got {item}!")),
            (Command::Keyword, Some(keyword)) if cheat => {
                presented.notices.push(format!("(keyword: {keyword})"));
            }
            (Command::Win, _) => {
                presented.won = true;
                presented.notices.push("You win!".to_string());
            }
            _ => {}
        }
    }

    presented.text = normalize_whitespace(&strip(Pass::Any, reply));
    presented
}
