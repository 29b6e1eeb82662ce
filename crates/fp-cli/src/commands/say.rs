//! One turn of dialogue, for scripts and transports.

use fp_core::Context;
use fp_fiction::FictionEngine;

/// Print the tagged reply, then the encoded context to pass to the next turn.
pub fn run(
    engine: &FictionEngine,
    character: &str,
    utterance: &str,
    blob: Option<&str>,
) -> Result<(), String> {
    let mut context = match blob {
        Some(blob) => Context::decode(blob).map_err(|e| format!("bad context: {e}"))?,
        None => engine.default_context(),
    };

    if !engine.can_hear(&context, character) {
        return Err(format!("{character} cannot hear"));
    }

    let reply = engine
        .hear(&mut context, character, utterance)
        .map_err(|e| e.to_string())?;
    let blob = context.encode().map_err(|e| e.to_string())?;

    println!("{reply}");
    println!("{blob}");
    Ok(())
}
