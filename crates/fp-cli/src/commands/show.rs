use std::path::Path;

use colored::Colorize;
use fp_core::Reply;

pub fn run(path: &Path, name: &str) -> Result<(), String> {
    let scenario = super::load_scenario(path)?;

    if let Some(room) = scenario.room(name) {
        println!("  {} [{}]", room.name.bold(), "room".dimmed());
        println!();
        if !room.description.is_empty() {
            println!("  {}", room.description.trim());
            println!();
        }
        for (dir, target) in room.exits() {
            println!("  {:<10} {target}", format!("{dir}:"));
        }
        if !room.things().is_empty() {
            println!();
            println!("  here: {}", room.things().join(", "));
        }
        return Ok(());
    }

    let character = scenario
        .character(name)
        .ok_or_else(|| format!("no room or character named \"{name}\""))?;

    println!("  {} [{}]", character.name.bold(), "character".dimmed());
    println!();
    if !character.description.is_empty() {
        println!("  {}", character.description.trim());
        println!();
    }
    if let Some(room) = &character.room {
        println!("  room:     {room}");
    }
    if !character.greeting.is_empty() {
        println!("  greeting: {}", character.greeting.trim());
    }

    let keys = character.candidate_keys();
    if !keys.is_empty() {
        println!();
        println!("  {}", "Keys:".dimmed());
        for key in keys {
            let kind = match character.reply(key) {
                Some(Reply::Conditional(candidates)) => {
                    format!("{} candidates", candidates.len())
                }
                _ => "text".to_string(),
            };
            println!("    {key} ({kind})");
        }
    }

    Ok(())
}
