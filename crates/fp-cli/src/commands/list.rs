use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = super::load_scenario(path)?;

    if scenario.room_count() == 0 && scenario.character_count() == 0 {
        println!("  No rooms or characters found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Name", "Kind", "Where", "Description"]);

    for room in scenario.rooms() {
        let exits: Vec<String> = room
            .exits()
            .map(|(dir, target)| format!("{dir}: {target}"))
            .collect();
        table.add_row(vec![
            room.name.clone(),
            "room".to_string(),
            exits.join(", "),
            truncate(&room.description),
        ]);
    }

    for character in scenario.characters() {
        table.add_row(vec![
            character.name.clone(),
            "character".to_string(),
            character.room.clone().unwrap_or_else(|| "—".to_string()),
            truncate(&character.description),
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {} rooms, {} characters",
        scenario.room_count(),
        scenario.character_count()
    );

    Ok(())
}

fn truncate(description: &str) -> String {
    if description.is_empty() {
        "—".to_string()
    } else if description.chars().count() > 60 {
        let head: String = description.chars().take(57).collect();
        format!("{head}...")
    } else {
        description.to_string()
    }
}
