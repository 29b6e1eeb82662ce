//! Plain-text rendering of rooms and inventories.

use fp_core::Room;

/// Describe a room: header, interactables, then one line per exit.
pub fn describe_room(room: &Room) -> String {
    let moves: Vec<String> = room
        .exits()
        .map(|(dir, target)| format!("{dir}: {target}"))
        .collect();
    format!(
        "[{}]: {}\ninteractables: {}\n{}",
        room.name,
        room.description,
        room.things().join(", "),
        moves.join("\n")
    )
}

/// Describe what the player carries, in acquisition order.
pub fn describe_inventory(items: &[String]) -> String {
    if items.is_empty() {
        return "Not carrying anything".to_string();
    }
    format!("You are carrying:\n{}", items.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_core::{Character, Direction, Scenario};

    #[test]
    fn room_with_exits_and_things() {
        let mut scenario = Scenario::new();
        scenario
            .add_room(
                Room::new("throne")
                    .with_description("A gilded hall.")
                    .with_exit(Direction::West, "garden")
                    .with_exit(Direction::North, "tower"),
            )
            .unwrap();
        scenario
            .add_character(Character::new("king").with_room("throne"))
            .unwrap();
        scenario
            .add_character(Character::new("guard").with_room("throne"))
            .unwrap();

        let text = describe_room(scenario.room("throne").unwrap());
        insta::assert_snapshot!(text, @r"
        [throne]: A gilded hall.
        interactables: king, guard
        north: tower
        west: garden
        ");
    }

    #[test]
    fn empty_room() {
        let text = describe_room(&Room::new("cellar"));
        assert_eq!(text, "[cellar]: \ninteractables: \n");
    }

    #[test]
    fn inventory() {
        assert_eq!(describe_inventory(&[]), "Not carrying anything");
        assert_eq!(
            describe_inventory(&["sword".to_string(), "coin".to_string()]),
            "You are carrying:\nsword,\ncoin"
        );
    }
}
