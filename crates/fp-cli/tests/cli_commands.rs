//! Integration tests for the fp-cli commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SCENARIO: &str = r#"_hello: The kingdom is restless.
rooms:
  throne:
    _description: A gilded hall.
    west: garden
  garden:
    _description: Roses everywhere.
    east: throne
characters:
  king:
    _room: throne
    _description: An old king.
    _hi: Welcome, traveller.
    _no_match: I do not follow.
    sword: "$set/_inventory/sword$ Take my sword."
    crown:
      - "$if/_inventory/sword$ The crown is yours. $win$"
      - "$default$ Prove yourself first."
  gardener:
    _room: garden
    _description: Muddy boots.
    roses: They bloom for you.
"#;

/// Create a temp directory holding a scenario file.
fn test_scenario(source: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scenario.yaml");
    fs::write(&path, source).unwrap();
    (dir, path)
}

fn fp() -> Command {
    Command::cargo_bin("fp").unwrap()
}

/// Run `say` and return the reply line and the new context blob.
fn say(path: &Path, character: &str, utterance: &str, context: Option<&str>) -> (String, String) {
    let mut cmd = fp();
    cmd.args(["say", character, utterance, "-s", path.to_str().unwrap()]);
    if let Some(blob) = context {
        cmd.args(["--context", blob]);
    }
    let output = cmd.assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let mut lines = stdout.lines();
    let reply = lines.next().unwrap().to_string();
    let blob = lines.next().unwrap().to_string();
    (reply, blob)
}

// ---------------------------------------------------------------------------
// say
// ---------------------------------------------------------------------------

#[test]
fn say_handshake() {
    let (_dir, path) = test_scenario(SCENARIO);
    let (reply, _) = say(&path, "king", "$handshake$", None);
    assert_eq!(reply, "$keyword/handshake$ Welcome, traveller.");
}

#[test]
fn say_carries_context_between_turns() {
    let (_dir, path) = test_scenario(SCENARIO);
    let (reply, blob) = say(&path, "king", "the crown", None);
    assert_eq!(reply, "$keyword/crown$ Prove yourself first.");

    let (reply, blob) = say(&path, "king", "your sword", Some(&blob));
    assert_eq!(reply, "$keyword/sword$ $acquire/sword$ Take my sword.");

    let (reply, _) = say(&path, "king", "the crown", Some(&blob));
    assert_eq!(reply, "$keyword/crown$ The crown is yours. $win$");
}

#[test]
fn say_no_match() {
    let (_dir, path) = test_scenario(SCENARIO);
    let (reply, _) = say(&path, "king", "nice weather", None);
    assert_eq!(reply, "$keyword/_no_match$ I do not follow.");
}

#[test]
fn say_fails_out_of_earshot() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["say", "gardener", "roses", "-s", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("gardener cannot hear"));
}

#[test]
fn say_rejects_bad_context() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["say", "king", "hi", "-s", path.to_str().unwrap(), "-c", "!!!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad context"));
}

// ---------------------------------------------------------------------------
// play
// ---------------------------------------------------------------------------

#[test]
fn play_to_victory() {
    let (dir, path) = test_scenario(SCENARIO);
    fp().args([
        "play",
        "-s",
        path.to_str().unwrap(),
        "--save-dir",
        dir.path().join("saves").to_str().unwrap(),
    ])
    .write_stdin("look\ntalk king\nsword\ncrown\n")
    .assert()
    .success()
    .stdout(
        predicate::str::contains("The kingdom is restless.")
            .and(predicate::str::contains("interactables: king"))
            .and(predicate::str::contains("You got sword!"))
            .and(predicate::str::contains("You win!")),
    );
}

#[test]
fn play_save_creates_file() {
    let (dir, path) = test_scenario(SCENARIO);
    let saves = dir.path().join("saves");
    fp().args([
        "play",
        "-s",
        path.to_str().unwrap(),
        "--save-dir",
        saves.to_str().unwrap(),
    ])
    .write_stdin("w\nsave\nquit\n")
    .assert()
    .success()
    .stdout(
        predicate::str::contains("moved to garden")
            .and(predicate::str::contains("Saved as default")),
    );

    assert!(saves.join("default").is_file());
}

#[test]
fn play_unknown_start_room() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["play", "-s", path.to_str().unwrap(), "--start", "attic"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("start room not found"));
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn check_passes_clean_scenario() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["check", "-s", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("All checks passed")
                .and(predicate::str::contains("2 rooms, 2 characters")),
        );
}

#[test]
fn check_reports_errors() {
    let (_dir, path) = test_scenario(
        r#"rooms:
  throne:
    north: tower
characters:
  king:
    _room: throne
    gold:
      - "no guard here"
"#,
    );
    fp().args(["check", "-s", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("unknown room tower")
                .and(predicate::str::contains("no $if$ or $default$ guard"))
                .and(predicate::str::contains("scenario check failed")),
        );
}

#[test]
fn check_missing_file() {
    fp().args(["check", "-s", "/nonexistent/scenario.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load"));
}

#[test]
fn check_unknown_character_room() {
    let (_dir, path) = test_scenario("characters:\n  ghost:\n    _room: attic\n");
    fp().args(["check", "-s", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("attic"));
}

// ---------------------------------------------------------------------------
// list / show
// ---------------------------------------------------------------------------

#[test]
fn list_rooms_and_characters() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["list", "-s", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("throne")
                .and(predicate::str::contains("gardener"))
                .and(predicate::str::contains("2 rooms, 2 characters")),
        );
}

#[test]
fn show_room() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["show", "garden", "-s", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Roses everywhere.")
                .and(predicate::str::contains("east:"))
                .and(predicate::str::contains("here: gardener")),
        );
}

#[test]
fn show_character() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["show", "king", "-s", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("An old king.")
                .and(predicate::str::contains("room:     throne"))
                .and(predicate::str::contains("crown (2 candidates)")),
        );
}

#[test]
fn show_unknown_name() {
    let (_dir, path) = test_scenario(SCENARIO);
    fp().args(["show", "dragon", "-s", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no room or character named"));
}
