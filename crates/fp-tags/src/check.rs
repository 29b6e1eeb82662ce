//! Static checks over a whole scenario, without a context.

use fp_core::{Reply, Scenario};

use crate::diagnostics::Diagnostic;
use crate::lexer::{Pass, scan};
use crate::tag::{Command, Target};

/// Check every room exit and every authored text of a scenario.
///
/// Errors are things that fail at runtime: missing guards and exits into
/// rooms that do not exist. Warnings are tags that can never do anything
/// and conditional replies that can run out of candidates.
pub fn check_scenario(scenario: &Scenario) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for room in scenario.rooms() {
        for (dir, target) in room.exits() {
            if scenario.room(target).is_none() {
                diagnostics.push(
                    Diagnostic::error(
                        format!("rooms.{}.{dir}", room.name),
                        target,
                        0..target.len(),
                        format!("exit {dir} leads to unknown room {target}"),
                    )
                    .with_label("no such room"),
                );
            }
        }
    }

    for character in scenario.characters() {
        let origin = |field: &str| format!("characters.{}.{field}", character.name);

        check_sets(&origin("_no_match"), &character.no_match, &mut diagnostics);
        for found in scan(Pass::Mutation, &character.greeting) {
            diagnostics.push(
                Diagnostic::warning(
                    origin("_hi"),
                    character.greeting.as_str(),
                    found.span,
                    "set tags in a greeting are never applied",
                )
                .with_label("ignored"),
            );
        }

        for (key, reply) in character.replies() {
            match reply {
                Reply::Text(text) => check_sets(&origin(key), text, &mut diagnostics),
                Reply::Conditional(candidates) => {
                    check_candidates(&origin(key), candidates, &mut diagnostics);
                }
            }
        }
    }

    diagnostics
}

fn check_candidates(origin: &str, candidates: &[String], diagnostics: &mut Vec<Diagnostic>) {
    let mut ends_with_default = false;

    for (index, candidate) in candidates.iter().enumerate() {
        let origin = format!("{origin}[{index}]");
        check_sets(&origin, candidate, diagnostics);

        let Some(guard) = scan(Pass::Guard, candidate).next() else {
            diagnostics.push(
                Diagnostic::error(
                    origin,
                    candidate.as_str(),
                    0..candidate.len(),
                    "candidate has no $if$ or $default$ guard",
                )
                .with_label("guard tag missing"),
            );
            ends_with_default = false;
            continue;
        };

        ends_with_default = guard.tag.command == Command::Default;

        let leading = candidate.len() - candidate.trim_start().len();
        if guard.span.start != leading {
            diagnostics.push(
                Diagnostic::warning(
                    origin.as_str(),
                    candidate.as_str(),
                    guard.span.clone(),
                    "guard tag is not at the start of the candidate",
                )
                .with_label("guard"),
            );
        }

        if guard.tag.command == Command::If {
            match (guard.tag.target(), guard.tag.key()) {
                (Some(Target::Reserved(thing)), Some(_)) => diagnostics.push(
                    Diagnostic::warning(
                        origin.as_str(),
                        candidate.as_str(),
                        guard.span,
                        format!("unknown reserved target {thing:?}; this guard never holds"),
                    )
                    .with_label("never holds"),
                ),
                (_, None) => diagnostics.push(
                    Diagnostic::warning(
                        origin.as_str(),
                        candidate.as_str(),
                        guard.span,
                        "guard has no key; this candidate is always skipped",
                    )
                    .with_label("never holds"),
                ),
                _ => {}
            }
        }
    }

    if let Some(last) = candidates.last()
        && !ends_with_default
    {
        diagnostics.push(
            Diagnostic::warning(
                format!("{origin}[{}]", candidates.len() - 1),
                last.as_str(),
                0..last.len(),
                "conditional reply does not end with a $default$ candidate",
            )
            .with_label("can fail with no condition met"),
        );
    }
}

fn check_sets(origin: &str, text: &str, diagnostics: &mut Vec<Diagnostic>) {
    for found in scan(Pass::Mutation, text) {
        let message = match (found.tag.target(), found.tag.key()) {
            (None, _) => "set tag has no target and does nothing".to_string(),
            (_, None) | (_, Some("")) => "set tag has no key and does nothing".to_string(),
            (Some(Target::Reserved(thing)), _) => {
                format!("unknown reserved target {thing:?}; this set does nothing")
            }
            _ => continue,
        };
        diagnostics.push(
            Diagnostic::warning(origin, text, found.span, message).with_label("ignored"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;

    fn messages(source: &str) -> Vec<String> {
        let scenario = Scenario::from_yaml_str(source).unwrap();
        check_scenario(&scenario)
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn clean_scenario() {
        let source = r#"
rooms:
  throne:
    north: hall
  hall:
    south: throne
characters:
  king:
    _room: throne
    _hi: Speak.
    gold:
      - "$if/_world/rich$ Plenty."
      - "$default$ None. $set/_me/asked$"
"#;
        assert!(messages(source).is_empty());
    }

    #[test]
    fn exits_to_unknown_rooms() {
        let source = "rooms:\n  throne:\n    east: void\n";
        let scenario = Scenario::from_yaml_str(source).unwrap();
        let diags = check_scenario(&scenario);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(
            diags[0].to_string(),
            "error: rooms.throne.east: exit east leads to unknown room void"
        );
    }

    #[test]
    fn missing_guard_and_default() {
        let source = r#"
characters:
  king:
    gold:
      - "$if/_world/rich$ Plenty."
      - "Nothing."
"#;
        assert_eq!(
            messages(source),
            vec![
                "error: characters.king.gold[1]: candidate has no $if$ or $default$ guard",
                "warning: characters.king.gold[1]: conditional reply does not end with a $default$ candidate",
            ]
        );
    }

    #[test]
    fn useless_tags() {
        let source = r#"
characters:
  king:
    _hi: "Hello $set/_world/met$"
    talk: "$set/_world$ $set/_elsewhere/x$"
    gold:
      - "   $if/_secret/rich$ Plenty."
      - "Well... $default$ none."
"#;
        assert_eq!(
            messages(source),
            vec![
                "warning: characters.king._hi: set tags in a greeting are never applied",
                "warning: characters.king.talk: set tag has no key and does nothing",
                "warning: characters.king.talk: unknown reserved target \"_elsewhere\"; this set does nothing",
                "warning: characters.king.gold[0]: unknown reserved target \"_secret\"; this guard never holds",
                "warning: characters.king.gold[1]: guard tag is not at the start of the candidate",
            ]
        );
    }

    #[test]
    fn report_lists_rooms_before_characters() {
        let source = r#"
rooms:
  hall:
    west: cellar
characters:
  king:
    _room: hall
    _no_match: "$set$ Eh?"
    gold:
      - "$if/_world$ Maybe."
      - "$default$ No."
"#;
        insta::assert_snapshot!(messages(source).join("\n"), @r"
        error: rooms.hall.west: exit west leads to unknown room cellar
        warning: characters.king._no_match: set tag has no target and does nothing
        warning: characters.king.gold[0]: guard has no key; this candidate is always skipped
        ");
    }
}
