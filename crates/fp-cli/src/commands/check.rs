use std::path::Path;

use fp_tags::{Severity, check_scenario, render_diagnostics};

pub fn run(path: &Path) -> Result<(), String> {
    let scenario = super::load_scenario(path)?;
    let diagnostics = check_scenario(&scenario);

    if !diagnostics.is_empty() {
        eprint!("{}", render_diagnostics(&diagnostics));
    }

    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics.len() - errors;

    if errors > 0 {
        eprintln!(
            "  {} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
        return Err("scenario check failed with errors".into());
    }
    if warnings > 0 {
        eprintln!(
            "  {} warning{}",
            warnings,
            if warnings == 1 { "" } else { "s" },
        );
    }

    println!("  All checks passed for '{}'.", path.display());
    println!(
        "  {} rooms, {} characters",
        scenario.room_count(),
        scenario.character_count()
    );

    Ok(())
}
