pub mod check;
pub mod list;
pub mod play;
pub mod say;
pub mod show;

use std::path::Path;
use std::sync::Arc;

use fp_core::Scenario;
use fp_fiction::{FictionConfig, FictionEngine, FuzzyMatcher};

/// Load a scenario file.
fn load_scenario(path: &Path) -> Result<Scenario, String> {
    Scenario::load(path).map_err(|e| format!("failed to load {}: {e}", path.display()))
}

/// Load a scenario and wrap it in an engine with a fuzzy matcher.
pub fn load_engine(path: &Path, start: &str, threshold: f64) -> Result<FictionEngine, String> {
    let scenario = load_scenario(path)?;
    if scenario.room(start).is_none() {
        return Err(format!("start room not found: \"{start}\""));
    }
    let config = FictionConfig::default()
        .with_default_room(start)
        .with_match_threshold(threshold);
    let matcher = Arc::new(FuzzyMatcher::new(config.match_threshold));
    Ok(FictionEngine::new(scenario, matcher).with_config(config))
}
