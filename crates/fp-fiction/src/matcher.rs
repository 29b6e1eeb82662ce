//! Utterance-to-key matching.

use strsim::jaro_winkler;

/// Picks which of a character's candidate keys an utterance is about.
///
/// The engine treats a matcher as an oracle: scoring, thresholds and
/// tokenization are entirely up to the implementation.
pub trait Matcher: Send + Sync {
    /// The best candidate for `utterance`, or `None` if nothing is close enough.
    fn best_match(&self, utterance: &str, candidates: &[&str]) -> Option<String>;
}

/// Matches utterance words against keys with Jaro-Winkler similarity.
///
/// Every word of the utterance is compared to every key; the single best
/// pair wins if it scores at least the threshold. An exact word match
/// scores 1.0. On a tie the earlier word and key win.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    /// Create a matcher with a similarity threshold (clamped to 0.0-1.0).
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    /// The similarity threshold.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for FuzzyMatcher {
    fn default() -> Self {
        Self::new(0.85)
    }
}

impl Matcher for FuzzyMatcher {
    fn best_match(&self, utterance: &str, candidates: &[&str]) -> Option<String> {
        let words: Vec<String> = utterance
            .split(|c: char| !c.is_alphanumeric() && c != '_')
            .filter(|w| !w.is_empty())
            .map(str::to_lowercase)
            .collect();
        let keys: Vec<String> = candidates.iter().map(|c| c.to_lowercase()).collect();

        let mut best: Option<(usize, f64)> = None;
        for word in &words {
            for (idx, key) in keys.iter().enumerate() {
                let score = if word == key {
                    1.0
                } else {
                    jaro_winkler(word, key)
                };
                if best.is_none_or(|(_, top)| score > top) {
                    best = Some((idx, score));
                }
            }
        }

        match best {
            Some((idx, score)) if score >= self.threshold && score > 0.0 => {
                Some(candidates[idx].to_string())
            }
            _ => None,
        }
    }
}
