//! Word budgets derived from target duration and energy mode.

use serde::{Deserialize, Serialize};

use crate::request::EnergyMode;

/// Minimum usable script length regardless of requested duration.
const MIN_WORDS: u32 = 18;

/// Words-per-second rate and maximum word count for one request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Narration pace
    pub words_per_second: f64,
    /// Hard word ceiling communicated to the generator
    pub max_words: u32,
}

impl Budget {
    /// Compute the budget for a target duration.
    ///
    /// Infallible: a zero-second target still yields the word floor.
    pub fn compute(target_seconds: u32, energy_mode: EnergyMode) -> Self {
        let words_per_second = energy_mode.words_per_second();
        let max_words = ((target_seconds as f64 * words_per_second).round() as u32).max(MIN_WORDS);

        Self {
            words_per_second,
            max_words,
        }
    }
}

/// Count word-like spans (letters, digits, apostrophes, hyphens) in a line.
///
/// The same tokenizer validates generated scripts against the budget, so
/// budgeting and post-generation measurement can never disagree.
pub fn word_count(text: &str) -> u32 {
    let mut count = 0;
    let mut span_has_word_char = false;

    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            span_has_word_char = true;
        } else if c != '\'' && c != '\u{2019}' && c != '-' {
            if span_has_word_char {
                count += 1;
            }
            span_has_word_char = false;
        }
    }

    if span_has_word_char {
        count += 1;
    }

    count
}

/// Total word count across script lines.
pub fn total_words(lines: &[String]) -> u32 {
    lines.iter().map(|l| word_count(l)).sum()
}
