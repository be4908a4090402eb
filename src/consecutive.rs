//! Bonus scoring for input tokens that match a title's words in order.

use crate::scoring::{ScoreMap, WORD_MATCH_SCORE};
use tracing::trace;

/// Adds an exponential bonus to every title whose words appear as contiguous
/// runs in the input tokens.
///
/// Only titles already holding at least two whole-word matches are
/// considered. The title's word sequence is walked left to right; each word
/// is anchored at its first case-insensitive occurrence in the input, the run
/// is extended while the following words and tokens stay equal, and a run of
/// `n > 1` words adds `2^n`. Disjoint runs all contribute; matching is exact,
/// never fuzzy.
pub(crate) fn apply_consecutive_bonus(scores: &mut ScoreMap<'_>, tokens: &[&str]) {
    let tokens: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
    for (title, score) in scores.iter_mut() {
        if *score < WORD_MATCH_SCORE * 2 {
            continue;
        }
        let lowered = title.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();

        let mut bonus = 0u32;
        let mut cursor = 0;
        while cursor < words.len() {
            match tokens.iter().position(|t| t.as_str() == words[cursor]) {
                Some(start) => {
                    let run = run_length(&words[cursor..], &tokens[start..]);
                    bonus += run_bonus(run);
                    cursor += run;
                }
                None => cursor += 1,
            }
        }
        if bonus > 0 {
            trace!(%title, bonus, "consecutive run bonus");
            *score += bonus;
        }
    }
}

/// Number of leading positions at which `words` and `tokens` are equal.
fn run_length(words: &[&str], tokens: &[String]) -> usize {
    let mut len = 0;
    while len < words.len() && len < tokens.len() && words[len] == tokens[len] {
        len += 1;
    }
    len
}

/// `2^n` for a run of more than one word, nothing for a single match.
fn run_bonus(run: usize) -> u32 {
    if run > 1 {
        2u32.saturating_pow(run as u32)
    } else {
        0
    }
}
