//! Turns a cleaned, tokenized input into per-title match scores.

use crate::index::SynonymIndex;
use indexmap::IndexMap;
use strsim::jaro_winkler;
use tracing::trace;

/// Score for an input token equal to one word of a title's own text.
pub const WORD_MATCH_SCORE: u32 = 4;
/// Score for an input token found in a title's synonym set.
pub const SYNONYM_MATCH_SCORE: u32 = 2;
/// Score for a typo-tolerant match of an indexed token.
pub const FUZZY_MATCH_SCORE: u32 = 1;
/// Minimum Jaro-Winkler similarity for a fuzzy match (at most 15% dissimilarity).
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Per-title scores accumulated during a single normalize call.
pub(crate) type ScoreMap<'a> = IndexMap<&'a str, u32>;

/// Scores every token independently against the index.
///
/// Each token contributes a synonym score for every title whose synonym set
/// contains it, and either whole-word scores for the titles containing it or,
/// when no title contains it and typos are allowed, fuzzy scores for near
/// misses. Whole-word and fuzzy scoring never both fire for one token.
pub(crate) fn score_tokens<'a>(
    index: &'a SynonymIndex,
    tokens: &[&str],
    allow_typos: bool,
) -> ScoreMap<'a> {
    let mut scores = ScoreMap::new();
    for &token in tokens {
        score_synonyms(index, token, &mut scores);
        score_words(index, token, allow_typos, &mut scores);
    }
    scores
}

fn score_synonyms<'a>(index: &'a SynonymIndex, token: &str, scores: &mut ScoreMap<'a>) {
    for title in index.titles_for_token(token) {
        *scores.entry(title).or_insert(0) += SYNONYM_MATCH_SCORE;
    }
}

fn score_words<'a>(
    index: &'a SynonymIndex,
    token: &str,
    allow_typos: bool,
    scores: &mut ScoreMap<'a>,
) {
    let partials: Vec<&str> = index.titles_containing_word(token).collect();
    if partials.is_empty() {
        if allow_typos {
            score_fuzzy(index, token, scores);
        }
        return;
    }
    for title in partials {
        *scores.entry(title).or_insert(0) += WORD_MATCH_SCORE;
    }
}

/// Compares `token` against every indexed token and credits each title of
/// every sufficiently similar one. Linear in the number of distinct indexed
/// tokens; recomputed from scratch on every call.
fn score_fuzzy<'a>(index: &'a SynonymIndex, token: &str, scores: &mut ScoreMap<'a>) {
    for indexed in index.indexed_tokens() {
        if jaro_winkler(token, indexed) >= SIMILARITY_THRESHOLD {
            trace!(token, indexed, "fuzzy match");
            for title in index.titles_for_indexed(indexed) {
                *scores.entry(title).or_insert(0) += FUZZY_MATCH_SCORE;
            }
        }
    }
}
