#![doc = include_str!("../README.md")]

mod consecutive;
mod defaults;
mod index;
mod scoring;

pub use self::index::SynonymIndex;
pub use self::scoring::{
    FUZZY_MATCH_SCORE, SIMILARITY_THRESHOLD, SYNONYM_MATCH_SCORE, WORD_MATCH_SCORE,
};

use tracing::debug;

/// Maps free-text job titles to the closest canonical title in its
/// vocabulary.
///
/// A normalizer owns a [`SynonymIndex`] built from caller-supplied mappings
/// merged with the built-in default vocabulary, plus two behavior flags.
/// Every [`normalize`](Normalizer::normalize) call is a pure function of the
/// input, the index and the flags; nothing is carried between calls.
///
/// [`normalize`](Normalizer::normalize) takes `&self` and the mutating
/// operations take `&mut self`, so concurrent readers are fine as long as no
/// extension is in flight; callers that need to extend a shared instance
/// should put it behind a lock.
#[derive(Debug, Clone)]
pub struct Normalizer {
    index: SynonymIndex,
    allow_typos: bool,
}

impl Normalizer {
    /// Creates a normalizer over the built-in default vocabulary alone.
    pub fn new() -> Self {
        Self::with_mappings(std::iter::empty::<(&str, [&str; 0])>())
    }

    /// Creates a normalizer from the given canonical-title → synonyms
    /// mappings, union-merged with the built-in default vocabulary. Caller
    /// synonyms are preserved; the defaults only ever add.
    pub fn with_mappings<I, S, T>(mappings: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            index: SynonymIndex::build(mappings),
            allow_typos: false,
        }
    }

    /// Allows or disallows typo-tolerant matching for subsequent calls.
    pub fn set_allow_typos(&mut self, allow_typos: bool) {
        self.allow_typos = allow_typos;
    }

    /// Enables or disables special-character cleaning for subsequent calls.
    ///
    /// Synonyms already in the index stay as cleaned when they were added;
    /// see [`SynonymIndex::set_clean_special_chars`].
    pub fn set_clean_special_chars(&mut self, clean_special_chars: bool) {
        self.index.set_clean_special_chars(clean_special_chars);
    }

    /// Unions `synonyms` into `title`'s synonym set, creating the title if it
    /// is new. The vocabulary can only ever grow.
    pub fn add_mapping<I>(&mut self, title: &str, synonyms: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.index.add_mapping(title, synonyms);
    }

    /// The index backing this normalizer.
    pub fn index(&self) -> &SynonymIndex {
        &self.index
    }

    /// Maps `input` to the closest canonical title, or `None` when nothing in
    /// the vocabulary scores.
    ///
    /// The input is cleaned, checked for an exact case-insensitive title
    /// match, and otherwise split on whitespace and scored token by token.
    /// The highest-scoring title wins; ties resolve to the lexicographically
    /// first title so results are reproducible. Blank input is a miss, never
    /// an error.
    pub fn normalize(&self, input: &str) -> Option<&str> {
        let cleaned = self.index.clean(input);
        if cleaned.is_empty() {
            return None;
        }
        if let Some(title) = self.index.canonical_for(&cleaned) {
            debug!(input, title, "exact title match");
            return Some(title);
        }

        let tokens: Vec<&str> = cleaned.split_whitespace().collect();
        let mut scores = scoring::score_tokens(&self.index, &tokens, self.allow_typos);
        consecutive::apply_consecutive_bonus(&mut scores, &tokens);

        let best = best_match(&scores);
        debug!(input, best, "scored input");
        best
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The highest-scoring title with a positive score; equal scores resolve to
/// the lexicographically first title.
fn best_match<'a>(scores: &scoring::ScoreMap<'a>) -> Option<&'a str> {
    let mut best: Option<(&'a str, u32)> = None;
    for (&title, &score) in scores.iter() {
        if score == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((best_title, best_score)) => {
                score > best_score || (score == best_score && title < best_title)
            }
        };
        if better {
            best = Some((title, score));
        }
    }
    best.map(|(title, _)| title)
}
