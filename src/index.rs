//! Owns the canonical-title vocabulary and the token tables built from it.

use crate::defaults;
use indexmap::{IndexMap, IndexSet};
use tracing::debug;

/// Maps cleaned tokens to the canonical titles they support.
///
/// Two tables are kept: one from synonym tokens and one from the words of the
/// titles' own text. Both are populated through [`add_mapping`], at build time
/// and whenever the vocabulary is extended afterwards; mappings only ever
/// grow.
///
/// [`add_mapping`]: SynonymIndex::add_mapping
#[derive(Debug, Clone)]
pub struct SynonymIndex {
    /// Canonical title -> its synonym set, as supplied.
    titles: IndexMap<String, IndexSet<String>>,
    /// Cleaned synonym token -> titles it maps to.
    synonym_tokens: IndexMap<String, IndexSet<String>>,
    /// Lowercased title word -> titles containing it.
    title_words: IndexMap<String, IndexSet<String>>,
    /// Lowercased full title -> canonical title, for the exact-match shortcut.
    exact: IndexMap<String, String>,
    clean_special_chars: bool,
}

impl SynonymIndex {
    /// Builds an index from the given canonical-title → synonyms mappings,
    /// union-merged with the built-in vocabulary. Caller-supplied synonyms
    /// are always preserved; the defaults only ever add titles and synonyms.
    pub fn build<I, S, T>(initial: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self::build_with(initial, defaults::BUILTIN)
    }

    pub(crate) fn build_with<I, S, T>(initial: I, defaults: &[(&str, &[&str])]) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        let mut index = Self {
            titles: IndexMap::new(),
            synonym_tokens: IndexMap::new(),
            title_words: IndexMap::new(),
            exact: IndexMap::new(),
            clean_special_chars: false,
        };
        for (title, synonyms) in initial {
            index.add_mapping(title.as_ref(), synonyms);
        }
        for &(title, synonyms) in defaults {
            index.add_mapping(title, synonyms.iter().copied());
        }
        index
    }

    /// Unions `synonyms` into `title`'s synonym set, creating the title if it
    /// is new, and indexes every cleaned synonym. Entries for other titles
    /// are never disturbed; there is no removal operation.
    pub fn add_mapping<I>(&mut self, title: &str, synonyms: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        if !self.titles.contains_key(title) {
            self.titles.insert(title.to_string(), IndexSet::new());
            let lowered = title.to_lowercase();
            for word in lowered.split_whitespace() {
                self.title_words
                    .entry(word.to_string())
                    .or_default()
                    .insert(title.to_string());
            }
            self.exact.insert(lowered, title.to_string());
            debug!(title, "new canonical title");
        }
        for synonym in synonyms {
            let synonym = synonym.into();
            let cleaned = self.clean(&synonym);
            if cleaned.is_empty() {
                // nothing left to index
                continue;
            }
            self.synonym_tokens
                .entry(cleaned)
                .or_default()
                .insert(title.to_string());
            if let Some(set) = self.titles.get_mut(title) {
                set.insert(synonym);
            }
        }
    }

    /// Cleans a piece of text the same way at index-build time and at query
    /// time: lowercased and trimmed, and with every character that is not a
    /// letter, digit or whitespace removed when special-character cleaning is
    /// enabled.
    ///
    /// Cleaning can collapse distinct synonyms onto one token: with special
    /// characters cleaned, "C#" and "C" both index under "c". This is an
    /// accepted collision, resolved like any other shared token by scoring.
    pub fn clean(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        if !self.clean_special_chars {
            return lowered.trim().to_string();
        }
        let stripped: String = lowered
            .chars()
            .filter(|c| c.is_alphanumeric() || c.is_whitespace())
            .collect();
        stripped.trim().to_string()
    }

    /// Enables or disables special-character cleaning.
    ///
    /// Build-time only for existing entries: synonyms already in the index
    /// were cleaned under the flag value in effect when they were added and
    /// are not re-cleaned. The new value applies to query-time cleaning and
    /// to synonyms added from now on.
    pub fn set_clean_special_chars(&mut self, clean_special_chars: bool) {
        self.clean_special_chars = clean_special_chars;
    }

    /// Titles whose synonym set contains `token` after cleaning. Empty for
    /// blank or unmapped tokens.
    pub fn titles_for_token<'a>(&'a self, token: &str) -> impl Iterator<Item = &'a str> + 'a {
        let cleaned = self.clean(token);
        self.synonym_tokens
            .get(cleaned.as_str())
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Titles whose own text contains `word` as a whole word. Empty on miss.
    pub fn titles_containing_word<'a>(&'a self, word: &str) -> impl Iterator<Item = &'a str> + 'a {
        let cleaned = self.clean(word);
        self.title_words
            .get(cleaned.as_str())
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// The full canonical-title vocabulary, in insertion order.
    pub fn all_titles<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.titles.keys().map(String::as_str)
    }

    /// The canonical title whose full text equals `text` case-insensitively.
    pub fn canonical_for(&self, text: &str) -> Option<&str> {
        self.exact.get(text.to_lowercase().as_str()).map(String::as_str)
    }

    /// Every distinct indexed token, synonym tokens and title words combined.
    pub(crate) fn indexed_tokens<'a>(&'a self) -> impl Iterator<Item = &'a str> + 'a {
        self.synonym_tokens.keys().map(String::as_str).chain(
            self.title_words
                .keys()
                .filter(|word| !self.synonym_tokens.contains_key(word.as_str()))
                .map(String::as_str),
        )
    }

    /// Union of the titles an indexed token maps to across both tables.
    pub(crate) fn titles_for_indexed<'a>(&'a self, token: &str) -> IndexSet<&'a str> {
        let mut titles = IndexSet::new();
        titles.extend(
            self.synonym_tokens
                .get(token)
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        titles.extend(
            self.title_words
                .get(token)
                .into_iter()
                .flatten()
                .map(String::as_str),
        );
        titles
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn default_index() -> SynonymIndex {
        SynonymIndex::build(Vec::<(&str, Vec<&str>)>::new())
    }

    #[test]
    fn contains_all_default_titles() {
        let index = default_index();
        let titles: Vec<&str> = index.all_titles().collect();
        assert_eq!(
            titles,
            ["Software Engineer", "Architect", "Accountant", "Quantity Surveyor"]
        );
    }

    #[test]
    fn indexes_default_synonyms() {
        let index = default_index();
        let titles: Vec<&str> = index.titles_for_token("java").collect();
        assert_eq!(titles, ["Software Engineer"]);
    }

    #[test]
    fn misses_return_empty() {
        let index = default_index();
        assert_eq!(index.titles_for_token("nonexistent").count(), 0);
        assert_eq!(index.titles_for_token("").count(), 0);
        assert_eq!(index.titles_containing_word("astronaut").count(), 0);
        assert_eq!(index.canonical_for("astronaut"), None);
    }

    #[test]
    fn merges_caller_mappings_with_defaults() {
        let index = SynonymIndex::build(vec![("Software Engineer", vec!["rustacean"])]);
        assert!(index.titles_for_token("rustacean").any(|t| t == "Software Engineer"));
        assert!(index.titles_for_token("java").any(|t| t == "Software Engineer"));
    }

    #[test]
    fn add_mapping_creates_new_titles() {
        let mut index = default_index();
        index.add_mapping("Data Scientist", ["data analyst", "data engineer"]);
        assert!(index.titles_for_token("data analyst").any(|t| t == "Data Scientist"));
        assert!(index.titles_for_token("data engineer").any(|t| t == "Data Scientist"));
        assert!(index.all_titles().any(|t| t == "Data Scientist"));
        assert!(index.titles_containing_word("scientist").any(|t| t == "Data Scientist"));
        assert_eq!(index.canonical_for("data scientist"), Some("Data Scientist"));
    }

    #[test]
    fn add_mapping_extends_existing_titles() {
        let mut index = default_index();
        index.add_mapping("Accountant", ["financial consultant"]);
        assert!(index
            .titles_for_token("financial consultant")
            .any(|t| t == "Accountant"));
        // the defaults are untouched
        assert!(index.titles_for_token("bookkeeper").any(|t| t == "Accountant"));
    }

    #[test]
    fn defaults_are_swappable() {
        const CAPTAIN_ONLY: &[(&str, &[&str])] = &[("Captain", &["skipper"])];
        let index = SynonymIndex::build_with(vec![("Pilot", vec!["aviator"])], CAPTAIN_ONLY);
        let titles: Vec<&str> = index.all_titles().collect();
        assert_eq!(titles, ["Pilot", "Captain"]);
        assert!(index.titles_for_token("skipper").any(|t| t == "Captain"));
        assert_eq!(index.titles_for_token("java").count(), 0);
    }

    #[test]
    fn clean_strips_punctuation_when_enabled() {
        let mut index = default_index();
        index.set_clean_special_chars(true);
        assert_eq!(index.clean("  Java, C# @!  "), "java c");
        assert_eq!(index.clean("!@#$%^&*()"), "");
    }

    #[test]
    fn clean_only_lowercases_and_trims_when_disabled() {
        let index = default_index();
        assert_eq!(index.clean("  Java, C# @!  "), "java, c# @!");
    }

    #[test]
    fn cleaned_synonyms_may_collide() {
        // with cleaning on, "C#" and "C" land on the same token
        let mut index = default_index();
        index.set_clean_special_chars(true);
        index.add_mapping("Software Engineer", ["C#"]);
        index.add_mapping("Grader", ["C"]);
        let titles: Vec<&str> = index.titles_for_token("c#").collect();
        assert_eq!(titles, ["Software Engineer", "Grader"]);
    }

    #[test]
    fn synonyms_that_clean_away_are_not_indexed() {
        let mut index = default_index();
        index.set_clean_special_chars(true);
        index.add_mapping("Software Engineer", ["!!!"]);
        assert_eq!(index.titles_for_token("").count(), 0);
        assert_eq!(index.titles_for_token("!!!").count(), 0);
    }
}
