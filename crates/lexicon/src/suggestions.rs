use std::collections::HashMap;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::Lexicon;

/// Lowercases and strips diacritics, so "Més " and "mes" compare equal.
pub fn fold(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .collect()
}

fn first_letter(text: &str) -> String {
    text.chars().take(1).collect()
}

/// "Did you mean" lookups over the words of a [`Lexicon`].
#[derive(Debug, Clone)]
pub struct SuggestionIndex {
    words: Vec<String>,
    exact: HashMap<String, usize>,
    folded: HashMap<String, Vec<usize>>,
}

impl SuggestionIndex {
    pub fn new(lexicon: &Lexicon) -> Self {
        let words = lexicon
            .entries()
            .iter()
            .map(|entry| entry.word.clone())
            .collect::<Vec<String>>();
        let mut exact = HashMap::with_capacity(words.len());
        let mut folded: HashMap<String, Vec<usize>> = HashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            exact.insert(word.to_lowercase(), position);
            folded.entry(fold(word)).or_default().push(position);
        }
        Self {
            words,
            exact,
            folded,
        }
    }

    /// Finds the word the user most likely meant.
    ///
    /// An exact (case-insensitive) match always wins; with `fold_accents` the
    /// input may also omit or misplace accents.
    pub fn resolve(&self, input: &str, fold_accents: bool) -> Option<&str> {
        let input = input.trim();
        if let Some(&position) = self.exact.get(&input.to_lowercase()) {
            return Some(&self.words[position]);
        }
        if !fold_accents {
            return None;
        }
        self.folded
            .get(&fold(input))
            .and_then(|positions| positions.first())
            .map(|&position| &self.words[position][..])
    }

    /// Every word sharing the first letter of `input`, sorted.
    pub fn suggest(&self, input: &str, fold_accents: bool) -> Vec<&str> {
        let normalize = |text: &str| {
            if fold_accents {
                fold(text)
            } else {
                text.trim().to_lowercase()
            }
        };
        let initial = first_letter(&normalize(input));
        let mut matches = self
            .words
            .iter()
            .filter(|word| normalize(word).starts_with(&initial))
            .map(|word| &word[..])
            .collect::<Vec<&str>>();
        matches.sort_unstable();
        matches
    }
}
