use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::LexiconError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WordEntry {
    pub word: String,
    #[serde(default)]
    pub category: Option<String>,
    pub definition: String,
    pub examples: Vec<String>,
}

/// Symmetric word <-> homograph table.
///
/// Keys are stored lowercased; `declared` keeps the pairs in the order they
/// were given, accented form first, for the list views.
#[derive(Debug, Clone, Default)]
pub struct PairTable {
    partners: HashMap<String, String>,
    declared: Vec<(String, String)>,
}

impl PairTable {
    pub fn get(&self, word: &str) -> Option<&str> {
        self.partners.get(&word.to_lowercase()).map(String::as_str)
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.declared
    }

    pub fn len(&self) -> usize {
        self.declared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declared.is_empty()
    }

    fn insert(&mut self, first: &str, second: &str) -> Result<(), LexiconError> {
        let first = first.to_lowercase();
        let second = second.to_lowercase();
        if first == second {
            return Err(LexiconError::SelfPair(first));
        }
        for (word, partner) in [(&first, &second), (&second, &first)] {
            match self.partners.get(word) {
                Some(existing) if existing != partner => {
                    return Err(LexiconError::ConflictingPair {
                        word: word.clone(),
                        first: existing.clone(),
                        second: partner.clone(),
                    });
                }
                Some(_) => return Ok(()),
                None => {}
            }
        }
        self.partners.insert(first.clone(), second.clone());
        self.partners.insert(second.clone(), first.clone());
        self.declared.push((first, second));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Lexicon {
    entries: Vec<WordEntry>,
    index: HashMap<String, usize>,
    pairs: PairTable,
}

#[derive(Deserialize)]
struct LexiconFile {
    words: Vec<WordEntry>,
    #[serde(default)]
    pairs: Vec<(String, String)>,
}

impl Lexicon {
    pub fn new<P, S>(entries: Vec<WordEntry>, pairs: P) -> Result<Self, LexiconError>
    where
        P: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut index = HashMap::with_capacity(entries.len());
        for (position, entry) in entries.iter().enumerate() {
            if entry.examples.is_empty() {
                return Err(LexiconError::NoExamples(entry.word.clone()));
            }
            let key = entry.word.to_lowercase();
            if index.insert(key, position).is_some() {
                return Err(LexiconError::Duplicate(entry.word.clone()));
            }
        }

        let mut table = PairTable::default();
        for (first, second) in pairs {
            let (first, second) = (first.as_ref(), second.as_ref());
            table.insert(first, second)?;
            for word in [first, second] {
                if !index.contains_key(&word.to_lowercase()) {
                    tracing::debug!(word, "pair references a word without an entry");
                }
            }
        }

        Ok(Self {
            entries,
            index,
            pairs: table,
        })
    }

    pub fn from_json_str(text: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = serde_json::from_str(text).map_err(LexiconError::Parse)?;
        Self::new(file.words, file.pairs)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let lexicon = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            words = lexicon.len(),
            pairs = lexicon.pairs.len(),
            "loaded lexicon"
        );
        Ok(lexicon)
    }

    /// Case-insensitive lookup; diacritics stay significant.
    pub fn get(&self, word: &str) -> Option<&WordEntry> {
        self.index
            .get(&word.trim().to_lowercase())
            .map(|&position| &self.entries[position])
    }

    pub fn contains(&self, word: &str) -> bool {
        self.get(word).is_some()
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pair_of(&self, word: &str) -> Option<&str> {
        self.pairs.get(word.trim())
    }

    /// The entry of the paired word, when both the pairing and the entry exist.
    pub fn contrast(&self, word: &str) -> Option<&WordEntry> {
        self.pair_of(word).and_then(|partner| self.get(partner))
    }

    pub fn pairs(&self) -> &[(String, String)] {
        self.pairs.pairs()
    }

    pub fn words_sorted(&self) -> Vec<&str> {
        let mut words = self
            .entries
            .iter()
            .map(|entry| &entry.word[..])
            .collect::<Vec<&str>>();
        words.sort_unstable();
        words
    }

    pub(crate) fn from_validated(entries: Vec<WordEntry>, pairs: PairTable) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, entry)| (entry.word.to_lowercase(), position))
            .collect();
        Self {
            entries,
            index,
            pairs,
        }
    }
}

impl PairTable {
    /// Builds a table from pairs already known to be consistent, skipping
    /// any that would not be.
    pub(crate) fn from_trusted(pairs: &[(&str, &str)]) -> Self {
        let mut table = Self::default();
        for (first, second) in pairs {
            if let Err(error) = table.insert(first, second) {
                tracing::warn!("skipping pair {first}/{second}: {error}");
            }
        }
        table
    }
}
