mod builtin;
mod lexicon;
mod suggestions;

pub use lexicon::{Lexicon, PairTable, WordEntry};
pub use suggestions::{fold, SuggestionIndex};

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("could not read lexicon file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid lexicon file: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("word {0:?} has no example sentences")]
    NoExamples(String),

    #[error("word {0:?} is declared twice")]
    Duplicate(String),

    #[error("word {0:?} cannot be paired with itself")]
    SelfPair(String),

    #[error("word {word:?} is paired with both {first:?} and {second:?}")]
    ConflictingPair {
        word: String,
        first: String,
        second: String,
    },
}
