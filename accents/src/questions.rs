use lexicon::{Lexicon, WordEntry};
use rand::{seq::SliceRandom, Rng};
use regex::Regex;

/// Marker that replaces the target word in a question prompt.
pub const BLANK: &str = "_____";

/// A cloze question: pick the right spelling for the blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub answer: String,
    /// The answer and its pair, shuffled once when the question is built.
    pub options: [String; 2],
    pub pair: String,
}

impl Question {
    pub fn is_option(&self, choice: &str) -> bool {
        self.options.iter().any(|option| option == choice)
    }

    /// The prompt with the blank filled by the correct answer.
    pub fn solution(&self) -> String {
        self.prompt.replacen(BLANK, &self.answer, 1)
    }
}

/// Whole-word, case- and accent-sensitive matcher.
fn whole_word(word: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(r"\b{}\b", regex::escape(word)))
}

/// Replaces the first whole-word occurrence of `word`, or `None` when the
/// sentence doesn't contain it.
pub fn mask_first(sentence: &str, word: &str) -> Option<String> {
    let pattern = match whole_word(word) {
        Ok(pattern) => pattern,
        Err(error) => {
            tracing::warn!(word, "cannot build a matcher: {error}");
            return None;
        }
    };
    let found = pattern.find(sentence)?;
    Some(format!("{}{BLANK}{}", &sentence[..found.start()], &sentence[found.end()..]))
}

struct Occurrence<'a> {
    entry: &'a WordEntry,
    pair: &'a str,
    prompt: String,
}

fn candidate_pool(lexicon: &Lexicon) -> Vec<Occurrence<'_>> {
    let mut pool = Vec::new();
    for entry in lexicon.entries() {
        let Some(pair) = lexicon.contrast(&entry.word).map(|other| &other.word[..]) else {
            continue;
        };
        for example in &entry.examples {
            if let Some(prompt) = mask_first(example, &entry.word) {
                pool.push(Occurrence {
                    entry,
                    pair,
                    prompt,
                });
            }
        }
    }
    pool
}

/// Builds up to `count` questions from the example sentences of every paired
/// word. Returns fewer (possibly none) when there isn't enough material.
pub fn generate_questions<R>(lexicon: &Lexicon, count: usize, rng: &mut R) -> Vec<Question>
where
    R: Rng + ?Sized,
{
    let mut pool = candidate_pool(lexicon);
    tracing::debug!(candidates = pool.len(), requested = count, "generating quiz");
    pool.shuffle(rng);
    pool.into_iter()
        .take(count)
        .map(|occurrence| {
            let answer = occurrence.entry.word.clone();
            let pair = occurrence.pair.to_owned();
            let mut options = [answer.clone(), pair.clone()];
            options.shuffle(rng);
            Question {
                prompt: occurrence.prompt,
                answer,
                options,
                pair,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn entry(word: &str, examples: &[&str]) -> WordEntry {
        WordEntry {
            word: word.to_owned(),
            category: None,
            definition: format!("definició de {word}"),
            examples: examples.iter().map(|example| example.to_string()).collect(),
        }
    }

    fn mes_only() -> Lexicon {
        Lexicon::new(
            vec![
                entry("més", &["Vull més aigua."]),
                entry("mes", &["El juny fa calor."]),
            ],
            [("més", "mes")],
        )
        .unwrap()
    }

    #[test]
    fn masks_only_the_first_whole_word() {
        assert_eq!(mask_first("Deu ser tard.", "Deu").unwrap(), "_____ ser tard.");
        assert_eq!(
            mask_first("Si no ho proves, mai ho sabràs.", "ho").unwrap(),
            "Si no _____ proves, mai ho sabràs."
        );
    }

    #[test]
    fn masking_respects_word_boundaries_case_and_accents() {
        assert_eq!(mask_first("Han nascut dos bens.", "be"), None);
        assert_eq!(mask_first("Crec en un sol Déu.", "déu"), None);
        assert_eq!(mask_first("És el mes més llarg.", "més").unwrap(), "És el mes _____ llarg.");
        assert_eq!(mask_first("És el mes més llarg.", "mes").unwrap(), "És el _____ més llarg.");
    }

    #[test]
    fn single_pair_yields_single_question() {
        let questions = generate_questions(&mes_only(), 5, &mut StdRng::seed_from_u64(7));
        assert_eq!(questions.len(), 1);
        let question = &questions[0];
        assert_eq!(question.prompt, "Vull _____ aigua.");
        assert_eq!(question.answer, "més");
        assert_eq!(question.pair, "mes");
        let mut options = question.options.clone();
        options.sort();
        assert_eq!(options, ["mes".to_owned(), "més".to_owned()]);
    }

    #[test]
    fn never_exceeds_the_requested_count() {
        let lexicon = Lexicon::builtin();
        let mut rng = StdRng::seed_from_u64(42);
        for count in [0, 1, 10, 500] {
            let questions = generate_questions(&lexicon, count, &mut rng);
            assert!(questions.len() <= count);
        }
    }

    #[test]
    fn options_are_the_word_and_its_pair() {
        let lexicon = Lexicon::builtin();
        let questions = generate_questions(&lexicon, 500, &mut StdRng::seed_from_u64(1));
        assert!(!questions.is_empty());
        for question in &questions {
            assert_ne!(question.options[0], question.options[1]);
            assert!(question.is_option(&question.answer));
            assert!(question.is_option(&question.pair));
            assert_eq!(lexicon.pair_of(&question.answer), Some(&question.pair[..]));
            assert_eq!(question.prompt.matches(BLANK).count(), 1);
        }
    }

    #[test]
    fn words_without_pair_entries_contribute_nothing() {
        let lexicon = Lexicon::new(
            vec![
                entry("més", &["Vull més aigua."]),
                entry("sí", &["Va dir que sí."]),
            ],
            [("més", "mes")],
        )
        .unwrap();
        assert!(generate_questions(&lexicon, 10, &mut StdRng::seed_from_u64(3)).is_empty());
    }

    #[test]
    fn same_seed_same_quiz() {
        let lexicon = Lexicon::builtin();
        let first = generate_questions(&lexicon, 10, &mut StdRng::seed_from_u64(9));
        let second = generate_questions(&lexicon, 10, &mut StdRng::seed_from_u64(9));
        assert_eq!(first, second);
    }

    #[test]
    fn solution_fills_the_blank() {
        let questions = generate_questions(&mes_only(), 1, &mut StdRng::seed_from_u64(0));
        assert_eq!(questions[0].solution(), "Vull més aigua.");
    }
}
