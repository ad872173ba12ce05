use std::fmt;

use lexicon::Lexicon;
use rand::Rng;

use crate::questions::{generate_questions, Question};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    InProgress,
    Corrected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mistake<'a> {
    pub index: usize,
    pub question: &'a Question,
    pub chosen: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("No s'han pogut generar preguntes. Revisa que els exemples continguen la paraula exacta.")]
    NoQuestions,

    #[error("No hi ha cap quiz en marxa. Escriu `quiz` per a començar.")]
    NoActiveQuiz,

    #[error("El quiz ja està corregit. Escriu `repeat` per a tornar-hi.")]
    AlreadyCorrected,

    #[error("El quiz encara no s'ha corregit.")]
    NotCorrected,

    #[error("La pregunta {index} no existeix (n'hi ha {len}).")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("«{choice}» no és una opció de la pregunta {index}.")]
    InvalidChoice { index: usize, choice: String },

    #[error("Has deixat {missing} sense contestar.")]
    Unanswered { missing: usize },
}

/// State of one user's quiz.
///
/// Every transition checks its preconditions before touching anything, so a
/// rejected transition leaves the session exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    answers: Vec<Option<String>>,
    score: Option<Score>,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.questions.is_empty() {
            Phase::Empty
        } else if self.score.is_some() {
            Phase::Corrected
        } else {
            Phase::InProgress
        }
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(index).and_then(|answer| answer.as_deref())
    }

    pub fn score(&self) -> Option<Score> {
        self.score
    }

    /// Replaces the session with a fresh set of questions, all unanswered.
    /// An empty set leaves the session empty.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        let answers = vec![None; questions.len()];
        let empty = questions.is_empty();
        *self = Self {
            questions,
            answers,
            score: None,
        };
        if empty {
            return Err(SessionError::NoQuestions);
        }
        Ok(())
    }

    pub fn new_quiz<R>(&mut self, lexicon: &Lexicon, count: usize, rng: &mut R) -> Result<(), SessionError>
    where
        R: Rng + ?Sized,
    {
        self.start(generate_questions(lexicon, count, rng))
    }

    /// Sets or clears (`None`) the answer to question `index`.
    pub fn set_answer(&mut self, index: usize, choice: Option<&str>) -> Result<(), SessionError> {
        match self.phase() {
            Phase::Empty => return Err(SessionError::NoActiveQuiz),
            Phase::Corrected => return Err(SessionError::AlreadyCorrected),
            Phase::InProgress => {}
        }
        let question = self
            .questions
            .get(index)
            .ok_or(SessionError::IndexOutOfRange {
                index,
                len: self.questions.len(),
            })?;
        if let Some(choice) = choice {
            if !question.is_option(choice) {
                return Err(SessionError::InvalidChoice {
                    index,
                    choice: choice.to_owned(),
                });
            }
        }
        self.answers[index] = choice.map(str::to_owned);
        Ok(())
    }

    pub fn unanswered(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_none())
            .map(|(index, _)| index)
            .collect()
    }

    /// Scores the quiz. Requires every question to be answered; correcting
    /// an already corrected quiz returns the same score.
    pub fn correct(&mut self) -> Result<Score, SessionError> {
        if self.phase() == Phase::Empty {
            return Err(SessionError::NoActiveQuiz);
        }
        let missing = self.unanswered().len();
        if missing > 0 {
            return Err(SessionError::Unanswered { missing });
        }
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.as_deref() == Some(&question.answer[..]))
            .count();
        let score = Score {
            correct,
            total: self.questions.len(),
        };
        self.score = Some(score);
        Ok(score)
    }

    /// Reopens a corrected quiz, keeping the answers given so far.
    pub fn repeat(&mut self) -> Result<(), SessionError> {
        match self.phase() {
            Phase::Corrected => {
                self.score = None;
                Ok(())
            }
            Phase::InProgress => Err(SessionError::NotCorrected),
            Phase::Empty => Err(SessionError::NoActiveQuiz),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Wrong or missing answers of a corrected quiz.
    pub fn mistakes(&self) -> Result<Vec<Mistake<'_>>, SessionError> {
        match self.phase() {
            Phase::Corrected => {}
            Phase::InProgress => return Err(SessionError::NotCorrected),
            Phase::Empty => return Err(SessionError::NoActiveQuiz),
        }
        Ok(self
            .questions
            .iter()
            .zip(&self.answers)
            .enumerate()
            .filter(|(_, (question, answer))| answer.as_deref() != Some(&question.answer[..]))
            .map(|(index, (question, answer))| Mistake {
                index,
                question,
                chosen: answer.as_deref(),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn question(answer: &str, pair: &str) -> Question {
        Question {
            prompt: "_____ exemple.".to_owned(),
            answer: answer.to_owned(),
            options: [pair.to_owned(), answer.to_owned()],
            pair: pair.to_owned(),
        }
    }

    fn started() -> QuizSession {
        let mut session = QuizSession::new();
        session
            .start(vec![question("més", "mes"), question("es", "és"), question("sé", "se")])
            .unwrap();
        session
    }

    #[test]
    fn starts_empty() {
        let mut session = QuizSession::new();
        assert_eq!(session.phase(), Phase::Empty);
        assert_eq!(session.set_answer(0, Some("més")), Err(SessionError::NoActiveQuiz));
        assert_eq!(session.correct(), Err(SessionError::NoActiveQuiz));
    }

    #[test]
    fn empty_generation_stays_empty() {
        let mut session = started();
        assert_eq!(session.start(Vec::new()), Err(SessionError::NoQuestions));
        assert_eq!(session.phase(), Phase::Empty);
    }

    #[test]
    fn new_quiz_from_lexicon() {
        let mut session = QuizSession::new();
        session
            .new_quiz(&Lexicon::builtin(), 10, &mut StdRng::seed_from_u64(5))
            .unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.questions().len(), 10);
        assert_eq!(session.unanswered().len(), 10);
    }

    #[test]
    fn rejects_invalid_answers_without_changing_state() {
        let mut session = started();
        session.set_answer(0, Some("més")).unwrap();
        assert_eq!(
            session.set_answer(3, Some("més")),
            Err(SessionError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert!(matches!(
            session.set_answer(0, Some("sí")),
            Err(SessionError::InvalidChoice { index: 0, .. })
        ));
        assert_eq!(session.answer(0), Some("més"));
    }

    #[test]
    fn answers_can_be_cleared() {
        let mut session = started();
        session.set_answer(1, Some("és")).unwrap();
        session.set_answer(1, None).unwrap();
        assert_eq!(session.answer(1), None);
        assert_eq!(session.unanswered(), vec![0, 1, 2]);
    }

    #[test]
    fn correct_requires_every_answer() {
        let mut session = started();
        session.set_answer(0, Some("més")).unwrap();
        assert_eq!(session.correct(), Err(SessionError::Unanswered { missing: 2 }));
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.score(), None);
    }

    #[test]
    fn correct_counts_matches_and_is_idempotent() {
        let mut session = started();
        session.set_answer(0, Some("més")).unwrap();
        session.set_answer(1, Some("és")).unwrap();
        session.set_answer(2, Some("sé")).unwrap();
        let first = session.correct().unwrap();
        assert_eq!(first, Score { correct: 2, total: 3 });
        assert_eq!(session.phase(), Phase::Corrected);
        assert_eq!(session.correct().unwrap(), first);
        assert_eq!(first.to_string(), "2/3");
    }

    #[test]
    fn corrected_quiz_is_frozen_until_repeated() {
        let mut session = started();
        for (index, choice) in [(0, "mes"), (1, "es"), (2, "se")] {
            session.set_answer(index, Some(choice)).unwrap();
        }
        session.correct().unwrap();
        assert_eq!(session.set_answer(0, Some("més")), Err(SessionError::AlreadyCorrected));

        session.repeat().unwrap();
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.answer(0), Some("mes"));
        session.set_answer(0, Some("més")).unwrap();
        assert_eq!(session.correct().unwrap().correct, 2);
    }

    #[test]
    fn repeat_needs_a_corrected_quiz() {
        let mut session = started();
        assert_eq!(session.repeat(), Err(SessionError::NotCorrected));
        session.reset();
        assert_eq!(session.repeat(), Err(SessionError::NoActiveQuiz));
    }

    #[test]
    fn mistakes_list_wrong_answers() {
        let mut session = started();
        for (index, choice) in [(0, "mes"), (1, "es"), (2, "se")] {
            session.set_answer(index, Some(choice)).unwrap();
        }
        assert_eq!(session.mistakes(), Err(SessionError::NotCorrected));
        session.correct().unwrap();
        let mistakes = session.mistakes().unwrap();
        assert_eq!(
            mistakes.iter().map(|mistake| mistake.index).collect::<Vec<usize>>(),
            vec![0, 2]
        );
        assert_eq!(mistakes[0].chosen, Some("mes"));
    }
}
