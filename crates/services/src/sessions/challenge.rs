//! Discrimination challenge: hear a word, answer which nasal side it is.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;

use pairs_core::model::Side;
use pairs_core::repository::PairRepository;

use crate::error::SessionError;

/// Questions per round.
pub const QUESTIONS_PER_ROUND: u32 = 10;
/// Minimum percentage counted as a pass.
pub const PASS_PERCENTAGE: u32 = 80;

/// The prompt currently awaiting an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub pair_index: usize,
    pub prompted_side: Side,
}

/// Result of answering one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answered {
    pub correct: bool,
    pub correct_side: Side,
    pub score: u32,
    pub questions_asked: u32,
}

/// End-of-round scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub passed: bool,
}

/// One challenge round over a fixed question pool. Questions are drawn with
/// replacement, so a pool of one record is still a full round.
#[derive(Debug, Clone)]
pub struct ChallengeGame {
    pool: Vec<usize>,
    question: Option<Question>,
    score: u32,
    asked: u32,
}

impl ChallengeGame {
    /// Fresh round over the whole repository.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the repository has no records.
    pub fn fresh(repo: &PairRepository) -> Result<Self, SessionError> {
        if repo.is_empty() {
            return Err(SessionError::Empty);
        }
        Ok(Self::over((0..repo.len()).collect()))
    }

    /// Review round over the mistaken records only. `None` when the mistake
    /// book is empty.
    #[must_use]
    pub fn review(repo: &PairRepository) -> Option<Self> {
        let pool = repo.mistaken_indices();
        if pool.is_empty() {
            return None;
        }
        Some(Self::over(pool))
    }

    fn over(pool: Vec<usize>) -> Self {
        Self {
            pool,
            question: None,
            score: 0,
            asked: 0,
        }
    }

    /// Draw the next question and return the text to vocalize.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the pool references no records.
    pub fn next_question(
        &mut self,
        repo: &PairRepository,
        rng: &mut impl Rng,
    ) -> Result<(Question, String), SessionError> {
        let &pair_index = self.pool.choose(rng).ok_or(SessionError::Empty)?;
        let record = repo.get(pair_index).ok_or(SessionError::Empty)?;
        let prompted_side = if rng.random_bool(0.5) {
            Side::Front
        } else {
            Side::Back
        };
        let question = Question {
            pair_index,
            prompted_side,
        };
        self.question = Some(question);
        Ok((question, record.entry(prompted_side).text.clone()))
    }

    /// Judge the player's answer. A wrong answer records a mistake against
    /// the prompted pair.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` when no prompt is outstanding.
    pub fn answer(
        &mut self,
        repo: &mut PairRepository,
        side: Side,
        now: DateTime<Utc>,
    ) -> Result<Answered, SessionError> {
        let question = self.question.take().ok_or(SessionError::NoQuestion)?;
        let correct = side == question.prompted_side;
        if correct {
            self.score += 1;
        } else {
            repo.record_mistake(question.pair_index, now)?;
        }
        self.asked += 1;
        Ok(Answered {
            correct,
            correct_side: question.prompted_side,
            score: self.score,
            questions_asked: self.asked,
        })
    }

    /// Text of the outstanding prompt, for replay.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoQuestion` when no prompt is outstanding.
    pub fn prompt_text(&self, repo: &PairRepository) -> Result<String, SessionError> {
        let question = self.question.ok_or(SessionError::NoQuestion)?;
        let record = repo
            .get(question.pair_index)
            .ok_or(SessionError::NoQuestion)?;
        Ok(record.entry(question.prompted_side).text.clone())
    }

    #[must_use]
    pub fn finished(&self) -> bool {
        self.asked >= QUESTIONS_PER_ROUND
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn questions_asked(&self) -> u32 {
        self.asked
    }

    #[must_use]
    pub fn summary(&self) -> RoundSummary {
        let percentage = if self.asked == 0 {
            0
        } else {
            (self.score * 100 + self.asked / 2) / self.asked
        };
        RoundSummary {
            score: self.score,
            total: self.asked,
            percentage,
            passed: percentage >= PASS_PERCENTAGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairs_core::model::{WordEntry, WordPairRecord};
    use pairs_core::time::fixed_now;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_repo(n: usize) -> PairRepository {
        let records = (0..n)
            .map(|i| {
                WordPairRecord::new(
                    "cat",
                    WordEntry::new(format!("f{i}"), "p"),
                    WordEntry::new(format!("b{i}"), "p"),
                )
            })
            .collect();
        let mut repo = PairRepository::new();
        repo.load(records);
        repo
    }

    #[test]
    fn question_vocalizes_the_prompted_side() {
        let repo = build_repo(5);
        let mut game = ChallengeGame::fresh(&repo).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let (question, text) = game.next_question(&repo, &mut rng).unwrap();
        let expected = repo
            .get(question.pair_index)
            .unwrap()
            .entry(question.prompted_side)
            .text
            .clone();
        assert_eq!(text, expected);
        assert_eq!(game.prompt_text(&repo).unwrap(), expected);
    }

    #[test]
    fn correct_answer_scores_and_wrong_records_a_mistake() {
        let mut repo = build_repo(5);
        let mut game = ChallengeGame::fresh(&repo).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let (question, _) = game.next_question(&repo, &mut rng).unwrap();
        let outcome = game
            .answer(&mut repo, question.prompted_side, fixed_now())
            .unwrap();
        assert!(outcome.correct);
        assert_eq!(outcome.score, 1);
        assert!(repo.mistaken_indices().is_empty());

        let (question, _) = game.next_question(&repo, &mut rng).unwrap();
        let outcome = game
            .answer(&mut repo, question.prompted_side.opposite(), fixed_now())
            .unwrap();
        assert!(!outcome.correct);
        assert_eq!(outcome.correct_side, question.prompted_side);
        assert_eq!(outcome.score, 1);
        assert_eq!(outcome.questions_asked, 2);
        assert_eq!(repo.mistaken_indices(), vec![question.pair_index]);
    }

    #[test]
    fn answering_without_a_question_is_an_error() {
        let mut repo = build_repo(2);
        let mut game = ChallengeGame::fresh(&repo).unwrap();
        assert!(matches!(
            game.answer(&mut repo, Side::Front, fixed_now()),
            Err(SessionError::NoQuestion)
        ));
        assert!(game.prompt_text(&repo).is_err());
    }

    #[test]
    fn round_finishes_after_ten_questions() {
        let mut repo = build_repo(3);
        let mut game = ChallengeGame::fresh(&repo).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..QUESTIONS_PER_ROUND {
            assert!(!game.finished());
            let (question, _) = game.next_question(&repo, &mut rng).unwrap();
            game.answer(&mut repo, question.prompted_side, fixed_now())
                .unwrap();
        }
        assert!(game.finished());

        let summary = game.summary();
        assert_eq!(summary.score, 10);
        assert_eq!(summary.total, 10);
        assert_eq!(summary.percentage, 100);
        assert!(summary.passed);
    }

    #[test]
    fn pass_threshold_is_eighty_percent() {
        let mut repo = build_repo(3);
        let mut game = ChallengeGame::fresh(&repo).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for i in 0..QUESTIONS_PER_ROUND {
            let (question, _) = game.next_question(&repo, &mut rng).unwrap();
            let side = if i < 8 {
                question.prompted_side
            } else {
                question.prompted_side.opposite()
            };
            game.answer(&mut repo, side, fixed_now()).unwrap();
        }

        let summary = game.summary();
        assert_eq!(summary.percentage, 80);
        assert!(summary.passed);
    }

    #[test]
    fn review_round_draws_only_from_mistaken_pairs() {
        let mut repo = build_repo(10);
        assert!(ChallengeGame::review(&repo).is_none());

        repo.record_mistake(2, fixed_now()).unwrap();
        repo.record_mistake(6, fixed_now()).unwrap();
        let mut game = ChallengeGame::review(&repo).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..20 {
            let (question, _) = game.next_question(&repo, &mut rng).unwrap();
            assert!(question.pair_index == 2 || question.pair_index == 6);
        }
    }
}
