//! Classification game: sort shuffled word cards onto their nasal side.

use rand::Rng;
use rand::seq::SliceRandom;

use pairs_core::model::Side;
use pairs_core::repository::PairRepository;

use crate::collab::CardView;
use crate::error::SessionError;
use crate::tracker::{self, REVIEW_FLOOR, REVIEW_TARGET};

/// Pairs drawn for a fresh game, yielding twice as many cards.
pub const FRESH_GAME_PAIRS: usize = 8;

/// Outcome of placing one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Correct side; `remaining` cards are still on the board.
    Placed { remaining: usize },
    /// Wrong side; the card stays on the board.
    Rejected,
    /// Correct side and the board is now empty.
    Finished,
}

#[derive(Debug, Clone)]
struct GameCard {
    id: usize,
    side: Side,
    text: String,
    pinyin: String,
    placed: bool,
}

/// One classification round. Cards keep their shuffled order; placement only
/// flags them, so card ids stay stable for the round.
#[derive(Debug, Clone)]
pub struct ClassifyGame {
    cards: Vec<GameCard>,
}

impl ClassifyGame {
    /// Fresh game over a random draw of pairs.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the repository has no records.
    pub fn fresh(repo: &PairRepository, rng: &mut impl Rng) -> Result<Self, SessionError> {
        let indices = repo.random_sample(rng, FRESH_GAME_PAIRS, &[]);
        Self::from_indices(repo, rng, &indices)
    }

    /// Review game biased toward mistaken pairs.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when the repository has no records.
    pub fn review(repo: &PairRepository, rng: &mut impl Rng) -> Result<Self, SessionError> {
        let indices = tracker::review_set(repo, rng, REVIEW_FLOOR, REVIEW_TARGET);
        Self::from_indices(repo, rng, &indices)
    }

    fn from_indices(
        repo: &PairRepository,
        rng: &mut impl Rng,
        indices: &[usize],
    ) -> Result<Self, SessionError> {
        let mut cards = Vec::with_capacity(indices.len() * 2);
        for &index in indices {
            let Some(record) = repo.get(index) else {
                continue;
            };
            for side in [Side::Front, Side::Back] {
                let entry = record.entry(side);
                cards.push(GameCard {
                    id: cards.len(),
                    side,
                    text: entry.text.clone(),
                    pinyin: entry.pinyin.clone(),
                    placed: false,
                });
            }
        }
        if cards.is_empty() {
            return Err(SessionError::Empty);
        }
        cards.shuffle(rng);
        Ok(Self { cards })
    }

    /// Place card `card_id` onto `target`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownCard` when the id does not name a card
    /// still on the board.
    pub fn place(&mut self, card_id: usize, target: Side) -> Result<Placement, SessionError> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == card_id && !c.placed)
            .ok_or(SessionError::UnknownCard(card_id))?;
        if card.side != target {
            return Ok(Placement::Rejected);
        }
        card.placed = true;
        let remaining = self.cards.iter().filter(|c| !c.placed).count();
        if remaining == 0 {
            Ok(Placement::Finished)
        } else {
            Ok(Placement::Placed { remaining })
        }
    }

    /// Cards still on the board, in their shuffled order.
    #[must_use]
    pub fn card_views(&self) -> Vec<CardView> {
        self.cards
            .iter()
            .filter(|c| !c.placed)
            .map(|c| CardView {
                id: c.id,
                text: c.text.clone(),
                pinyin: c.pinyin.clone(),
            })
            .collect()
    }

    /// Text of a card still on the board, for vocalization.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownCard` when the id does not name a card
    /// still on the board.
    pub fn card_text(&self, card_id: usize) -> Result<&str, SessionError> {
        self.cards
            .iter()
            .find(|c| c.id == card_id && !c.placed)
            .map(|c| c.text.as_str())
            .ok_or(SessionError::UnknownCard(card_id))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.cards.iter().filter(|c| !c.placed).count()
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
    fn fresh_game_deals_two_cards_per_pair() {
        let repo = build_repo(20);
        let mut rng = StdRng::seed_from_u64(3);
        let game = ClassifyGame::fresh(&repo, &mut rng).unwrap();
        assert_eq!(game.remaining(), FRESH_GAME_PAIRS * 2);
    }

    #[test]
    fn small_repository_still_deals_a_board() {
        let repo = build_repo(3);
        let mut rng = StdRng::seed_from_u64(3);
        let game = ClassifyGame::fresh(&repo, &mut rng).unwrap();
        assert_eq!(game.remaining(), 6);
    }

    #[test]
    fn empty_repository_is_an_error() {
        let repo = PairRepository::new();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(matches!(
            ClassifyGame::fresh(&repo, &mut rng),
            Err(SessionError::Empty)
        ));
    }

    #[test]
    fn review_game_includes_every_mistaken_pair() {
        let mut repo = build_repo(20);
        repo.record_mistake(4, fixed_now()).unwrap();
        repo.record_mistake(9, fixed_now()).unwrap();

        let mut rng = StdRng::seed_from_u64(3);
        let game = ClassifyGame::review(&repo, &mut rng).unwrap();
        assert_eq!(game.remaining(), REVIEW_TARGET * 2);

        let texts: Vec<String> = game.card_views().into_iter().map(|c| c.text).collect();
        assert!(texts.contains(&"f4".to_string()));
        assert!(texts.contains(&"b9".to_string()));
    }

    #[test]
    fn correct_placement_removes_card_and_wrong_keeps_it() {
        let repo = build_repo(2);
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = ClassifyGame::fresh(&repo, &mut rng).unwrap();

        let card = game.card_views()[0].clone();
        let side = if card.text.starts_with('f') {
            Side::Front
        } else {
            Side::Back
        };

        assert_eq!(game.place(card.id, side.opposite()).unwrap(), Placement::Rejected);
        assert_eq!(game.remaining(), 4);
        assert_eq!(
            game.place(card.id, side).unwrap(),
            Placement::Placed { remaining: 3 }
        );

        // the placed card is off the board for every operation
        assert!(matches!(
            game.place(card.id, side),
            Err(SessionError::UnknownCard(_))
        ));
        assert!(game.card_text(card.id).is_err());
    }

    #[test]
    fn clearing_the_board_finishes_the_round() {
        let repo = build_repo(1);
        let mut rng = StdRng::seed_from_u64(3);
        let mut game = ClassifyGame::fresh(&repo, &mut rng).unwrap();

        let cards = game.card_views();
        let mut last = Placement::Rejected;
        for card in cards {
            let side = if card.text.starts_with('f') {
                Side::Front
            } else {
                Side::Back
            };
            last = game.place(card.id, side).unwrap();
        }
        assert_eq!(last, Placement::Finished);
        assert_eq!(game.remaining(), 0);
    }

    #[test]
    fn card_views_never_reveal_the_side() {
        let repo = build_repo(4);
        let mut rng = StdRng::seed_from_u64(3);
        let game = ClassifyGame::fresh(&repo, &mut rng).unwrap();
        for card in game.card_views() {
            assert!(!card.text.is_empty());
        }
    }
}
