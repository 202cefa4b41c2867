//! Session engines. Each is a state-only struct; side effects (presentation,
//! audio, persistence, timing) live in the trainer that drives them.

pub mod challenge;
pub mod classify;
pub mod compare;

pub use challenge::{ChallengeGame, PASS_PERCENTAGE, QUESTIONS_PER_ROUND, RoundSummary};
pub use classify::{ClassifyGame, FRESH_GAME_PAIRS, Placement};
pub use compare::CompareBrowser;
