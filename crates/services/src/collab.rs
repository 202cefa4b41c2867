//! Collaborator traits the trainer drives: presentation and audio output.

use thiserror::Error;

/// Feedback polarity for an answered prompt or a placed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Positive,
    Negative,
}

/// Short confirmation sound, distinct from word vocalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneKind {
    Success,
    Failure,
}

/// Audio playback failure. Playback is best-effort; the trainer logs these
/// and keeps going.
#[derive(Debug, Error)]
#[error("audio output failed: {0}")]
pub struct AudioError(pub String);

/// Both entries of the active pair, as shown in the comparison browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareView {
    pub category: String,
    pub front_text: String,
    pub front_pinyin: String,
    pub back_text: String,
    pub back_pinyin: String,
    /// One-based position over the full sequence, e.g. "3/98".
    pub position: String,
}

/// A single classification card. Deliberately carries no side marker; the
/// player has to hear or read the word to classify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: usize,
    pub text: String,
    pub pinyin: String,
}

/// Rendering surface for session output.
pub trait Presenter {
    fn show_pair(&mut self, view: &CompareView);
    fn show_cards(&mut self, cards: &[CardView]);
    fn pool_emptied(&mut self);
    /// Running score after every answered challenge question.
    fn show_score(&mut self, score: u32, total: u32);
    /// End-of-round scoreboard.
    fn show_summary(&mut self, score: u32, total: u32, percentage: u32, passed: bool);
    fn feedback(&mut self, kind: FeedbackKind, title: &str, message: &str);
}

/// Sound output for word vocalization and confirmation tones.
pub trait AudioSink {
    /// # Errors
    ///
    /// Returns `AudioError` when playback fails.
    fn vocalize(&mut self, text: &str) -> Result<(), AudioError>;

    /// # Errors
    ///
    /// Returns `AudioError` when playback fails.
    fn tone(&mut self, kind: ToneKind) -> Result<(), AudioError>;
}
