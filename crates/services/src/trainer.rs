//! Trainer orchestrator: owns the repository, the active session engine and
//! the collaborators, and turns player commands into effects.

use pairs_core::model::{Section, Side, WordPairRecord};
use pairs_core::repository::{MistakeOrder, PairRepository};
use pairs_core::time::Clock;
use storage::progress::{self, SessionCounters};
use storage::store::KeyValueStore;

use crate::collab::{AudioSink, FeedbackKind, Presenter, ToneKind};
use crate::error::SessionError;
use crate::schedule::{
    ADVANCE_DELAY, DelayedCommand, RETURN_HOME_DELAY, RoundId, ScheduledTask, VOCALIZE_DELAY,
};
use crate::sessions::compare::{self, CompareBrowser};
use crate::sessions::{ChallengeGame, ClassifyGame, Placement};

/// Drives the three session engines against one repository.
///
/// Engines hold state only; all presentation, audio, persistence and timing
/// flow through here. Timed effects are returned as [`ScheduledTask`]s for
/// the runtime to deliver back via [`Trainer::fire`] after the delay.
pub struct Trainer {
    repo: PairRepository,
    store: Box<dyn KeyValueStore>,
    presenter: Box<dyn Presenter>,
    audio: Box<dyn AudioSink>,
    clock: Clock,
    section: Section,
    counters: SessionCounters,
    round: RoundId,
    last_compare_index: Option<usize>,
    saved_section: Option<Section>,
    compare: CompareBrowser,
    classify: Option<ClassifyGame>,
    challenge: Option<ChallengeGame>,
}

impl Trainer {
    /// Build a trainer over `records`, restoring any persisted progress from
    /// the store.
    #[must_use]
    pub fn new(
        records: Vec<WordPairRecord>,
        store: Box<dyn KeyValueStore>,
        presenter: Box<dyn Presenter>,
        audio: Box<dyn AudioSink>,
        clock: Clock,
    ) -> Self {
        let mut repo = PairRepository::new();
        repo.load(records);
        let restored = progress::load_progress(store.as_ref(), &mut repo);
        Self {
            repo,
            store,
            presenter,
            audio,
            clock,
            section: Section::Home,
            counters: restored.counters,
            round: 0,
            last_compare_index: restored.active_index,
            saved_section: restored.section,
            compare: CompareBrowser::new(),
            classify: None,
            challenge: None,
        }
    }

    /// Reopen the section the previous session ended in.
    ///
    /// # Errors
    ///
    /// Propagates the reopened session's own errors.
    pub fn resume(&mut self) -> Result<Option<ScheduledTask>, SessionError> {
        match self.saved_section.take() {
            Some(Section::Compare) => {
                self.open_compare()?;
                Ok(None)
            }
            Some(Section::Classify) => {
                self.start_classify(false)?;
                Ok(None)
            }
            Some(Section::Challenge) => self.start_challenge(false),
            Some(Section::Home) | None => Ok(None),
        }
    }

    /// Abandon the active session and return to the home section.
    pub fn go_home(&mut self) {
        self.compare.close();
        self.classify = None;
        self.challenge = None;
        self.bump_round();
        self.section = Section::Home;
        self.save();
    }

    //
    // ─── COMPARISON BROWSER ────────────────────────────────────────────────────
    //

    /// Open the comparison browser at the last browsing position, or the
    /// first unlearned pair.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when no records are loaded.
    pub fn open_compare(&mut self) -> Result<(), SessionError> {
        let index = self.compare.open(&self.repo, self.last_compare_index)?;
        self.enter(Section::Compare);
        self.show_pair(index)
    }

    /// Open the comparison browser at the first mistaken pair. An empty
    /// mistake book is a no-op with positive feedback.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when no records are loaded.
    pub fn open_compare_review(&mut self) -> Result<(), SessionError> {
        match self.repo.mistaken_indices().first().copied() {
            Some(index) => self.open_compare_at(index),
            None => {
                self.presenter
                    .feedback(FeedbackKind::Positive, "all clear", "no mistakes to review");
                Ok(())
            }
        }
    }

    /// Open the comparison browser at a specific record, e.g. one picked from
    /// the mistake book.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when no records are loaded.
    pub fn open_compare_at(&mut self, index: usize) -> Result<(), SessionError> {
        let index = self.compare.open(&self.repo, Some(index))?;
        self.enter(Section::Compare);
        self.show_pair(index)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotShowing` when the browser is not open.
    pub fn compare_next(&mut self) -> Result<(), SessionError> {
        let index = self.compare.next(&self.repo)?;
        self.show_pair(index)
    }

    /// # Errors
    ///
    /// Returns `SessionError::NotShowing` when the browser is not open.
    pub fn compare_previous(&mut self) -> Result<(), SessionError> {
        let index = self.compare.previous(&self.repo)?;
        self.show_pair(index)
    }

    /// Add the shown pair to the mistake book.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotShowing` when the browser is not open.
    pub fn compare_mark_mistake(&mut self) -> Result<(), SessionError> {
        let index = self.compare.current().ok_or(SessionError::NotShowing)?;
        self.repo.record_mistake(index, self.clock.now())?;
        self.presenter.feedback(
            FeedbackKind::Negative,
            "noted",
            "added to the mistake book",
        );
        self.save();
        Ok(())
    }

    /// Speak one side of the shown pair.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotShowing` when the browser is not open.
    pub fn play_side(&mut self, side: Side) -> Result<(), SessionError> {
        let index = self.compare.current().ok_or(SessionError::NotShowing)?;
        let record = self
            .repo
            .get(index)
            .ok_or(SessionError::NotShowing)?;
        let text = record.entry(side).text.clone();
        self.play(&text);
        Ok(())
    }

    fn show_pair(&mut self, index: usize) -> Result<(), SessionError> {
        self.last_compare_index = Some(index);
        self.repo.mark_learned(index)?;
        if let Some(view) = compare::view(&self.repo, index) {
            self.presenter.show_pair(&view);
        }
        self.save();
        Ok(())
    }

    //
    // ─── CLASSIFICATION GAME ───────────────────────────────────────────────────
    //

    /// Deal a classification board. A review with an empty mistake book is a
    /// no-op with positive feedback.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when no records are loaded.
    pub fn start_classify(&mut self, review: bool) -> Result<(), SessionError> {
        if review && self.repo.mistaken_indices().is_empty() {
            self.presenter
                .feedback(FeedbackKind::Positive, "all clear", "no mistakes to review");
            return Ok(());
        }
        let mut rng = rand::rng();
        let game = if review {
            ClassifyGame::review(&self.repo, &mut rng)?
        } else {
            ClassifyGame::fresh(&self.repo, &mut rng)?
        };
        self.enter(Section::Classify);
        self.presenter.show_cards(&game.card_views());
        self.classify = Some(game);
        self.save();
        Ok(())
    }

    /// Place a card onto a side. Clearing the board schedules the return to
    /// home.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveGame` outside a game and
    /// `SessionError::UnknownCard` for an id not on the board.
    pub fn place_card(
        &mut self,
        card_id: usize,
        target: Side,
    ) -> Result<Option<ScheduledTask>, SessionError> {
        let game = self.classify.as_mut().ok_or(SessionError::NoActiveGame)?;
        let placement = game.place(card_id, target)?;
        match placement {
            Placement::Rejected => {
                self.chime(ToneKind::Failure);
                self.presenter
                    .feedback(FeedbackKind::Negative, "not quite", "try the other side");
                Ok(None)
            }
            Placement::Placed { .. } => {
                let cards = game.card_views();
                self.chime(ToneKind::Success);
                self.presenter.show_cards(&cards);
                Ok(None)
            }
            Placement::Finished => {
                self.chime(ToneKind::Success);
                self.presenter.pool_emptied();
                self.presenter
                    .feedback(FeedbackKind::Positive, "well done", "board cleared");
                Ok(Some(
                    self.schedule(RETURN_HOME_DELAY, DelayedCommand::ReturnHome),
                ))
            }
        }
    }

    /// Speak a card still on the board.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveGame` outside a game and
    /// `SessionError::UnknownCard` for an id not on the board.
    pub fn play_card(&mut self, card_id: usize) -> Result<(), SessionError> {
        let game = self.classify.as_ref().ok_or(SessionError::NoActiveGame)?;
        let text = game.card_text(card_id)?.to_string();
        self.play(&text);
        Ok(())
    }

    //
    // ─── DISCRIMINATION CHALLENGE ──────────────────────────────────────────────
    //

    /// Start a challenge round and schedule its first prompt. A review with
    /// an empty mistake book is a no-op with positive feedback.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Empty` when no records are loaded.
    pub fn start_challenge(
        &mut self,
        review: bool,
    ) -> Result<Option<ScheduledTask>, SessionError> {
        let game = if review {
            match ChallengeGame::review(&self.repo) {
                Some(game) => game,
                None => {
                    self.presenter.feedback(
                        FeedbackKind::Positive,
                        "all clear",
                        "no mistakes to review",
                    );
                    return Ok(None);
                }
            }
        } else {
            ChallengeGame::fresh(&self.repo)?
        };
        self.enter(Section::Challenge);
        self.counters = SessionCounters::default();
        self.challenge = Some(game);
        let task = self.ask_question()?;
        self.save();
        Ok(Some(task))
    }

    /// Judge the player's answer and schedule the advance to the next
    /// question or the summary.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveGame` outside a round and
    /// `SessionError::NoQuestion` when no prompt is outstanding.
    pub fn answer_challenge(&mut self, side: Side) -> Result<ScheduledTask, SessionError> {
        let now = self.clock.now();
        let game = self.challenge.as_mut().ok_or(SessionError::NoActiveGame)?;
        let outcome = game.answer(&mut self.repo, side, now)?;
        self.counters = SessionCounters {
            score: outcome.score,
            questions_asked: outcome.questions_asked,
        };
        if outcome.correct {
            self.chime(ToneKind::Success);
            self.presenter
                .feedback(FeedbackKind::Positive, "correct", "nice ear");
        } else {
            self.chime(ToneKind::Failure);
            let message = format!("that was a {}", outcome.correct_side.label());
            self.presenter
                .feedback(FeedbackKind::Negative, "not quite", &message);
        }
        self.presenter
            .show_score(outcome.score, outcome.questions_asked);
        self.save();
        Ok(self.schedule(ADVANCE_DELAY, DelayedCommand::Advance))
    }

    /// Speak the outstanding prompt again.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveGame` outside a round and
    /// `SessionError::NoQuestion` when no prompt is outstanding.
    pub fn replay_prompt(&mut self) -> Result<(), SessionError> {
        let game = self.challenge.as_ref().ok_or(SessionError::NoActiveGame)?;
        let text = game.prompt_text(&self.repo)?;
        self.play(&text);
        Ok(())
    }

    fn ask_question(&mut self) -> Result<ScheduledTask, SessionError> {
        let game = self.challenge.as_mut().ok_or(SessionError::NoActiveGame)?;
        let mut rng = rand::rng();
        let (_, text) = game.next_question(&self.repo, &mut rng)?;
        Ok(self.schedule(VOCALIZE_DELAY, DelayedCommand::Vocalize(text)))
    }

    //
    // ─── SCHEDULED DELIVERY ────────────────────────────────────────────────────
    //

    /// Deliver a task whose delay has elapsed. Tasks from an ended round are
    /// dropped silently.
    ///
    /// # Errors
    ///
    /// Propagates errors from the advanced session.
    pub fn fire(&mut self, task: ScheduledTask) -> Result<Option<ScheduledTask>, SessionError> {
        if task.round != self.round {
            tracing::debug!(task_round = task.round, current = self.round, "dropping stale task");
            return Ok(None);
        }
        match task.command {
            DelayedCommand::Vocalize(text) => {
                self.play(&text);
                Ok(None)
            }
            DelayedCommand::Advance => {
                let game = self.challenge.as_ref().ok_or(SessionError::NoActiveGame)?;
                if game.finished() {
                    let summary = game.summary();
                    self.presenter.show_summary(
                        summary.score,
                        summary.total,
                        summary.percentage,
                        summary.passed,
                    );
                    Ok(Some(
                        self.schedule(RETURN_HOME_DELAY, DelayedCommand::ReturnHome),
                    ))
                } else {
                    self.ask_question().map(Some)
                }
            }
            DelayedCommand::ReturnHome => {
                self.go_home();
                Ok(None)
            }
        }
    }

    //
    // ─── MISTAKE BOOK ──────────────────────────────────────────────────────────
    //

    /// Mistaken records with their indices, in the requested order.
    #[must_use]
    pub fn mistake_book(&self, order: MistakeOrder) -> Vec<(usize, &WordPairRecord)> {
        self.repo
            .mistake_book(order)
            .into_iter()
            .filter_map(|i| self.repo.get(i).map(|r| (i, r)))
            .collect()
    }

    /// Drop a record from the mistake book.
    ///
    /// # Errors
    ///
    /// Returns a repository error for an unknown index.
    pub fn remove_mistake(&mut self, index: usize) -> Result<(), SessionError> {
        self.repo.clear_mistakes(index)?;
        self.save();
        Ok(())
    }

    //
    // ─── ACCESSORS AND INTERNALS ───────────────────────────────────────────────
    //

    #[must_use]
    pub fn repo(&self) -> &PairRepository {
        &self.repo
    }

    #[must_use]
    pub fn section(&self) -> Section {
        self.section
    }

    #[must_use]
    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    fn enter(&mut self, section: Section) {
        self.bump_round();
        self.section = section;
        if section != Section::Compare {
            self.compare.close();
        }
        if section != Section::Classify {
            self.classify = None;
        }
        if section != Section::Challenge {
            self.challenge = None;
        }
    }

    fn schedule(&self, delay: std::time::Duration, command: DelayedCommand) -> ScheduledTask {
        ScheduledTask::new(self.round, delay, command)
    }

    fn bump_round(&mut self) {
        self.round += 1;
    }

    // The browsing pointer is sticky: saves from other sections must not
    // reset it.
    fn save(&mut self) {
        progress::save_progress(
            self.store.as_mut(),
            &self.repo,
            self.counters,
            self.section,
            self.last_compare_index.unwrap_or(0),
        );
    }

    fn play(&mut self, text: &str) {
        if let Err(err) = self.audio.vocalize(text) {
            tracing::warn!(%err, "vocalization failed, continuing");
        }
    }

    fn chime(&mut self, kind: ToneKind) {
        if let Err(err) = self.audio.tone(kind) {
            tracing::warn!(%err, "tone playback failed, continuing");
        }
    }
}
